/// Implements [`Decode`](crate::Decode) for a struct from a field list.
///
/// Each entry is one of:
/// - `field`: looked up by its own name,
/// - `field = "key"`: looked up by `key`,
/// - `..field`: embedded struct whose fields join the outer namespace;
///   on a non-struct field it behaves like plain `field`.
///
/// ```
/// use map_decode::decode_fields;
///
/// #[derive(Default)]
/// struct UrlBook {
///     title: String,
///     isbn: String,
/// }
///
/// #[derive(Default)]
/// struct OreillyBook {
///     url_book: UrlBook,
///     isbn13: String,
/// }
///
/// decode_fields!(UrlBook { title = "Title", isbn = "ISBN" });
/// decode_fields!(OreillyBook { ..url_book, isbn13 = "ISBN13" });
/// ```
#[macro_export]
macro_rules! decode_fields {
    (@push $this:ident, $out:ident; ) => {};
    (@push $this:ident, $out:ident; .. $field:ident $(, $($rest:tt)*)?) => {
        $out.push($crate::Field::embedded(stringify!($field), &mut $this.$field));
        $crate::decode_fields!(@push $this, $out; $($($rest)*)?);
    };
    (@push $this:ident, $out:ident; $field:ident = $key:literal $(, $($rest:tt)*)?) => {
        $out.push($crate::Field::keyed(stringify!($field), $key, &mut $this.$field));
        $crate::decode_fields!(@push $this, $out; $($($rest)*)?);
    };
    (@push $this:ident, $out:ident; $field:ident $(, $($rest:tt)*)?) => {
        $out.push($crate::Field::new(stringify!($field), &mut $this.$field));
        $crate::decode_fields!(@push $this, $out; $($($rest)*)?);
    };

    ($ty:ty { $($body:tt)* }) => {
        impl $crate::Decode for $ty {
            fn kind(&self) -> $crate::Kind {
                $crate::Kind::Struct
            }

            fn fields(&mut self) -> ::std::vec::Vec<$crate::Field<'_>> {
                let mut fields = ::std::vec::Vec::new();
                $crate::decode_fields!(@push self, fields; $($body)*);
                fields
            }
        }
    };
}
