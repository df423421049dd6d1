use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;

/// Primitive category of a field's type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    String,
    Bool,
    Int,
    Float,
    List,
    Struct,
    Optional,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::String => "string",
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Float => "float",
            Kind::List => "list",
            Kind::Struct => "struct",
            Kind::Optional => "optional",
        };
        f.write_str(name)
    }
}

/// A parsed source value, ready to be stored into a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scalar {
    String(String),
    Bool(bool),
    Int(i64),
}

/// Describes how a type takes part in decoding.
///
/// Struct types list their fields (usually through
/// [`decode_fields!`](crate::decode_fields)); scalar types accept a
/// [`Scalar`] of the matching variant.
pub trait Decode {
    fn kind(&self) -> Kind;

    /// Field table of a struct-kinded value, in declaration order.
    fn fields(&mut self) -> Vec<Field<'_>> {
        Vec::new()
    }

    /// Kind of the wrapped type for `Kind::Optional` values.
    fn pointee_kind(&self) -> Option<Kind> {
        None
    }

    /// Writes `value` into `self`. Returns false when the value does not fit
    /// and `self` was left untouched.
    fn store(&mut self, value: Scalar) -> bool {
        let _ = value;
        false
    }
}

/// One entry of a struct's field table.
pub struct Field<'a> {
    pub name: &'static str,
    /// Declared lookup key; `None` or empty falls back to `name`.
    pub key: Option<&'static str>,
    /// Embedded fields promote their own fields into the enclosing namespace.
    pub embedded: bool,
    pub value: &'a mut dyn Decode,
}

impl<'a> Field<'a> {
    pub fn new(name: &'static str, value: &'a mut dyn Decode) -> Self {
        Field {
            name,
            key: None,
            embedded: false,
            value,
        }
    }

    pub fn keyed(name: &'static str, key: &'static str, value: &'a mut dyn Decode) -> Self {
        Field {
            key: Some(key),
            ..Field::new(name, value)
        }
    }

    pub fn embedded(name: &'static str, value: &'a mut dyn Decode) -> Self {
        Field {
            embedded: true,
            ..Field::new(name, value)
        }
    }

    pub fn lookup_key(&self) -> &'static str {
        match self.key {
            Some(key) if !key.is_empty() => key,
            _ => self.name,
        }
    }
}

impl fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("key", &self.key)
            .field("embedded", &self.embedded)
            .field("kind", &self.value.kind())
            .finish()
    }
}

impl Decode for String {
    fn kind(&self) -> Kind {
        Kind::String
    }

    fn store(&mut self, value: Scalar) -> bool {
        match value {
            Scalar::String(s) => {
                *self = s;
                true
            }
            _ => false,
        }
    }
}

impl Decode for bool {
    fn kind(&self) -> Kind {
        Kind::Bool
    }

    fn store(&mut self, value: Scalar) -> bool {
        match value {
            Scalar::Bool(b) => {
                *self = b;
                true
            }
            _ => false,
        }
    }
}

macro_rules! int_decode {
    ($($t:ty),*) => {
        $(
            impl Decode for $t {
                fn kind(&self) -> Kind {
                    Kind::Int
                }

                fn store(&mut self, value: Scalar) -> bool {
                    let Scalar::Int(n) = value else {
                        return false;
                    };
                    match <$t>::try_from(n) {
                        Ok(v) => {
                            *self = v;
                            true
                        }
                        Err(_) => false,
                    }
                }
            }
        )*
    };
}

int_decode!(i8, i16, i32, i64, isize);

impl Decode for f32 {
    fn kind(&self) -> Kind {
        Kind::Float
    }
}

impl Decode for f64 {
    fn kind(&self) -> Kind {
        Kind::Float
    }
}

impl<T> Decode for Vec<T> {
    fn kind(&self) -> Kind {
        Kind::List
    }
}

// Struct with no public fields: recursed into, never written.
impl Decode for NaiveDateTime {
    fn kind(&self) -> Kind {
        Kind::Struct
    }
}

impl<T: Decode + Default> Decode for Option<T> {
    fn kind(&self) -> Kind {
        Kind::Optional
    }

    fn pointee_kind(&self) -> Option<Kind> {
        Some(T::default().kind())
    }

    fn store(&mut self, value: Scalar) -> bool {
        let mut inner = T::default();
        if !inner.store(value) {
            return false;
        }
        *self = Some(inner);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_key_falls_back_to_name() {
        let mut s = String::new();
        assert_eq!(Field::new("Title", &mut s).lookup_key(), "Title");
        assert_eq!(Field::keyed("Title", "", &mut s).lookup_key(), "Title");
        assert_eq!(Field::keyed("Title", "title", &mut s).lookup_key(), "title");
    }

    #[test]
    fn narrow_ints_reject_out_of_range() {
        let mut n: i8 = 3;
        assert!(!n.store(Scalar::Int(300)));
        assert_eq!(n, 3);
        assert!(n.store(Scalar::Int(-128)));
        assert_eq!(n, -128);
    }

    #[test]
    fn option_reports_pointee_kind() {
        let flag: Option<bool> = None;
        assert_eq!(flag.kind(), Kind::Optional);
        assert_eq!(flag.pointee_kind(), Some(Kind::Bool));

        let nested: Option<Option<i64>> = None;
        assert_eq!(nested.pointee_kind(), Some(Kind::Optional));
    }

    #[test]
    fn option_stays_none_on_mismatched_scalar() {
        let mut n: Option<i32> = None;
        assert!(!n.store(Scalar::Bool(true)));
        assert_eq!(n, None);
        assert!(n.store(Scalar::Int(42)));
        assert_eq!(n, Some(42));
    }
}
