//! Populate structs from flat string maps.
//!
//! Types describe their fields through [`Decode`] (normally via
//! [`decode_fields!`]); [`decode`] walks that table, resolves each field's
//! lookup key and coerces string, boolean and integer values. Decoding is
//! best effort: anything that does not fit is skipped, and
//! [`decode_with_report`] says what was skipped and why.
//!
//! ```
//! use map_decode::{decode, decode_fields};
//! use std::collections::HashMap;
//!
//! #[derive(Default)]
//! struct MapStruct {
//!     int: i64,
//!     int_ptr: Option<i64>,
//!     flag: bool,
//! }
//!
//! decode_fields!(MapStruct { int = "int", int_ptr = "int", flag = "bool" });
//!
//! let mut dest = MapStruct::default();
//! let src = HashMap::from([("int", "42"), ("bool", "maybe")]);
//! decode(&mut dest, &src).unwrap();
//!
//! assert_eq!(dest.int, 42);
//! assert_eq!(dest.int_ptr, Some(42));
//! assert!(!dest.flag);
//! ```

pub mod decode_report;
pub mod error;
mod field_macro;
pub mod field_types;
pub mod source_map;
pub mod struct_decoder;

pub use decode_report::{DecodeReport, FieldReport, Outcome};
pub use error::{Error, Result};
pub use field_types::{Decode, Field, Kind, Scalar};
pub use source_map::{Source, from_json_object};
pub use struct_decoder::{decode, decode_with_report, parse_bool};
