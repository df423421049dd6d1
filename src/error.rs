//! Error types for decode operations.

use std::fmt;

use crate::field_types::Kind;

/// Error returned by [`decode`](crate::decode).
///
/// Per-field problems (missing keys, malformed values, unsupported kinds)
/// are never errors; they show up in a [`DecodeReport`](crate::DecodeReport)
/// instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Destination is not struct-shaped.
    TypeMismatch { found: Kind },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::TypeMismatch { found } => {
                write!(f, "decode destination must be a struct, found {found}")
            }
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
