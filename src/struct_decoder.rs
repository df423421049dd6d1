use tracing::{debug, trace};

use crate::decode_report::{DecodeReport, Outcome};
use crate::error::{Error, Result};
use crate::field_types::{Decode, Field, Kind, Scalar};
use crate::source_map::Source;

/// Populates `dest` from `src`, matching each field's lookup key.
///
/// Best effort: missing keys, malformed values, unsupported kinds and
/// `Option<Option<_>>` fields are skipped and leave the field untouched.
/// The only error is a destination that is not struct-shaped, reported
/// before anything is written.
pub fn decode<T, S>(dest: &mut T, src: &S) -> Result<()>
where
    T: Decode + ?Sized,
    S: Source + ?Sized,
{
    ensure_struct(dest)?;
    let applied = walk(dest.fields(), src, "", None);
    debug!(applied, "decoded struct from source map");
    Ok(())
}

/// Same pass as [`decode`], also recording the outcome of every scalar
/// field visited.
pub fn decode_with_report<T, S>(dest: &mut T, src: &S) -> Result<DecodeReport>
where
    T: Decode + ?Sized,
    S: Source + ?Sized,
{
    ensure_struct(dest)?;
    let mut report = DecodeReport::default();
    let applied = walk(dest.fields(), src, "", Some(&mut report));
    debug!(
        applied,
        visited = report.fields.len(),
        "decoded struct from source map"
    );
    Ok(report)
}

fn ensure_struct<T: Decode + ?Sized>(dest: &T) -> Result<()> {
    match dest.kind() {
        Kind::Struct => Ok(()),
        found => Err(Error::TypeMismatch { found }),
    }
}

/// Depth-first over one struct level. Returns the number of fields written.
fn walk<S: Source + ?Sized>(
    fields: Vec<Field<'_>>,
    src: &S,
    prefix: &str,
    mut report: Option<&mut DecodeReport>,
) -> usize {
    let mut applied = 0;

    for field in fields {
        let path = if prefix.is_empty() {
            field.name.to_string()
        } else {
            format!("{prefix}.{}", field.name)
        };

        // Embedded and nested structs share the caller's flat key space.
        // A non-struct marked embedded is decoded like any other field.
        if field.value.kind() == Kind::Struct {
            applied += walk(field.value.fields(), src, &path, report.as_deref_mut());
            continue;
        }

        let key = field.lookup_key();
        let outcome = decode_field(field.value, key, src);
        trace!(path = %path, key, ?outcome, "field visited");

        if outcome == Outcome::Applied {
            applied += 1;
        }
        if let Some(report) = report.as_deref_mut() {
            report.record(path, key, outcome);
        }
    }

    applied
}

fn decode_field<S: Source + ?Sized>(value: &mut dyn Decode, key: &str, src: &S) -> Outcome {
    let Some(raw) = src.lookup(key) else {
        return Outcome::Missing;
    };

    let kind = match value.kind() {
        Kind::Optional => match value.pointee_kind() {
            Some(Kind::Optional) => return Outcome::DoublyOptional,
            Some(kind) => kind,
            None => return Outcome::Unsupported,
        },
        kind => kind,
    };

    let scalar = match kind {
        Kind::String => Some(Scalar::String(raw.to_string())),
        Kind::Bool => parse_bool(raw).map(Scalar::Bool),
        Kind::Int => raw.parse::<i64>().ok().map(Scalar::Int),
        _ => return Outcome::Unsupported,
    };

    if scalar.is_some_and(|scalar| value.store(scalar)) {
        Outcome::Applied
    } else {
        Outcome::Malformed
    }
}

/// Boolean literals: `1`, `t`, `true`, `0`, `f`, `false`, any ASCII case.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "t" | "true" => Some(true),
        "0" | "f" | "false" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Default)]
    struct Flags {
        verbose: bool,
        level: i32,
        ratio: f64,
    }

    crate::decode_fields!(Flags {
        verbose,
        level = "lvl",
        ratio,
    });

    #[test]
    fn parse_bool_accepts_literals_in_any_case() {
        for raw in ["1", "t", "T", "true", "TRUE", "True", "tRuE"] {
            assert_eq!(parse_bool(raw), Some(true), "{raw}");
        }
        for raw in ["0", "f", "F", "false", "FALSE", "False"] {
            assert_eq!(parse_bool(raw), Some(false), "{raw}");
        }
        for raw in ["", "yes", "no", "2", " true", "not-a-bool"] {
            assert_eq!(parse_bool(raw), None, "{raw}");
        }
    }

    #[test]
    fn unsupported_kind_is_left_untouched() {
        let mut flags = Flags {
            ratio: 0.5,
            ..Flags::default()
        };
        let src = HashMap::from([("ratio", "2.5"), ("verbose", "t"), ("lvl", "-3")]);

        let report = decode_with_report(&mut flags, &src).unwrap();

        assert_eq!(flags.ratio, 0.5);
        assert!(flags.verbose);
        assert_eq!(flags.level, -3);
        let ratio = report.fields.iter().find(|f| f.key == "ratio").unwrap();
        assert_eq!(ratio.outcome, Outcome::Unsupported);
    }

    #[test]
    fn out_of_range_int_counts_as_malformed() {
        let mut flags = Flags::default();
        let src = HashMap::from([("lvl", "99999999999")]);

        let report = decode_with_report(&mut flags, &src).unwrap();

        assert_eq!(flags.level, 0);
        assert_eq!(report.malformed().count(), 1);
    }
}
