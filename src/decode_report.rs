use anyhow::{Result, bail};
use serde::Serialize;
use std::collections::BTreeSet;

/// What happened to a single scalar field during a decode pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Applied,
    /// Key absent from the source.
    Missing,
    /// Key present but the value did not parse for the field's kind.
    Malformed,
    /// Key present but the field kind is not decodable.
    Unsupported,
    /// `Option<Option<_>>` field; never written.
    DoublyOptional,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldReport {
    /// Dotted field-name path from the destination root, e.g. `url_book.isbn`.
    pub path: String,
    pub key: String,
    pub outcome: Outcome,
}

/// Per-field record of a decode pass, in visiting order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DecodeReport {
    pub fields: Vec<FieldReport>,
}

impl DecodeReport {
    pub(crate) fn record(&mut self, path: String, key: &str, outcome: Outcome) {
        self.fields.push(FieldReport {
            path,
            key: key.to_string(),
            outcome,
        });
    }

    pub fn with_outcome(&self, outcome: Outcome) -> impl Iterator<Item = &FieldReport> {
        self.fields.iter().filter(move |f| f.outcome == outcome)
    }

    pub fn applied(&self) -> impl Iterator<Item = &FieldReport> {
        self.with_outcome(Outcome::Applied)
    }

    pub fn missing(&self) -> impl Iterator<Item = &FieldReport> {
        self.with_outcome(Outcome::Missing)
    }

    pub fn malformed(&self) -> impl Iterator<Item = &FieldReport> {
        self.with_outcome(Outcome::Malformed)
    }

    /// Fails if any present value could not be parsed for its field.
    pub fn ensure_well_formed(&self) -> Result<()> {
        let bad: BTreeSet<&str> = self.malformed().map(|f| f.key.as_str()).collect();
        if !bad.is_empty() {
            let keys: Vec<&str> = bad.into_iter().collect();
            bail!("Malformed values for keys: {}", keys.join(", "));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_well_formed_lists_bad_keys() {
        let mut report = DecodeReport::default();
        report.record("flag".into(), "bool", Outcome::Malformed);
        report.record("count".into(), "int", Outcome::Applied);
        report.record("level".into(), "lvl", Outcome::Malformed);
        report.record("flag_ptr".into(), "bool", Outcome::Malformed);

        let err = report.ensure_well_formed().unwrap_err().to_string();
        assert_eq!(err, "Malformed values for keys: bool, lvl");
        assert_eq!(report.applied().count(), 1);
    }

    #[test]
    fn serializes_outcomes_in_snake_case() {
        let mut report = DecodeReport::default();
        report.record("n".into(), "n", Outcome::DoublyOptional);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"fields": [{"path": "n", "key": "n", "outcome": "doubly_optional"}]})
        );
    }
}
