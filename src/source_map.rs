use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Read-only key to value lookup feeding the decoder.
pub trait Source {
    fn lookup(&self, key: &str) -> Option<&str>;
}

impl<H: BuildHasher> Source for HashMap<String, String, H> {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl<H: BuildHasher> Source for HashMap<&str, &str, H> {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key).copied()
    }
}

impl Source for BTreeMap<String, String> {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl Source for BTreeMap<&str, &str> {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key).copied()
    }
}

/// Builds a source mapping from a flat JSON object.
/// ```JSON
/// { "Title": "Mithril", "int": 7, "bool": true, "note": null }
/// ```
/// Strings are kept verbatim, numbers and booleans keep their JSON text,
/// `null` entries are dropped. Nested arrays and objects are rejected.
pub fn from_json_object(json: &str) -> Result<BTreeMap<String, String>> {
    let value: Value = serde_json::from_str(json)
        .with_context(|| "Invalid JSON: expected a flat object of scalar values")?;

    let Value::Object(entries) = value else {
        bail!("Expected a JSON object at the top level");
    };

    let mut out = BTreeMap::new();
    for (key, value) in entries {
        let text = match value {
            Value::Null => continue,
            Value::String(s) => s,
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::Array(_) | Value::Object(_) => {
                bail!("Key '{}' holds a nested value; only scalars are supported", key)
            }
        };
        out.insert(key, text);
    }

    Ok(out)
}
