use figment::Figment;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// Flat key/value view over operator configuration, addressed by dotted keys
/// such as `note.0.srid`.
pub trait PropertySource {
    fn get_property(&self, key: &str) -> Option<String>;
}

impl PropertySource for Figment {
    /// Strings, numbers and booleans are all rendered as their textual
    /// value, so `srid = 4326` and `srid = "4326"` read the same.
    fn get_property(&self, key: &str) -> Option<String> {
        let value = self.find_value(key).ok()?;
        match value.deserialize::<Value>().ok()? {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

impl PropertySource for HashMap<String, String> {
    fn get_property(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl PropertySource for BTreeMap<String, String> {
    fn get_property(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}
