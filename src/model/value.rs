//! Tagged field values for evidence content and testimony metadata
//!
//! Evidence `content` and testimony `metadata` are open key/value records in
//! the persisted JSON. Detectors look fields up by known key names and the
//! declared field order is part of the detection contract, so the map keeps
//! insertion order instead of hashing it away.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Typed field values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl FieldValue {
    /// Render the value as text, the way detectors consume it.
    pub fn to_text(&self) -> String {
        match self {
            Self::String(s) => s.clone(),
            Self::Int(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Bool(b) => b.to_string(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{}", s),
            Self::Int(i) => write!(f, "{}", i),
            Self::Float(v) => write!(f, "{}", v),
            Self::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// An ordered string→value mapping.
///
/// Serializes as a JSON object. Insertion order is preserved; `insert` on an
/// existing key replaces the value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMap {
    entries: Vec<(String, FieldValue)>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        let key = key.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    /// Builder-style insert, for test fixtures and ingestion code.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Look up a field and render it as text.
    ///
    /// Returns `None` for a missing key or an empty rendering — absent and
    /// blank fields are both "no fact" to the detectors.
    pub fn get_text(&self, key: &str) -> Option<String> {
        self.get(key).map(FieldValue::to_text).filter(|s| !s.is_empty())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, FieldValue)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl Serialize for FieldMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FieldMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FieldMapVisitor;

        impl<'de> Visitor<'de> for FieldMapVisitor {
            type Value = FieldMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of field names to values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut map = FieldMap::new();
                while let Some((key, value)) = access.next_entry::<String, FieldValue>()? {
                    map.insert(key, value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(FieldMapVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // === Scenario: FieldMap preserves insertion order ===
    #[test]
    fn field_map_preserves_insertion_order() {
        let map = FieldMap::new()
            .with("zebra", "z")
            .with("apple", "a")
            .with("mango", "m");

        let keys: Vec<&str> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["zebra", "apple", "mango"]);
    }

    // === Scenario: insert on an existing key replaces in place ===
    #[test]
    fn insert_replaces_existing_key_in_place() {
        let mut map = FieldMap::new().with("a", "1").with("b", "2");
        map.insert("a", "updated");

        let keys: Vec<&str> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(map.get_text("a").as_deref(), Some("updated"));
    }

    // === Scenario: get_text filters blank values ===
    #[test]
    fn get_text_skips_missing_and_blank_fields() {
        let map = FieldMap::new().with("blank", "").with("set", "11:50");
        assert_eq!(map.get_text("blank"), None);
        assert_eq!(map.get_text("missing"), None);
        assert_eq!(map.get_text("set").as_deref(), Some("11:50"));
    }

    // === Scenario: round-trips as a JSON object ===
    #[test]
    fn serializes_as_json_object() {
        let map = FieldMap::new()
            .with("arrival_time", "11:50")
            .with("platform", 3i64);

        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"arrival_time":"11:50","platform":3}"#);

        let back: FieldMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }

    // === Scenario: non-string values render as text ===
    #[test]
    fn values_render_as_text() {
        assert_eq!(FieldValue::Int(42).to_text(), "42");
        assert_eq!(FieldValue::Bool(true).to_text(), "true");
        assert_eq!(FieldValue::String("North Gate".into()).to_text(), "North Gate");
    }
}
