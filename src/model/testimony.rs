//! Witness statements

use super::value::FieldMap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single free-form statement made by a suspect.
///
/// Amendment never discards the original text; `current_text` returns the
/// amended text when present, the original otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestimonyStatement {
    pub id: String,
    pub suspect_id: String,
    pub original_text: String,
    #[serde(default)]
    pub amended_text: Option<String>,
    /// Structured hints attached to the statement, e.g. `claimed_location`
    /// or `denied_identity`.
    #[serde(default)]
    pub metadata: FieldMap,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

impl TestimonyStatement {
    pub fn new(
        id: impl Into<String>,
        suspect_id: impl Into<String>,
        original_text: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            suspect_id: suspect_id.into(),
            original_text: original_text.into(),
            amended_text: None,
            metadata: FieldMap::new(),
            timestamp: Utc::now(),
        }
    }

    /// Builder-style metadata field.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<super::FieldValue>) -> Self {
        self.metadata.insert(key, value);
        self
    }

    pub fn is_amended(&self) -> bool {
        self.amended_text.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Amended text wins when present.
    pub fn current_text(&self) -> &str {
        match self.amended_text.as_deref() {
            Some(text) if !text.is_empty() => text,
            _ => &self.original_text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // === Scenario: amendment derives the current text ===
    #[test]
    fn current_text_prefers_amended() {
        let mut statement =
            TestimonyStatement::new("ts_001", "su_clerk", "I was at the station all day.");
        assert!(!statement.is_amended());
        assert_eq!(statement.current_text(), "I was at the station all day.");

        statement.amended_text = Some("I left the station around noon.".into());
        assert!(statement.is_amended());
        assert_eq!(statement.current_text(), "I left the station around noon.");
    }

    // === Scenario: blank amendment does not count ===
    #[test]
    fn empty_amendment_falls_back_to_original() {
        let mut statement = TestimonyStatement::new("ts_001", "su_clerk", "Original.");
        statement.amended_text = Some(String::new());
        assert!(!statement.is_amended());
        assert_eq!(statement.current_text(), "Original.");
    }
}
