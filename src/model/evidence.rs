//! Physical exhibit records

use super::value::FieldMap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A structured physical exhibit.
///
/// `content` is an open record of named fields (arrival times, passenger
/// names, locations...) that detectors probe by known key names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evidence {
    pub id: String,
    /// Category tag, e.g. "tickets" or "documents"
    pub category: String,
    /// Display title, also scanned for time mentions
    pub title: String,
    #[serde(default)]
    pub content: FieldMap,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Evidence {
    pub fn new(id: impl Into<String>, category: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            category: category.into(),
            title: title.into(),
            content: FieldMap::new(),
            created_at: Utc::now(),
        }
    }

    /// Builder-style content field.
    pub fn with_content(mut self, key: impl Into<String>, value: impl Into<super::FieldValue>) -> Self {
        self.content.insert(key, value);
        self
    }

    /// Look up a content field as text (empty fields read as absent).
    pub fn content_text(&self, key: &str) -> Option<String> {
        self.content.get_text(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // === Scenario: content fields are reachable by key ===
    #[test]
    fn content_text_reads_fields() {
        let evidence = Evidence::new("ev_tickets_001", "tickets", "Train Ticket")
            .with_content("arrival_time", "11:50")
            .with_content("passenger_name", "N. Petrovic");

        assert_eq!(evidence.content_text("arrival_time").as_deref(), Some("11:50"));
        assert_eq!(evidence.content_text("departure_time"), None);
    }

    // === Scenario: persisted layout uses camelCase keys ===
    #[test]
    fn serializes_with_camel_case_keys() {
        let evidence = Evidence::new("ev_001", "documents", "Hotel Register");
        let json = serde_json::to_value(&evidence).unwrap();
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["category"], "documents");
    }
}
