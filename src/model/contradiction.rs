//! Contradiction results, resolutions, and cross-references

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of contradiction categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContradictionType {
    Timeline,
    Location,
    Identity,
}

impl ContradictionType {
    /// All categories, in sweep order.
    pub const ALL: [ContradictionType; 3] = [Self::Timeline, Self::Location, Self::Identity];

    /// Lowercase label used in generated contradiction ids.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Timeline => "timeline",
            Self::Location => "location",
            Self::Identity => "identity",
        }
    }
}

impl fmt::Display for ContradictionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An established relationship between two suspects.
///
/// Undirected in effect: recorded symmetrically in both suspects' dossiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossReference {
    pub from_suspect_id: String,
    pub to_suspect_id: String,
    pub relationship_type: String,
    /// Free-text evidentiary note for the relationship
    #[serde(default)]
    pub evidence: String,
    #[serde(default = "Utc::now")]
    pub established_at: DateTime<Utc>,
}

impl CrossReference {
    pub fn new(
        from_suspect_id: impl Into<String>,
        to_suspect_id: impl Into<String>,
        relationship_type: impl Into<String>,
    ) -> Self {
        Self {
            from_suspect_id: from_suspect_id.into(),
            to_suspect_id: to_suspect_id.into(),
            relationship_type: relationship_type.into(),
            evidence: String::new(),
            established_at: Utc::now(),
        }
    }

    pub fn with_evidence(mut self, note: impl Into<String>) -> Self {
        self.evidence = note.into();
        self
    }
}

/// What a caller did about a contradiction.
///
/// There is no separate status enum: a contradiction is "resolved" exactly
/// when any of these fields is populated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContradictionResolution {
    #[serde(default)]
    pub amended_testimony: Option<String>,
    #[serde(default)]
    pub new_evidence_ids: Vec<String>,
    #[serde(default)]
    pub unlocked_suspect_ids: Vec<String>,
    #[serde(default)]
    pub dossier_updates: Vec<String>,
    #[serde(default)]
    pub cross_references: Vec<CrossReference>,
}

impl ContradictionResolution {
    /// The sole open/resolved signal.
    pub fn has_any_resolution(&self) -> bool {
        self.amended_testimony.as_deref().is_some_and(|t| !t.is_empty())
            || !self.new_evidence_ids.is_empty()
            || !self.unlocked_suspect_ids.is_empty()
            || !self.dossier_updates.is_empty()
            || !self.cross_references.is_empty()
    }
}

/// The outcome of running one query through one detector.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContradictionResult {
    pub is_contradiction: bool,
    #[serde(rename = "type")]
    pub contradiction_type: ContradictionType,
    pub contradiction_id: String,
    pub description: String,
    #[serde(default)]
    pub resolution: ContradictionResolution,
    #[serde(default)]
    pub affected_suspects: Vec<String>,
    #[serde(default)]
    pub related_evidence: Vec<String>,
    #[serde(default = "Utc::now")]
    pub detected_at: DateTime<Utc>,
}

impl ContradictionResult {
    /// A normal negative outcome carrying a diagnostic description.
    ///
    /// Missing records, missing extractable facts, and consistent facts all
    /// land here; none of them are errors.
    pub fn no_contradiction(
        contradiction_type: ContradictionType,
        query_id: &str,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            is_contradiction: false,
            contradiction_type,
            contradiction_id: format!("no_contradiction_{}", query_id),
            description: reason.into(),
            resolution: ContradictionResolution::default(),
            affected_suspects: Vec::new(),
            related_evidence: Vec::new(),
            detected_at: Utc::now(),
        }
    }

    /// A positive detection with an empty resolution.
    pub fn contradiction(
        contradiction_type: ContradictionType,
        contradiction_id: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            is_contradiction: true,
            contradiction_type,
            contradiction_id: contradiction_id.into(),
            description: description.into(),
            resolution: ContradictionResolution::default(),
            affected_suspects: Vec::new(),
            related_evidence: Vec::new(),
            detected_at: Utc::now(),
        }
    }

    pub fn with_affected_suspect(mut self, suspect_id: impl Into<String>) -> Self {
        self.affected_suspects.push(suspect_id.into());
        self
    }

    pub fn with_related_evidence(mut self, evidence_id: impl Into<String>) -> Self {
        self.related_evidence.push(evidence_id.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // === Scenario: resolution emptiness is the open/resolved signal ===
    #[test]
    fn empty_resolution_has_no_resolution() {
        let resolution = ContradictionResolution::default();
        assert!(!resolution.has_any_resolution());
    }

    #[test]
    fn any_populated_field_counts_as_resolved() {
        let amended = ContradictionResolution {
            amended_testimony: Some("I was mistaken about the time.".into()),
            ..Default::default()
        };
        assert!(amended.has_any_resolution());

        let unlocked = ContradictionResolution {
            new_evidence_ids: vec!["ev_hotel_002".into()],
            ..Default::default()
        };
        assert!(unlocked.has_any_resolution());

        let cross_ref = ContradictionResolution {
            cross_references: vec![CrossReference::new("su_a", "su_b", "accomplice")],
            ..Default::default()
        };
        assert!(cross_ref.has_any_resolution());
    }

    // === Scenario: blank amended text does not count ===
    #[test]
    fn blank_amended_testimony_is_not_a_resolution() {
        let resolution = ContradictionResolution {
            amended_testimony: Some(String::new()),
            ..Default::default()
        };
        assert!(!resolution.has_any_resolution());
    }

    // === Scenario: negative results carry the query id ===
    #[test]
    fn no_contradiction_id_embeds_query_id() {
        let result = ContradictionResult::no_contradiction(
            ContradictionType::Timeline,
            "tve_ts_001_ev_001_abc",
            "Times are consistent",
        );
        assert!(!result.is_contradiction);
        assert_eq!(result.contradiction_id, "no_contradiction_tve_ts_001_ev_001_abc");
    }

    // === Scenario: category serializes as its lowercase label ===
    #[test]
    fn contradiction_type_serializes_lowercase() {
        let json = serde_json::to_string(&ContradictionType::Identity).unwrap();
        assert_eq!(json, "\"identity\"");
    }
}
