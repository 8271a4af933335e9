//! Per-suspect dossier aggregate

use super::contradiction::{ContradictionResult, CrossReference};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything the investigation holds on one suspect.
///
/// Contradiction insertion is idempotent: a result id appears at most once
/// in `contradictions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DossierState {
    pub suspect_id: String,
    pub name: String,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub codename: Option<String>,
    /// Ids of this suspect's testimony statements, in recording order
    #[serde(default)]
    pub testimony_ids: Vec<String>,
    #[serde(default)]
    pub linked_evidence_ids: Vec<String>,
    #[serde(default)]
    pub contradictions: Vec<ContradictionResult>,
    /// Cross-references involving this suspect (stored on both endpoints)
    #[serde(default)]
    pub relationships: Vec<CrossReference>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub last_updated: DateTime<Utc>,
}

impl DossierState {
    pub fn new(suspect_id: impl Into<String>, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            suspect_id: suspect_id.into(),
            name: name.into(),
            alias: None,
            codename: None,
            testimony_ids: Vec::new(),
            linked_evidence_ids: Vec::new(),
            contradictions: Vec::new(),
            relationships: Vec::new(),
            created_at: now,
            last_updated: now,
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn with_codename(mut self, codename: impl Into<String>) -> Self {
        self.codename = Some(codename.into());
        self
    }

    /// Name plus alias, e.g. `Marko Jovanović (alias: N. Petrovic)`.
    pub fn display_name(&self) -> String {
        match self.alias.as_deref() {
            Some(alias) if !alias.is_empty() => format!("{} (alias: {})", self.name, alias),
            _ => self.name.clone(),
        }
    }

    /// Display name plus codename, e.g. `... - The Assassin`.
    pub fn full_display_name(&self) -> String {
        match self.codename.as_deref() {
            Some(codename) if !codename.is_empty() => {
                format!("{} - {}", self.display_name(), codename)
            }
            _ => self.display_name(),
        }
    }

    pub fn resolved_contradiction_count(&self) -> usize {
        self.contradictions
            .iter()
            .filter(|c| c.resolution.has_any_resolution())
            .count()
    }

    pub fn has_unresolved_contradictions(&self) -> bool {
        self.contradictions
            .iter()
            .any(|c| !c.resolution.has_any_resolution())
    }

    /// Append a contradiction unless one with the same id is already present.
    /// Returns whether an insertion actually happened.
    pub fn record_contradiction(&mut self, result: ContradictionResult) -> bool {
        let exists = self
            .contradictions
            .iter()
            .any(|c| c.contradiction_id == result.contradiction_id);
        if exists {
            return false;
        }
        self.contradictions.push(result);
        true
    }

    /// Append a cross-reference unless an equivalent one (same endpoints and
    /// relationship type) is already present. Returns whether it was added.
    pub fn record_relationship(&mut self, reference: CrossReference) -> bool {
        let exists = self.relationships.iter().any(|r| {
            r.from_suspect_id == reference.from_suspect_id
                && r.to_suspect_id == reference.to_suspect_id
                && r.relationship_type == reference.relationship_type
        });
        if exists {
            return false;
        }
        self.relationships.push(reference);
        true
    }
}
