//! Read-only search helpers over testimony and evidence
//!
//! Thin case-insensitive filters on top of the investigation context. Blank
//! arguments always produce empty results, never errors.

use crate::context::InvestigationContext;
use crate::error::CaseResult;
use crate::model::{DossierState, Evidence, TestimonyStatement};

/// Searches testimony statements.
#[derive(Clone)]
pub struct TestimonySearch {
    context: InvestigationContext,
}

impl TestimonySearch {
    pub fn new(context: InvestigationContext) -> Self {
        Self { context }
    }

    /// Statements whose current text or `topic` metadata mentions the topic.
    pub async fn find_by_topic(&self, topic: &str) -> CaseResult<Vec<TestimonyStatement>> {
        if topic.trim().is_empty() {
            return Ok(Vec::new());
        }
        let all = self.context.all_testimony().await?;
        Ok(all
            .into_iter()
            .filter(|t| {
                contains_ignore_case(t.current_text(), topic)
                    || t.metadata
                        .get_text("topic")
                        .is_some_and(|v| contains_ignore_case(&v, topic))
            })
            .collect())
    }

    pub async fn find_by_suspect(&self, suspect_id: &str) -> CaseResult<Vec<TestimonyStatement>> {
        if suspect_id.trim().is_empty() {
            return Ok(Vec::new());
        }
        let all = self.context.all_testimony().await?;
        Ok(all.into_iter().filter(|t| t.suspect_id == suspect_id).collect())
    }

    /// Statements whose current text mentions any of the keywords.
    pub async fn find_by_keywords(&self, keywords: &[&str]) -> CaseResult<Vec<TestimonyStatement>> {
        if keywords.is_empty() {
            return Ok(Vec::new());
        }
        let all = self.context.all_testimony().await?;
        Ok(all
            .into_iter()
            .filter(|t| {
                keywords
                    .iter()
                    .any(|keyword| contains_ignore_case(t.current_text(), keyword))
            })
            .collect())
    }

    pub async fn has_suspect_mentioned(&self, suspect_id: &str, topic: &str) -> CaseResult<bool> {
        if suspect_id.trim().is_empty() || topic.trim().is_empty() {
            return Ok(false);
        }
        let statements = self.find_by_suspect(suspect_id).await?;
        Ok(statements
            .iter()
            .any(|t| contains_ignore_case(t.current_text(), topic)))
    }

    /// Whether the suspect's testimony mentions the other suspect by name,
    /// alias, or codename.
    pub async fn has_suspect_claimed_relationship(
        &self,
        suspect_id: &str,
        other_suspect_id: &str,
    ) -> CaseResult<bool> {
        if suspect_id.trim().is_empty() || other_suspect_id.trim().is_empty() {
            return Ok(false);
        }
        let Some(other) = self.context.dossier(other_suspect_id).await? else {
            return Ok(false);
        };
        let terms = dossier_search_terms(&other, true);

        let statements = self.find_by_suspect(suspect_id).await?;
        Ok(statements.iter().any(|t| {
            terms
                .iter()
                .any(|term| contains_ignore_case(t.current_text(), term))
        }))
    }
}

/// Searches evidence.
#[derive(Clone)]
pub struct EvidenceSearch {
    context: InvestigationContext,
}

impl EvidenceSearch {
    /// Content fields that identify evidence as time-anchored.
    const TIME_FIELDS: [&'static str; 4] = ["time", "arrival_time", "departure_time", "timestamp"];

    /// Content fields searched for a place name.
    const LOCATION_FIELDS: [&'static str; 5] =
        ["location", "destination", "departure", "place", "address"];

    pub fn new(context: InvestigationContext) -> Self {
        Self { context }
    }

    pub async fn find_by_category(&self, category: &str) -> CaseResult<Vec<Evidence>> {
        if category.trim().is_empty() {
            return Ok(Vec::new());
        }
        let all = self.context.all_evidence().await?;
        Ok(all
            .into_iter()
            .filter(|e| e.category.eq_ignore_ascii_case(category))
            .collect())
    }

    /// Evidence carrying any time-anchoring content field. The bounds gate
    /// the query but are not compared against field values; parsing happens
    /// in the timeline detector, not here.
    pub async fn find_by_time_range(
        &self,
        start_time: &str,
        end_time: &str,
    ) -> CaseResult<Vec<Evidence>> {
        if start_time.trim().is_empty() || end_time.trim().is_empty() {
            return Ok(Vec::new());
        }
        let all = self.context.all_evidence().await?;
        Ok(all
            .into_iter()
            .filter(|e| {
                Self::TIME_FIELDS
                    .iter()
                    .any(|field| e.content.contains_key(field))
            })
            .collect())
    }

    /// Evidence whose place fields or title mention the location.
    pub async fn find_by_location(&self, location: &str) -> CaseResult<Vec<Evidence>> {
        if location.trim().is_empty() {
            return Ok(Vec::new());
        }
        let all = self.context.all_evidence().await?;
        Ok(all
            .into_iter()
            .filter(|e| {
                Self::LOCATION_FIELDS.iter().any(|field| {
                    e.content_text(field)
                        .is_some_and(|v| contains_ignore_case(&v, location))
                }) || contains_ignore_case(&e.title, location)
            })
            .collect())
    }

    /// Evidence mentioning the suspect's name or alias in any content value
    /// or the title. Unknown suspects produce no matches.
    pub async fn find_referencing_suspect(&self, suspect_id: &str) -> CaseResult<Vec<Evidence>> {
        if suspect_id.trim().is_empty() {
            return Ok(Vec::new());
        }
        let Some(dossier) = self.context.dossier(suspect_id).await? else {
            return Ok(Vec::new());
        };
        let terms = dossier_search_terms(&dossier, false);

        let all = self.context.all_evidence().await?;
        Ok(all
            .into_iter()
            .filter(|e| {
                terms.iter().any(|term| {
                    e.content
                        .iter()
                        .any(|(_, value)| contains_ignore_case(&value.to_text(), term))
                        || contains_ignore_case(&e.title, term)
                })
            })
            .collect())
    }

    /// Evidence whose named content field equals the value, ignoring case.
    pub async fn find_by_content_field(
        &self,
        field_name: &str,
        value: &str,
    ) -> CaseResult<Vec<Evidence>> {
        if field_name.trim().is_empty() || value.is_empty() {
            return Ok(Vec::new());
        }
        let all = self.context.all_evidence().await?;
        Ok(all
            .into_iter()
            .filter(|e| {
                e.content
                    .get(field_name)
                    .is_some_and(|v| v.to_text().eq_ignore_ascii_case(value))
            })
            .collect())
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// A dossier's searchable name terms: name, alias, and (optionally) codename.
fn dossier_search_terms(dossier: &DossierState, include_codename: bool) -> Vec<String> {
    let mut terms = vec![dossier.name.clone()];
    if let Some(alias) = dossier.alias.as_deref() {
        if !alias.is_empty() {
            terms.push(alias.to_string());
        }
    }
    if include_codename {
        if let Some(codename) = dossier.codename.as_deref() {
            if !codename.is_empty() {
                terms.push(codename.to_string());
            }
        }
    }
    terms
}
