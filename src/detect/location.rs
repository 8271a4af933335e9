//! Location contradiction detection
//!
//! Compares claimed locations from testimony metadata against place fields
//! on evidence. Comparison is lenient: after stripping one trailing venue
//! descriptor, equal or substring-related names are treated as the same
//! place.

use super::contradiction_id;
use super::traits::Detector;
use crate::context::InvestigationContext;
use crate::error::CaseResult;
use crate::model::{ContradictionResult, ContradictionType, Evidence, TestimonyStatement};
use crate::query::ContradictionQuery;
use async_trait::async_trait;

/// Testimony metadata keys that carry a claimed location, in order.
const CLAIM_FIELDS: [&str; 2] = ["claimed_location", "claimed_location_2"];

/// Evidence content fields probed for places, in detection order.
const LOCATION_FIELDS: [&str; 8] = [
    "location",
    "place",
    "destination",
    "departure",
    "address",
    "venue",
    "site",
    "meeting_place",
];

/// Trailing venue descriptors dropped before comparison. The list is walked
/// once in order over the progressively stripped name.
const VENUE_DESCRIPTORS: [&str; 9] = [
    "Station",
    "Café",
    "Cafe",
    "Gate",
    "Hall",
    "Building",
    "Factory",
    "Hotel",
    "Restaurant",
];

/// Detects location contradictions.
#[derive(Debug, Default)]
pub struct LocationDetector;

impl LocationDetector {
    pub fn new() -> Self {
        Self
    }

    async fn detect_testimony_vs_evidence(
        &self,
        query_id: &str,
        testimony_id: &str,
        evidence_id: &str,
        context: &InvestigationContext,
    ) -> CaseResult<ContradictionResult> {
        let testimony = context.testimony(testimony_id).await?;
        let evidence = context.evidence(evidence_id).await?;
        let (Some(testimony), Some(evidence)) = (testimony, evidence) else {
            return Ok(ContradictionResult::no_contradiction(
                ContradictionType::Location,
                query_id,
                "Testimony or evidence not found",
            ));
        };

        let claimed = claimed_locations(&testimony);
        if claimed.is_empty() {
            return Ok(ContradictionResult::no_contradiction(
                ContradictionType::Location,
                query_id,
                "No location information in testimony",
            ));
        }

        let evidenced = evidence_locations(&evidence);
        if evidenced.is_empty() {
            return Ok(ContradictionResult::no_contradiction(
                ContradictionType::Location,
                query_id,
                "No location information in evidence",
            ));
        }

        for claim in &claimed {
            for fact in &evidenced {
                if are_locations_conflicting(claim, fact) {
                    let description = format!(
                        "Testimony claims '{}' but evidence shows '{}'",
                        claim, fact
                    );
                    let id =
                        contradiction_id(Some(&testimony.suspect_id), ContradictionType::Location);
                    return Ok(ContradictionResult::contradiction(
                        ContradictionType::Location,
                        id,
                        description,
                    )
                    .with_affected_suspect(&testimony.suspect_id)
                    .with_related_evidence(&evidence.id));
                }
            }
        }

        Ok(ContradictionResult::no_contradiction(
            ContradictionType::Location,
            query_id,
            "Locations are consistent",
        ))
    }

    async fn detect_evidence_vs_evidence(
        &self,
        query_id: &str,
        primary_id: &str,
        secondary_id: &str,
        context: &InvestigationContext,
    ) -> CaseResult<ContradictionResult> {
        let primary = context.evidence(primary_id).await?;
        let secondary = context.evidence(secondary_id).await?;
        let (Some(primary), Some(secondary)) = (primary, secondary) else {
            return Ok(ContradictionResult::no_contradiction(
                ContradictionType::Location,
                query_id,
                "Evidence not found",
            ));
        };

        let primary_locations = evidence_locations(&primary);
        let secondary_locations = evidence_locations(&secondary);
        if primary_locations.is_empty() || secondary_locations.is_empty() {
            return Ok(ContradictionResult::no_contradiction(
                ContradictionType::Location,
                query_id,
                "Insufficient location information",
            ));
        }

        for place1 in &primary_locations {
            for place2 in &secondary_locations {
                if are_locations_conflicting(place1, place2) {
                    let description = format!(
                        "Evidence conflict: '{}' shows '{}' but '{}' shows '{}'",
                        primary.title, place1, secondary.title, place2
                    );
                    let id = contradiction_id(None, ContradictionType::Location);
                    return Ok(ContradictionResult::contradiction(
                        ContradictionType::Location,
                        id,
                        description,
                    )
                    .with_related_evidence(&primary.id)
                    .with_related_evidence(&secondary.id));
                }
            }
        }

        Ok(ContradictionResult::no_contradiction(
            ContradictionType::Location,
            query_id,
            "Evidence locations are consistent",
        ))
    }
}

#[async_trait]
impl Detector for LocationDetector {
    fn handled_type(&self) -> ContradictionType {
        ContradictionType::Location
    }

    async fn detect(
        &self,
        query: &ContradictionQuery,
        context: &InvestigationContext,
    ) -> CaseResult<ContradictionResult> {
        match query {
            ContradictionQuery::TestimonyVsEvidence {
                query_id,
                testimony_id,
                evidence_id,
                ..
            } => {
                self.detect_testimony_vs_evidence(query_id, testimony_id, evidence_id, context)
                    .await
            }
            ContradictionQuery::EvidenceVsEvidence {
                query_id,
                primary_evidence_id,
                secondary_evidence_id,
                ..
            } => {
                self.detect_evidence_vs_evidence(
                    query_id,
                    primary_evidence_id,
                    secondary_evidence_id,
                    context,
                )
                .await
            }
        }
    }
}

/// Claimed locations come from testimony metadata, not free text.
fn claimed_locations(testimony: &TestimonyStatement) -> Vec<String> {
    CLAIM_FIELDS
        .iter()
        .filter_map(|field| testimony.metadata.get_text(field))
        .collect()
}

fn evidence_locations(evidence: &Evidence) -> Vec<String> {
    LOCATION_FIELDS
        .iter()
        .filter_map(|field| evidence.content_text(field))
        .collect()
}

/// Drop trailing venue descriptors ("Lenestra Café" -> "Lenestra"). Each
/// descriptor in the list is tried once against the current tail, so a name
/// like "Mill Cafe Station" loses both suffixes in list order. The cut
/// happens at the last space, so a bare descriptor stays intact.
fn normalize_location(raw: &str) -> String {
    let mut normalized = raw.trim().to_string();
    for descriptor in VENUE_DESCRIPTORS {
        if normalized.to_lowercase().ends_with(&descriptor.to_lowercase()) {
            if let Some(cut) = normalized.rfind(' ') {
                if cut > 0 {
                    normalized = normalized[..cut].trim_end().to_string();
                }
            }
        }
    }
    normalized.to_lowercase()
}

/// Equal or substring-related normalized names count as the same place.
fn are_locations_conflicting(a: &str, b: &str) -> bool {
    let a = normalize_location(a);
    let b = normalize_location(b);
    if a.is_empty() || b.is_empty() {
        return false;
    }
    !(a == b || a.contains(&b) || b.contains(&a))
}
