//! Identity contradiction detection
//!
//! Compares claimed or denied identities from testimony metadata against
//! name fields on evidence. Names match leniently: exact, substring, or
//! initial-compatible ("M. Petrovic" vs "Marko Petrovic"). A *denial*
//! inverts the logic — matching names become the contradiction.

use super::contradiction_id;
use super::traits::Detector;
use crate::context::InvestigationContext;
use crate::error::CaseResult;
use crate::model::{ContradictionResult, ContradictionType, Evidence, TestimonyStatement};
use crate::query::ContradictionQuery;
use async_trait::async_trait;

/// Evidence content fields probed for names, in detection order.
const IDENTITY_FIELDS: [&str; 7] = [
    "full_name",
    "name",
    "passenger_name",
    "occupant_name",
    "subject_name",
    "owner_name",
    "holder_name",
];

/// An identity claim from testimony metadata. Denials invert the match.
#[derive(Debug, Clone)]
struct IdentityClaim {
    name: String,
    denied: bool,
}

/// Detects identity contradictions.
#[derive(Debug, Default)]
pub struct IdentityDetector;

impl IdentityDetector {
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
                ContradictionType::Identity,
                query_id,
                "Testimony or evidence not found",
            ));
        };

        let claims = identity_claims(&testimony);
        if claims.is_empty() {
            return Ok(ContradictionResult::no_contradiction(
                ContradictionType::Identity,
                query_id,
                "No identity information in testimony",
            ));
        }

        let names = evidence_names(&evidence);
        if names.is_empty() {
            return Ok(ContradictionResult::no_contradiction(
                ContradictionType::Identity,
                query_id,
                "No identity information in evidence",
            ));
        }

        for claim in &claims {
            for name in &names {
                let matched = names_match(&claim.name, name);
                // A denial contradicts when the names DO match; a claim
                // contradicts when they don't.
                let conflicting = if claim.denied { matched } else { !matched };
                if conflicting {
                    let description = if claim.denied {
                        format!(
                            "Suspect denies identity '{}' but evidence shows '{}'",
                            claim.name, name
                        )
                    } else {
                        format!(
                            "Testimony claims identity '{}' but evidence shows '{}'",
                            claim.name, name
                        )
                    };
                    let id =
                        contradiction_id(Some(&testimony.suspect_id), ContradictionType::Identity);
                    return Ok(ContradictionResult::contradiction(
                        ContradictionType::Identity,
                        id,
                        description,
                    )
                    .with_affected_suspect(&testimony.suspect_id)
                    .with_related_evidence(&evidence.id));
                }
            }
        }

        Ok(ContradictionResult::no_contradiction(
            ContradictionType::Identity,
            query_id,
            "Identities are consistent",
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
                ContradictionType::Identity,
                query_id,
                "Evidence not found",
            ));
        };

        let primary_names = evidence_names(&primary);
        let secondary_names = evidence_names(&secondary);
        if primary_names.is_empty() || secondary_names.is_empty() {
            return Ok(ContradictionResult::no_contradiction(
                ContradictionType::Identity,
                query_id,
                "Insufficient identity information",
            ));
        }

        for name1 in &primary_names {
            for name2 in &secondary_names {
                if !names_match(name1, name2) {
                    let description = format!(
                        "Evidence conflict: '{}' shows '{}' but '{}' shows '{}'",
                        primary.title, name1, secondary.title, name2
                    );
                    let id = contradiction_id(None, ContradictionType::Identity);
                    return Ok(ContradictionResult::contradiction(
                        ContradictionType::Identity,
                        id,
                        description,
                    )
                    .with_related_evidence(&primary.id)
                    .with_related_evidence(&secondary.id));
                }
            }
        }

        Ok(ContradictionResult::no_contradiction(
            ContradictionType::Identity,
            query_id,
            "Evidence identities are consistent",
        ))
    }
}

#[async_trait]
impl Detector for IdentityDetector {
    fn handled_type(&self) -> ContradictionType {
        ContradictionType::Identity
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

/// Identity claims come from testimony metadata: `claimed_identity`
/// asserts a name, `denied_identity` disavows one.
fn identity_claims(testimony: &TestimonyStatement) -> Vec<IdentityClaim> {
    let mut claims = Vec::new();
    if let Some(name) = testimony.metadata.get_text("claimed_identity") {
        claims.push(IdentityClaim {
            name,
            denied: false,
        });
    }
    if let Some(name) = testimony.metadata.get_text("denied_identity") {
        claims.push(IdentityClaim { name, denied: true });
    }
    claims
}

fn evidence_names(evidence: &Evidence) -> Vec<String> {
    IDENTITY_FIELDS
        .iter()
        .filter_map(|field| evidence.content_text(field))
        .collect()
}

/// Names match when equal, one contains the other, or they are
/// initial-compatible position by position.
fn names_match(a: &str, b: &str) -> bool {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a == b || a.contains(&b) || b.contains(&a) || initials_compatible(&a, &b)
}

/// "m. petrovic" is compatible with "marko petrovic": same part count,
/// each part either equal or an initial of the other.
fn initials_compatible(a: &str, b: &str) -> bool {
    let parts_a: Vec<&str> = a
        .split(|c| c == ' ' || c == '.')
        .filter(|p| !p.is_empty())
        .collect();
    let parts_b: Vec<&str> = b
        .split(|c| c == ' ' || c == '.')
        .filter(|p| !p.is_empty())
        .collect();
    if parts_a.len() != parts_b.len() || parts_a.is_empty() {
        return false;
    }
    parts_a.iter().zip(&parts_b).all(|(pa, pb)| {
        pa == pb
            || (pa.len() == 1 && pb.starts_with(pa))
            || (pb.len() == 1 && pa.starts_with(pb))
    })
}
