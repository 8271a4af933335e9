//! Contradiction query model
//!
//! Two immutable request shapes, each tagged with the category the caller
//! expects the conflict in. The query id is generated at construction time
//! and flows into diagnostic result ids.

use crate::model::ContradictionType;
use uuid::Uuid;

/// A request to test two facts against each other.
#[derive(Debug, Clone, PartialEq)]
pub enum ContradictionQuery {
    /// A witness statement against a physical exhibit.
    TestimonyVsEvidence {
        query_id: String,
        testimony_id: String,
        evidence_id: String,
        expected_type: ContradictionType,
    },
    /// Two physical exhibits against each other.
    EvidenceVsEvidence {
        query_id: String,
        primary_evidence_id: String,
        secondary_evidence_id: String,
        expected_type: ContradictionType,
    },
}

impl ContradictionQuery {
    pub fn testimony_vs_evidence(
        testimony_id: impl Into<String>,
        evidence_id: impl Into<String>,
        expected_type: ContradictionType,
    ) -> Self {
        let testimony_id = testimony_id.into();
        let evidence_id = evidence_id.into();
        Self::TestimonyVsEvidence {
            query_id: format!(
                "tve_{}_{}_{}",
                testimony_id,
                evidence_id,
                Uuid::new_v4().simple()
            ),
            testimony_id,
            evidence_id,
            expected_type,
        }
    }

    pub fn evidence_vs_evidence(
        primary_evidence_id: impl Into<String>,
        secondary_evidence_id: impl Into<String>,
        expected_type: ContradictionType,
    ) -> Self {
        let primary_evidence_id = primary_evidence_id.into();
        let secondary_evidence_id = secondary_evidence_id.into();
        Self::EvidenceVsEvidence {
            query_id: format!(
                "eve_{}_{}_{}",
                primary_evidence_id,
                secondary_evidence_id,
                Uuid::new_v4().simple()
            ),
            primary_evidence_id,
            secondary_evidence_id,
            expected_type,
        }
    }

    pub fn query_id(&self) -> &str {
        match self {
            Self::TestimonyVsEvidence { query_id, .. } => query_id,
            Self::EvidenceVsEvidence { query_id, .. } => query_id,
        }
    }

    pub fn expected_type(&self) -> ContradictionType {
        match self {
            Self::TestimonyVsEvidence { expected_type, .. } => *expected_type,
            Self::EvidenceVsEvidence { expected_type, .. } => *expected_type,
        }
    }

    /// Short human-readable name of the query shape, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TestimonyVsEvidence { .. } => "TestimonyVsEvidence",
            Self::EvidenceVsEvidence { .. } => "EvidenceVsEvidence",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // === Scenario: query ids carry the shape prefix and both ids ===
    #[test]
    fn testimony_query_id_has_tve_prefix() {
        let query = ContradictionQuery::testimony_vs_evidence(
            "ts_001",
            "ev_001",
            ContradictionType::Timeline,
        );
        assert!(query.query_id().starts_with("tve_ts_001_ev_001_"));
        assert_eq!(query.expected_type(), ContradictionType::Timeline);
        assert_eq!(query.kind(), "TestimonyVsEvidence");
    }

    #[test]
    fn evidence_query_id_has_eve_prefix() {
        let query = ContradictionQuery::evidence_vs_evidence(
            "ev_001",
            "ev_002",
            ContradictionType::Identity,
        );
        assert!(query.query_id().starts_with("eve_ev_001_ev_002_"));
        assert_eq!(query.kind(), "EvidenceVsEvidence");
    }

    // === Scenario: two queries over the same facts are distinct requests ===
    #[test]
    fn query_ids_are_unique_per_construction() {
        let a = ContradictionQuery::testimony_vs_evidence("ts", "ev", ContradictionType::Location);
        let b = ContradictionQuery::testimony_vs_evidence("ts", "ev", ContradictionType::Location);
        assert_ne!(a.query_id(), b.query_id());
    }
}
