//! Contradiction engine front door
//!
//! Dispatches queries to the detector set, records positive detections into
//! the affected dossiers, and drives the resolution protocol.

use crate::context::InvestigationContext;
use crate::detect::DetectorSet;
use crate::error::{CaseResult, CasefileError};
use crate::model::{
    ContradictionResolution, ContradictionResult, ContradictionType, TestimonyStatement,
};
use crate::notify::EventPublisher;
use crate::query::ContradictionQuery;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// The contradiction engine.
///
/// Holds the detector set, the investigation state, and the event sink.
/// Cloning is cheap; all state lives behind the context's store.
#[derive(Clone)]
pub struct ContradictionService {
    detectors: DetectorSet,
    context: InvestigationContext,
    publisher: Arc<dyn EventPublisher>,
}

impl ContradictionService {
    pub fn new(
        detectors: DetectorSet,
        context: InvestigationContext,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            detectors,
            context,
            publisher,
        }
    }

    pub fn context(&self) -> &InvestigationContext {
        &self.context
    }

    /// Run one query through the detector claiming its category.
    ///
    /// A positive detection is published and recorded into every affected
    /// suspect's dossier before it is returned. Recording is idempotent per
    /// contradiction id, so re-running a query never duplicates dossier
    /// entries (each run mints a fresh id, though, so identical facts checked
    /// twice do produce two entries).
    pub async fn check_contradiction(
        &self,
        query: &ContradictionQuery,
    ) -> CaseResult<ContradictionResult> {
        let Some(detector) = self.detectors.for_query(query) else {
            warn!(query_id = query.query_id(), kind = query.kind(), "no detector for query");
            let mut result = ContradictionResult::no_contradiction(
                query.expected_type(),
                query.query_id(),
                format!("No detector available for query kind {}", query.kind()),
            );
            result.contradiction_id = format!("no_detector_{}", query.query_id());
            return Ok(result);
        };

        let result = detector.detect(query, &self.context).await?;
        debug!(
            query_id = query.query_id(),
            is_contradiction = result.is_contradiction,
            "detection complete"
        );

        if result.is_contradiction {
            info!(
                contradiction_id = %result.contradiction_id,
                category = %result.contradiction_type,
                "contradiction detected"
            );
            self.publisher.contradiction_found(&result).await;
            self.context.save_contradiction(&result).await?;
            self.record_in_dossiers(&result).await?;
        }

        Ok(result)
    }

    /// Apply a caller-supplied resolution to a previously detected
    /// contradiction.
    ///
    /// Amends the most recent testimony of the first affected suspect when
    /// the resolution carries amended text, re-saves any resolving evidence,
    /// establishes the cross-references, then stores the resolution on the
    /// dossier record. Errors if the result is not a contradiction.
    pub async fn apply_resolution(
        &self,
        result: &ContradictionResult,
        resolution: &ContradictionResolution,
    ) -> CaseResult<ContradictionResult> {
        if !result.is_contradiction {
            return Err(CasefileError::NotAContradiction);
        }

        if let Some(amended) = resolution.amended_testimony.as_deref() {
            if !amended.is_empty() {
                if let Some(statement) = self.latest_affected_testimony(result).await? {
                    self.context.update_testimony(&statement.id, amended).await?;
                } else {
                    warn!(
                        contradiction_id = %result.contradiction_id,
                        "no testimony found to amend"
                    );
                }
            }
        }

        for evidence_id in &resolution.new_evidence_ids {
            if let Some(evidence) = self.context.evidence(evidence_id).await? {
                self.context.add_evidence(&evidence).await?;
            } else {
                warn!(evidence_id, "resolving evidence not found");
            }
        }

        for reference in &resolution.cross_references {
            self.context.add_cross_reference(reference).await?;
        }

        self.context
            .mark_contradiction_resolved(&result.contradiction_id, resolution)
            .await?;

        info!(contradiction_id = %result.contradiction_id, "resolution applied");
        Ok(result.clone())
    }

    /// Whether a stored contradiction carries a non-empty resolution.
    /// Blank or unknown ids read as unresolved.
    pub async fn is_contradiction_resolved(&self, contradiction_id: &str) -> CaseResult<bool> {
        if contradiction_id.trim().is_empty() {
            return Ok(false);
        }
        let resolved = self.context.resolved_contradictions().await?;
        Ok(resolved.iter().any(|c| c.contradiction_id == contradiction_id))
    }

    /// Sweep one suspect: every listed testimony against every piece of
    /// evidence, across all categories. Returns positive detections only;
    /// blank or unknown suspect ids return an empty list.
    pub async fn get_possible_contradictions(
        &self,
        suspect_id: &str,
    ) -> CaseResult<Vec<ContradictionResult>> {
        if suspect_id.trim().is_empty() {
            return Ok(Vec::new());
        }
        let Some(dossier) = self.context.dossier(suspect_id).await? else {
            return Ok(Vec::new());
        };

        let evidence = self.context.all_evidence().await?;
        let mut found = Vec::new();
        for testimony_id in &dossier.testimony_ids {
            for item in &evidence {
                for category in ContradictionType::ALL {
                    let query = ContradictionQuery::testimony_vs_evidence(
                        testimony_id.clone(),
                        item.id.clone(),
                        category,
                    );
                    let result = self.check_contradiction(&query).await?;
                    if result.is_contradiction {
                        found.push(result);
                    }
                }
            }
        }
        Ok(found)
    }

    /// Unresolved contradictions across the case.
    ///
    /// Always empty for now: detection is query-driven, so open conflicts
    /// are only known once a caller has checked them. Dossier scans via
    /// `InvestigationContext` cover the stored ones.
    pub async fn get_unresolved_contradictions(&self) -> CaseResult<Vec<ContradictionResult>> {
        Ok(Vec::new())
    }

    async fn record_in_dossiers(&self, result: &ContradictionResult) -> CaseResult<()> {
        for suspect_id in &result.affected_suspects {
            let Some(mut dossier) = self.context.dossier(suspect_id).await? else {
                warn!(suspect_id, "affected suspect has no dossier");
                continue;
            };
            if dossier.record_contradiction(result.clone()) {
                dossier.last_updated = Utc::now();
                self.context.save_dossier(&dossier).await?;
                self.publisher.dossier_updated(suspect_id).await;
            }
        }
        Ok(())
    }

    /// The most recent testimony of the first affected suspect. Ties keep
    /// the earliest-listed statement.
    async fn latest_affected_testimony(
        &self,
        result: &ContradictionResult,
    ) -> CaseResult<Option<TestimonyStatement>> {
        let Some(suspect_id) = result.affected_suspects.first() else {
            return Ok(None);
        };
        let Some(dossier) = self.context.dossier(suspect_id).await? else {
            return Ok(None);
        };

        let mut latest: Option<TestimonyStatement> = None;
        for testimony_id in &dossier.testimony_ids {
            let Some(statement) = self.context.testimony(testimony_id).await? else {
                continue;
            };
            match &latest {
                Some(current) if statement.timestamp <= current.timestamp => {}
                _ => latest = Some(statement),
            }
        }
        Ok(latest)
    }
}
