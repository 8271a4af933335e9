//! Investigation context — the read/mutate facade over the fact store
//!
//! Detectors read facts through this facade; the resolution path mutates
//! through it. Every mutating operation is followed by a notification.

use crate::error::{CaseResult, CasefileError};
use crate::model::{
    ContradictionResolution, ContradictionResult, CrossReference, DossierState, Evidence,
    TestimonyStatement,
};
use crate::notify::EventPublisher;
use crate::store::CaseStore;
use chrono::Utc;
use std::sync::Arc;

/// Read/mutate facade over the fact store.
///
/// Cheap to clone; all clones share the same store and publisher.
#[derive(Clone)]
pub struct InvestigationContext {
    store: Arc<dyn CaseStore>,
    publisher: Arc<dyn EventPublisher>,
}

impl InvestigationContext {
    pub fn new(store: Arc<dyn CaseStore>, publisher: Arc<dyn EventPublisher>) -> Self {
        Self { store, publisher }
    }

    // === Reads ===

    /// Look up a testimony statement. Blank ids read as absent.
    pub async fn testimony(&self, statement_id: &str) -> CaseResult<Option<TestimonyStatement>> {
        if statement_id.trim().is_empty() {
            return Ok(None);
        }
        Ok(self.store.testimony(statement_id).await?)
    }

    /// Look up an evidence record. Blank ids read as absent.
    pub async fn evidence(&self, evidence_id: &str) -> CaseResult<Option<Evidence>> {
        if evidence_id.trim().is_empty() {
            return Ok(None);
        }
        Ok(self.store.evidence(evidence_id).await?)
    }

    /// Look up a suspect's dossier. Blank ids read as absent.
    pub async fn dossier(&self, suspect_id: &str) -> CaseResult<Option<DossierState>> {
        if suspect_id.trim().is_empty() {
            return Ok(None);
        }
        Ok(self.store.dossier(suspect_id).await?)
    }

    pub async fn all_testimony(&self) -> CaseResult<Vec<TestimonyStatement>> {
        Ok(self.store.all_testimony().await?)
    }

    pub async fn all_evidence(&self) -> CaseResult<Vec<Evidence>> {
        Ok(self.store.all_evidence().await?)
    }

    pub async fn all_dossiers(&self) -> CaseResult<Vec<DossierState>> {
        Ok(self.store.all_dossiers().await?)
    }

    /// Every contradiction across all dossiers whose resolution carries
    /// content.
    pub async fn resolved_contradictions(&self) -> CaseResult<Vec<ContradictionResult>> {
        let dossiers = self.store.all_dossiers().await?;
        Ok(dossiers
            .into_iter()
            .flat_map(|d| d.contradictions)
            .filter(|c| c.resolution.has_any_resolution())
            .collect())
    }

    // === Mutations ===

    /// Amend a statement's text. The original text is retained; the dossier
    /// listing the statement gets its `last_updated` touched.
    pub async fn update_testimony(&self, statement_id: &str, amended_text: &str) -> CaseResult<()> {
        if statement_id.trim().is_empty() {
            return Err(CasefileError::BlankArgument("statement id"));
        }
        if amended_text.trim().is_empty() {
            return Err(CasefileError::BlankArgument("amended text"));
        }

        let mut testimony = self
            .store
            .testimony(statement_id)
            .await?
            .ok_or_else(|| CasefileError::TestimonyNotFound(statement_id.to_string()))?;

        testimony.amended_text = Some(amended_text.to_string());
        self.store.save_testimony(&testimony).await?;
        tracing::debug!(statement_id, "testimony amended");

        if let Some(mut dossier) = self.store.dossier(&testimony.suspect_id).await? {
            if dossier.testimony_ids.iter().any(|id| id == statement_id) {
                dossier.last_updated = Utc::now();
                self.store.save_dossier(&dossier).await?;
                self.publisher.dossier_updated(&dossier.suspect_id).await;
            }
        }

        Ok(())
    }

    /// Save (admit or confirm) an evidence record and announce the unlock.
    pub async fn add_evidence(&self, evidence: &Evidence) -> CaseResult<()> {
        self.store.save_evidence(evidence).await?;
        tracing::debug!(evidence_id = %evidence.id, "evidence saved");
        self.publisher.evidence_unlocked(&evidence.id).await;
        Ok(())
    }

    /// Record a cross-reference symmetrically in both suspects' dossiers.
    ///
    /// Insertion into each dossier is idempotent, keyed on (from, to,
    /// relationship type); a `dossier_updated` event fires per actual
    /// insertion, then `cross_reference_created` once.
    pub async fn add_cross_reference(&self, reference: &CrossReference) -> CaseResult<()> {
        self.add_reference_to_dossier(&reference.from_suspect_id, reference)
            .await?;
        self.add_reference_to_dossier(&reference.to_suspect_id, reference)
            .await?;
        self.publisher.cross_reference_created(reference).await;
        Ok(())
    }

    async fn add_reference_to_dossier(
        &self,
        suspect_id: &str,
        reference: &CrossReference,
    ) -> CaseResult<()> {
        let Some(mut dossier) = self.store.dossier(suspect_id).await? else {
            return Ok(());
        };

        if dossier.record_relationship(reference.clone()) {
            dossier.last_updated = Utc::now();
            self.store.save_dossier(&dossier).await?;
            self.publisher.dossier_updated(suspect_id).await;
        }
        Ok(())
    }

    /// Replace the stored resolution of a contradiction wherever it lives.
    ///
    /// Scans all dossiers and takes the first one containing the id. With
    /// the 2-hex-char id suffix convention, a suffix collision between two
    /// suspects' contradictions would resolve whichever dossier the scan
    /// reaches first.
    pub async fn mark_contradiction_resolved(
        &self,
        contradiction_id: &str,
        resolution: &ContradictionResolution,
    ) -> CaseResult<()> {
        if contradiction_id.trim().is_empty() {
            return Err(CasefileError::BlankArgument("contradiction id"));
        }

        let dossiers = self.store.all_dossiers().await?;
        let mut affected = dossiers
            .into_iter()
            .find(|d| {
                d.contradictions
                    .iter()
                    .any(|c| c.contradiction_id == contradiction_id)
            })
            .ok_or_else(|| CasefileError::ContradictionNotFound(contradiction_id.to_string()))?;

        for contradiction in &mut affected.contradictions {
            if contradiction.contradiction_id == contradiction_id {
                contradiction.resolution = resolution.clone();
            }
        }

        self.store.save_dossier(&affected).await?;
        self.publisher
            .contradiction_resolved(contradiction_id, resolution)
            .await;
        self.publisher.dossier_updated(&affected.suspect_id).await;
        Ok(())
    }

    // Internal: the service records detection results into dossiers itself
    // and owns the accompanying notification.
    pub(crate) async fn save_dossier(&self, dossier: &DossierState) -> CaseResult<()> {
        Ok(self.store.save_dossier(dossier).await?)
    }

    // Internal: detection log, upserted by contradiction id.
    pub(crate) async fn save_contradiction(&self, result: &ContradictionResult) -> CaseResult<()> {
        Ok(self.store.save_contradiction(result).await?)
    }
}
