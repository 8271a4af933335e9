//! In-memory fact store
//!
//! DashMap-backed store for tests and in-process embedding. Nothing is
//! persisted; ordering of `all_*` sweeps follows insertion order.

use super::traits::{CaseStore, StoreResult};
use crate::model::{ContradictionResult, DossierState, Evidence, TestimonyStatement};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// An in-memory `CaseStore`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    evidence: DashMap<String, (u64, Evidence)>,
    testimony: DashMap<String, (u64, TestimonyStatement)>,
    dossiers: DashMap<String, (u64, DossierState)>,
    contradictions: DashMap<String, (u64, ContradictionResult)>,
    // Insertion counter so all_* sweeps come back in a stable order.
    sequence: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_seq(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::Relaxed)
    }

    fn ordered<T: Clone>(map: &DashMap<String, (u64, T)>) -> Vec<T> {
        let mut items: Vec<(u64, T)> = map.iter().map(|r| r.value().clone()).collect();
        items.sort_by_key(|(seq, _)| *seq);
        items.into_iter().map(|(_, item)| item).collect()
    }
}

#[async_trait]
impl CaseStore for MemoryStore {
    async fn evidence(&self, id: &str) -> StoreResult<Option<Evidence>> {
        Ok(self.evidence.get(id).map(|r| r.value().1.clone()))
    }

    async fn all_evidence(&self) -> StoreResult<Vec<Evidence>> {
        Ok(Self::ordered(&self.evidence))
    }

    async fn testimony(&self, id: &str) -> StoreResult<Option<TestimonyStatement>> {
        Ok(self.testimony.get(id).map(|r| r.value().1.clone()))
    }

    async fn all_testimony(&self) -> StoreResult<Vec<TestimonyStatement>> {
        Ok(Self::ordered(&self.testimony))
    }

    async fn dossier(&self, suspect_id: &str) -> StoreResult<Option<DossierState>> {
        Ok(self.dossiers.get(suspect_id).map(|r| r.value().1.clone()))
    }

    async fn all_dossiers(&self) -> StoreResult<Vec<DossierState>> {
        Ok(Self::ordered(&self.dossiers))
    }

    async fn save_evidence(&self, evidence: &Evidence) -> StoreResult<()> {
        let seq = match self.evidence.get(&evidence.id) {
            Some(existing) => existing.value().0,
            None => self.next_seq(),
        };
        self.evidence.insert(evidence.id.clone(), (seq, evidence.clone()));
        Ok(())
    }

    async fn save_testimony(&self, testimony: &TestimonyStatement) -> StoreResult<()> {
        let seq = match self.testimony.get(&testimony.id) {
            Some(existing) => existing.value().0,
            None => self.next_seq(),
        };
        self.testimony
            .insert(testimony.id.clone(), (seq, testimony.clone()));
        Ok(())
    }

    async fn save_dossier(&self, dossier: &DossierState) -> StoreResult<()> {
        let seq = match self.dossiers.get(&dossier.suspect_id) {
            Some(existing) => existing.value().0,
            None => self.next_seq(),
        };
        self.dossiers
            .insert(dossier.suspect_id.clone(), (seq, dossier.clone()));
        Ok(())
    }

    async fn save_contradiction(&self, contradiction: &ContradictionResult) -> StoreResult<()> {
        let seq = match self.contradictions.get(&contradiction.contradiction_id) {
            Some(existing) => existing.value().0,
            None => self.next_seq(),
        };
        self.contradictions.insert(
            contradiction.contradiction_id.clone(),
            (seq, contradiction.clone()),
        );
        Ok(())
    }
}
