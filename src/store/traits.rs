//! Fact store trait definitions

use crate::model::{ContradictionResult, DossierState, Evidence, TestimonyStatement};
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during fact store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for fact store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Durable key-addressed storage for the investigation's facts.
///
/// Lookups return `None` for unknown ids; saves are upserts keyed by id.
/// Implementations must be thread-safe (Send + Sync), and are expected to
/// serialize mutations per record — the engine issues its store calls
/// sequentially and holds no locks of its own.
#[async_trait]
pub trait CaseStore: Send + Sync {
    // === Lookups ===

    async fn evidence(&self, id: &str) -> StoreResult<Option<Evidence>>;

    async fn all_evidence(&self) -> StoreResult<Vec<Evidence>>;

    async fn testimony(&self, id: &str) -> StoreResult<Option<TestimonyStatement>>;

    async fn all_testimony(&self) -> StoreResult<Vec<TestimonyStatement>>;

    async fn dossier(&self, suspect_id: &str) -> StoreResult<Option<DossierState>>;

    async fn all_dossiers(&self) -> StoreResult<Vec<DossierState>>;

    // === Upserts ===

    async fn save_evidence(&self, evidence: &Evidence) -> StoreResult<()>;

    async fn save_testimony(&self, testimony: &TestimonyStatement) -> StoreResult<()>;

    async fn save_dossier(&self, dossier: &DossierState) -> StoreResult<()>;

    async fn save_contradiction(&self, contradiction: &ContradictionResult) -> StoreResult<()>;
}
