//! Engine error types

use crate::store::StoreError;
use thiserror::Error;

/// Errors that can occur in casefile operations.
///
/// Expected negative outcomes (missing records, missing extractable facts,
/// unmatched query types) are NOT errors — they come back as
/// non-contradiction results. These variants cover caller contract
/// violations and collaborator failures only.
#[derive(Debug, Error)]
pub enum CasefileError {
    #[error("cannot apply a resolution to a non-contradiction result")]
    NotAContradiction,

    #[error("{0} must not be blank")]
    BlankArgument(&'static str),

    #[error("testimony not found: {0}")]
    TestimonyNotFound(String),

    #[error("contradiction not found in any dossier: {0}")]
    ContradictionNotFound(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Result type for casefile operations
pub type CaseResult<T> = Result<T, CasefileError>;
