//! Detector trait — the contract conflict detectors implement

use crate::context::InvestigationContext;
use crate::error::CaseResult;
use crate::model::{ContradictionResult, ContradictionType};
use crate::query::ContradictionQuery;
use async_trait::async_trait;

/// A conflict detector for one contradiction category.
///
/// Detectors hold no state across calls: each `detect` invocation is a pure
/// function of the query plus the investigation snapshot at call time.
/// Expected negative outcomes come back as non-contradiction results;
/// only collaborator failures surface as errors.
#[async_trait]
pub trait Detector: Send + Sync {
    /// The single category this detector handles.
    fn handled_type(&self) -> ContradictionType;

    /// Whether this detector claims the query. Both query shapes are
    /// recognized by every detector, so this reduces to a category match.
    fn can_handle(&self, query: &ContradictionQuery) -> bool {
        query.expected_type() == self.handled_type()
    }

    /// Run detection, reading facts through the investigation context.
    async fn detect(
        &self,
        query: &ContradictionQuery,
        context: &InvestigationContext,
    ) -> CaseResult<ContradictionResult>;
}
