//! Conflict detectors
//!
//! One detector per contradiction category. Each extracts candidate facts
//! from both sides of a query, then reports the first conflicting pair —
//! iteration order over the declared field lists is part of the contract.

mod identity;
mod location;
mod registry;
mod timeline;
mod traits;

pub use identity::IdentityDetector;
pub use location::LocationDetector;
pub use registry::DetectorSet;
pub use timeline::TimelineDetector;
pub use traits::Detector;

use crate::model::ContradictionType;
use uuid::Uuid;

/// Generate a contradiction id.
///
/// Shape: `co_<last '_' segment of suspect id>_<category>_<2 hex chars>`,
/// or `co_evidence_<category>_<2 hex chars>` when no suspect is attributed
/// (evidence-vs-evidence). The short human-readable shape is a compatibility
/// convention; the suffix comes from a v4 uuid.
pub(crate) fn contradiction_id(suspect_id: Option<&str>, category: ContradictionType) -> String {
    let uuid = Uuid::new_v4().simple().to_string();
    let suffix = &uuid[..2];
    match suspect_id {
        Some(suspect_id) => {
            let tail = suspect_id.rsplit('_').next().unwrap_or(suspect_id);
            format!("co_{}_{}_{}", tail, category.label(), suffix)
        }
        None => format!("co_evidence_{}_{}", category.label(), suffix),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // === Scenario: ids carry the suspect tail, category, and hex suffix ===
    #[test]
    fn contradiction_id_uses_last_suspect_segment() {
        let id = contradiction_id(Some("su_assassin_marko"), ContradictionType::Timeline);
        assert!(id.starts_with("co_marko_timeline_"), "got {}", id);
        let suffix = id.rsplit('_').next().unwrap();
        assert_eq!(suffix.len(), 2);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn contradiction_id_without_suspect_is_evidence_scoped() {
        let id = contradiction_id(None, ContradictionType::Identity);
        assert!(id.starts_with("co_evidence_identity_"), "got {}", id);
    }

    #[test]
    fn contradiction_id_handles_suspect_id_without_underscores() {
        let id = contradiction_id(Some("marko"), ContradictionType::Location);
        assert!(id.starts_with("co_marko_location_"), "got {}", id);
    }
}
