//! Detector registry — closed-set dispatch by category
//!
//! The detector set is closed (timeline, location, identity); dispatch picks
//! the first registered detector that claims a query.

use super::traits::Detector;
use super::{IdentityDetector, LocationDetector, TimelineDetector};
use crate::query::ContradictionQuery;
use std::sync::Arc;

/// The registered detectors, tried in registration order.
#[derive(Clone)]
pub struct DetectorSet {
    detectors: Vec<Arc<dyn Detector>>,
}

impl DetectorSet {
    /// An empty set. Useful for exercising the no-detector path.
    pub fn empty() -> Self {
        Self {
            detectors: Vec::new(),
        }
    }

    /// The full closed set: timeline, location, identity.
    pub fn with_defaults() -> Self {
        let mut set = Self::empty();
        set.register(Arc::new(TimelineDetector::new()));
        set.register(Arc::new(LocationDetector::new()));
        set.register(Arc::new(IdentityDetector::new()));
        set
    }

    pub fn register(&mut self, detector: Arc<dyn Detector>) {
        self.detectors.push(detector);
    }

    /// First registered detector that claims the query, if any.
    pub fn for_query(&self, query: &ContradictionQuery) -> Option<Arc<dyn Detector>> {
        self.detectors
            .iter()
            .find(|d| d.can_handle(query))
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.detectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detectors.is_empty()
    }
}

impl Default for DetectorSet {
    fn default() -> Self {
        Self::with_defaults()
    }
}
