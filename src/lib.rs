//! Casefile: Fact-Contradiction Engine
//!
//! A rule-based engine that tests witness testimony against physical
//! evidence (and evidence against evidence) for contradictions along three
//! axes: timeline, location, and identity.
//!
//! # Core Concepts
//!
//! - **Queries**: A testimony-vs-evidence or evidence-vs-evidence pair,
//!   tagged with the expected contradiction category
//! - **Detectors**: One per category; each extracts candidate facts from
//!   both sides and reports the first conflicting pair
//! - **Dossiers**: Per-suspect aggregates that accumulate detected
//!   contradictions, linked evidence, and cross-references
//!
//! # Example
//!
//! ```no_run
//! use casefile::{
//!     ContradictionQuery, ContradictionService, ContradictionType, DetectorSet,
//!     InvestigationContext, MemoryStore, TracingPublisher,
//! };
//! use std::sync::Arc;
//!
//! # async fn run() -> casefile::CaseResult<()> {
//! let store = Arc::new(MemoryStore::new());
//! let publisher = Arc::new(TracingPublisher::new());
//! let context = InvestigationContext::new(store, publisher.clone());
//! let service = ContradictionService::new(DetectorSet::with_defaults(), context, publisher);
//!
//! let query = ContradictionQuery::testimony_vs_evidence(
//!     "ts_assassin_002",
//!     "ev_tickets_001",
//!     ContradictionType::Timeline,
//! );
//! let result = service.check_contradiction(&query).await?;
//! println!("{}", result.description);
//! # Ok(())
//! # }
//! ```

mod context;
mod detect;
mod error;
mod model;
mod notify;
mod query;
mod search;
mod service;
pub mod store;

pub use context::InvestigationContext;
pub use detect::{Detector, DetectorSet, IdentityDetector, LocationDetector, TimelineDetector};
pub use error::{CaseResult, CasefileError};
pub use model::{
    ContradictionResolution, ContradictionResult, ContradictionType, CrossReference, DossierState,
    Evidence, FieldMap, FieldValue, TestimonyStatement,
};
pub use notify::{EventPublisher, NullPublisher, TracingPublisher};
pub use query::ContradictionQuery;
pub use search::{EvidenceSearch, TestimonySearch};
pub use service::ContradictionService;
pub use store::{CaseStore, JsonStore, MemoryStore, StoreError, StoreResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
