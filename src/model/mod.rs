//! Core data model: exhibits, testimony, dossiers, and contradiction records

mod contradiction;
mod dossier;
mod evidence;
mod testimony;
mod value;

pub use contradiction::{
    ContradictionResolution, ContradictionResult, ContradictionType, CrossReference,
};
pub use dossier::DossierState;
pub use evidence::Evidence;
pub use testimony::TestimonyStatement;
pub use value::{FieldMap, FieldValue};
