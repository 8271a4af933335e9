//! Fact store backends
//!
//! The engine consumes durable storage through the `CaseStore` trait.
//! `JsonStore` is the file-backed implementation; `MemoryStore` backs tests
//! and in-process embedding.

mod json;
mod memory;
mod traits;

pub use json::JsonStore;
pub use memory::MemoryStore;
pub use traits::{CaseStore, StoreError, StoreResult};
