//! Lifecycle event publishing
//!
//! Fire-and-forget: the engine never consumes a return value from the
//! publisher, and publisher failures must not surface in detection results.
//! Implementations that can fail internally should log and swallow.

use crate::model::{ContradictionResolution, ContradictionResult, CrossReference};
use async_trait::async_trait;

/// Receives engine lifecycle events.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn contradiction_found(&self, result: &ContradictionResult);

    async fn contradiction_resolved(
        &self,
        contradiction_id: &str,
        resolution: &ContradictionResolution,
    );

    async fn dossier_updated(&self, suspect_id: &str);

    async fn evidence_unlocked(&self, evidence_id: &str);

    async fn cross_reference_created(&self, reference: &CrossReference);
}

/// Publishes events as `tracing` info events.
#[derive(Debug, Default)]
pub struct TracingPublisher;

impl TracingPublisher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventPublisher for TracingPublisher {
    async fn contradiction_found(&self, result: &ContradictionResult) {
        tracing::info!(
            contradiction_id = %result.contradiction_id,
            category = %result.contradiction_type,
            "contradiction found"
        );
    }

    async fn contradiction_resolved(
        &self,
        contradiction_id: &str,
        _resolution: &ContradictionResolution,
    ) {
        tracing::info!(contradiction_id, "contradiction resolved");
    }

    async fn dossier_updated(&self, suspect_id: &str) {
        tracing::info!(suspect_id, "dossier updated");
    }

    async fn evidence_unlocked(&self, evidence_id: &str) {
        tracing::info!(evidence_id, "evidence unlocked");
    }

    async fn cross_reference_created(&self, reference: &CrossReference) {
        tracing::info!(
            from = %reference.from_suspect_id,
            to = %reference.to_suspect_id,
            relationship = %reference.relationship_type,
            "cross-reference created"
        );
    }
}

/// Discards all events.
#[derive(Debug, Default)]
pub struct NullPublisher;

impl NullPublisher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventPublisher for NullPublisher {
    async fn contradiction_found(&self, _result: &ContradictionResult) {}

    async fn contradiction_resolved(
        &self,
        _contradiction_id: &str,
        _resolution: &ContradictionResolution,
    ) {
    }

    async fn dossier_updated(&self, _suspect_id: &str) {}

    async fn evidence_unlocked(&self, _evidence_id: &str) {}

    async fn cross_reference_created(&self, _reference: &CrossReference) {}
}

/// Records events for assertions. Test-only.
#[cfg(test)]
pub(crate) mod recording {
    use super::*;
    use std::sync::Mutex;

    /// A recorded event, flattened to (kind, subject id).
    #[derive(Debug, Clone, PartialEq)]
    pub struct RecordedEvent {
        pub kind: &'static str,
        pub subject: String,
    }

    #[derive(Debug, Default)]
    pub struct RecordingPublisher {
        pub events: Mutex<Vec<RecordedEvent>>,
    }

    impl RecordingPublisher {
        pub fn new() -> Self {
            Self::default()
        }

        fn push(&self, kind: &'static str, subject: impl Into<String>) {
            self.events.lock().unwrap().push(RecordedEvent {
                kind,
                subject: subject.into(),
            });
        }

        pub fn kinds(&self) -> Vec<&'static str> {
            self.events.lock().unwrap().iter().map(|e| e.kind).collect()
        }

        pub fn count_of(&self, kind: &str) -> usize {
            self.events
                .lock()
                .unwrap()
                .iter()
                .filter(|e| e.kind == kind)
                .count()
        }
    }

    #[async_trait]
    impl EventPublisher for RecordingPublisher {
        async fn contradiction_found(&self, result: &ContradictionResult) {
            self.push("found", result.contradiction_id.clone());
        }

        async fn contradiction_resolved(
            &self,
            contradiction_id: &str,
            _resolution: &ContradictionResolution,
        ) {
            self.push("resolved", contradiction_id);
        }

        async fn dossier_updated(&self, suspect_id: &str) {
            self.push("dossier_updated", suspect_id);
        }

        async fn evidence_unlocked(&self, evidence_id: &str) {
            self.push("evidence_unlocked", evidence_id);
        }

        async fn cross_reference_created(&self, reference: &CrossReference) {
            self.push(
                "cross_reference_created",
                format!("{}->{}", reference.from_suspect_id, reference.to_suspect_id),
            );
        }
    }
}
