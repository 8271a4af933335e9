//! End-to-end contradiction system tests
//!
//! Drives the full service stack over both stores: detection, dossier
//! recording, the resolution protocol, and JSON persistence.

mod common;

use casefile::{
    CaseStore, ContradictionQuery, ContradictionResolution, ContradictionService,
    ContradictionType, CrossReference, DetectorSet, InvestigationContext, JsonStore, MemoryStore,
    NullPublisher, TracingPublisher,
};
use common::{dossier, seed_train_case, ANA, MARKO};
use std::sync::Arc;
use tempfile::TempDir;

fn service_over(store: Arc<dyn CaseStore>) -> ContradictionService {
    let publisher = Arc::new(NullPublisher::new());
    let context = InvestigationContext::new(store, publisher.clone());
    ContradictionService::new(DetectorSet::with_defaults(), context, publisher)
}

// === Scenario: the train ticket betrays the 1 PM story ===
#[tokio::test]
async fn timeline_conflict_is_detected_and_filed() {
    let store = Arc::new(MemoryStore::new());
    seed_train_case(store.as_ref()).await;
    let service = service_over(store);

    let query = ContradictionQuery::testimony_vs_evidence(
        "ts_assassin_002",
        "ev_tickets_001",
        ContradictionType::Timeline,
    );
    let result = service.check_contradiction(&query).await.unwrap();

    assert!(result.is_contradiction);
    assert_eq!(result.contradiction_type, ContradictionType::Timeline);
    assert_eq!(result.affected_suspects, vec![MARKO]);
    assert_eq!(result.related_evidence, vec!["ev_tickets_001"]);
    assert!(result.contradiction_id.starts_with("co_marko_timeline_"));
    assert!(result
        .description
        .contains("My train got in around 1 PM. I was late."));
    assert!(result.description.contains("11:50"));

    let filed = dossier(service.context(), MARKO).await;
    assert_eq!(filed.contradictions.len(), 1);
    assert!(filed.has_unresolved_contradictions());
    assert_eq!(filed.resolved_contradiction_count(), 0);
}

// === Scenario: the alias denial trips the identity detector ===
#[tokio::test]
async fn denied_alias_matching_the_ticket_is_a_contradiction() {
    let store = Arc::new(MemoryStore::new());
    seed_train_case(store.as_ref()).await;
    let service = service_over(store);

    let query = ContradictionQuery::testimony_vs_evidence(
        "ts_assassin_004",
        "ev_tickets_001",
        ContradictionType::Identity,
    );
    let result = service.check_contradiction(&query).await.unwrap();

    assert!(result.is_contradiction);
    assert_eq!(
        result.description,
        "Suspect denies identity 'N. Petrovic' but evidence shows 'N. Petrovic'"
    );
    assert!(result.contradiction_id.starts_with("co_marko_identity_"));
}

// === Scenario: re-filing the same detection never duplicates ===
#[tokio::test]
async fn dossier_recording_is_idempotent_per_contradiction_id() {
    let store = Arc::new(MemoryStore::new());
    seed_train_case(store.as_ref()).await;
    let service = service_over(store.clone());

    let query = ContradictionQuery::testimony_vs_evidence(
        "ts_assassin_002",
        "ev_tickets_001",
        ContradictionType::Timeline,
    );
    let result = service.check_contradiction(&query).await.unwrap();

    // simulate a replayed detection of the same contradiction id
    let mut filed = dossier(service.context(), MARKO).await;
    assert!(!filed.record_contradiction(result.clone()));
    store.save_dossier(&filed).await.unwrap();

    let filed = dossier(service.context(), MARKO).await;
    assert_eq!(filed.contradictions.len(), 1);
}

// === Scenario: the sweep covers every testimony and category ===
#[tokio::test]
async fn suspect_sweep_finds_both_conflicts() {
    let store = Arc::new(MemoryStore::new());
    seed_train_case(store.as_ref()).await;
    let service = service_over(store);

    let found = service.get_possible_contradictions(MARKO).await.unwrap();
    let categories: Vec<ContradictionType> =
        found.iter().map(|r| r.contradiction_type).collect();
    assert_eq!(found.len(), 2, "timeline plus identity: {:?}", categories);
    assert!(categories.contains(&ContradictionType::Timeline));
    assert!(categories.contains(&ContradictionType::Identity));

    // both landed in the dossier
    let filed = dossier(service.context(), MARKO).await;
    assert_eq!(filed.contradictions.len(), 2);
}

// === Scenario: the resolution protocol, end to end ===
#[tokio::test]
async fn resolution_amends_cross_references_and_marks_resolved() {
    let store = Arc::new(MemoryStore::new());
    seed_train_case(store.as_ref()).await;
    let service = service_over(store);

    let query = ContradictionQuery::testimony_vs_evidence(
        "ts_assassin_002",
        "ev_tickets_001",
        ContradictionType::Timeline,
    );
    let result = service.check_contradiction(&query).await.unwrap();
    assert!(!service
        .is_contradiction_resolved(&result.contradiction_id)
        .await
        .unwrap());

    let resolution = ContradictionResolution {
        amended_testimony: Some("I arrived at 11:50 and lingered at the station.".into()),
        new_evidence_ids: vec!["ev_tickets_001".into()],
        cross_references: vec![CrossReference::new(MARKO, ANA, "supplier")
            .with_evidence("The ticket stub carried her shop's stamp.")],
        ..Default::default()
    };
    service.apply_resolution(&result, &resolution).await.unwrap();

    assert!(service
        .is_contradiction_resolved(&result.contradiction_id)
        .await
        .unwrap());

    let marko = dossier(service.context(), MARKO).await;
    assert_eq!(marko.resolved_contradiction_count(), 1);
    assert!(!marko.has_unresolved_contradictions());
    assert_eq!(marko.relationships.len(), 1);
    assert_eq!(marko.relationships[0].relationship_type, "supplier");

    let ana = dossier(service.context(), ANA).await;
    assert_eq!(ana.relationships.len(), 1);

    // the amendment lands on the latest listed statement
    let amended = service
        .context()
        .testimony("ts_assassin_004")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        amended.current_text(),
        "I arrived at 11:50 and lingered at the station."
    );
}

// === Scenario: an all-empty resolution leaves the contradiction open ===
#[tokio::test]
async fn empty_resolution_does_not_mark_resolved() {
    let store = Arc::new(MemoryStore::new());
    seed_train_case(store.as_ref()).await;
    let service = service_over(store);

    let query = ContradictionQuery::testimony_vs_evidence(
        "ts_assassin_002",
        "ev_tickets_001",
        ContradictionType::Timeline,
    );
    let result = service.check_contradiction(&query).await.unwrap();
    assert!(result.is_contradiction);

    // every resolution field empty: the protocol runs, but the stored
    // resolution carries no content, so the contradiction stays open
    service
        .apply_resolution(&result, &ContradictionResolution::default())
        .await
        .unwrap();

    assert!(!service
        .is_contradiction_resolved(&result.contradiction_id)
        .await
        .unwrap());
    let filed = dossier(service.context(), MARKO).await;
    assert!(filed.has_unresolved_contradictions());
    assert_eq!(filed.resolved_contradiction_count(), 0);

    // a later populated resolution still closes it
    let resolution = ContradictionResolution {
        amended_testimony: Some("I arrived at 11:50.".into()),
        ..Default::default()
    };
    service.apply_resolution(&result, &resolution).await.unwrap();
    assert!(service
        .is_contradiction_resolved(&result.contradiction_id)
        .await
        .unwrap());
}

// === Scenario: the same case round-trips through the JSON store ===
#[tokio::test]
async fn json_store_persists_detection_and_resolution() {
    let dir = TempDir::new().unwrap();

    let contradiction_id = {
        let store = Arc::new(JsonStore::open(dir.path()).await.unwrap());
        seed_train_case(store.as_ref() as &dyn CaseStore).await;
        let publisher = Arc::new(TracingPublisher::new());
        let context = InvestigationContext::new(store, publisher.clone());
        let service =
            ContradictionService::new(DetectorSet::with_defaults(), context, publisher);

        let query = ContradictionQuery::testimony_vs_evidence(
            "ts_assassin_002",
            "ev_tickets_001",
            ContradictionType::Timeline,
        );
        let result = service.check_contradiction(&query).await.unwrap();
        assert!(result.is_contradiction);

        let resolution = ContradictionResolution {
            amended_testimony: Some("I arrived at 11:50.".into()),
            ..Default::default()
        };
        service.apply_resolution(&result, &resolution).await.unwrap();
        result.contradiction_id
    };

    // a fresh store over the same directory sees everything
    let reopened = Arc::new(JsonStore::open(dir.path()).await.unwrap());
    let service = service_over(reopened.clone());

    assert!(service
        .is_contradiction_resolved(&contradiction_id)
        .await
        .unwrap());
    let filed = dossier(service.context(), MARKO).await;
    assert_eq!(filed.contradictions.len(), 1);
    assert_eq!(filed.contradictions[0].contradiction_id, contradiction_id);

    let amended = service
        .context()
        .testimony("ts_assassin_004")
        .await
        .unwrap()
        .unwrap();
    assert!(amended.is_amended());
    assert_eq!(amended.original_text, "I have never used the name Petrovic.");

    assert!(dir.path().join("evidence.json").exists());
    assert!(dir.path().join("testimony.json").exists());
    assert!(dir.path().join("dossiers.json").exists());
    assert!(dir.path().join("contradictions.json").exists());
}
