//! Shared fixtures for the contradiction system tests
//!
//! Builds the small case that exercises the detectors end to end: a suspect
//! who travelled under an alias, the train ticket that betrays him, and a
//! second suspect for cross-referencing.

use casefile::{CaseStore, DossierState, Evidence, InvestigationContext, TestimonyStatement};

pub const MARKO: &str = "su_assassin_marko";
pub const ANA: &str = "su_chemist_ana";

/// Seed the canonical train case into any store.
pub async fn seed_train_case(store: &dyn CaseStore) {
    let mut marko = DossierState::new(MARKO, "Marko Jovanović")
        .with_alias("N. Petrovic")
        .with_codename("The Assassin");
    marko.testimony_ids.push("ts_assassin_002".into());
    marko.testimony_ids.push("ts_assassin_004".into());
    store.save_dossier(&marko).await.unwrap();

    store
        .save_dossier(&DossierState::new(ANA, "Ana Kovač"))
        .await
        .unwrap();

    store
        .save_testimony(&TestimonyStatement::new(
            "ts_assassin_002",
            MARKO,
            "My train got in around 1 PM. I was late.",
        ))
        .await
        .unwrap();

    let mut denial = TestimonyStatement::new(
        "ts_assassin_004",
        MARKO,
        "I have never used the name Petrovic.",
    );
    denial.metadata.insert("denied_identity", "N. Petrovic");
    store.save_testimony(&denial).await.unwrap();

    store
        .save_evidence(
            &Evidence::new("ev_tickets_001", "tickets", "Train Ticket")
                .with_content("arrival_time", "11:50")
                .with_content("passenger_name", "N. Petrovic"),
        )
        .await
        .unwrap();
}

/// Fetch a dossier that must exist.
pub async fn dossier(context: &InvestigationContext, suspect_id: &str) -> DossierState {
    context.dossier(suspect_id).await.unwrap().unwrap()
}
