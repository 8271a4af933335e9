//! JSON file-backed fact store
//!
//! One JSON array per collection (`evidence.json`, `testimony.json`,
//! `dossiers.json`, `contradictions.json`) under a single data directory.
//! All collections are loaded once at open; every save rewrites the file
//! for the collection it touched.

use super::traits::{CaseStore, StoreResult};
use crate::model::{ContradictionResult, DossierState, Evidence, TestimonyStatement};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

const EVIDENCE_FILE: &str = "evidence.json";
const TESTIMONY_FILE: &str = "testimony.json";
const DOSSIERS_FILE: &str = "dossiers.json";
const CONTRADICTIONS_FILE: &str = "contradictions.json";

#[derive(Debug, Default)]
struct Collections {
    evidence: Vec<Evidence>,
    testimony: Vec<TestimonyStatement>,
    dossiers: Vec<DossierState>,
    contradictions: Vec<ContradictionResult>,
}

/// A `CaseStore` backed by JSON files in a data directory.
#[derive(Debug)]
pub struct JsonStore {
    data_dir: PathBuf,
    collections: RwLock<Collections>,
}

impl JsonStore {
    /// Open a store over `data_dir`, creating the directory if needed.
    /// Missing collection files read as empty collections; malformed JSON
    /// propagates as a serialization error.
    pub async fn open(data_dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let data_dir = data_dir.into();
        tokio::fs::create_dir_all(&data_dir).await?;

        let collections = Collections {
            evidence: load_collection(&data_dir.join(EVIDENCE_FILE)).await?,
            testimony: load_collection(&data_dir.join(TESTIMONY_FILE)).await?,
            dossiers: load_collection(&data_dir.join(DOSSIERS_FILE)).await?,
            contradictions: load_collection(&data_dir.join(CONTRADICTIONS_FILE)).await?,
        };

        Ok(Self {
            data_dir,
            collections: RwLock::new(collections),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    async fn write_collection<T: Serialize>(&self, file: &str, items: &[T]) -> StoreResult<()> {
        let json = serde_json::to_string_pretty(items)?;
        tokio::fs::write(self.data_dir.join(file), json).await?;
        Ok(())
    }
}

async fn load_collection<T: DeserializeOwned>(path: &Path) -> StoreResult<Vec<T>> {
    match tokio::fs::read_to_string(path).await {
        Ok(json) => Ok(serde_json::from_str(&json)?),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(err) => Err(err.into()),
    }
}

/// Upsert into a cached collection by key. Returns nothing; position of an
/// existing record is preserved.
fn upsert<T: Clone>(items: &mut Vec<T>, item: &T, same_key: impl Fn(&T) -> bool) {
    match items.iter_mut().find(|existing| same_key(existing)) {
        Some(existing) => *existing = item.clone(),
        None => items.push(item.clone()),
    }
}

#[async_trait]
impl CaseStore for JsonStore {
    async fn evidence(&self, id: &str) -> StoreResult<Option<Evidence>> {
        let collections = self.collections.read().await;
        Ok(collections.evidence.iter().find(|e| e.id == id).cloned())
    }

    async fn all_evidence(&self) -> StoreResult<Vec<Evidence>> {
        Ok(self.collections.read().await.evidence.clone())
    }

    async fn testimony(&self, id: &str) -> StoreResult<Option<TestimonyStatement>> {
        let collections = self.collections.read().await;
        Ok(collections.testimony.iter().find(|t| t.id == id).cloned())
    }

    async fn all_testimony(&self) -> StoreResult<Vec<TestimonyStatement>> {
        Ok(self.collections.read().await.testimony.clone())
    }

    async fn dossier(&self, suspect_id: &str) -> StoreResult<Option<DossierState>> {
        let collections = self.collections.read().await;
        Ok(collections
            .dossiers
            .iter()
            .find(|d| d.suspect_id == suspect_id)
            .cloned())
    }

    async fn all_dossiers(&self) -> StoreResult<Vec<DossierState>> {
        Ok(self.collections.read().await.dossiers.clone())
    }

    async fn save_evidence(&self, evidence: &Evidence) -> StoreResult<()> {
        let mut collections = self.collections.write().await;
        upsert(&mut collections.evidence, evidence, |e| e.id == evidence.id);
        self.write_collection(EVIDENCE_FILE, &collections.evidence)
            .await
    }

    async fn save_testimony(&self, testimony: &TestimonyStatement) -> StoreResult<()> {
        let mut collections = self.collections.write().await;
        upsert(&mut collections.testimony, testimony, |t| {
            t.id == testimony.id
        });
        self.write_collection(TESTIMONY_FILE, &collections.testimony)
            .await
    }

    async fn save_dossier(&self, dossier: &DossierState) -> StoreResult<()> {
        let mut collections = self.collections.write().await;
        upsert(&mut collections.dossiers, dossier, |d| {
            d.suspect_id == dossier.suspect_id
        });
        self.write_collection(DOSSIERS_FILE, &collections.dossiers)
            .await
    }

    async fn save_contradiction(&self, contradiction: &ContradictionResult) -> StoreResult<()> {
        let mut collections = self.collections.write().await;
        upsert(&mut collections.contradictions, contradiction, |c| {
            c.contradiction_id == contradiction.contradiction_id
        });
        self.write_collection(CONTRADICTIONS_FILE, &collections.contradictions)
            .await
    }
}
