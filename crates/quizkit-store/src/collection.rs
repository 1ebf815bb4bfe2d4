//! Generic durable collection over a single JSON document.
//!
//! A collection holds homogeneous records as one ordered sequence inside a
//! versioned document. Every mutation reads the whole snapshot, changes it
//! in memory, and writes the whole snapshot back; the collection's write
//! lock is held across that cycle so two concurrent mutations of the same
//! collection serialize instead of overwriting each other. Reads take no
//! lock and always see some complete snapshot.

use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use quizkit_core::model::{Account, Attempt, Quiz};

use crate::error::StoreError;

/// Schema version written into every collection document.
pub const DOCUMENT_VERSION: u32 = 1;

/// A persisted record addressable by id.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    fn id(&self) -> &str;
}

impl Record for Quiz {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Account {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Attempt {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Serialize, Deserialize)]
struct CollectionDocument<T> {
    version: u32,
    records: Vec<T>,
}

/// A named collection materialized as one JSON document under a data
/// directory.
pub struct Collection<T: Record> {
    name: &'static str,
    path: PathBuf,
    write_lock: Mutex<()>,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> Collection<T> {
    pub fn new(name: &'static str, dir: &Path) -> Self {
        Self {
            name,
            path: dir.join(format!("{name}.json")),
            write_lock: Mutex::new(()),
            _record: PhantomData,
        }
    }

    /// Path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Seed an empty document if none exists yet. Idempotent.
    pub async fn seed(&self) -> Result<(), StoreError> {
        match tokio::fs::try_exists(&self.path).await {
            Ok(true) => Ok(()),
            Ok(false) => self.save(&[]).await,
            Err(source) => Err(StoreError::unavailable(&self.path, source)),
        }
    }

    /// Full snapshot of the collection.
    ///
    /// A missing document reads as an empty collection (never written); an
    /// unreadable or undecodable one is an explicit error, never silently
    /// empty.
    pub async fn load(&self) -> Result<Vec<T>, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(StoreError::unavailable(&self.path, source)),
        };

        let doc: CollectionDocument<T> = serde_json::from_slice(&bytes)
            .map_err(|e| StoreError::corrupt(&self.path, e.to_string()))?;

        if doc.version > DOCUMENT_VERSION {
            return Err(StoreError::corrupt(
                &self.path,
                format!("unsupported document version {}", doc.version),
            ));
        }

        Ok(doc.records)
    }

    /// First-match scan; `Ok(None)` when absent.
    pub async fn get(&self, id: &str) -> Result<Option<T>, StoreError> {
        Ok(self.load().await?.into_iter().find(|r| r.id() == id))
    }

    /// Append a record and persist the whole snapshot.
    pub async fn insert(&self, record: T) -> Result<T, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.load().await?;
        records.push(record.clone());
        self.save(&records).await?;
        Ok(record)
    }

    /// Apply `f` to the matching record and persist; `Ok(None)` when absent
    /// (nothing is written).
    pub async fn update_with<F>(&self, id: &str, f: F) -> Result<Option<T>, StoreError>
    where
        F: FnOnce(&mut T) + Send,
    {
        let _guard = self.write_lock.lock().await;
        let mut records = self.load().await?;
        let Some(record) = records.iter_mut().find(|r| r.id() == id) else {
            return Ok(None);
        };
        f(record);
        let updated = record.clone();
        self.save(&records).await?;
        Ok(Some(updated))
    }

    /// Remove the matching record; the snapshot is persisted only if
    /// something was removed. Idempotent.
    pub async fn remove(&self, id: &str) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.load().await?;
        let before = records.len();
        records.retain(|r| r.id() != id);
        if records.len() == before {
            return Ok(false);
        }
        self.save(&records).await?;
        Ok(true)
    }

    /// Persist a full snapshot through a temp file and rename, so a crashed
    /// write cannot truncate the document.
    async fn save(&self, records: &[T]) -> Result<(), StoreError> {
        let doc = CollectionDocument {
            version: DOCUMENT_VERSION,
            records: records.to_vec(),
        };
        let json = serde_json::to_vec_pretty(&doc)?;

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &json)
            .await
            .map_err(|e| StoreError::unavailable(&tmp, e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| StoreError::unavailable(&self.path, e))?;

        tracing::debug!(
            collection = self.name,
            records = records.len(),
            "persisted collection document"
        );
        Ok(())
    }
}
