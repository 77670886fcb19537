use crate::config::{StoreConfig, StoreKind};
use crate::core::DocumentStore;
use crate::utils::error::{NumcheckError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// Append-only store keeping one JSON-lines file per collection.
#[derive(Debug, Clone)]
pub struct JsonLinesStore {
    base_path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl JsonLinesStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn collection_path(&self, collection: &str) -> Result<PathBuf> {
        let well_formed = !collection.is_empty()
            && collection
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !well_formed {
            return Err(NumcheckError::StoreError {
                message: format!("Invalid collection name: '{}'", collection),
            });
        }
        Ok(self.base_path.join(format!("{}.jsonl", collection)))
    }
}

#[async_trait]
impl DocumentStore for JsonLinesStore {
    async fn ping(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.base_path).await?;
        let metadata = tokio::fs::metadata(&self.base_path).await?;
        if !metadata.is_dir() {
            return Err(NumcheckError::StoreError {
                message: format!("{} is not a directory", self.base_path.display()),
            });
        }
        Ok(())
    }

    async fn insert_one(&self, collection: &str, document: serde_json::Value) -> Result<()> {
        let path = self.collection_path(collection)?;

        let mut line = serde_json::to_vec(&document)?;
        line.push(b'\n');

        // 同一行必須一次寫完，避免交錯
        let _guard = self.write_lock.lock().await;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;
        file.write_all(&line).await?;
        file.flush().await?;

        tracing::trace!("Appended document to {}", path.display());
        Ok(())
    }
}

/// Process-local store. Contents are lost on exit.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    collections: Arc<Mutex<HashMap<String, Vec<serde_json::Value>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn documents(&self, collection: &str) -> Vec<serde_json::Value> {
        let collections = self.collections.lock().await;
        collections.get(collection).cloned().unwrap_or_default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn insert_one(&self, collection: &str, document: serde_json::Value) -> Result<()> {
        let mut collections = self.collections.lock().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(document);
        Ok(())
    }
}

pub fn build_store(config: &StoreConfig) -> Arc<dyn DocumentStore> {
    match config.kind {
        StoreKind::Jsonl => {
            tracing::info!("📁 Using JSON-lines store at {}", config.data_dir);
            Arc::new(JsonLinesStore::new(config.data_dir.clone()))
        }
        StoreKind::Memory => {
            tracing::info!("🧠 Using in-memory store");
            Arc::new(MemoryStore::new())
        }
    }
}
