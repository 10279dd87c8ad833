//! Sync coordinator backed by a JSON content snapshot on disk.
//!
//! The snapshot stands in for the remote API: every refresh re-reads the
//! file, picks the requested content and writes it through to the cache
//! store, exactly as a network-backed coordinator would.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use lessonsync_core::codec::CodecRegistry;
use lessonsync_core::content::{PublishingInfo, QuarterlyInfo};
use lessonsync_core::storage::{
    info_to_row, publishing_info_to_row, quarterly_to_row, CacheStore, PublishingKey, StoreError,
};
use lessonsync_core::sync::{Result, SyncCoordinator, SyncError};

/// Content published for one country/language pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishingEntry {
    pub country: String,
    pub language_code: String,
    #[serde(flatten)]
    pub info: PublishingInfo,
}

/// Everything the remote source publishes.
///
/// Quarterlies carry their lessons; a quarterly listed without lessons is
/// still part of the quarterly list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentSnapshot {
    #[serde(default)]
    pub quarterlies: Vec<QuarterlyInfo>,
    #[serde(default)]
    pub publishing_info: Vec<PublishingEntry>,
}

impl ContentSnapshot {
    pub fn find_info(&self, index: &str) -> Option<&QuarterlyInfo> {
        self.quarterlies
            .iter()
            .find(|info| info.quarterly.index == index)
    }

    pub fn find_publishing_info(&self, key: &PublishingKey) -> Option<&PublishingInfo> {
        self.publishing_info
            .iter()
            .find(|entry| entry.country == key.country && entry.language_code == key.language_code)
            .map(|entry| &entry.info)
    }
}

/// Sync coordinator that refreshes the cache from a snapshot file.
pub struct SnapshotSync<S: CacheStore> {
    path: PathBuf,
    store: Arc<S>,
    codecs: Arc<CodecRegistry>,
}

impl<S: CacheStore> SnapshotSync<S> {
    pub fn new(path: impl Into<PathBuf>, store: Arc<S>, codecs: Arc<CodecRegistry>) -> Self {
        Self {
            path: path.into(),
            store,
            codecs,
        }
    }

    /// Reads and parses the snapshot file.
    pub async fn load(&self) -> Result<ContentSnapshot> {
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            SyncError::RequestFailed(format!("Failed to read {}: {e}", self.path.display()))
        })?;

        serde_json::from_str(&raw).map_err(|e| {
            SyncError::InvalidContent(format!("Failed to parse {}: {e}", self.path.display()))
        })
    }
}

#[async_trait]
impl<S: CacheStore + 'static> SyncCoordinator for SnapshotSync<S> {
    async fn sync_quarterly_info(&self, index: &str) -> Result<Option<QuarterlyInfo>> {
        let snapshot = self.load().await?;
        let Some(info) = snapshot.find_info(index) else {
            tracing::debug!(index, "Quarterly not in snapshot");
            return Ok(None);
        };

        let row = info_to_row(info, &self.codecs).map_err(StoreError::from)?;
        self.store.upsert_info(&row).await?;

        tracing::debug!(index, lessons = info.lessons.len(), "Synced quarterly info");
        Ok(Some(info.clone()))
    }

    async fn sync_quarterlies(&self, language_code: &str) -> Result<()> {
        let snapshot = self.load().await?;
        let rows = snapshot
            .quarterlies
            .iter()
            .filter(|info| info.quarterly.lang == language_code)
            .map(|info| quarterly_to_row(&info.quarterly, &self.codecs))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(StoreError::from)?;

        if rows.is_empty() {
            tracing::debug!(language_code, "No quarterlies in snapshot");
            return Ok(());
        }

        self.store.upsert_quarterlies(&rows).await?;
        tracing::debug!(language_code, count = rows.len(), "Synced quarterlies");
        Ok(())
    }

    async fn sync_publishing_info(&self, country: &str, language_code: &str) -> Result<()> {
        let snapshot = self.load().await?;
        let key = PublishingKey::new(country, language_code);
        let Some(info) = snapshot.find_publishing_info(&key) else {
            tracing::debug!(country, language_code, "No publishing info in snapshot");
            return Ok(());
        };

        self.store
            .upsert_publishing_info(&publishing_info_to_row(&key, info))
            .await?;
        tracing::debug!(country, language_code, "Synced publishing info");
        Ok(())
    }
}
