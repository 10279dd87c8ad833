use async_trait::async_trait;

use crate::content::QuarterlyInfo;

use super::Result;

/// Fetches fresh content from the remote source and writes it into the cache
/// store.
///
/// The repository only triggers refreshes; how content travels and how it
/// lands in the store belongs to the coordinator.
#[async_trait]
pub trait SyncCoordinator: Send + Sync {
    /// Refreshes one quarterly with its lessons and returns it.
    ///
    /// `Ok(None)` means the remote has no such quarterly.
    async fn sync_quarterly_info(&self, index: &str) -> Result<Option<QuarterlyInfo>>;

    /// Refreshes the quarterly list for a language.
    async fn sync_quarterlies(&self, language_code: &str) -> Result<()>;

    /// Refreshes the publishing info for a country/language pair.
    async fn sync_publishing_info(&self, country: &str, language_code: &str) -> Result<()>;
}
