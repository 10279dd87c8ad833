use async_trait::async_trait;

use lessonsync_core::content::QuarterlyInfo;
use lessonsync_core::sync::{Result, SyncCoordinator, SyncError};

/// Coordinator with no remote source. Every refresh reports
/// [`SyncError::Unavailable`], so only cached content is served.
#[derive(Debug, Clone, Default)]
pub struct OfflineSync;

impl OfflineSync {
    fn unavailable() -> SyncError {
        SyncError::Unavailable("no remote source configured".to_string())
    }
}

#[async_trait]
impl SyncCoordinator for OfflineSync {
    async fn sync_quarterly_info(&self, _index: &str) -> Result<Option<QuarterlyInfo>> {
        Err(Self::unavailable())
    }

    async fn sync_quarterlies(&self, _language_code: &str) -> Result<()> {
        Err(Self::unavailable())
    }

    async fn sync_publishing_info(&self, _country: &str, _language_code: &str) -> Result<()> {
        Err(Self::unavailable())
    }
}
