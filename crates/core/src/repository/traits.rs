use std::pin::Pin;

use async_trait::async_trait;
use tokio_stream::Stream;

use crate::content::{PublishingInfo, Quarterly, QuarterlyGroup, QuarterlyInfo};

use super::Result;

/// Stream of quarterly lists. Store failures arrive as `Err` items.
pub type QuarterliesStream = Pin<Box<dyn Stream<Item = Result<Vec<Quarterly>>> + Send>>;

/// Stream of the publishing info for one key; absence is `Ok(None)`.
pub type PublishingInfoStream = Pin<Box<dyn Stream<Item = Result<Option<PublishingInfo>>> + Send>>;

/// Read access to quarterly content, served from the cache and refreshed
/// from the remote source.
#[async_trait]
pub trait QuarterliesRepository: Send + Sync {
    /// Returns a quarterly with its lessons sorted by order.
    ///
    /// Served from the cache when it holds a complete copy, otherwise waits
    /// for a sync and fails if that sync produces nothing.
    async fn get_quarterly_info(&self, index: &str) -> Result<QuarterlyInfo>;

    /// Observes the quarterlies for a language (the preferred one when
    /// `None`), optionally restricted to a group. A refresh is started in the
    /// background; the stream does not wait for it.
    fn get_quarterlies(
        &self,
        language_code: Option<&str>,
        group: Option<&QuarterlyGroup>,
    ) -> QuarterliesStream;

    /// Observes the publishing info for the device country and preferred
    /// language, refreshing it in the background.
    fn get_publishing_info(&self) -> PublishingInfoStream;
}
