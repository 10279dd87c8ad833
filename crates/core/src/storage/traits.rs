use std::pin::Pin;

use async_trait::async_trait;
use tokio_stream::Stream;

use super::{
    PublishingInfoRow, PublishingKey, QuarterlyFilter, QuarterlyInfoRow, QuarterlyRow, Result,
};

/// A cold reactive query: yields the current state when first polled and
/// again after every change to the underlying table. A failed re-query is
/// delivered as an `Err` item and does not end the stream.
pub type RowStream<T> = Pin<Box<dyn Stream<Item = Result<T>> + Send>>;

/// Cache store for quarterlies and their lessons.
#[async_trait]
pub trait QuarterlyStore: Send + Sync {
    /// Gets a quarterly joined with its lessons, in storage order.
    async fn get_info(&self, index: &str) -> Result<Option<QuarterlyInfoRow>>;

    /// Observes the quarterlies matching `filter`.
    fn observe_quarterlies(&self, filter: QuarterlyFilter) -> RowStream<Vec<QuarterlyRow>>;

    /// Inserts or replaces quarterly rows in one write.
    async fn upsert_quarterlies(&self, rows: &[QuarterlyRow]) -> Result<()>;

    /// Inserts or replaces a quarterly and replaces its whole lesson set in one write.
    async fn upsert_info(&self, info: &QuarterlyInfoRow) -> Result<()>;
}

/// Cache store for publishing info.
#[async_trait]
pub trait PublishingInfoStore: Send + Sync {
    /// Gets the publishing info for a key.
    async fn get_publishing_info(&self, key: &PublishingKey) -> Result<Option<PublishingInfoRow>>;

    /// Observes the publishing info for a key. Absence is `Ok(None)`.
    fn observe_publishing_info(&self, key: PublishingKey) -> RowStream<Option<PublishingInfoRow>>;

    /// Inserts or replaces the publishing info for the row's key.
    async fn upsert_publishing_info(&self, row: &PublishingInfoRow) -> Result<()>;
}

/// Combined trait for stores that hold every entity family.
pub trait CacheStore: QuarterlyStore + PublishingInfoStore {}

impl<T: QuarterlyStore + PublishingInfoStore> CacheStore for T {}
