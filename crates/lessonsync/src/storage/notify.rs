//! Change notification for cache stores.
//!
//! Stores announce every committed write on a broadcast channel. Reactive
//! queries subscribe before their first read and re-run whenever a table they
//! depend on changes, which makes them cold streams that never miss a write.

use std::future::Future;

use tokio::sync::broadcast::{self, error::RecvError};

use lessonsync_core::storage::{Result, RowStream};

/// Channel capacity for change events.
const CHANNEL_CAPACITY: usize = 64;

/// A table a store can write to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Quarterlies,
    Lessons,
    PublishingInfo,
}

/// Broadcasts table changes to reactive queries.
///
/// Streams created by [`ChangeNotifier::watch_query`] end once every clone of
/// the notifier is dropped.
#[derive(Debug, Clone)]
pub struct ChangeNotifier {
    sender: broadcast::Sender<Table>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    /// Announces a committed change to `table`.
    pub fn notify(&self, table: Table) {
        // No receivers just means nobody is observing.
        let _ = self.sender.send(table);
    }

    /// Turns `query` into a stream that yields its result now and again after
    /// every change to one of `tables`.
    pub fn watch_query<T, F, Fut>(&self, tables: &'static [Table], query: F) -> RowStream<T>
    where
        T: Send + 'static,
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let mut receiver = self.sender.subscribe();

        Box::pin(async_stream::stream! {
            yield query().await;

            loop {
                match receiver.recv().await {
                    Ok(table) if tables.contains(&table) => yield query().await,
                    Ok(_) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::trace!(skipped, "Change receiver lagged, re-querying");
                        yield query().await;
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        })
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}
