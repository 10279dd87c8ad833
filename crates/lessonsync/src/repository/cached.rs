//! Cache-then-sync quarterlies repository.
//!
//! Reads are served from the cache store. Refreshes go through the sync
//! coordinator, which writes into the same store, so observers pick up fresh
//! content through the store's own change notification.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use tokio_stream::Stream;
use tokio_util::sync::{CancellationToken, DropGuard};

use lessonsync_core::codec::CodecRegistry;
use lessonsync_core::content::{into_reading_order, Quarterly, QuarterlyGroup, QuarterlyInfo};
use lessonsync_core::prefs::{DeviceContext, Preferences};
use lessonsync_core::repository::{
    PublishingInfoStream, QuarterliesRepository, QuarterliesStream, RepositoryError, Result,
};
use lessonsync_core::storage::{
    info_from_row, publishing_info_from_row, quarterly_from_row, CacheStore, PublishingKey,
    QuarterlyFilter,
};
use lessonsync_core::sync::{self, SyncCoordinator};

/// Quarterlies repository over a cache store and a sync coordinator.
///
/// Owns a cancellation scope for its background refreshes. Every refresh runs
/// under a child token whose guard travels with the returned stream: dropping
/// the stream cancels its refresh, and [`shutdown`](Self::shutdown) (or
/// dropping the repository) cancels all of them.
///
/// Refreshes are not deduplicated: each call starts its own.
///
/// # Type Parameters
///
/// * `S` - The cache store
/// * `P` - The user preferences
/// * `D` - The device context
/// * `Y` - The sync coordinator
pub struct CachedQuarterliesRepository<S, P, D, Y>
where
    S: CacheStore,
    P: Preferences,
    D: DeviceContext,
    Y: SyncCoordinator,
{
    store: Arc<S>,
    sync: Arc<Y>,
    preferences: Arc<P>,
    device: Arc<D>,
    codecs: Arc<CodecRegistry>,
    scope: CancellationToken,
}

impl<S, P, D, Y> CachedQuarterliesRepository<S, P, D, Y>
where
    S: CacheStore,
    P: Preferences,
    D: DeviceContext,
    Y: SyncCoordinator + 'static,
{
    pub fn new(
        store: Arc<S>,
        sync: Arc<Y>,
        preferences: Arc<P>,
        device: Arc<D>,
        codecs: Arc<CodecRegistry>,
    ) -> Self {
        Self {
            store,
            sync,
            preferences,
            device,
            codecs,
            scope: CancellationToken::new(),
        }
    }

    /// Cancels every background refresh started by this repository.
    ///
    /// Later calls still read the cache but no longer refresh it.
    pub fn shutdown(&self) {
        tracing::debug!("Shutting down quarterlies repository");
        self.scope.cancel();
    }

    pub fn is_shut_down(&self) -> bool {
        self.scope.is_cancelled()
    }

    /// Spawns `refresh` under a child of the repository scope.
    ///
    /// Returns the guard that cancels the refresh when dropped, or `None`
    /// when nothing was spawned.
    fn spawn_refresh<F>(&self, operation: &'static str, refresh: F) -> Option<DropGuard>
    where
        F: Future<Output = sync::Result<()>> + Send + 'static,
    {
        if self.is_shut_down() {
            tracing::debug!(operation, "Repository shut down, skipping refresh");
            return None;
        }

        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(err) => {
                tracing::warn!(operation, error = %err, "No async runtime, skipping refresh");
                return None;
            }
        };

        let token = self.scope.child_token();
        let cancelled = token.clone();
        tracing::debug!(operation, "Dispatching background refresh");

        handle.spawn(async move {
            tokio::select! {
                _ = cancelled.cancelled() => {
                    tracing::debug!(operation, "Background refresh cancelled");
                }
                result = refresh => match result {
                    Ok(()) => tracing::debug!(operation, "Background refresh finished"),
                    Err(err) => {
                        tracing::warn!(operation, error = %err, "Background refresh failed");
                    }
                },
            }
        });

        Some(token.drop_guard())
    }
}

/// Ties `guard` to the lifetime of `stream`.
fn guarded<T>(
    stream: impl Stream<Item = T> + Send + 'static,
    guard: Option<DropGuard>,
) -> impl Stream<Item = T> + Send + 'static
where
    T: Send + 'static,
{
    async_stream::stream! {
        let _guard = guard;
        for await item in stream {
            yield item;
        }
    }
}

#[async_trait]
impl<S, P, D, Y> QuarterliesRepository for CachedQuarterliesRepository<S, P, D, Y>
where
    S: CacheStore + 'static,
    P: Preferences + 'static,
    D: DeviceContext + 'static,
    Y: SyncCoordinator + 'static,
{
    async fn get_quarterly_info(&self, index: &str) -> Result<QuarterlyInfo> {
        match self.store.get_info(index).await {
            Ok(Some(row)) => match info_from_row(row, &self.codecs) {
                Ok(info) if info.is_complete() => {
                    tracing::trace!(index, lessons = info.lessons.len(), "Cache hit for quarterly");
                    return Ok(into_reading_order(info));
                }
                Ok(_) => tracing::trace!(index, "Cached quarterly has no lessons"),
                Err(err) => tracing::warn!(index, error = %err, "Cached quarterly is unusable"),
            },
            Ok(None) => tracing::trace!(index, "Cache miss for quarterly"),
            Err(err) => {
                tracing::warn!(index, error = %err, "Cache read failed, treating as miss");
            }
        }

        let synced = tokio::select! {
            _ = self.scope.cancelled() => {
                return Err(RepositoryError::SyncFailed {
                    index: index.to_string(),
                    reason: "repository shut down".to_string(),
                });
            }
            result = self.sync.sync_quarterly_info(index) => result,
        };

        match synced {
            Ok(Some(info)) => {
                tracing::debug!(index, lessons = info.lessons.len(), "Synced quarterly");
                Ok(into_reading_order(info))
            }
            Ok(None) => Err(RepositoryError::SyncFailed {
                index: index.to_string(),
                reason: "no content returned".to_string(),
            }),
            Err(err) => {
                tracing::warn!(index, error = %err, "Quarterly sync failed");
                Err(RepositoryError::SyncFailed {
                    index: index.to_string(),
                    reason: err.to_string(),
                })
            }
        }
    }

    fn get_quarterlies(
        &self,
        language_code: Option<&str>,
        group: Option<&QuarterlyGroup>,
    ) -> QuarterliesStream {
        let language_code = language_code
            .map(str::to_string)
            .unwrap_or_else(|| self.preferences.language_code());

        let mut filter = QuarterlyFilter::new(&language_code);
        if let Some(group) = group {
            match self.codecs.encode(group) {
                Ok(encoded) => filter = filter.with_group(encoded),
                Err(err) => {
                    tracing::error!(error = %err, "Failed to encode quarterly group");
                    return Box::pin(tokio_stream::once(Err::<Vec<Quarterly>, _>(
                        RepositoryError::from(err),
                    )));
                }
            }
        }

        let sync = self.sync.clone();
        let refresh_language = language_code.clone();
        let guard = self.spawn_refresh("quarterlies", async move {
            sync.sync_quarterlies(&refresh_language).await
        });

        let codecs = self.codecs.clone();
        let rows = self.store.observe_quarterlies(filter);
        let quarterlies = async_stream::stream! {
            for await result in rows {
                match result {
                    Ok(rows) => {
                        let quarterlies: Vec<Quarterly> = rows
                            .into_iter()
                            .map(|row| quarterly_from_row(row, &codecs))
                            .collect();
                        yield Ok(quarterlies);
                    }
                    Err(err) => {
                        tracing::error!(
                            language_code = %language_code,
                            error = %err,
                            "Failed to read quarterlies"
                        );
                        yield Err(RepositoryError::Store(err));
                    }
                }
            }
        };

        Box::pin(guarded(quarterlies, guard))
    }

    fn get_publishing_info(&self) -> PublishingInfoStream {
        let key = PublishingKey::new(self.device.country(), self.preferences.language_code());

        let sync = self.sync.clone();
        let refresh_key = key.clone();
        let guard = self.spawn_refresh("publishing_info", async move {
            sync.sync_publishing_info(&refresh_key.country, &refresh_key.language_code)
                .await
        });

        let rows = self.store.observe_publishing_info(key.clone());
        let info = async_stream::stream! {
            for await result in rows {
                match result {
                    Ok(row) => yield Ok(row.map(publishing_info_from_row)),
                    Err(err) => {
                        tracing::error!(
                            country = %key.country,
                            language_code = %key.language_code,
                            error = %err,
                            "Failed to read publishing info"
                        );
                        yield Err(RepositoryError::Store(err));
                    }
                }
            }
        };

        Box::pin(guarded(info, guard))
    }
}

impl<S, P, D, Y> Drop for CachedQuarterliesRepository<S, P, D, Y>
where
    S: CacheStore,
    P: Preferences,
    D: DeviceContext,
    Y: SyncCoordinator,
{
    fn drop(&mut self) {
        self.scope.cancel();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;

    use tokio::sync::RwLock;
    use tokio_stream::StreamExt;

    use lessonsync_core::content::{Day, Lesson, PublishingInfo, Quarterly};
    use lessonsync_core::storage::{
        info_to_row, quarterly_to_row, PublishingInfoRow, PublishingInfoStore, QuarterlyInfoRow,
        QuarterlyRow, QuarterlyStore, Result as StoreResult, RowStream, StoreError,
    };
    use lessonsync_core::sync::SyncError;

    use super::*;
    use crate::prefs::{FixedDevice, MemoryPreferences};
    use crate::storage::MemoryStore;

    // Increments its counter when the future holding it is dropped.
    struct DropCounter(Arc<AtomicUsize>);

    impl Drop for DropCounter {
        fn drop(&mut self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    // Mock sync coordinator that tracks calls
    struct MockSync {
        info: RwLock<Option<QuarterlyInfo>>,
        fail: AtomicBool,
        hold: AtomicBool,
        languages: RwLock<Vec<String>>,
        info_calls: AtomicUsize,
        quarterlies_calls: AtomicUsize,
        publishing_calls: AtomicUsize,
        abandoned: Arc<AtomicUsize>,
    }

    impl MockSync {
        fn new() -> Self {
            Self {
                info: RwLock::new(None),
                fail: AtomicBool::new(false),
                hold: AtomicBool::new(false),
                languages: RwLock::new(Vec::new()),
                info_calls: AtomicUsize::new(0),
                quarterlies_calls: AtomicUsize::new(0),
                publishing_calls: AtomicUsize::new(0),
                abandoned: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn failing() -> Self {
            let sync = Self::new();
            sync.fail.store(true, Ordering::SeqCst);
            sync
        }

        /// Refreshes never complete until cancelled.
        fn holding() -> Self {
            let sync = Self::new();
            sync.hold.store(true, Ordering::SeqCst);
            sync
        }

        async fn returning(self, info: QuarterlyInfo) -> Self {
            *self.info.write().await = Some(info);
            self
        }

        async fn outcome(&self) -> sync::Result<()> {
            if self.hold.load(Ordering::SeqCst) {
                let _counter = DropCounter(self.abandoned.clone());
                std::future::pending::<()>().await;
            }
            if self.fail.load(Ordering::SeqCst) {
                return Err(SyncError::Unavailable("offline".to_string()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl SyncCoordinator for MockSync {
        async fn sync_quarterly_info(&self, _index: &str) -> sync::Result<Option<QuarterlyInfo>> {
            self.info_calls.fetch_add(1, Ordering::SeqCst);
            self.outcome().await?;
            Ok(self.info.read().await.clone())
        }

        async fn sync_quarterlies(&self, language_code: &str) -> sync::Result<()> {
            self.quarterlies_calls.fetch_add(1, Ordering::SeqCst);
            self.languages.write().await.push(language_code.to_string());
            self.outcome().await
        }

        async fn sync_publishing_info(
            &self,
            _country: &str,
            _language_code: &str,
        ) -> sync::Result<()> {
            self.publishing_calls.fetch_add(1, Ordering::SeqCst);
            self.outcome().await
        }
    }

    // Mock store whose every read fails once
    struct FailingStore {
        get_info_calls: AtomicUsize,
    }

    impl FailingStore {
        fn new() -> Self {
            Self {
                get_info_calls: AtomicUsize::new(0),
            }
        }

        fn failure() -> StoreError {
            StoreError::QueryFailed("database is locked".to_string())
        }
    }

    #[async_trait]
    impl QuarterlyStore for FailingStore {
        async fn get_info(&self, _index: &str) -> StoreResult<Option<QuarterlyInfoRow>> {
            self.get_info_calls.fetch_add(1, Ordering::SeqCst);
            Err(Self::failure())
        }

        fn observe_quarterlies(&self, _filter: QuarterlyFilter) -> RowStream<Vec<QuarterlyRow>> {
            let items: Vec<StoreResult<Vec<QuarterlyRow>>> = vec![Err(Self::failure()), Ok(vec![])];
            Box::pin(tokio_stream::iter(items))
        }

        async fn upsert_quarterlies(&self, _rows: &[QuarterlyRow]) -> StoreResult<()> {
            Err(Self::failure())
        }

        async fn upsert_info(&self, _info: &QuarterlyInfoRow) -> StoreResult<()> {
            Err(Self::failure())
        }
    }

    #[async_trait]
    impl PublishingInfoStore for FailingStore {
        async fn get_publishing_info(
            &self,
            _key: &PublishingKey,
        ) -> StoreResult<Option<PublishingInfoRow>> {
            Err(Self::failure())
        }

        fn observe_publishing_info(
            &self,
            _key: PublishingKey,
        ) -> RowStream<Option<PublishingInfoRow>> {
            let items: Vec<StoreResult<Option<PublishingInfoRow>>> =
                vec![Err(Self::failure()), Ok(None)];
            Box::pin(tokio_stream::iter(items))
        }

        async fn upsert_publishing_info(&self, _row: &PublishingInfoRow) -> StoreResult<()> {
            Err(Self::failure())
        }
    }

    type TestRepository<S> =
        CachedQuarterliesRepository<S, MemoryPreferences, FixedDevice, MockSync>;

    fn repository<S: CacheStore>(store: Arc<S>, sync: Arc<MockSync>) -> TestRepository<S> {
        CachedQuarterliesRepository::new(
            store,
            sync,
            Arc::new(MemoryPreferences::new("en")),
            Arc::new(FixedDevice::new("us")),
            Arc::new(CodecRegistry::new()),
        )
    }

    fn day() -> Day {
        Day {
            id: "01".to_string(),
            index: "day-01".to_string(),
            title: "Sabbath Afternoon".to_string(),
            date: "30/12/2023".to_string(),
            path: String::new(),
            full_path: String::new(),
            read_path: String::new(),
            full_read_path: String::new(),
        }
    }

    fn info(index: &str, orders: &[i32]) -> QuarterlyInfo {
        let lessons = orders
            .iter()
            .map(|order| {
                Lesson::new(format!("{index}-{order:02}"), index, format!("Lesson {order}"), *order)
                    .with_days(vec![day()])
            })
            .collect();
        QuarterlyInfo::new(Quarterly::new(index, "en", "Title"), lessons)
    }

    fn orders(info: &QuarterlyInfo) -> Vec<i32> {
        info.lessons.iter().map(|lesson| lesson.order).collect()
    }

    async fn cached_store(rows: &[QuarterlyInfoRow]) -> Arc<MemoryStore> {
        let store = Arc::new(MemoryStore::new());
        for row in rows {
            store.upsert_info(row).await.unwrap();
        }
        store
    }

    async fn wait_for(counter: &AtomicUsize, expected: usize) {
        tokio::time::timeout(Duration::from_secs(2), async {
            while counter.load(Ordering::SeqCst) < expected {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("timed out waiting for counter");
    }

    // ==================== get_quarterly_info ====================

    #[tokio::test]
    async fn test_get_quarterly_info_cache_hit_skips_sync() {
        let codecs = CodecRegistry::new();
        let store =
            cached_store(&[info_to_row(&info("en-2024-01", &[2, 1]), &codecs).unwrap()]).await;
        let sync = Arc::new(MockSync::new());
        let repo = repository(store, sync.clone());

        let result = repo.get_quarterly_info("en-2024-01").await.unwrap();

        assert_eq!(orders(&result), vec![1, 2]);
        assert_eq!(sync.info_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_get_quarterly_info_miss_syncs_and_sorts() {
        let store = Arc::new(MemoryStore::new());
        let sync = Arc::new(MockSync::new().returning(info("en-2024-01", &[3, 1, 2])).await);
        let repo = repository(store, sync.clone());

        let result = repo.get_quarterly_info("en-2024-01").await.unwrap();

        assert_eq!(orders(&result), vec![1, 2, 3]);
        assert_eq!(sync.info_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_get_quarterly_info_empty_lessons_trigger_sync() {
        let codecs = CodecRegistry::new();
        let store =
            cached_store(&[info_to_row(&info("en-2024-01", &[]), &codecs).unwrap()]).await;
        let sync = Arc::new(MockSync::new().returning(info("en-2024-01", &[1])).await);
        let repo = repository(store, sync.clone());

        let result = repo.get_quarterly_info("en-2024-01").await.unwrap();

        assert_eq!(orders(&result), vec![1]);
        assert_eq!(sync.info_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_get_quarterly_info_missing_days_trigger_sync() {
        let codecs = CodecRegistry::new();
        let mut row = info_to_row(&info("en-2024-01", &[1, 2]), &codecs).unwrap();
        row.lessons[0].days = None;
        let store = cached_store(&[row]).await;
        let sync = Arc::new(MockSync::new().returning(info("en-2024-01", &[1, 2])).await);
        let repo = repository(store, sync.clone());

        let result = repo.get_quarterly_info("en-2024-01").await.unwrap();

        assert_eq!(result.lessons.len(), 2);
        assert_eq!(sync.info_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_get_quarterly_info_sync_failure_has_no_stale_fallback() {
        let codecs = CodecRegistry::new();
        let store =
            cached_store(&[info_to_row(&info("en-2024-01", &[]), &codecs).unwrap()]).await;
        let sync = Arc::new(MockSync::failing());
        let repo = repository(store, sync.clone());

        let result = repo.get_quarterly_info("en-2024-01").await;

        assert_eq!(
            result,
            Err(RepositoryError::SyncFailed {
                index: "en-2024-01".to_string(),
                reason: "Sync unavailable: offline".to_string(),
            })
        );
        assert_eq!(sync.info_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_get_quarterly_info_sync_without_content_fails() {
        let repo = repository(Arc::new(MemoryStore::new()), Arc::new(MockSync::new()));

        let result = repo.get_quarterly_info("en-2024-01").await;

        assert!(matches!(
            result,
            Err(RepositoryError::SyncFailed { ref index, .. }) if index == "en-2024-01"
        ));
    }

    #[tokio::test]
    async fn test_get_quarterly_info_cache_read_error_is_a_miss() {
        let store = Arc::new(FailingStore::new());
        let sync = Arc::new(MockSync::new().returning(info("en-2024-01", &[2, 1])).await);
        let repo = repository(store.clone(), sync.clone());

        let result = repo.get_quarterly_info("en-2024-01").await.unwrap();

        assert_eq!(orders(&result), vec![1, 2]);
        assert_eq!(store.get_info_calls.load(Ordering::SeqCst), 1);
        assert_eq!(sync.info_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_get_quarterly_info_after_shutdown_fails_while_syncing() {
        let sync = Arc::new(MockSync::holding());
        let repo = repository(Arc::new(MemoryStore::new()), sync);
        repo.shutdown();

        let result = repo.get_quarterly_info("en-2024-01").await;

        assert!(matches!(result, Err(RepositoryError::SyncFailed { .. })));
    }

    // ==================== get_quarterlies ====================

    #[tokio::test]
    async fn test_get_quarterlies_uses_explicit_language() {
        let codecs = CodecRegistry::new();
        let store = Arc::new(MemoryStore::new());
        store
            .upsert_quarterlies(&[
                quarterly_to_row(&Quarterly::new("en-2024-01", "en", "English"), &codecs).unwrap(),
                quarterly_to_row(&Quarterly::new("es-2024-01", "es", "Spanish"), &codecs).unwrap(),
            ])
            .await
            .unwrap();
        let sync = Arc::new(MockSync::new());
        let repo = repository(store, sync.clone());

        let mut stream = repo.get_quarterlies(Some("es"), None);
        let quarterlies = stream.next().await.unwrap().unwrap();

        assert_eq!(quarterlies.len(), 1);
        assert_eq!(quarterlies[0].lang, "es");
        wait_for(&sync.quarterlies_calls, 1).await;
        assert_eq!(*sync.languages.read().await, vec!["es".to_string()]);
    }

    #[tokio::test]
    async fn test_get_quarterlies_defaults_to_preferred_language() {
        let sync = Arc::new(MockSync::new());
        let preferences = Arc::new(MemoryPreferences::new("en"));
        let repo = CachedQuarterliesRepository::new(
            Arc::new(MemoryStore::new()),
            sync.clone(),
            preferences.clone(),
            Arc::new(FixedDevice::new("us")),
            Arc::new(CodecRegistry::new()),
        );

        let _first = repo.get_quarterlies(None, None);
        preferences.set_language_code("pt");
        let _second = repo.get_quarterlies(None, None);

        wait_for(&sync.quarterlies_calls, 2).await;
        let mut languages = sync.languages.read().await.clone();
        languages.sort();
        assert_eq!(languages, vec!["en".to_string(), "pt".to_string()]);
    }

    #[tokio::test]
    async fn test_get_quarterlies_filters_by_group() {
        let codecs = CodecRegistry::new();
        let adult = QuarterlyGroup::new("adult", 1);
        let store = Arc::new(MemoryStore::new());
        store
            .upsert_quarterlies(&[
                quarterly_to_row(
                    &Quarterly::new("en-2024-01", "en", "Adult").with_group(adult.clone()),
                    &codecs,
                )
                .unwrap(),
                quarterly_to_row(
                    &Quarterly::new("en-2024-01-cq", "en", "Youth")
                        .with_group(QuarterlyGroup::new("youth", 2)),
                    &codecs,
                )
                .unwrap(),
            ])
            .await
            .unwrap();
        let repo = repository(store, Arc::new(MockSync::new()));

        let mut stream = repo.get_quarterlies(None, Some(&adult));
        let quarterlies = stream.next().await.unwrap().unwrap();

        assert_eq!(quarterlies.len(), 1);
        assert_eq!(quarterlies[0].quarterly_group, Some(adult));
    }

    #[tokio::test]
    async fn test_get_quarterlies_emits_written_content() {
        let codecs = CodecRegistry::new();
        let store = Arc::new(MemoryStore::new());
        let repo = repository(store.clone(), Arc::new(MockSync::new()));

        let mut stream = repo.get_quarterlies(None, None);
        assert_eq!(stream.next().await, Some(Ok(vec![])));

        store
            .upsert_info(&info_to_row(&info("en-2024-01", &[1]), &codecs).unwrap())
            .await
            .unwrap();

        let quarterlies = stream.next().await.unwrap().unwrap();
        assert_eq!(quarterlies[0].index, "en-2024-01");
    }

    #[tokio::test]
    async fn test_two_subscriptions_trigger_two_refreshes() {
        let sync = Arc::new(MockSync::new());
        let repo = repository(Arc::new(MemoryStore::new()), sync.clone());

        let _first = repo.get_quarterlies(None, None);
        let _second = repo.get_quarterlies(None, None);

        wait_for(&sync.quarterlies_calls, 2).await;
        assert_eq!(sync.quarterlies_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_background_sync_failure_does_not_reach_stream() {
        let sync = Arc::new(MockSync::failing());
        let repo = repository(Arc::new(MemoryStore::new()), sync.clone());

        let mut stream = repo.get_quarterlies(None, None);
        wait_for(&sync.quarterlies_calls, 1).await;

        assert_eq!(stream.next().await, Some(Ok(vec![])));
    }

    #[tokio::test]
    async fn test_store_error_is_an_item_and_stream_continues() {
        let repo = repository(Arc::new(FailingStore::new()), Arc::new(MockSync::new()));

        let items: Vec<_> = repo.get_quarterlies(None, None).collect().await;

        assert_eq!(
            items,
            vec![
                Err(RepositoryError::Store(FailingStore::failure())),
                Ok(vec![]),
            ]
        );
    }

    // ==================== get_publishing_info ====================

    #[tokio::test]
    async fn test_get_publishing_info_absent_is_none() {
        let sync = Arc::new(MockSync::new());
        let repo = repository(Arc::new(MemoryStore::new()), sync.clone());

        let mut stream = repo.get_publishing_info();

        assert_eq!(stream.next().await, Some(Ok(None)));
        wait_for(&sync.publishing_calls, 1).await;
    }

    #[tokio::test]
    async fn test_get_publishing_info_uses_device_country_and_language() {
        let store = Arc::new(MemoryStore::new());
        for (country, message) in [("us", "Order in the US"), ("br", "Order in Brazil")] {
            store
                .upsert_publishing_info(&PublishingInfoRow {
                    country: country.to_string(),
                    language_code: "en".to_string(),
                    message: message.to_string(),
                    url: "https://example.com".to_string(),
                })
                .await
                .unwrap();
        }
        let repo = repository(store, Arc::new(MockSync::new()));

        let mut stream = repo.get_publishing_info();

        assert_eq!(
            stream.next().await,
            Some(Ok(Some(PublishingInfo::new(
                "Order in the US",
                "https://example.com"
            ))))
        );
    }

    #[tokio::test]
    async fn test_get_publishing_info_store_error_is_an_item() {
        let repo = repository(Arc::new(FailingStore::new()), Arc::new(MockSync::new()));

        let items: Vec<_> = repo.get_publishing_info().collect().await;

        assert_eq!(
            items,
            vec![Err(RepositoryError::Store(FailingStore::failure())), Ok(None)]
        );
    }

    // ==================== Background scope ====================

    #[tokio::test]
    async fn test_dropping_stream_cancels_its_refresh() {
        let sync = Arc::new(MockSync::holding());
        let repo = repository(Arc::new(MemoryStore::new()), sync.clone());

        let stream = repo.get_quarterlies(None, None);
        wait_for(&sync.quarterlies_calls, 1).await;
        assert_eq!(sync.abandoned.load(Ordering::SeqCst), 0);

        drop(stream);

        wait_for(&sync.abandoned, 1).await;
        assert!(!repo.is_shut_down());
    }

    #[tokio::test]
    async fn test_shutdown_cancels_refreshes_and_keeps_streams() {
        let sync = Arc::new(MockSync::holding());
        let repo = repository(Arc::new(MemoryStore::new()), sync.clone());

        let mut quarterlies = repo.get_quarterlies(None, None);
        let mut publishing = repo.get_publishing_info();
        wait_for(&sync.quarterlies_calls, 1).await;
        wait_for(&sync.publishing_calls, 1).await;

        repo.shutdown();

        wait_for(&sync.abandoned, 2).await;
        assert_eq!(quarterlies.next().await, Some(Ok(vec![])));
        assert_eq!(publishing.next().await, Some(Ok(None)));
    }

    #[tokio::test]
    async fn test_no_refresh_after_shutdown() {
        let sync = Arc::new(MockSync::new());
        let repo = repository(Arc::new(MemoryStore::new()), sync.clone());
        repo.shutdown();

        let mut stream = repo.get_quarterlies(None, None);
        assert_eq!(stream.next().await, Some(Ok(vec![])));
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }

        assert_eq!(sync.quarterlies_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_dropping_repository_cancels_refreshes() {
        let sync = Arc::new(MockSync::holding());
        let repo = repository(Arc::new(MemoryStore::new()), sync.clone());

        let _stream = repo.get_publishing_info();
        wait_for(&sync.publishing_calls, 1).await;

        drop(repo);

        wait_for(&sync.abandoned, 1).await;
    }

    #[test]
    fn test_without_runtime_refresh_is_skipped() {
        let sync = Arc::new(MockSync::new());
        let repo = repository(Arc::new(MemoryStore::new()), sync.clone());

        let _stream = repo.get_quarterlies(Some("en"), None);

        assert_eq!(sync.quarterlies_calls.load(Ordering::SeqCst), 0);
    }
}
