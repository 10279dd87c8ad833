//! In-memory cache store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use lessonsync_core::storage::{
    LessonRow, PublishingInfoRow, PublishingInfoStore, PublishingKey, QuarterlyFilter,
    QuarterlyInfoRow, QuarterlyRow, QuarterlyStore, Result, RowStream,
};

use crate::storage::notify::{ChangeNotifier, Table};

#[derive(Debug, Default)]
struct Tables {
    quarterlies: HashMap<String, QuarterlyRow>,
    /// Kept in insertion order.
    lessons: Vec<LessonRow>,
    publishing_info: HashMap<PublishingKey, PublishingInfoRow>,
}

impl Tables {
    fn quarterlies_matching(&self, filter: &QuarterlyFilter) -> Vec<QuarterlyRow> {
        let mut rows: Vec<QuarterlyRow> = self
            .quarterlies
            .values()
            .filter(|row| filter.matches(row))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.id.cmp(&a.id).then_with(|| a.index.cmp(&b.index)));
        rows
    }

    fn lessons_of(&self, quarterly_index: &str) -> Vec<LessonRow> {
        self.lessons
            .iter()
            .filter(|lesson| lesson.quarterly_index == quarterly_index)
            .cloned()
            .collect()
    }
}

/// In-memory cache store.
///
/// All tables sit behind a single `RwLock`, so an info write replaces the
/// quarterly and its lessons in one step. Data is lost when the store is
/// dropped.
#[derive(Debug)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
    notifier: ChangeNotifier,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            tables: Arc::new(RwLock::new(Tables::default())),
            notifier: ChangeNotifier::new(),
        }
    }
}

#[async_trait]
impl QuarterlyStore for MemoryStore {
    async fn get_info(&self, index: &str) -> Result<Option<QuarterlyInfoRow>> {
        let tables = self.tables.read().await;
        Ok(tables.quarterlies.get(index).map(|quarterly| QuarterlyInfoRow {
            quarterly: quarterly.clone(),
            lessons: tables.lessons_of(index),
        }))
    }

    fn observe_quarterlies(&self, filter: QuarterlyFilter) -> RowStream<Vec<QuarterlyRow>> {
        let tables = self.tables.clone();
        self.notifier
            .watch_query(&[Table::Quarterlies], move || {
                let tables = tables.clone();
                let filter = filter.clone();
                async move { Ok(tables.read().await.quarterlies_matching(&filter)) }
            })
    }

    async fn upsert_quarterlies(&self, rows: &[QuarterlyRow]) -> Result<()> {
        {
            let mut tables = self.tables.write().await;
            for row in rows {
                tables.quarterlies.insert(row.index.clone(), row.clone());
            }
        }
        self.notifier.notify(Table::Quarterlies);
        Ok(())
    }

    async fn upsert_info(&self, info: &QuarterlyInfoRow) -> Result<()> {
        {
            let mut tables = self.tables.write().await;
            let index = info.quarterly.index.clone();
            tables
                .quarterlies
                .insert(index.clone(), info.quarterly.clone());
            tables.lessons.retain(|lesson| {
                lesson.quarterly_index != index
                    && !info.lessons.iter().any(|new| new.index == lesson.index)
            });
            tables.lessons.extend(info.lessons.iter().cloned());
        }
        self.notifier.notify(Table::Quarterlies);
        self.notifier.notify(Table::Lessons);
        Ok(())
    }
}

#[async_trait]
impl PublishingInfoStore for MemoryStore {
    async fn get_publishing_info(&self, key: &PublishingKey) -> Result<Option<PublishingInfoRow>> {
        let tables = self.tables.read().await;
        Ok(tables.publishing_info.get(key).cloned())
    }

    fn observe_publishing_info(&self, key: PublishingKey) -> RowStream<Option<PublishingInfoRow>> {
        let tables = self.tables.clone();
        self.notifier
            .watch_query(&[Table::PublishingInfo], move || {
                let tables = tables.clone();
                let key = key.clone();
                async move { Ok(tables.read().await.publishing_info.get(&key).cloned()) }
            })
    }

    async fn upsert_publishing_info(&self, row: &PublishingInfoRow) -> Result<()> {
        {
            let mut tables = self.tables.write().await;
            tables.publishing_info.insert(row.key(), row.clone());
        }
        self.notifier.notify(Table::PublishingInfo);
        Ok(())
    }
}
