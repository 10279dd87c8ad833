//! SQLite cache store.
//!
//! Implements the store traits from `lessonsync_core::storage` on top of
//! `tokio-rusqlite`. Multi-row writes run in a single transaction.
//!
//! Writes announce their changes from the connection thread right after the
//! commit, so a caller that stops awaiting a write cannot commit it silently.

use async_trait::async_trait;
use tokio_rusqlite::Connection;

use lessonsync_core::storage::{
    PublishingInfoRow, PublishingInfoStore, PublishingKey, QuarterlyFilter, QuarterlyInfoRow,
    QuarterlyRow, QuarterlyStore, Result, RowStream, StoreError,
};

use super::conversions::{
    lesson_params, quarterly_params, row_to_lesson, row_to_publishing_info, row_to_quarterly,
};
use super::error::map_tokio_rusqlite_error;
use super::schema;
use crate::storage::notify::{ChangeNotifier, Table};

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// SQLite-based cache store.
pub struct SqliteStore {
    conn: Connection,
    notifier: ChangeNotifier,
}

impl SqliteStore {
    /// Opens (or creates) a file-based database and its schema.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;
        tracing::debug!(path, "Opened SQLite cache store");

        Ok(Self {
            conn,
            notifier: ChangeNotifier::new(),
        })
    }

    /// Creates a store backed by an in-memory database.
    #[cfg(test)]
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self {
            conn,
            notifier: ChangeNotifier::new(),
        })
    }

    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES).map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| StoreError::QueryFailed(e.to_string()))
    }
}

async fn select_quarterlies(conn: Connection, filter: QuarterlyFilter) -> Result<Vec<QuarterlyRow>> {
    let language_code = filter.language_code.clone();

    conn.call(move |conn| {
        let mut rows = Vec::new();
        match &filter.group {
            Some(group) => {
                let mut stmt = conn
                    .prepare(schema::SELECT_QUARTERLIES_BY_LANGUAGE_AND_GROUP)
                    .map_err(wrap_err)?;
                let mapped = stmt
                    .query_map([&filter.language_code, group], row_to_quarterly)
                    .map_err(wrap_err)?;
                for row_result in mapped {
                    rows.push(row_result.map_err(wrap_err)?);
                }
            }
            None => {
                let mut stmt = conn
                    .prepare(schema::SELECT_QUARTERLIES_BY_LANGUAGE)
                    .map_err(wrap_err)?;
                let mapped = stmt
                    .query_map([&filter.language_code], row_to_quarterly)
                    .map_err(wrap_err)?;
                for row_result in mapped {
                    rows.push(row_result.map_err(wrap_err)?);
                }
            }
        }
        Ok(rows)
    })
    .await
    .map_err(|e| map_tokio_rusqlite_error(e, "Quarterly", language_code))
}

async fn select_publishing_info(
    conn: Connection,
    key: PublishingKey,
) -> Result<Option<PublishingInfoRow>> {
    let id = format!("{}/{}", key.country, key.language_code);

    conn.call(move |conn| {
        let mut stmt = conn
            .prepare(schema::SELECT_PUBLISHING_INFO)
            .map_err(wrap_err)?;
        match stmt.query_row([&key.country, &key.language_code], row_to_publishing_info) {
            Ok(row) => Ok(Some(row)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(wrap_err(e)),
        }
    })
    .await
    .map_err(|e| map_tokio_rusqlite_error(e, "PublishingInfo", id))
}

// ============================================================================
// QuarterlyStore implementation
// ============================================================================

#[async_trait]
impl QuarterlyStore for SqliteStore {
    async fn get_info(&self, index: &str) -> Result<Option<QuarterlyInfoRow>> {
        let index_str = index.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_QUARTERLY_BY_INDEX)
                    .map_err(wrap_err)?;
                let quarterly = match stmt.query_row([&index_str], row_to_quarterly) {
                    Ok(quarterly) => quarterly,
                    Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
                    Err(e) => return Err(wrap_err(e)),
                };

                let mut stmt = conn
                    .prepare(schema::SELECT_LESSONS_BY_QUARTERLY)
                    .map_err(wrap_err)?;
                let rows = stmt
                    .query_map([&index_str], row_to_lesson)
                    .map_err(wrap_err)?;

                let mut lessons = Vec::new();
                for row_result in rows {
                    lessons.push(row_result.map_err(wrap_err)?);
                }
                Ok(Some(QuarterlyInfoRow { quarterly, lessons }))
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "QuarterlyInfo", index))
    }

    fn observe_quarterlies(&self, filter: QuarterlyFilter) -> RowStream<Vec<QuarterlyRow>> {
        let conn = self.conn.clone();
        self.notifier.watch_query(&[Table::Quarterlies], move || {
            select_quarterlies(conn.clone(), filter.clone())
        })
    }

    async fn upsert_quarterlies(&self, rows: &[QuarterlyRow]) -> Result<()> {
        let rows = rows.to_vec();
        let count = rows.len();
        let notifier = self.notifier.clone();

        self.conn
            .call(move |conn| {
                let tx = conn.transaction().map_err(wrap_err)?;
                for row in &rows {
                    tx.execute(schema::UPSERT_QUARTERLY, quarterly_params(row).as_slice())
                        .map_err(wrap_err)?;
                }
                tx.commit().map_err(wrap_err)?;
                notifier.notify(Table::Quarterlies);
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Quarterly", format!("{count} rows")))
    }

    async fn upsert_info(&self, info: &QuarterlyInfoRow) -> Result<()> {
        let info = info.clone();
        let index = info.quarterly.index.clone();
        let notifier = self.notifier.clone();

        self.conn
            .call(move |conn| {
                let tx = conn.transaction().map_err(wrap_err)?;
                tx.execute(
                    schema::UPSERT_QUARTERLY,
                    quarterly_params(&info.quarterly).as_slice(),
                )
                .map_err(wrap_err)?;
                tx.execute(
                    schema::DELETE_LESSONS_BY_QUARTERLY,
                    [&info.quarterly.index],
                )
                .map_err(wrap_err)?;
                for lesson in &info.lessons {
                    tx.execute(schema::UPSERT_LESSON, lesson_params(lesson).as_slice())
                        .map_err(wrap_err)?;
                }
                tx.commit().map_err(wrap_err)?;
                notifier.notify(Table::Quarterlies);
                notifier.notify(Table::Lessons);
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "QuarterlyInfo", index))
    }
}

// ============================================================================
// PublishingInfoStore implementation
// ============================================================================

#[async_trait]
impl PublishingInfoStore for SqliteStore {
    async fn get_publishing_info(&self, key: &PublishingKey) -> Result<Option<PublishingInfoRow>> {
        select_publishing_info(self.conn.clone(), key.clone()).await
    }

    fn observe_publishing_info(&self, key: PublishingKey) -> RowStream<Option<PublishingInfoRow>> {
        let conn = self.conn.clone();
        self.notifier.watch_query(&[Table::PublishingInfo], move || {
            select_publishing_info(conn.clone(), key.clone())
        })
    }

    async fn upsert_publishing_info(&self, row: &PublishingInfoRow) -> Result<()> {
        let row = row.clone();
        let id = format!("{}/{}", row.country, row.language_code);
        let notifier = self.notifier.clone();

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::UPSERT_PUBLISHING_INFO,
                    rusqlite::params![row.country, row.language_code, row.message, row.url],
                )
                .map_err(wrap_err)?;
                notifier.notify(Table::PublishingInfo);
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "PublishingInfo", id))
    }
}
