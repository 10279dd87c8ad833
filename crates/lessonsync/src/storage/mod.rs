//! Cache store backends.
//!
//! Implementations of the store traits defined in `lessonsync_core::storage`.
//!
//! # Feature Flags
//!
//! - `sqlite` (default): SQLite backend using `rusqlite` and `tokio-rusqlite`
//!
//! The in-memory backend is always available.

mod memory;
mod notify;

#[cfg(feature = "sqlite")]
mod sqlite;

pub use memory::MemoryStore;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;
