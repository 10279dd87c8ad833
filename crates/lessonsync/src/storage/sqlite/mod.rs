//! SQLite cache store backend.
//!
//! Uses `rusqlite` for synchronous operations and `tokio-rusqlite` for async
//! wrapping.

mod conversions;
mod error;
mod schema;
mod store;

pub use store::SqliteStore;
