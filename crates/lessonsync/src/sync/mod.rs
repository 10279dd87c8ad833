//! Sync coordinators shipped with the binary.

mod offline;
mod snapshot;

pub use offline::OfflineSync;
pub use snapshot::SnapshotSync;
