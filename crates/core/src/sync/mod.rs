mod error;
mod traits;

pub use error::{Result, SyncError};
pub use traits::SyncCoordinator;
