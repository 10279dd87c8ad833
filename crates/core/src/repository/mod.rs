mod error;
mod traits;

pub use error::{RepositoryError, Result};
pub use traits::{PublishingInfoStream, QuarterliesRepository, QuarterliesStream};
