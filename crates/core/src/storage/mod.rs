mod error;
mod mapping;
mod traits;
mod types;

pub use error::{MappingError, Result, StoreError};
pub use mapping::{
    info_from_row, info_to_row, lesson_from_row, lesson_to_row, publishing_info_from_row,
    publishing_info_to_row, quarterly_from_row, quarterly_to_row,
};
pub use traits::{CacheStore, PublishingInfoStore, QuarterlyStore, RowStream};
pub use types::{
    LessonRow, PublishingInfoRow, PublishingKey, QuarterlyFilter, QuarterlyInfoRow, QuarterlyRow,
};
