mod blocks;
mod sorting;
mod types;

pub use blocks::{BlockItem, BlockStyle, Highlight, Style, TextStyle, UserInput};
pub use sorting::{into_reading_order, sort_lessons_by_order};
pub use types::{
    BibleVerses, Credit, Day, Feature, Lesson, LessonPdf, PublishingInfo, Quarterly,
    QuarterlyGroup, QuarterlyInfo,
};
