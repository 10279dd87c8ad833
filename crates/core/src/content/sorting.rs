use super::types::{Lesson, QuarterlyInfo};

/// Sorts lessons ascending by their `order` field.
/// Lessons sharing an order keep their relative position.
pub fn sort_lessons_by_order(lessons: &mut [Lesson]) {
    lessons.sort_by_key(|lesson| lesson.order);
}

/// Returns the info with its lessons in reading order.
pub fn into_reading_order(mut info: QuarterlyInfo) -> QuarterlyInfo {
    sort_lessons_by_order(&mut info.lessons);
    info
}
