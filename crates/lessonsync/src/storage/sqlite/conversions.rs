//! SQLite row conversion functions.
//!
//! Pure functions between SQLite rows and cache rows. Blob columns are passed
//! through untouched; decoding them is the repository's job.

use rusqlite::Row;

use lessonsync_core::storage::{LessonRow, PublishingInfoRow, QuarterlyRow};

/// Convert a SQLite row to a QuarterlyRow.
///
/// Expected columns: idx, id, title, description, human_date, start_date,
/// end_date, cover, path, full_path, lang, color_primary, color_primary_dark,
/// quarterly_name, quarterly_group, features, credits
pub fn row_to_quarterly(row: &Row) -> rusqlite::Result<QuarterlyRow> {
    Ok(QuarterlyRow {
        index: row.get(0)?,
        id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        human_date: row.get(4)?,
        start_date: row.get(5)?,
        end_date: row.get(6)?,
        cover: row.get(7)?,
        path: row.get(8)?,
        full_path: row.get(9)?,
        lang: row.get(10)?,
        color_primary: row.get(11)?,
        color_primary_dark: row.get(12)?,
        quarterly_name: row.get(13)?,
        quarterly_group: row.get(14)?,
        features: row.get(15)?,
        credits: row.get(16)?,
    })
}

/// Convert a SQLite row to a LessonRow.
///
/// Expected columns: idx, quarterly_idx, id, title, start_date, end_date,
/// cover, path, full_path, pdf_only, lesson_order, days, pdfs, bible_verses,
/// credits, features, blocks, authors, user_input, style
pub fn row_to_lesson(row: &Row) -> rusqlite::Result<LessonRow> {
    Ok(LessonRow {
        index: row.get(0)?,
        quarterly_index: row.get(1)?,
        id: row.get(2)?,
        title: row.get(3)?,
        start_date: row.get(4)?,
        end_date: row.get(5)?,
        cover: row.get(6)?,
        path: row.get(7)?,
        full_path: row.get(8)?,
        pdf_only: row.get(9)?,
        order: row.get(10)?,
        days: row.get(11)?,
        pdfs: row.get(12)?,
        bible_verses: row.get(13)?,
        credits: row.get(14)?,
        features: row.get(15)?,
        blocks: row.get(16)?,
        authors: row.get(17)?,
        user_input: row.get(18)?,
        style: row.get(19)?,
    })
}

/// Convert a SQLite row to a PublishingInfoRow.
///
/// Expected columns: country, language_code, message, url
pub fn row_to_publishing_info(row: &Row) -> rusqlite::Result<PublishingInfoRow> {
    Ok(PublishingInfoRow {
        country: row.get(0)?,
        language_code: row.get(1)?,
        message: row.get(2)?,
        url: row.get(3)?,
    })
}

/// Insert parameters for a quarterly, in `UPSERT_QUARTERLY` order.
pub fn quarterly_params(row: &QuarterlyRow) -> [&dyn rusqlite::ToSql; 17] {
    [
        &row.index,
        &row.id,
        &row.title,
        &row.description,
        &row.human_date,
        &row.start_date,
        &row.end_date,
        &row.cover,
        &row.path,
        &row.full_path,
        &row.lang,
        &row.color_primary,
        &row.color_primary_dark,
        &row.quarterly_name,
        &row.quarterly_group,
        &row.features,
        &row.credits,
    ]
}

/// Insert parameters for a lesson, in `UPSERT_LESSON` order.
pub fn lesson_params(row: &LessonRow) -> [&dyn rusqlite::ToSql; 20] {
    [
        &row.index,
        &row.quarterly_index,
        &row.id,
        &row.title,
        &row.start_date,
        &row.end_date,
        &row.cover,
        &row.path,
        &row.full_path,
        &row.pdf_only,
        &row.order,
        &row.days,
        &row.pdfs,
        &row.bible_verses,
        &row.credits,
        &row.features,
        &row.blocks,
        &row.authors,
        &row.user_input,
        &row.style,
    ]
}
