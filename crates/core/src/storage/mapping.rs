//! Pure functions mapping between cached rows and domain types.
//!
//! Every blob column goes through the [`CodecRegistry`]. Absent or malformed
//! optional blobs map to empty lists or `None`; an absent required blob makes
//! the row unusable and is reported as a [`MappingError`].

use crate::codec::{self, CodecRegistry, Registered};
use crate::content::{Lesson, PublishingInfo, Quarterly, QuarterlyInfo};

use super::{
    LessonRow, MappingError, PublishingInfoRow, PublishingKey, QuarterlyInfoRow, QuarterlyRow,
};

// ============================================================================
// Quarterly
// ============================================================================

/// Converts a quarterly row to a Quarterly.
pub fn quarterly_from_row(row: QuarterlyRow, codecs: &CodecRegistry) -> Quarterly {
    Quarterly {
        quarterly_group: codecs.decode_opt(row.quarterly_group.as_deref()),
        features: decode_list(codecs, row.features.as_deref()),
        credits: decode_list(codecs, row.credits.as_deref()),
        id: row.id,
        index: row.index,
        title: row.title,
        description: row.description,
        human_date: row.human_date,
        start_date: row.start_date,
        end_date: row.end_date,
        cover: row.cover,
        path: row.path,
        full_path: row.full_path,
        lang: row.lang,
        color_primary: row.color_primary,
        color_primary_dark: row.color_primary_dark,
        quarterly_name: row.quarterly_name,
    }
}

/// Converts a Quarterly to its row.
pub fn quarterly_to_row(quarterly: &Quarterly, codecs: &CodecRegistry) -> codec::Result<QuarterlyRow> {
    Ok(QuarterlyRow {
        index: quarterly.index.clone(),
        id: quarterly.id.clone(),
        title: quarterly.title.clone(),
        description: quarterly.description.clone(),
        human_date: quarterly.human_date.clone(),
        start_date: quarterly.start_date.clone(),
        end_date: quarterly.end_date.clone(),
        cover: quarterly.cover.clone(),
        path: quarterly.path.clone(),
        full_path: quarterly.full_path.clone(),
        lang: quarterly.lang.clone(),
        color_primary: quarterly.color_primary.clone(),
        color_primary_dark: quarterly.color_primary_dark.clone(),
        quarterly_name: quarterly.quarterly_name.clone(),
        quarterly_group: encode_nullable(codecs, quarterly.quarterly_group.as_ref())?,
        features: Some(codecs.encode(&quarterly.features)?),
        credits: Some(codecs.encode(&quarterly.credits)?),
    })
}

// ============================================================================
// Lesson
// ============================================================================

/// Converts a lesson row to a Lesson.
///
/// `days` is required: a lesson without readable days cannot be shown.
pub fn lesson_from_row(row: LessonRow, codecs: &CodecRegistry) -> Result<Lesson, MappingError> {
    let days = codecs
        .decode_opt(row.days.as_deref())
        .ok_or_else(|| MappingError::MissingField {
            entity_type: "Lesson",
            key: row.index.clone(),
            field: "days",
        })?;

    Ok(Lesson {
        days,
        pdfs: decode_list(codecs, row.pdfs.as_deref()),
        bible_verses: decode_list(codecs, row.bible_verses.as_deref()),
        credits: decode_list(codecs, row.credits.as_deref()),
        features: decode_list(codecs, row.features.as_deref()),
        blocks: decode_list(codecs, row.blocks.as_deref()),
        authors: decode_list(codecs, row.authors.as_deref()),
        user_input: codecs.decode_opt(row.user_input.as_deref()),
        style: codecs.decode_opt(row.style.as_deref()),
        index: row.index,
        quarterly_index: row.quarterly_index,
        id: row.id,
        title: row.title,
        start_date: row.start_date,
        end_date: row.end_date,
        cover: row.cover,
        path: row.path,
        full_path: row.full_path,
        pdf_only: row.pdf_only,
        order: row.order,
    })
}

/// Converts a Lesson to its row.
pub fn lesson_to_row(lesson: &Lesson, codecs: &CodecRegistry) -> codec::Result<LessonRow> {
    Ok(LessonRow {
        index: lesson.index.clone(),
        quarterly_index: lesson.quarterly_index.clone(),
        id: lesson.id.clone(),
        title: lesson.title.clone(),
        start_date: lesson.start_date.clone(),
        end_date: lesson.end_date.clone(),
        cover: lesson.cover.clone(),
        path: lesson.path.clone(),
        full_path: lesson.full_path.clone(),
        pdf_only: lesson.pdf_only,
        order: lesson.order,
        days: Some(codecs.encode(&lesson.days)?),
        pdfs: Some(codecs.encode(&lesson.pdfs)?),
        bible_verses: Some(codecs.encode(&lesson.bible_verses)?),
        credits: Some(codecs.encode(&lesson.credits)?),
        features: Some(codecs.encode(&lesson.features)?),
        blocks: Some(codecs.encode(&lesson.blocks)?),
        authors: Some(codecs.encode(&lesson.authors)?),
        user_input: encode_nullable(codecs, lesson.user_input.as_ref())?,
        style: encode_nullable(codecs, lesson.style.as_ref())?,
    })
}

// ============================================================================
// QuarterlyInfo
// ============================================================================

/// Converts an info row to a QuarterlyInfo, keeping storage order.
pub fn info_from_row(
    row: QuarterlyInfoRow,
    codecs: &CodecRegistry,
) -> Result<QuarterlyInfo, MappingError> {
    let lessons = row
        .lessons
        .into_iter()
        .map(|lesson| lesson_from_row(lesson, codecs))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(QuarterlyInfo {
        quarterly: quarterly_from_row(row.quarterly, codecs),
        lessons,
    })
}

/// Converts a QuarterlyInfo to its row.
///
/// Lessons are written under the quarterly's index, whatever their own
/// `quarterly_index` says, so the aggregate always reads back whole.
pub fn info_to_row(info: &QuarterlyInfo, codecs: &CodecRegistry) -> codec::Result<QuarterlyInfoRow> {
    let quarterly = quarterly_to_row(&info.quarterly, codecs)?;
    let lessons = info
        .lessons
        .iter()
        .map(|lesson| {
            lesson_to_row(lesson, codecs).map(|mut row| {
                row.quarterly_index = quarterly.index.clone();
                row
            })
        })
        .collect::<codec::Result<Vec<_>>>()?;

    Ok(QuarterlyInfoRow { quarterly, lessons })
}

// ============================================================================
// PublishingInfo
// ============================================================================

pub fn publishing_info_from_row(row: PublishingInfoRow) -> PublishingInfo {
    PublishingInfo {
        message: row.message,
        url: row.url,
    }
}

pub fn publishing_info_to_row(key: &PublishingKey, info: &PublishingInfo) -> PublishingInfoRow {
    PublishingInfoRow {
        country: key.country.clone(),
        language_code: key.language_code.clone(),
        message: info.message.clone(),
        url: info.url.clone(),
    }
}

// ============================================================================
// Helper functions
// ============================================================================

fn decode_list<T>(codecs: &CodecRegistry, raw: Option<&str>) -> Vec<T>
where
    Vec<T>: Registered,
{
    codecs.decode_opt::<Vec<T>>(raw).unwrap_or_default()
}

fn encode_nullable<T: Registered>(
    codecs: &CodecRegistry,
    value: Option<&T>,
) -> codec::Result<Option<String>> {
    value.map(|value| codecs.encode(value)).transpose()
}
