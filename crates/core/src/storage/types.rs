//! Persisted row shapes.
//!
//! Rows hold scalar columns directly and nested content as blob columns:
//! `Option<String>` values produced by the
//! [`CodecRegistry`](crate::codec::CodecRegistry). `None` is a SQL `NULL`.

/// A cached quarterly row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuarterlyRow {
    pub index: String,
    pub id: String,
    pub title: String,
    pub description: String,
    pub human_date: String,
    pub start_date: String,
    pub end_date: String,
    pub cover: String,
    pub path: String,
    pub full_path: String,
    pub lang: String,
    pub color_primary: String,
    pub color_primary_dark: String,
    pub quarterly_name: String,
    pub quarterly_group: Option<String>,
    pub features: Option<String>,
    pub credits: Option<String>,
}

/// A cached lesson row, linked to its quarterly by `quarterly_index`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonRow {
    pub index: String,
    pub quarterly_index: String,
    pub id: String,
    pub title: String,
    pub start_date: String,
    pub end_date: String,
    pub cover: String,
    pub path: String,
    pub full_path: String,
    pub pdf_only: bool,
    pub order: i32,
    pub days: Option<String>,
    pub pdfs: Option<String>,
    pub bible_verses: Option<String>,
    pub credits: Option<String>,
    pub features: Option<String>,
    pub blocks: Option<String>,
    pub authors: Option<String>,
    pub user_input: Option<String>,
    pub style: Option<String>,
}

/// A quarterly row joined with its lesson rows, in storage order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuarterlyInfoRow {
    pub quarterly: QuarterlyRow,
    pub lessons: Vec<LessonRow>,
}

/// A cached publishing info row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishingInfoRow {
    pub country: String,
    pub language_code: String,
    pub message: String,
    pub url: String,
}

impl PublishingInfoRow {
    pub fn key(&self) -> PublishingKey {
        PublishingKey::new(&self.country, &self.language_code)
    }
}

/// Filter for the quarterlies query.
///
/// The group is compared by its encoded blob, so it must be produced by the
/// same registry that wrote the rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QuarterlyFilter {
    pub language_code: String,
    pub group: Option<String>,
}

impl QuarterlyFilter {
    pub fn new(language_code: impl Into<String>) -> Self {
        Self {
            language_code: language_code.into(),
            group: None,
        }
    }

    /// Restricts the filter to rows whose encoded group equals `group`.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Returns true if the row passes this filter.
    pub fn matches(&self, row: &QuarterlyRow) -> bool {
        if row.lang != self.language_code {
            return false;
        }
        match &self.group {
            Some(group) => row.quarterly_group.as_deref() == Some(group.as_str()),
            None => true,
        }
    }
}

/// Key of a publishing info row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PublishingKey {
    pub country: String,
    pub language_code: String,
}

impl PublishingKey {
    pub fn new(country: impl Into<String>, language_code: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            language_code: language_code.into(),
        }
    }
}
