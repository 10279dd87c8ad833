use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::blocks::{BlockItem, Style, UserInput};

/// Classification tag used to filter quarterlies (e.g. adult, youth).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuarterlyGroup {
    pub name: String,
    pub order: i32,
}

impl QuarterlyGroup {
    pub fn new(name: impl Into<String>, order: i32) -> Self {
        Self {
            name: name.into(),
            order,
        }
    }
}

/// A feature badge displayed on a quarterly or lesson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub name: String,
    pub title: String,
    pub description: String,
    pub image: String,
}

/// A name/value credit line (author, editor, translator...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credit {
    pub name: String,
    pub value: String,
}

/// A single reading day within a lesson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Day {
    pub id: String,
    pub index: String,
    pub title: String,
    pub date: String,
    pub path: String,
    pub full_path: String,
    #[serde(default)]
    pub read_path: String,
    #[serde(default)]
    pub full_read_path: String,
}

/// A PDF attachment for a lesson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonPdf {
    pub id: String,
    pub src: String,
    pub title: String,
    pub target: String,
    pub target_index: String,
}

/// A bible version with its referenced verses, keyed by reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BibleVerses {
    pub name: String,
    #[serde(default)]
    pub verses: BTreeMap<String, String>,
}

/// A published content package for a fixed period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quarterly {
    pub id: String,
    pub index: String,
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
    pub quarterly_group: Option<QuarterlyGroup>,
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(default)]
    pub credits: Vec<Credit>,
}

impl Quarterly {
    /// Creates a quarterly with the given index, language and title.
    ///
    /// The id defaults to the index; display metadata starts empty.
    pub fn new(index: impl Into<String>, lang: impl Into<String>, title: impl Into<String>) -> Self {
        let index = index.into();
        Self {
            id: index.clone(),
            index,
            title: title.into(),
            description: String::new(),
            human_date: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            cover: String::new(),
            path: String::new(),
            full_path: String::new(),
            lang: lang.into(),
            color_primary: String::new(),
            color_primary_dark: String::new(),
            quarterly_name: String::new(),
            quarterly_group: None,
            features: Vec::new(),
            credits: Vec::new(),
        }
    }

    /// Sets the group this quarterly belongs to.
    pub fn with_group(mut self, group: QuarterlyGroup) -> Self {
        self.quarterly_group = Some(group);
        self
    }

    /// Sets the id (defaults to the index).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_features(mut self, features: Vec<Feature>) -> Self {
        self.features = features;
        self
    }

    pub fn with_credits(mut self, credits: Vec<Credit>) -> Self {
        self.credits = credits;
        self
    }
}

/// An ordered sub-unit of a quarterly with nested rich content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub index: String,
    pub quarterly_index: String,
    pub id: String,
    pub title: String,
    pub start_date: String,
    pub end_date: String,
    pub cover: String,
    pub path: String,
    pub full_path: String,
    #[serde(default)]
    pub pdf_only: bool,
    /// Position of the lesson within its quarterly.
    pub order: i32,
    pub days: Vec<Day>,
    #[serde(default)]
    pub pdfs: Vec<LessonPdf>,
    #[serde(default)]
    pub bible_verses: Vec<BibleVerses>,
    #[serde(default)]
    pub credits: Vec<Credit>,
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(default)]
    pub blocks: Vec<BlockItem>,
    #[serde(default)]
    pub authors: Vec<String>,
    pub user_input: Option<UserInput>,
    pub style: Option<Style>,
}

impl Lesson {
    /// Creates a lesson belonging to `quarterly_index` at position `order`.
    pub fn new(
        index: impl Into<String>,
        quarterly_index: impl Into<String>,
        title: impl Into<String>,
        order: i32,
    ) -> Self {
        let index = index.into();
        Self {
            id: index.clone(),
            index,
            quarterly_index: quarterly_index.into(),
            title: title.into(),
            start_date: String::new(),
            end_date: String::new(),
            cover: String::new(),
            path: String::new(),
            full_path: String::new(),
            pdf_only: false,
            order,
            days: Vec::new(),
            pdfs: Vec::new(),
            bible_verses: Vec::new(),
            credits: Vec::new(),
            features: Vec::new(),
            blocks: Vec::new(),
            authors: Vec::new(),
            user_input: None,
            style: None,
        }
    }

    pub fn with_days(mut self, days: Vec<Day>) -> Self {
        self.days = days;
        self
    }

    pub fn with_blocks(mut self, blocks: Vec<BlockItem>) -> Self {
        self.blocks = blocks;
        self
    }

    pub fn with_pdfs(mut self, pdfs: Vec<LessonPdf>) -> Self {
        self.pdfs = pdfs;
        self
    }

    pub fn with_bible_verses(mut self, bible_verses: Vec<BibleVerses>) -> Self {
        self.bible_verses = bible_verses;
        self
    }

    pub fn with_authors(mut self, authors: Vec<String>) -> Self {
        self.authors = authors;
        self
    }

    pub fn with_user_input(mut self, user_input: UserInput) -> Self {
        self.user_input = Some(user_input);
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }
}

/// A quarterly together with its lessons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuarterlyInfo {
    pub quarterly: Quarterly,
    pub lessons: Vec<Lesson>,
}

impl QuarterlyInfo {
    pub fn new(quarterly: Quarterly, lessons: Vec<Lesson>) -> Self {
        Self { quarterly, lessons }
    }

    /// An info without lessons is incomplete and is treated as a cache miss.
    pub fn is_complete(&self) -> bool {
        !self.lessons.is_empty()
    }
}

/// Publisher message shown for a country/language pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishingInfo {
    pub message: String,
    pub url: String,
}

impl PublishingInfo {
    pub fn new(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            url: url.into(),
        }
    }
}
