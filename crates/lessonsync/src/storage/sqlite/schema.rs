//! SQLite schema definitions and SQL query constants.
//!
//! Pure data, no I/O. Blob columns hold codec output or `NULL`.

/// SQL statement to create all tables.
///
/// Lessons reference their quarterly by `quarterly_idx` without a foreign key:
/// replacing a quarterly row must not cascade into its lessons.
pub const CREATE_TABLES: &str = r#"
-- Quarterlies table
CREATE TABLE IF NOT EXISTS quarterlies (
    idx TEXT PRIMARY KEY,
    id TEXT NOT NULL,
    title TEXT NOT NULL,
    description TEXT NOT NULL,
    human_date TEXT NOT NULL,
    start_date TEXT NOT NULL,
    end_date TEXT NOT NULL,
    cover TEXT NOT NULL,
    path TEXT NOT NULL,
    full_path TEXT NOT NULL,
    lang TEXT NOT NULL,
    color_primary TEXT NOT NULL,
    color_primary_dark TEXT NOT NULL,
    quarterly_name TEXT NOT NULL,
    quarterly_group TEXT,
    features TEXT,
    credits TEXT
);

-- Lessons table
CREATE TABLE IF NOT EXISTS lessons (
    idx TEXT PRIMARY KEY,
    quarterly_idx TEXT NOT NULL,
    id TEXT NOT NULL,
    title TEXT NOT NULL,
    start_date TEXT NOT NULL,
    end_date TEXT NOT NULL,
    cover TEXT NOT NULL,
    path TEXT NOT NULL,
    full_path TEXT NOT NULL,
    pdf_only INTEGER NOT NULL,
    lesson_order INTEGER NOT NULL,
    days TEXT,
    pdfs TEXT,
    bible_verses TEXT,
    credits TEXT,
    features TEXT,
    blocks TEXT,
    authors TEXT,
    user_input TEXT,
    style TEXT
);

-- Publishing info table
CREATE TABLE IF NOT EXISTS publishing_info (
    country TEXT NOT NULL,
    language_code TEXT NOT NULL,
    message TEXT NOT NULL,
    url TEXT NOT NULL,
    PRIMARY KEY (country, language_code)
);

-- Indexes for efficient queries
CREATE INDEX IF NOT EXISTS idx_quarterlies_lang ON quarterlies(lang);
CREATE INDEX IF NOT EXISTS idx_lessons_quarterly_idx ON lessons(quarterly_idx);
"#;

// Quarterly queries
pub const UPSERT_QUARTERLY: &str = r#"
INSERT OR REPLACE INTO quarterlies (idx, id, title, description, human_date, start_date, end_date, cover, path, full_path, lang, color_primary, color_primary_dark, quarterly_name, quarterly_group, features, credits)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)
"#;

pub const SELECT_QUARTERLY_BY_INDEX: &str = r#"
SELECT idx, id, title, description, human_date, start_date, end_date, cover, path, full_path, lang, color_primary, color_primary_dark, quarterly_name, quarterly_group, features, credits
FROM quarterlies
WHERE idx = ?1
"#;

pub const SELECT_QUARTERLIES_BY_LANGUAGE: &str = r#"
SELECT idx, id, title, description, human_date, start_date, end_date, cover, path, full_path, lang, color_primary, color_primary_dark, quarterly_name, quarterly_group, features, credits
FROM quarterlies
WHERE lang = ?1
ORDER BY id DESC, idx ASC
"#;

pub const SELECT_QUARTERLIES_BY_LANGUAGE_AND_GROUP: &str = r#"
SELECT idx, id, title, description, human_date, start_date, end_date, cover, path, full_path, lang, color_primary, color_primary_dark, quarterly_name, quarterly_group, features, credits
FROM quarterlies
WHERE lang = ?1 AND quarterly_group = ?2
ORDER BY id DESC, idx ASC
"#;

// Lesson queries
pub const UPSERT_LESSON: &str = r#"
INSERT OR REPLACE INTO lessons (idx, quarterly_idx, id, title, start_date, end_date, cover, path, full_path, pdf_only, lesson_order, days, pdfs, bible_verses, credits, features, blocks, authors, user_input, style)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20)
"#;

/// Lessons of a quarterly, in storage order.
pub const SELECT_LESSONS_BY_QUARTERLY: &str = r#"
SELECT idx, quarterly_idx, id, title, start_date, end_date, cover, path, full_path, pdf_only, lesson_order, days, pdfs, bible_verses, credits, features, blocks, authors, user_input, style
FROM lessons
WHERE quarterly_idx = ?1
"#;

pub const DELETE_LESSONS_BY_QUARTERLY: &str = r#"
DELETE FROM lessons
WHERE quarterly_idx = ?1
"#;

// Publishing info queries
pub const UPSERT_PUBLISHING_INFO: &str = r#"
INSERT OR REPLACE INTO publishing_info (country, language_code, message, url)
VALUES (?1, ?2, ?3, ?4)
"#;

pub const SELECT_PUBLISHING_INFO: &str = r#"
SELECT country, language_code, message, url
FROM publishing_info
WHERE country = ?1 AND language_code = ?2
"#;
