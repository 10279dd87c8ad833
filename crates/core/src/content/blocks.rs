//! Rich-content blocks, reader input and styling attached to lessons.
//!
//! Blocks and user input are polymorphic: each variant is tagged in its
//! serialized form. Unknown tags decode to an `Unknown` variant so content
//! published with newer block types still loads.

use serde::{Deserialize, Serialize};

/// A single rendered content block. Lists and quotes nest further blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum BlockItem {
    Paragraph {
        id: String,
        markdown: String,
    },
    Heading {
        id: String,
        markdown: String,
        depth: u8,
    },
    Image {
        id: String,
        src: String,
        #[serde(default)]
        caption: Option<String>,
    },
    List {
        id: String,
        #[serde(default)]
        ordered: bool,
        items: Vec<BlockItem>,
    },
    Quote {
        id: String,
        items: Vec<BlockItem>,
        #[serde(default)]
        citation: Option<String>,
    },
    Question {
        id: String,
        markdown: String,
    },
    #[serde(other)]
    Unknown,
}

impl BlockItem {
    /// Returns the block id, if the variant carries one.
    pub fn id(&self) -> Option<&str> {
        match self {
            BlockItem::Paragraph { id, .. }
            | BlockItem::Heading { id, .. }
            | BlockItem::Image { id, .. }
            | BlockItem::List { id, .. }
            | BlockItem::Quote { id, .. }
            | BlockItem::Question { id, .. } => Some(id),
            BlockItem::Unknown => None,
        }
    }

    /// Returns the nested blocks of container variants.
    pub fn children(&self) -> &[BlockItem] {
        match self {
            BlockItem::List { items, .. } | BlockItem::Quote { items, .. } => items,
            _ => &[],
        }
    }
}

/// A highlighted span inside a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    pub start_index: u32,
    pub end_index: u32,
    pub length: u32,
    pub color: String,
}

/// Input the reader attached to a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "inputType", rename_all = "kebab-case")]
pub enum UserInput {
    Highlights {
        block_id: String,
        highlights: Vec<Highlight>,
    },
    Comment {
        block_id: String,
        comment: String,
    },
    Checklist {
        block_id: String,
        checked: Vec<u32>,
    },
    Choice {
        block_id: String,
        choice: u32,
    },
    #[serde(other)]
    Unknown,
}

/// Text styling overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStyle {
    pub typeface: Option<String>,
    pub color: Option<String>,
    pub size: Option<String>,
    pub align: Option<String>,
}

/// Block container styling overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockStyle {
    pub background_color: Option<String>,
    #[serde(default)]
    pub rounded: bool,
}

/// Styling applied when rendering a lesson.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    pub theme: Option<String>,
    pub text: Option<TextStyle>,
    pub block: Option<BlockStyle>,
}
