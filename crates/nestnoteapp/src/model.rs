//! # Domain Model: Documents and Blocks
//!
//! This module defines the two entities nestnote stores: [`Document`] and [`Block`],
//! plus the partial-update types used to mutate them ([`DocumentPatch`], [`BlockPatch`]).
//!
//! ## Documents
//!
//! A document is a page in a tree. The tree is recorded in both directions:
//!
//! - `parent_document_id` on the child (absence = root)
//! - `child_document_ids` on the parent (ordered, creation order)
//!
//! The store keeps the two in lockstep: `child_document_ids` of a document is
//! exactly the set of documents whose `parent_document_id` is that document.
//! `level` is the depth in the tree (roots are 0).
//!
//! ## Blocks
//!
//! A block is one line of content inside a document. Blocks live in a single flat
//! collection keyed by `page_id`; their display sequence is the `order` field,
//! which is dense and zero-based per document:
//!
//! ```text
//! page A: order 0, 1, 2, 3      <-- no gaps, no duplicates
//! page B: order 0, 1
//! ```
//!
//! ## Serialized Form
//!
//! Field names are camelCase on disk (`parentDocumentId`, `pageId`, ...) and the
//! block type is stored as `"type"` with snake_case values (`"bulleted_list"`).
//! Unknown fields are ignored so older blobs (which carried a `blockIds` list on
//! documents) still load.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Title given to documents created without one.
pub const DEFAULT_TITLE: &str = "New page";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    #[default]
    Paragraph,
    Heading1,
    Heading2,
    Heading3,
    BulletedList,
    NumberedList,
    Checkbox,
    Divider,
    Page,
}

impl BlockType {
    pub const ALL: [BlockType; 9] = [
        BlockType::Paragraph,
        BlockType::Heading1,
        BlockType::Heading2,
        BlockType::Heading3,
        BlockType::BulletedList,
        BlockType::NumberedList,
        BlockType::Checkbox,
        BlockType::Divider,
        BlockType::Page,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Paragraph => "paragraph",
            BlockType::Heading1 => "heading1",
            BlockType::Heading2 => "heading2",
            BlockType::Heading3 => "heading3",
            BlockType::BulletedList => "bulleted_list",
            BlockType::NumberedList => "numbered_list",
            BlockType::Checkbox => "checkbox",
            BlockType::Divider => "divider",
            BlockType::Page => "page",
        }
    }

    /// Whether the block carries editable text.
    pub fn has_text(&self) -> bool {
        !matches!(self, BlockType::Divider)
    }

    /// Hint shown in an empty block of this type.
    pub fn placeholder(&self) -> &'static str {
        match self {
            BlockType::Paragraph => "Type '/' for commands",
            BlockType::Heading1 => "Heading 1",
            BlockType::Heading2 => "Heading 2",
            BlockType::Heading3 => "Heading 3",
            BlockType::BulletedList | BlockType::NumberedList => "List",
            BlockType::Checkbox => "To-do",
            BlockType::Divider | BlockType::Page => "",
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockType::ALL
            .iter()
            .find(|t| t.as_str() == s)
            .copied()
            .ok_or_else(|| format!("Unknown block type: {}", s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_document_id: Option<Uuid>,
    #[serde(default)]
    pub child_document_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub level: u32,
}

impl Document {
    pub fn new(title: impl Into<String>, parent: Option<&Document>, icon: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            icon,
            parent_document_id: parent.map(|p| p.id),
            child_document_ids: Vec::new(),
            created_at: now,
            updated_at: now,
            level: parent.map(|p| p.level + 1).unwrap_or(0),
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_document_id.is_none()
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub id: Uuid,
    pub page_id: Uuid,
    #[serde(rename = "type")]
    pub block_type: BlockType,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
    pub order: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_page_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl Block {
    /// A new block destined for `page_id` at `order`.
    pub fn new(page_id: Uuid, block_type: BlockType, content: impl Into<String>, order: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            page_id,
            block_type,
            content: content.into(),
            checked: (block_type == BlockType::Checkbox).then_some(false),
            order,
            linked_page_id: None,
            icon: None,
        }
    }

    pub fn paragraph(page_id: Uuid, order: usize) -> Self {
        Self::new(page_id, BlockType::Paragraph, "", order)
    }

    /// A `page` block linked to `document`, showing its title.
    pub fn page_link(page_id: Uuid, document: &Document, order: usize) -> Self {
        let mut block = Self::new(page_id, BlockType::Page, document.title.clone(), order);
        block.linked_page_id = Some(document.id);
        block
    }

    pub fn is_linked_page(&self) -> bool {
        self.block_type == BlockType::Page && self.linked_page_id.is_some()
    }

    pub fn is_checked(&self) -> bool {
        self.checked.unwrap_or(false)
    }
}

/// Partial update for a [`Document`]. `None` leaves a field untouched.
///
/// `icon` is doubly optional: `Some(None)` clears the icon.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentPatch {
    pub title: Option<String>,
    pub icon: Option<Option<String>>,
}

impl DocumentPatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn icon(icon: Option<String>) -> Self {
        Self {
            icon: Some(icon),
            ..Default::default()
        }
    }

    pub fn apply(&self, document: &mut Document) {
        if let Some(title) = &self.title {
            document.title = title.clone();
        }
        if let Some(icon) = &self.icon {
            document.icon = icon.clone();
        }
        document.touch();
    }
}

/// Partial update for a [`Block`].
///
/// There is no `order` field: positions only change through the store's
/// add/move/delete operations, which keep orders dense.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockPatch {
    pub block_type: Option<BlockType>,
    pub content: Option<String>,
    pub checked: Option<Option<bool>>,
    pub linked_page_id: Option<Option<Uuid>>,
    pub icon: Option<Option<String>>,
}

impl BlockPatch {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Default::default()
        }
    }

    pub fn checked(checked: bool) -> Self {
        Self {
            checked: Some(Some(checked)),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(&self, block: &mut Block) {
        if let Some(block_type) = self.block_type {
            block.block_type = block_type;
        }
        if let Some(content) = &self.content {
            block.content = content.clone();
        }
        if let Some(checked) = self.checked {
            block.checked = checked;
        }
        if let Some(linked) = self.linked_page_id {
            block.linked_page_id = linked;
        }
        if let Some(icon) = &self.icon {
            block.icon = icon.clone();
        }
    }
}
