//! # Markdown Shorthand Detection
//!
//! Typing a markdown-ish prefix into a plain paragraph converts the block in place:
//!
//! | Typed          | Block becomes          | Content kept      |
//! |----------------|------------------------|-------------------|
//! | `# Title`      | heading1               | `Title`           |
//! | `## Title`     | heading2               | `Title`           |
//! | `### Title`    | heading3               | `Title`           |
//! | `- item`       | bulleted_list          | `item`            |
//! | `1. item`      | numbered_list          | `item`            |
//! | `[] todo`      | checkbox (unchecked)   | `todo`            |
//! | `[x] todo`     | checkbox (checked)     | `todo`            |
//! | `---`          | divider                | (empty)           |
//! | `/page Title`  | page (unlinked)        | `Title`           |
//!
//! Rules are tried top to bottom and the first match wins. Only paragraphs are
//! inspected: once a block has any other type, later keystrokes only replace its
//! content. That is what makes running the detector on every keystroke safe, since
//! the stripped content is never re-detected.
//!
//! `/page` is only *recognized* here. Turning it into a real child document is done
//! by [`crate::commands::edit::change_block_content`], which is the one place that
//! acts on the trigger.

use crate::model::{Block, BlockPatch, BlockType};
use uuid::Uuid;

/// The slash command that creates a nested page.
pub const PAGE_COMMAND: &str = "/page ";

const DIVIDER: &str = "---";

const PREFIX_RULES: &[(&str, BlockType, Option<bool>)] = &[
    ("# ", BlockType::Heading1, None),
    ("## ", BlockType::Heading2, None),
    ("### ", BlockType::Heading3, None),
    ("- ", BlockType::BulletedList, None),
    ("1. ", BlockType::NumberedList, None),
    ("[] ", BlockType::Checkbox, Some(false)),
    ("[x] ", BlockType::Checkbox, Some(true)),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownMatch {
    pub block_type: BlockType,
    pub content: String,
    pub checked: Option<bool>,
    pub linked_page_id: Option<Uuid>,
}

impl MarkdownMatch {
    fn new(block_type: BlockType, content: &str, checked: Option<bool>) -> Self {
        Self {
            block_type,
            content: content.to_string(),
            checked,
            linked_page_id: None,
        }
    }
}

/// Maps raw text to the block type its prefix asks for. `None` when nothing matches.
pub fn detect_markdown_syntax(content: &str) -> Option<MarkdownMatch> {
    for (prefix, block_type, checked) in PREFIX_RULES {
        if let Some(rest) = content.strip_prefix(prefix) {
            return Some(MarkdownMatch::new(*block_type, rest, *checked));
        }
    }

    if content == DIVIDER {
        return Some(MarkdownMatch::new(BlockType::Divider, "", None));
    }

    content
        .strip_prefix(PAGE_COMMAND)
        .map(|title| MarkdownMatch::new(BlockType::Page, title, None))
}

/// Title requested by a `/page <title>` command, if `content` is one.
pub fn page_command_title(content: &str) -> Option<&str> {
    content.strip_prefix(PAGE_COMMAND)
}

/// Computes the update for `block` after its text changed to `content`.
///
/// Non-paragraph blocks only get their content replaced.
pub fn block_update_from_markdown(block: &Block, content: &str) -> BlockPatch {
    if block.block_type != BlockType::Paragraph {
        return BlockPatch::content(content);
    }

    let Some(found) = detect_markdown_syntax(content) else {
        return BlockPatch::content(content);
    };

    let mut patch = BlockPatch {
        block_type: Some(found.block_type),
        content: Some(found.content),
        ..Default::default()
    };
    match found.block_type {
        BlockType::Checkbox => patch.checked = Some(found.checked),
        BlockType::Page => patch.linked_page_id = Some(found.linked_page_id),
        _ => {}
    }
    patch
}
