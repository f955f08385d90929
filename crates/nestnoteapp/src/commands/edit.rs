//! # Block Editing
//!
//! What happens when the user types, presses keys or picks a block type inside a
//! document. Every function takes the owning `document_id` and fails with
//! `BlockNotFound` when the block is not part of it.
//!
//! ## Text Changes
//!
//! [`change_block_content`] is the single entry point for typed text:
//!
//! ```text
//! paragraph + "/page <title>" (title not blank)
//!     -> new child document <title>
//!     -> typed block removed
//!     -> linked page block inserted after the last linked page block (or at the end)
//! anything else
//!     -> markdown shorthand patch (paragraphs only), or a plain content update
//! ```
//!
//! ## Focus
//!
//! Commands that move the caret return a [`FocusTarget`]:
//!
//! | Action                         | Focus                          |
//! |--------------------------------|--------------------------------|
//! | add block after X              | the new block                  |
//! | append block                   | the new block, if it survives  |
//! | delete the only block          | the same block (now empty)     |
//! | delete the first of several    | the new first block            |
//! | delete any other block         | the block before it            |

use crate::commands::helpers::linked_insert_position;
use crate::commands::{CmdMessage, CmdResult, FocusTarget};
use crate::error::{NestnoteError, Result};
use crate::markdown::{block_update_from_markdown, page_command_title};
use crate::model::{Block, BlockPatch, BlockType};
use crate::store::DataStore;
use tracing::debug;
use uuid::Uuid;

/// Keys the editor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKey {
    Enter,
    Backspace,
    Other,
}

fn block_in<S: DataStore>(store: &S, document_id: &Uuid, block_id: &Uuid) -> Result<Block> {
    store
        .get_block_by_id(block_id)
        .filter(|b| b.page_id == *document_id)
        .cloned()
        .ok_or(NestnoteError::BlockNotFound(*block_id))
}

fn affected_block<S: DataStore>(store: &S, block_id: &Uuid) -> CmdResult {
    let mut result = CmdResult::default();
    if let Some(block) = store.get_block_by_id(block_id) {
        result.affected_blocks.push(block.clone());
    }
    result
}

/// Inserts an empty block of `block_type` right after `after_block_id`.
pub fn add_block_after<S: DataStore>(
    store: &mut S,
    document_id: &Uuid,
    after_block_id: &Uuid,
    block_type: BlockType,
) -> Result<CmdResult> {
    let after = block_in(store, document_id, after_block_id)?;
    let block = Block::new(*document_id, block_type, "", after.order + 1);
    let block_id = block.id;
    store.add_block_to_document(document_id, block);

    Ok(affected_block(store, &block_id).with_focus(FocusTarget::new(*document_id, block_id)))
}

/// Adds a block at the end of a document and types `content` into it, so
/// shorthand and `/page` act exactly as in the editor.
pub fn append_block<S: DataStore>(
    store: &mut S,
    document_id: &Uuid,
    block_type: BlockType,
    content: &str,
) -> Result<CmdResult> {
    if store.get_document_by_id(document_id).is_none() {
        return Err(NestnoteError::DocumentNotFound(*document_id));
    }
    let order = store.get_blocks_by_document_id(document_id).len();
    let block = Block::new(*document_id, block_type, "", order);
    let block_id = block.id;
    store.add_block_to_document(document_id, block);

    let mut result = if content.is_empty() {
        affected_block(store, &block_id)
    } else {
        change_block_content(store, document_id, &block_id, content)?
    };
    if store.get_block_by_id(&block_id).is_some() {
        result.focus = Some(FocusTarget::new(*document_id, block_id));
    }
    Ok(result)
}

/// Removes a block. The last remaining block is emptied instead, so a document
/// never ends up without blocks once opened.
pub fn delete_block<S: DataStore>(
    store: &mut S,
    document_id: &Uuid,
    block_id: &Uuid,
) -> Result<CmdResult> {
    block_in(store, document_id, block_id)?;
    let sequence: Vec<Uuid> = store
        .get_blocks_by_document_id(document_id)
        .iter()
        .map(|b| b.id)
        .collect();
    let index = sequence.iter().position(|id| id == block_id).unwrap_or(0);

    if sequence.len() == 1 {
        store.update_block_in_document(document_id, block_id, &BlockPatch::content(""));
        return Ok(affected_block(store, block_id)
            .with_focus(FocusTarget::new(*document_id, *block_id)));
    }

    store.delete_block_from_document(document_id, block_id);
    let focus = if index == 0 {
        sequence[1]
    } else {
        sequence[index - 1]
    };
    Ok(CmdResult::default().with_focus(FocusTarget::new(*document_id, focus)))
}

/// Applies typed text to a block, acting on `/page` and markdown shorthand.
pub fn change_block_content<S: DataStore>(
    store: &mut S,
    document_id: &Uuid,
    block_id: &Uuid,
    content: &str,
) -> Result<CmdResult> {
    let block = block_in(store, document_id, block_id)?;

    if block.block_type == BlockType::Paragraph {
        if let Some(title) = page_command_title(content).filter(|t| !t.trim().is_empty()) {
            return create_linked_page(store, document_id, block_id, title);
        }
    }

    let patch = block_update_from_markdown(&block, content);
    if let Some(new_type) = patch.block_type {
        debug!(block = %block_id, block_type = %new_type, "Converted block from shorthand");
    }
    store.update_block_in_document(document_id, block_id, &patch);
    Ok(affected_block(store, block_id))
}

fn create_linked_page<S: DataStore>(
    store: &mut S,
    document_id: &Uuid,
    typed_block_id: &Uuid,
    title: &str,
) -> Result<CmdResult> {
    let child = store.create_document(Some(title), Some(*document_id), None);
    store.delete_block_from_document(document_id, typed_block_id);

    let order = linked_insert_position(store, document_id);
    let link = Block::page_link(*document_id, &child, order);
    let link_id = link.id;
    store.add_block_to_document(document_id, link);
    debug!(document = %child.id, parent = %document_id, "Created page from /page");

    let mut result = affected_block(store, &link_id).with_affected_documents(vec![child.clone()]);
    result.add_message(CmdMessage::success(format!("Created page '{}'", child.title)));
    Ok(result)
}

/// Changes a block's type.
///
/// Turning a linked `page` block into anything else deletes the linked document
/// (per the delete policy) and empties the block. A block whose content is just
/// the `/` command opener is emptied too.
pub fn change_block_type<S: DataStore>(
    store: &mut S,
    document_id: &Uuid,
    block_id: &Uuid,
    new_type: BlockType,
) -> Result<CmdResult> {
    let block = block_in(store, document_id, block_id)?;
    let mut result = CmdResult::default();

    let mut patch = BlockPatch {
        block_type: Some(new_type),
        ..Default::default()
    };
    if new_type == BlockType::Checkbox && block.block_type != BlockType::Checkbox {
        patch.checked = Some(Some(false));
    } else if new_type != BlockType::Checkbox && block.checked.is_some() {
        patch.checked = Some(None);
    }

    if block.block_type == BlockType::Page && new_type != BlockType::Page {
        patch.content = Some(String::new());
        patch.linked_page_id = Some(None);
        // Unlink first: deleting the document sweeps blocks that still link to it.
        store.update_block_in_document(document_id, block_id, &patch);
        if let Some(linked) = block.linked_page_id {
            let removed = store.delete_document(&linked);
            if !removed.is_empty() {
                result.add_message(CmdMessage::info(format!(
                    "Deleted {} linked page(s)",
                    removed.len()
                )));
            }
            result.removed_documents = removed;
        }
    } else {
        if block.content == "/" {
            patch.content = Some(String::new());
        }
        store.update_block_in_document(document_id, block_id, &patch);
    }

    if let Some(updated) = store.get_block_by_id(block_id) {
        result.affected_blocks.push(updated.clone());
    }
    Ok(result)
}

/// Flips a checkbox block.
pub fn toggle_checked<S: DataStore>(
    store: &mut S,
    document_id: &Uuid,
    block_id: &Uuid,
) -> Result<CmdResult> {
    let block = block_in(store, document_id, block_id)?;
    if block.block_type != BlockType::Checkbox {
        return Err(NestnoteError::Api(format!(
            "Block is a {}, not a checkbox",
            block.block_type
        )));
    }
    store.update_block_in_document(document_id, block_id, &BlockPatch::checked(!block.is_checked()));
    Ok(affected_block(store, block_id))
}

/// Moves a block to a new 0-based position (clamped to the last one).
pub fn move_block<S: DataStore>(
    store: &mut S,
    document_id: &Uuid,
    block_id: &Uuid,
    new_index: usize,
) -> Result<CmdResult> {
    block_in(store, document_id, block_id)?;
    store.move_block_in_document(document_id, block_id, new_index);
    Ok(affected_block(store, block_id).with_focus(FocusTarget::new(*document_id, *block_id)))
}

/// Keyboard handling: Backspace in an empty block deletes it, Enter opens a new
/// paragraph below. Other keys do nothing.
pub fn key_down<S: DataStore>(
    store: &mut S,
    document_id: &Uuid,
    block_id: &Uuid,
    key: EditorKey,
    current_value: &str,
) -> Result<CmdResult> {
    match key {
        EditorKey::Backspace if current_value.is_empty() => delete_block(store, document_id, block_id),
        EditorKey::Enter => add_block_after(store, document_id, block_id, BlockType::Paragraph),
        _ => Ok(CmdResult::default()),
    }
}

/// Removes empty paragraphs, keeping the first block whatever it holds.
pub fn cleanup_empty_blocks<S: DataStore>(store: &mut S, document_id: &Uuid) -> Result<CmdResult> {
    if store.get_document_by_id(document_id).is_none() {
        return Err(NestnoteError::DocumentNotFound(*document_id));
    }

    let empty: Vec<Uuid> = store
        .get_blocks_by_document_id(document_id)
        .iter()
        .skip(1)
        .filter(|b| b.block_type == BlockType::Paragraph && b.content.trim().is_empty())
        .map(|b| b.id)
        .collect();
    for block_id in &empty {
        store.delete_block_from_document(document_id, block_id);
    }

    let mut result = CmdResult::default();
    if !empty.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "Removed {} empty block(s)",
            empty.len()
        )));
    }
    Ok(result)
}
