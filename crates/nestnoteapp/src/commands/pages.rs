//! Page-level actions: create, delete, move, rename, and turning `page` blocks
//! into real documents.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{NestnoteError, Result};
use crate::model::{BlockPatch, BlockType, Document, DocumentPatch};
use crate::store::DataStore;
use tracing::debug;
use uuid::Uuid;

/// Creates a document and makes it the current one.
///
/// An unknown `parent_id` yields a root document.
pub fn create_and_select<S: DataStore>(
    store: &mut S,
    title: Option<&str>,
    parent_id: Option<Uuid>,
    icon: Option<String>,
) -> Result<CmdResult> {
    let document = store.create_document(title, parent_id, icon);
    store.select_document(&document.id);

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Created page '{}'",
        document.title
    )));
    result.navigate_to = Some(document.id);
    Ok(result.with_affected_documents(vec![document]))
}

/// Creates a child of `parent_id` and makes it the current one.
pub fn create_subpage<S: DataStore>(
    store: &mut S,
    parent_id: &Uuid,
    title: Option<&str>,
    icon: Option<String>,
) -> Result<CmdResult> {
    if store.get_document_by_id(parent_id).is_none() {
        return Err(NestnoteError::DocumentNotFound(*parent_id));
    }
    create_and_select(store, title, Some(*parent_id), icon)
}

/// Deletes a page (and its children, per the store's delete policy).
///
/// A page with children is only deleted once `confirmed` is true; before that
/// the result carries `needs_confirmation` and nothing changes.
pub fn delete_page<S: DataStore>(store: &mut S, id: &Uuid, confirmed: bool) -> Result<CmdResult> {
    let document = store
        .get_document_by_id(id)
        .cloned()
        .ok_or(NestnoteError::DocumentNotFound(*id))?;
    let child_count = store.get_child_documents(id).len();

    let mut result = CmdResult::default();
    if child_count > 0 && !confirmed {
        result.needs_confirmation = true;
        result.add_message(CmdMessage::warning(format!(
            "'{}' has {} subpage(s). Deleting it deletes them too.",
            document.title, child_count
        )));
        return Ok(result.with_affected_documents(vec![document]));
    }

    let removed = store.delete_document(id);
    store.clear_selection();

    result.add_message(CmdMessage::success(format!(
        "Deleted '{}'",
        document.title
    )));
    if removed.len() > 1 {
        result.add_message(CmdMessage::info(format!(
            "Also deleted {} subpage(s)",
            removed.len() - 1
        )));
    }
    result.removed_documents = removed;
    Ok(result)
}

/// Moves a page under `new_parent_id`, or to the top level with `None`.
///
/// The old parent's `page` blocks pointing at the moved page are removed; the
/// new parent links it the next time it is opened.
pub fn move_page<S: DataStore>(
    store: &mut S,
    id: &Uuid,
    new_parent_id: Option<Uuid>,
) -> Result<CmdResult> {
    let document = store
        .get_document_by_id(id)
        .cloned()
        .ok_or(NestnoteError::DocumentNotFound(*id))?;
    if let Some(parent) = new_parent_id {
        if store.get_document_by_id(&parent).is_none() {
            return Err(NestnoteError::DocumentNotFound(parent));
        }
    }

    let mut result = CmdResult::default();
    if !store.move_document(id, new_parent_id)? {
        result.add_message(CmdMessage::info(format!(
            "'{}' is already there",
            document.title
        )));
        return Ok(result);
    }

    if let Some(old_parent) = document.parent_document_id {
        let stale: Vec<Uuid> = store
            .get_blocks_by_document_id(&old_parent)
            .iter()
            .filter(|b| b.linked_page_id == Some(*id))
            .map(|b| b.id)
            .collect();
        for block_id in stale {
            store.delete_block_from_document(&old_parent, &block_id);
        }
    }

    let destination = match new_parent_id.and_then(|p| store.get_document_by_id(&p)) {
        Some(parent) => format!("under '{}'", parent.title),
        None => "to the top level".to_string(),
    };
    result.add_message(CmdMessage::success(format!(
        "Moved '{}' {}",
        document.title, destination
    )));

    let affected: Vec<Document> = [Some(*id), document.parent_document_id, new_parent_id]
        .into_iter()
        .flatten()
        .filter_map(|d| store.get_document_by_id(&d).cloned())
        .collect();
    Ok(result.with_affected_documents(affected))
}

/// Renames a page and/or changes its icon. Linked `page` blocks elsewhere pick
/// up the new title.
pub fn update_page<S: DataStore>(
    store: &mut S,
    id: &Uuid,
    patch: &DocumentPatch,
) -> Result<CmdResult> {
    if !store.update_document(id, patch) {
        return Err(NestnoteError::DocumentNotFound(*id));
    }

    if patch.title.is_some() {
        let title = store
            .get_document_by_id(id)
            .map(|d| d.title.clone())
            .unwrap_or_default();
        let links: Vec<(Uuid, Uuid)> = store
            .snapshot()
            .blocks
            .iter()
            .filter(|b| b.linked_page_id == Some(*id))
            .map(|b| (b.page_id, b.id))
            .collect();
        for (page_id, block_id) in links {
            store.update_block_in_document(&page_id, &block_id, &BlockPatch::content(title.clone()));
        }
    }

    let mut result = CmdResult::default();
    if let Some(document) = store.get_document_by_id(id).cloned() {
        result.add_message(CmdMessage::success(format!("Updated '{}'", document.title)));
        result.affected_documents.push(document);
    }
    Ok(result)
}

/// Follows a `page` block.
///
/// A linked block navigates to its document. An unlinked placeholder first
/// becomes a real child document titled after the block's content (or the
/// default title), and the block is linked to it.
pub fn materialize_page_block<S: DataStore>(
    store: &mut S,
    document_id: &Uuid,
    block_id: &Uuid,
) -> Result<CmdResult> {
    let block = store
        .get_block_by_id(block_id)
        .filter(|b| b.page_id == *document_id)
        .cloned()
        .ok_or(NestnoteError::BlockNotFound(*block_id))?;
    if block.block_type != BlockType::Page {
        return Err(NestnoteError::Api(format!(
            "Block is a {}, not a page",
            block.block_type
        )));
    }

    let mut result = CmdResult::default();

    if let Some(linked) = block.linked_page_id {
        let target = store
            .get_document_by_id(&linked)
            .cloned()
            .ok_or(NestnoteError::DocumentNotFound(linked))?;
        result.navigate_to = Some(target.id);
        return Ok(result.with_affected_documents(vec![target]));
    }

    let child = store.create_document(Some(&block.content), Some(*document_id), block.icon.clone());
    let patch = BlockPatch {
        content: Some(child.title.clone()),
        linked_page_id: Some(Some(child.id)),
        ..Default::default()
    };
    store.update_block_in_document(document_id, block_id, &patch);
    debug!(block = %block_id, document = %child.id, "Materialized page block");

    result.add_message(CmdMessage::success(format!("Created page '{}'", child.title)));
    result.navigate_to = Some(child.id);
    if let Some(updated) = store.get_block_by_id(block_id).cloned() {
        result.affected_blocks.push(updated);
    }
    Ok(result.with_affected_documents(vec![child]))
}
