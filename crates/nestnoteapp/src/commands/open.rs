use crate::commands::helpers::linked_insert_position;
use crate::commands::{CmdMessage, CmdResult, FocusTarget};
use crate::error::{NestnoteError, Result};
use crate::model::Block;
use crate::store::DataStore;
use std::collections::HashSet;
use tracing::debug;
use uuid::Uuid;

/// Opens a document for editing.
///
/// - Unknown ids fail with `DocumentNotFound`; the view goes back home.
/// - The document becomes the current selection.
/// - A document without blocks gets one empty paragraph (focused).
/// - Otherwise every child document that has no linked page block gets one,
///   placed after the last linked page block (or at the end), in child order.
pub fn run<S: DataStore>(store: &mut S, document_id: &Uuid) -> Result<CmdResult> {
    if store.get_document_by_id(document_id).is_none() {
        store.clear_selection();
        return Err(NestnoteError::DocumentNotFound(*document_id));
    }
    store.select_document(document_id);

    let mut result = CmdResult::default();

    if store.get_blocks_by_document_id(document_id).is_empty() {
        let block = Block::paragraph(*document_id, 0);
        let block_id = block.id;
        store.add_block_to_document(document_id, block.clone());
        debug!(document = %document_id, "Seeded empty document");
        result.affected_blocks.push(block);
        result.focus = Some(FocusTarget::new(*document_id, block_id));
    } else {
        let linked: HashSet<Uuid> = store
            .get_blocks_by_document_id(document_id)
            .iter()
            .filter_map(|b| b.linked_page_id)
            .collect();
        let missing: Vec<_> = store
            .get_child_documents(document_id)
            .into_iter()
            .filter(|child| !linked.contains(&child.id))
            .cloned()
            .collect();

        let base = linked_insert_position(store, document_id);
        for (offset, child) in missing.iter().enumerate() {
            let block = Block::page_link(*document_id, child, base + offset);
            store.add_block_to_document(document_id, block.clone());
            result.affected_blocks.push(block);
        }
        if !missing.is_empty() {
            debug!(document = %document_id, linked = missing.len(), "Linked missing subpages");
            result.add_message(CmdMessage::info(format!(
                "Linked {} subpage(s) that had no block",
                missing.len()
            )));
        }
    }

    if let Some(document) = store.get_document_by_id(document_id) {
        result.affected_documents.push(document.clone());
    }
    Ok(result)
}
