use crate::error::{NestnoteError, Result};
use crate::store::DataStore;
use uuid::Uuid;

/// Where a new linked page block goes in `document_id`: right after the last
/// linked page block, or at the end when there is none.
pub fn linked_insert_position<S: DataStore>(store: &S, document_id: &Uuid) -> usize {
    let blocks = store.get_blocks_by_document_id(document_id);
    blocks
        .iter()
        .filter(|b| b.is_linked_page())
        .map(|b| b.order + 1)
        .max()
        .unwrap_or(blocks.len())
}

/// Resolves a user-supplied document reference.
///
/// Accepted forms, tried in order:
/// 1. A full UUID
/// 2. A unique UUID prefix (at least 4 characters)
/// 3. A title, compared case-insensitively; it must match exactly one document
pub fn resolve_document<S: DataStore>(store: &S, selector: &str) -> Result<Uuid> {
    let selector = selector.trim();
    if let Ok(id) = Uuid::parse_str(selector) {
        return store
            .get_document_by_id(&id)
            .map(|d| d.id)
            .ok_or(NestnoteError::DocumentNotFound(id));
    }

    let lowered = selector.to_lowercase();
    if lowered.len() >= 4 {
        let by_prefix: Vec<Uuid> = store
            .documents()
            .iter()
            .filter(|d| d.id.to_string().starts_with(&lowered))
            .map(|d| d.id)
            .collect();
        if let [id] = by_prefix.as_slice() {
            return Ok(*id);
        }
    }

    let by_title: Vec<Uuid> = store
        .documents()
        .iter()
        .filter(|d| d.title.to_lowercase() == lowered)
        .map(|d| d.id)
        .collect();
    match by_title.as_slice() {
        [id] => Ok(*id),
        [] => Err(NestnoteError::Api(format!("No page matches '{}'", selector))),
        many => Err(NestnoteError::Api(format!(
            "'{}' matches {} pages, use an id instead",
            selector,
            many.len()
        ))),
    }
}

/// Resolves a block reference inside a document: a 1-based position as shown in
/// listings, or a block id (full or unique prefix of at least 4 characters).
/// Numbers past the last position are tried as id prefixes.
pub fn resolve_block<S: DataStore>(store: &S, document_id: &Uuid, selector: &str) -> Result<Uuid> {
    let selector = selector.trim();
    let blocks = store.get_blocks_by_document_id(document_id);

    let position = selector.parse::<usize>().ok();
    if let Some(block) = position.and_then(|p| p.checked_sub(1)).and_then(|i| blocks.get(i)) {
        return Ok(block.id);
    }

    let lowered = selector.to_lowercase();
    let matches: Vec<Uuid> = if lowered.len() >= 4 {
        blocks
            .iter()
            .filter(|b| b.id.to_string().starts_with(&lowered))
            .map(|b| b.id)
            .collect()
    } else {
        Vec::new()
    };
    match matches.as_slice() {
        [id] => Ok(*id),
        [] if position.is_some() => Err(NestnoteError::Api(format!("No block at position {}", selector))),
        [] => Err(NestnoteError::Api(format!("No block matches '{}'", selector))),
        _ => Err(NestnoteError::Api(format!("Block id '{}' is ambiguous", selector))),
    }
}
