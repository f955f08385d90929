//! # Storage Layer
//!
//! This module defines the storage abstraction for nestnote. The [`DataStore`]
//! trait is what commands and the API talk to; [`note_store::NoteStore`] is the
//! one implementation, generic over a [`backend::StorageBackend`].
//!
//! ## State Model
//!
//! All state lives in memory as a [`snapshot::Snapshot`]:
//!
//! - the document collection (a tree, linked in both directions)
//! - the flat block collection (grouped by `page_id`, ordered by `order`)
//! - the expanded set of the navigation tree
//!
//! The current selection is kept beside it as an id; [`DataStore::current_document`]
//! is a lookup, so renaming the selected document needs no second update.
//!
//! ## Lifecycle
//!
//! ```text
//! NoteStore::open(backend)   load blob, run the doctor
//!   -> operations            mutate memory, mark dirty
//!   -> save()                write the blob atomically
//! ```
//!
//! Nothing is written behind the caller's back; the API layer decides when to
//! save (see [`crate::api`]).
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── nestnote.toml      # Optional configuration
//! └── state.json         # documents, blocks, expandedDocuments
//! ```
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: `NoteStore` over the file backend.
//! - [`memory::InMemoryStore`]: for testing logic without filesystem I/O.

use crate::error::Result;
use crate::model::{Block, BlockPatch, Document, DocumentPatch};
use snapshot::Snapshot;
use std::collections::HashSet;
use uuid::Uuid;

pub mod backend;
pub mod blocks;
pub mod doctor;
pub mod documents;
pub mod fs;
pub mod fs_backend;
pub mod mem_backend;
pub mod memory;
pub mod note_store;
pub mod snapshot;

/// Report from the `doctor` operation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DoctorReport {
    pub reattached_documents: usize,
    pub rebuilt_child_lists: usize,
    pub relevelled_documents: usize,
    pub dropped_blocks: usize,
    pub unlinked_page_blocks: usize,
    pub renumbered_documents: usize,
    pub dropped_expanded: usize,
}

impl DoctorReport {
    pub fn total(&self) -> usize {
        self.reattached_documents
            + self.rebuilt_child_lists
            + self.relevelled_documents
            + self.dropped_blocks
            + self.unlinked_page_blocks
            + self.renumbered_documents
            + self.dropped_expanded
    }

    pub fn is_clean(&self) -> bool {
        self.total() == 0
    }
}

/// Abstract interface for the document/block store.
///
/// Lookups return `Option`; mutations on unknown ids are no-ops that report
/// `false` (or an empty result) instead of failing.
pub trait DataStore {
    /// The live state.
    fn snapshot(&self) -> &Snapshot;

    // --- Documents ---

    /// Create a document. A blank or missing title gets the configured default.
    fn create_document(
        &mut self,
        title: Option<&str>,
        parent_id: Option<Uuid>,
        icon: Option<String>,
    ) -> Document;

    fn update_document(&mut self, id: &Uuid, patch: &DocumentPatch) -> bool;

    /// Delete a document and its children per the delete policy.
    /// Returns every removed id.
    fn delete_document(&mut self, id: &Uuid) -> Vec<Uuid>;

    /// Re-parent a document (`None` = root). Fails on cycles.
    fn move_document(&mut self, id: &Uuid, new_parent_id: Option<Uuid>) -> Result<bool>;

    /// Point the selection at `id`. Unknown ids clear it.
    fn select_document(&mut self, id: &Uuid) -> bool;

    fn clear_selection(&mut self);

    fn current_document_id(&self) -> Option<Uuid>;

    /// Flip the expanded state of a document, returning the new state.
    fn toggle_folder(&mut self, id: &Uuid) -> bool;

    // --- Blocks ---

    fn add_block_to_document(&mut self, document_id: &Uuid, block: Block) -> bool;

    fn update_block_in_document(
        &mut self,
        document_id: &Uuid,
        block_id: &Uuid,
        patch: &BlockPatch,
    ) -> bool;

    fn delete_block_from_document(&mut self, document_id: &Uuid, block_id: &Uuid) -> Option<Block>;

    fn move_block_in_document(&mut self, document_id: &Uuid, block_id: &Uuid, new_index: usize) -> bool;

    /// Renumber the document's blocks to `0..n`. Returns whether anything changed.
    fn reorder_blocks(&mut self, document_id: &Uuid) -> bool;

    // --- Persistence ---

    fn save(&mut self) -> Result<()>;

    fn is_dirty(&self) -> bool;

    /// Verify and fix consistency issues
    fn doctor(&mut self) -> Result<DoctorReport>;

    // --- Queries ---

    fn current_document(&self) -> Option<&Document> {
        self.current_document_id()
            .and_then(|id| self.snapshot().document(&id))
    }

    fn get_document_by_id(&self, id: &Uuid) -> Option<&Document> {
        self.snapshot().document(id)
    }

    fn get_child_documents(&self, parent_id: &Uuid) -> Vec<&Document> {
        self.snapshot().child_documents(parent_id)
    }

    fn documents(&self) -> &[Document] {
        &self.snapshot().documents
    }

    fn root_documents(&self) -> Vec<&Document> {
        self.snapshot().root_documents()
    }

    fn descendants_of(&self, id: &Uuid) -> Vec<Uuid> {
        self.snapshot().descendants_of(id)
    }

    fn is_expanded(&self, id: &Uuid) -> bool {
        self.snapshot().is_expanded(id)
    }

    fn expanded_documents(&self) -> &HashSet<Uuid> {
        &self.snapshot().expanded_documents
    }

    /// Most recently edited first.
    fn recently_updated(&self, limit: usize) -> Vec<&Document> {
        let mut documents: Vec<&Document> = self.documents().iter().collect();
        documents.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        documents.truncate(limit);
        documents
    }

    /// Most recently created first.
    fn recently_created(&self, limit: usize) -> Vec<&Document> {
        let mut documents: Vec<&Document> = self.documents().iter().collect();
        documents.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        documents.truncate(limit);
        documents
    }

    fn get_blocks_by_document_id(&self, document_id: &Uuid) -> Vec<&Block> {
        self.snapshot().blocks_of(document_id)
    }

    fn get_block_by_id(&self, block_id: &Uuid) -> Option<&Block> {
        self.snapshot().block_by_id(block_id)
    }
}
