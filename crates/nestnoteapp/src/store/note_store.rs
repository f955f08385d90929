use super::backend::StorageBackend;
use super::snapshot::Snapshot;
use super::{DataStore, DoctorReport};
use crate::config::{DeletePolicy, NestnoteConfig};
use crate::error::Result;
use crate::model::{Block, BlockPatch, Document, DocumentPatch, DEFAULT_TITLE};
use tracing::{debug, warn};
use uuid::Uuid;

/// The document/block store: a live [`Snapshot`] plus the session selection,
/// persisted through a [`StorageBackend`].
///
/// Mutations only touch memory and mark the store dirty; [`DataStore::save`]
/// writes the blob.
pub struct NoteStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
    state: Snapshot,
    current: Option<Uuid>,
    dirty: bool,
    default_title: String,
    delete_policy: DeletePolicy,
}

impl<B: StorageBackend> NoteStore<B> {
    /// An empty store that has not read anything from `backend`.
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            state: Snapshot::default(),
            current: None,
            dirty: false,
            default_title: DEFAULT_TITLE.to_string(),
            delete_policy: DeletePolicy::default(),
        }
    }

    /// Loads the persisted state and repairs it.
    ///
    /// Repairs are only kept in memory until the next save.
    pub fn open(backend: B) -> Result<Self> {
        let mut store = Self::with_backend(backend);
        store.reload()?;
        Ok(store)
    }

    pub fn with_config(mut self, config: &NestnoteConfig) -> Self {
        self.default_title = config.default_title().to_string();
        self.delete_policy = config.delete_policy;
        self
    }

    pub fn with_delete_policy(mut self, policy: DeletePolicy) -> Self {
        self.delete_policy = policy;
        self
    }

    pub fn delete_policy(&self) -> DeletePolicy {
        self.delete_policy
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Throws away unsaved changes and the selection, then reads the backend again.
    pub fn reload(&mut self) -> Result<()> {
        self.state = self.backend.load_snapshot()?;
        self.current = None;
        self.dirty = false;

        let report = self.state.repair();
        if !report.is_clean() {
            warn!(
                location = %self.backend.location().display(),
                repairs = report.total(),
                "Repaired inconsistent state on load"
            );
            self.dirty = true;
        }
        debug!(
            documents = self.state.documents.len(),
            blocks = self.state.blocks.len(),
            "Loaded state"
        );
        Ok(())
    }

    fn changed(&mut self, changed: bool) -> bool {
        self.dirty |= changed;
        changed
    }
}

impl<B: StorageBackend> DataStore for NoteStore<B> {
    fn snapshot(&self) -> &Snapshot {
        &self.state
    }

    fn create_document(
        &mut self,
        title: Option<&str>,
        parent_id: Option<Uuid>,
        icon: Option<String>,
    ) -> Document {
        let title = match title.map(str::trim) {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => self.default_title.clone(),
        };
        let document = self.state.create_document(&title, parent_id, icon);
        self.dirty = true;
        debug!(id = %document.id, parent = ?document.parent_document_id, "Created document");
        document
    }

    fn update_document(&mut self, id: &Uuid, patch: &DocumentPatch) -> bool {
        let mut patch = patch.clone();
        if let Some(title) = patch.title.as_mut() {
            let trimmed = title.trim();
            *title = if trimmed.is_empty() {
                self.default_title.clone()
            } else {
                trimmed.to_string()
            };
        }
        let updated = self.state.update_document(id, &patch);
        self.changed(updated)
    }

    fn delete_document(&mut self, id: &Uuid) -> Vec<Uuid> {
        let removed = self.state.delete_document(id, self.delete_policy);
        if self.current.is_some_and(|c| removed.contains(&c)) {
            self.current = None;
        }
        if !removed.is_empty() {
            self.dirty = true;
            debug!(id = %id, removed = removed.len(), policy = ?self.delete_policy, "Deleted document");
        }
        removed
    }

    fn move_document(&mut self, id: &Uuid, new_parent_id: Option<Uuid>) -> Result<bool> {
        let moved = self.state.move_document(id, new_parent_id)?;
        if moved {
            debug!(id = %id, parent = ?new_parent_id, "Moved document");
        }
        Ok(self.changed(moved))
    }

    fn select_document(&mut self, id: &Uuid) -> bool {
        if self.state.document(id).is_some() {
            self.current = Some(*id);
            true
        } else {
            self.current = None;
            false
        }
    }

    fn clear_selection(&mut self) {
        self.current = None;
    }

    fn current_document_id(&self) -> Option<Uuid> {
        self.current
    }

    fn toggle_folder(&mut self, id: &Uuid) -> bool {
        let was = self.state.is_expanded(id);
        let now = self.state.toggle_folder(id);
        self.changed(was != now);
        now
    }

    fn add_block_to_document(&mut self, document_id: &Uuid, block: Block) -> bool {
        let added = self.state.add_block(document_id, block);
        self.changed(added)
    }

    fn update_block_in_document(
        &mut self,
        document_id: &Uuid,
        block_id: &Uuid,
        patch: &BlockPatch,
    ) -> bool {
        let updated = self.state.update_block(document_id, block_id, patch);
        self.changed(updated)
    }

    fn delete_block_from_document(&mut self, document_id: &Uuid, block_id: &Uuid) -> Option<Block> {
        let removed = self.state.delete_block(document_id, block_id);
        self.changed(removed.is_some());
        removed
    }

    fn move_block_in_document(&mut self, document_id: &Uuid, block_id: &Uuid, new_index: usize) -> bool {
        let moved = self.state.move_block(document_id, block_id, new_index);
        self.changed(moved)
    }

    fn reorder_blocks(&mut self, document_id: &Uuid) -> bool {
        let renumbered = self.state.renumber(document_id);
        self.changed(renumbered)
    }

    fn save(&mut self) -> Result<()> {
        self.backend.save_snapshot(&self.state)?;
        self.dirty = false;
        debug!(location = %self.backend.location().display(), "Saved state");
        Ok(())
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn doctor(&mut self) -> Result<DoctorReport> {
        let report = self.state.repair();
        if !report.is_clean() {
            warn!(repairs = report.total(), "Doctor repaired inconsistent state");
            self.dirty = true;
        }
        if self.current.is_some_and(|c| self.state.document(&c).is_none()) {
            self.current = None;
        }
        Ok(report)
    }
}
