//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It serves as the single
//! entry point for all nestnote operations, regardless of the UI being used.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs** (selectors: ids, id prefixes, titles and block positions → UUIDs)
//! - **Persists**: after every mutating call the store is flushed when `autosave` is on
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: That belongs in `commands/*.rs`
//! - **I/O operations**: No stdout, stderr, or file formatting
//! - **Presentation concerns**: Returns data structures, not strings
//!
//! ## Selectors
//!
//! Documents are addressed by full id, by an id prefix of at least four
//! characters, or by (case-insensitive) title. Blocks are addressed inside a
//! document by 1-based position or by id prefix. See [`commands::helpers`].
//!
//! ## Generic Over DataStore
//!
//! `NestnoteApi<S: DataStore>` is generic over the storage backend:
//! - Production: `NestnoteApi<FileStore>`
//! - Testing: `NestnoteApi<InMemoryStore>`

use crate::commands::edit::EditorKey;
use crate::commands::tree::RecentOrder;
use crate::commands::{self, helpers, CmdResult};
use crate::config::NestnoteConfig;
use crate::error::Result;
use crate::model::{BlockType, DocumentPatch};
use crate::store::DataStore;
use uuid::Uuid;

/// The main API facade for nestnote operations.
pub struct NestnoteApi<S: DataStore> {
    store: S,
    autosave: bool,
    recent_limit: usize,
}

impl<S: DataStore> NestnoteApi<S> {
    pub fn new(store: S) -> Self {
        let defaults = NestnoteConfig::default();
        Self {
            store,
            autosave: defaults.autosave,
            recent_limit: defaults.recent_limit,
        }
    }

    pub fn with_config(mut self, config: &NestnoteConfig) -> Self {
        self.autosave = config.autosave;
        self.recent_limit = config.recent_limit;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn is_dirty(&self) -> bool {
        self.store.is_dirty()
    }

    /// Writes pending changes, whatever the autosave setting.
    pub fn flush(&mut self) -> Result<()> {
        if self.store.is_dirty() {
            self.store.save()?;
        }
        Ok(())
    }

    fn commit(&mut self, result: Result<CmdResult>) -> Result<CmdResult> {
        let result = result?;
        if self.autosave {
            self.flush()?;
        }
        Ok(result)
    }

    // --- Selectors ---

    pub fn resolve_document(&self, selector: &str) -> Result<Uuid> {
        helpers::resolve_document(&self.store, selector)
    }

    pub fn resolve_block(&self, document_id: &Uuid, selector: &str) -> Result<Uuid> {
        helpers::resolve_block(&self.store, document_id, selector)
    }

    fn resolve_parent(&self, selector: Option<&str>) -> Result<Option<Uuid>> {
        selector.map(|s| self.resolve_document(s)).transpose()
    }

    fn resolve_pair(&self, document: &str, block: &str) -> Result<(Uuid, Uuid)> {
        let document_id = self.resolve_document(document)?;
        let block_id = self.resolve_block(&document_id, block)?;
        Ok((document_id, block_id))
    }

    // --- Navigation ---

    pub fn tree(&self) -> Result<CmdResult> {
        commands::tree::run(&self.store)
    }

    pub fn recent(&self, order: RecentOrder) -> Result<CmdResult> {
        commands::tree::recent(&self.store, self.recent_limit, order)
    }

    pub fn open(&mut self, document: &str) -> Result<CmdResult> {
        let id = self.resolve_document(document)?;
        let result = commands::open::run(&mut self.store, &id);
        self.commit(result)
    }

    /// Leaves the current document (the home view).
    pub fn go_home(&mut self) {
        self.store.clear_selection();
    }

    pub fn toggle_folder(&mut self, document: &str) -> Result<CmdResult> {
        let id = self.resolve_document(document)?;
        let result = commands::tree::toggle(&mut self.store, &id);
        self.commit(result)
    }

    // --- Pages ---

    /// Creates a page (a root page without `parent`) and selects it.
    pub fn create_page(
        &mut self,
        title: Option<&str>,
        parent: Option<&str>,
        icon: Option<String>,
    ) -> Result<CmdResult> {
        let result = match self.resolve_parent(parent)? {
            Some(parent_id) => commands::pages::create_subpage(&mut self.store, &parent_id, title, icon),
            None => commands::pages::create_and_select(&mut self.store, title, None, icon),
        };
        self.commit(result)
    }

    pub fn delete_page(&mut self, document: &str, confirmed: bool) -> Result<CmdResult> {
        let id = self.resolve_document(document)?;
        let result = commands::pages::delete_page(&mut self.store, &id, confirmed);
        self.commit(result)
    }

    /// Moves a page under `parent`, or to the root without one.
    pub fn move_page(&mut self, document: &str, parent: Option<&str>) -> Result<CmdResult> {
        let id = self.resolve_document(document)?;
        let parent_id = self.resolve_parent(parent)?;
        let result = commands::pages::move_page(&mut self.store, &id, parent_id);
        self.commit(result)
    }

    pub fn rename_page(&mut self, document: &str, title: &str) -> Result<CmdResult> {
        let id = self.resolve_document(document)?;
        let result = commands::pages::update_page(&mut self.store, &id, &DocumentPatch::title(title));
        self.commit(result)
    }

    pub fn set_icon(&mut self, document: &str, icon: Option<String>) -> Result<CmdResult> {
        let id = self.resolve_document(document)?;
        let result = commands::pages::update_page(&mut self.store, &id, &DocumentPatch::icon(icon));
        self.commit(result)
    }

    /// Follows a `page` block, creating its document first if it is a placeholder.
    pub fn open_page_block(&mut self, document: &str, block: &str) -> Result<CmdResult> {
        let (document_id, block_id) = self.resolve_pair(document, block)?;
        let result = commands::pages::materialize_page_block(&mut self.store, &document_id, &block_id);
        self.commit(result)
    }

    // --- Blocks ---

    pub fn add_block_after(
        &mut self,
        document: &str,
        after: &str,
        block_type: BlockType,
    ) -> Result<CmdResult> {
        let (document_id, after_id) = self.resolve_pair(document, after)?;
        let result = commands::edit::add_block_after(&mut self.store, &document_id, &after_id, block_type);
        self.commit(result)
    }

    pub fn append_block(
        &mut self,
        document: &str,
        block_type: BlockType,
        content: &str,
    ) -> Result<CmdResult> {
        let document_id = self.resolve_document(document)?;
        let result = commands::edit::append_block(&mut self.store, &document_id, block_type, content);
        self.commit(result)
    }

    pub fn delete_block(&mut self, document: &str, block: &str) -> Result<CmdResult> {
        let (document_id, block_id) = self.resolve_pair(document, block)?;
        let result = commands::edit::delete_block(&mut self.store, &document_id, &block_id);
        self.commit(result)
    }

    pub fn change_block_content(
        &mut self,
        document: &str,
        block: &str,
        content: &str,
    ) -> Result<CmdResult> {
        let (document_id, block_id) = self.resolve_pair(document, block)?;
        let result = commands::edit::change_block_content(&mut self.store, &document_id, &block_id, content);
        self.commit(result)
    }

    pub fn change_block_type(
        &mut self,
        document: &str,
        block: &str,
        block_type: BlockType,
    ) -> Result<CmdResult> {
        let (document_id, block_id) = self.resolve_pair(document, block)?;
        let result = commands::edit::change_block_type(&mut self.store, &document_id, &block_id, block_type);
        self.commit(result)
    }

    pub fn toggle_checked(&mut self, document: &str, block: &str) -> Result<CmdResult> {
        let (document_id, block_id) = self.resolve_pair(document, block)?;
        let result = commands::edit::toggle_checked(&mut self.store, &document_id, &block_id);
        self.commit(result)
    }

    /// Moves a block to a 1-based position.
    pub fn move_block(&mut self, document: &str, block: &str, position: usize) -> Result<CmdResult> {
        let (document_id, block_id) = self.resolve_pair(document, block)?;
        let result = commands::edit::move_block(
            &mut self.store,
            &document_id,
            &block_id,
            position.saturating_sub(1),
        );
        self.commit(result)
    }

    pub fn key_down(
        &mut self,
        document: &str,
        block: &str,
        key: EditorKey,
        current_value: &str,
    ) -> Result<CmdResult> {
        let (document_id, block_id) = self.resolve_pair(document, block)?;
        let result = commands::edit::key_down(&mut self.store, &document_id, &block_id, key, current_value);
        self.commit(result)
    }

    pub fn cleanup_empty_blocks(&mut self, document: &str) -> Result<CmdResult> {
        let document_id = self.resolve_document(document)?;
        let result = commands::edit::cleanup_empty_blocks(&mut self.store, &document_id);
        self.commit(result)
    }

    // --- Maintenance ---

    pub fn doctor(&mut self) -> Result<CmdResult> {
        let result = commands::doctor::run(&mut self.store);
        self.commit(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NestnoteError;
    use crate::model::DEFAULT_TITLE;
    use crate::store::memory::InMemoryStore;
    use crate::store::snapshot::Snapshot;
    use crate::test_utils::TestEnv;

    fn make_api() -> NestnoteApi<InMemoryStore> {
        NestnoteApi::new(InMemoryStore::new())
    }

    fn persisted(api: &NestnoteApi<InMemoryStore>) -> Snapshot {
        api.store()
            .backend()
            .raw()
            .map(|raw| Snapshot::from_json(&raw).unwrap())
            .unwrap_or_default()
    }

    #[test]
    fn test_autosave_flushes_mutations() {
        let mut api = make_api();

        api.create_page(Some("Inbox"), None, None).unwrap();

        assert!(!api.is_dirty());
        assert_eq!(persisted(&api).documents[0].title, "Inbox");
    }

    #[test]
    fn test_autosave_off_waits_for_flush() {
        let config = NestnoteConfig {
            autosave: false,
            ..Default::default()
        };
        let mut api = make_api().with_config(&config);

        api.create_page(Some("Inbox"), None, None).unwrap();
        assert!(api.is_dirty());
        assert!(persisted(&api).is_empty());

        api.flush().unwrap();
        assert!(!api.is_dirty());
        assert_eq!(persisted(&api).documents.len(), 1);
    }

    #[test]
    fn test_failed_write_surfaces_and_stays_dirty() {
        let mut api = make_api();
        api.store().backend().set_simulate_write_error(true);

        let err = api.create_page(Some("Inbox"), None, None).unwrap_err();

        assert!(matches!(err, NestnoteError::Store(_)));
        assert!(api.is_dirty());
    }

    #[test]
    fn test_selectors_by_title_and_position() {
        let mut api = make_api();
        api.create_page(Some("Projects"), None, None).unwrap();
        api.create_page(Some("Rust"), Some("projects"), None).unwrap();
        api.open("Rust").unwrap();

        api.change_block_content("Rust", "1", "# Notes").unwrap();
        api.append_block("Rust", BlockType::Paragraph, "body").unwrap();

        let rust = api.resolve_document("Rust").unwrap();
        let blocks = api.store().get_blocks_by_document_id(&rust);
        assert_eq!(blocks[0].block_type, BlockType::Heading1);
        assert_eq!(blocks[0].content, "Notes");
        assert_eq!(blocks[1].content, "body");
        let parent = api.store().get_document_by_id(&rust).unwrap().parent_document_id;
        assert_eq!(parent, Some(api.resolve_document("Projects").unwrap()));
    }

    #[test]
    fn test_move_block_is_one_based() {
        let mut api = make_api();
        api.create_page(Some("P"), None, None).unwrap();
        api.open("P").unwrap();
        api.change_block_content("P", "1", "A").unwrap();
        api.append_block("P", BlockType::Paragraph, "B").unwrap();
        api.append_block("P", BlockType::Paragraph, "C").unwrap();

        api.move_block("P", "3", 1).unwrap();

        let p = api.resolve_document("P").unwrap();
        let contents: Vec<_> = api
            .store()
            .get_blocks_by_document_id(&p)
            .iter()
            .map(|b| b.content.clone())
            .collect();
        assert_eq!(contents, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_delete_with_children_needs_confirmation() {
        let mut api = make_api();
        api.create_page(Some("A"), None, None).unwrap();
        api.create_page(Some("B"), Some("A"), None).unwrap();

        let result = api.delete_page("A", false).unwrap();
        assert!(result.needs_confirmation);
        assert_eq!(api.store().documents().len(), 2);

        let result = api.delete_page("A", true).unwrap();
        assert_eq!(result.removed_documents.len(), 2);
        assert!(persisted(&api).documents.is_empty());
    }

    #[test]
    fn test_unknown_selector() {
        let mut api = make_api();
        assert!(matches!(api.open("nothing"), Err(NestnoteError::Api(_))));
    }

    #[test]
    fn test_file_backed_session_survives_reopen() {
        let mut env = TestEnv::new();
        env.api.create_page(Some("Journal"), None, None).unwrap();
        env.api.open("Journal").unwrap();
        env.api.change_block_content("Journal", "1", "/page Monday").unwrap();

        let reopened = env.reopen();

        let journal = reopened.resolve_document("Journal").unwrap();
        let monday = reopened.resolve_document("Monday").unwrap();
        let blocks = reopened.store().get_blocks_by_document_id(&journal);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].linked_page_id, Some(monday));
        assert!(reopened.store().current_document().is_none());
    }

    #[test]
    fn test_reopen_keeps_configured_state_file() {
        let config = NestnoteConfig {
            state_file: "notes.json".to_string(),
            ..Default::default()
        };
        let mut env = TestEnv::with_config(config);
        env.api.create_page(Some("Kept"), None, None).unwrap();
        assert!(env.root.join("notes.json").exists());

        let reopened = env.reopen();

        assert_eq!(reopened.store().documents().len(), 1);
        assert!(reopened.resolve_document("Kept").is_ok());
    }

    #[test]
    fn test_blank_rename_falls_back_to_default_title() {
        let mut api = make_api();
        api.create_page(Some("Kept"), None, None).unwrap();

        api.rename_page("Kept", "   ").unwrap();

        assert_eq!(api.store().documents()[0].title, DEFAULT_TITLE);
    }

    #[test]
    fn test_go_home_clears_selection() {
        let mut api = make_api();
        api.create_page(Some("A"), None, None).unwrap();
        assert!(api.store().current_document().is_some());

        api.go_home();

        assert!(api.store().current_document().is_none());
    }
}
