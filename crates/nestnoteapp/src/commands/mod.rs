//! # Command Layer
//!
//! This module contains the **orchestration logic** of nestnote: everything an editor
//! does in response to a user action that is more than one store call. Each group
//! of actions lives in its own submodule as plain functions over `S: DataStore`.
//!
//! ## Role and Responsibilities
//!
//! - Seed new documents and keep page-link blocks in sync with child documents
//! - Act on the `/page` trigger (the one place that creates documents from text)
//! - Decide which block should receive focus after an edit
//! - Ask for confirmation before destructive deletes
//! - Return structured [`CmdResult`] values, never strings
//!
//! ## What Commands Do NOT Do
//!
//! - **Any I/O**: No stdout, stderr, or terminal concerns
//! - **Persistence**: Saving is the API's decision
//! - **User interaction**: A delete that needs confirmation returns
//!   `needs_confirmation` and the caller asks
//! - **Timers**: Deferred focus is a [`FocusTarget`] the view applies if the block
//!   still exists; deferred cleanup is the explicit [`edit::cleanup_empty_blocks`]
//!
//! ## Testing Strategy
//!
//! **This is where the lion's share of testing lives.** Command tests use
//! `InMemoryStore` through the `StoreFixture` builder.
//!
//! ## Command Modules
//!
//! - [`open`]: Open a document (select, seed, sync page links)
//! - [`pages`]: Create, delete, move, rename and materialize pages
//! - [`edit`]: Block editing actions
//! - [`tree`]: Navigation tree and home listings
//! - [`doctor`]: Repair an inconsistent store and report what changed
//! - [`helpers`]: Shared utilities (selector resolution, link positions)

use crate::model::{Block, Document};
use crate::store::DataStore;
use serde::Serialize;
use uuid::Uuid;

pub mod doctor;
pub mod edit;
pub mod helpers;
pub mod open;
pub mod pages;
pub mod tree;

pub use tree::TreeNode;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// The block a view should focus once it has re-rendered.
///
/// The block may be gone by then (another command ran first), so views go
/// through [`FocusTarget::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FocusTarget {
    pub document_id: Uuid,
    pub block_id: Uuid,
}

impl FocusTarget {
    pub fn new(document_id: Uuid, block_id: Uuid) -> Self {
        Self {
            document_id,
            block_id,
        }
    }

    pub fn resolve<'a, S: DataStore>(&self, store: &'a S) -> Option<&'a Block> {
        store
            .get_block_by_id(&self.block_id)
            .filter(|b| b.page_id == self.document_id)
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Documents created or modified, in the order they were touched.
    pub affected_documents: Vec<Document>,
    /// Blocks created or modified (post-operation state).
    pub affected_blocks: Vec<Block>,
    /// Ids of documents removed by the command.
    pub removed_documents: Vec<Uuid>,
    /// Documents to display (listings).
    pub listed_documents: Vec<Document>,
    /// Navigation tree (for `tree`).
    pub tree: Vec<TreeNode>,
    /// Document the view should navigate to.
    pub navigate_to: Option<Uuid>,
    pub focus: Option<FocusTarget>,
    /// Set when nothing was done because the caller must confirm first.
    pub needs_confirmation: bool,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_documents(mut self, documents: Vec<Document>) -> Self {
        self.affected_documents = documents;
        self
    }

    pub fn with_listed_documents(mut self, documents: Vec<Document>) -> Self {
        self.listed_documents = documents;
        self
    }

    pub fn with_focus(mut self, focus: FocusTarget) -> Self {
        self.focus = Some(focus);
        self
    }
}
