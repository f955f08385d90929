//! # Document Hierarchy
//!
//! Document operations over a [`Snapshot`]. Every operation leaves the two link
//! directions consistent:
//!
//! ```text
//! parent.child_document_ids  ==  { d.id | d.parent_document_id == parent.id }
//! child.level                ==  parent.level + 1        (roots: 0)
//! ```
//!
//! ## Deletion Reach
//!
//! [`DeletePolicy::Deep`] removes the full subtree found by walking
//! `child_document_ids` (with a visited set, so a corrupt cyclic blob cannot loop
//! forever). [`DeletePolicy::Shallow`] removes the document and its direct
//! children only.
//!
//! Either way, deleting also removes:
//! - the id from the parent's `child_document_ids`
//! - the removed ids from the expanded set
//! - every block owned by a removed document
//! - `page` blocks elsewhere that link to a removed document (their documents
//!   are renumbered)

use super::snapshot::Snapshot;
use crate::config::DeletePolicy;
use crate::error::{NestnoteError, Result};
use crate::model::{Document, DocumentPatch};
use std::collections::{HashSet, VecDeque};
use uuid::Uuid;

impl Snapshot {
    pub fn document(&self, id: &Uuid) -> Option<&Document> {
        self.documents.iter().find(|d| d.id == *id)
    }

    fn document_mut(&mut self, id: &Uuid) -> Option<&mut Document> {
        self.documents.iter_mut().find(|d| d.id == *id)
    }

    /// Creates a document. An unknown `parent_id` yields a root document.
    pub fn create_document(
        &mut self,
        title: &str,
        parent_id: Option<Uuid>,
        icon: Option<String>,
    ) -> Document {
        let document = {
            let parent = parent_id.and_then(|id| self.document(&id));
            Document::new(title, parent, icon)
        };

        if let Some(parent) = document
            .parent_document_id
            .and_then(|id| self.document_mut(&id))
        {
            parent.child_document_ids.push(document.id);
            parent.touch();
        }

        self.documents.push(document.clone());
        document
    }

    pub fn update_document(&mut self, id: &Uuid, patch: &DocumentPatch) -> bool {
        match self.document_mut(id) {
            Some(document) => {
                patch.apply(document);
                true
            }
            None => false,
        }
    }

    /// Removes a document according to `policy`. Returns the removed ids, the
    /// target first; empty when `id` is unknown.
    pub fn delete_document(&mut self, id: &Uuid, policy: DeletePolicy) -> Vec<Uuid> {
        let Some(target) = self.document(id) else {
            return Vec::new();
        };
        let parent_id = target.parent_document_id;

        let mut removed = vec![*id];
        match policy {
            DeletePolicy::Deep => removed.extend(self.descendants_of(id)),
            DeletePolicy::Shallow => removed.extend(target.child_document_ids.iter().copied()),
        }
        let removed_set: HashSet<Uuid> = removed.iter().copied().collect();

        self.documents.retain(|d| !removed_set.contains(&d.id));
        if let Some(parent) = parent_id.and_then(|p| self.document_mut(&p)) {
            parent.child_document_ids.retain(|c| c != id);
            parent.touch();
        }
        self.expanded_documents
            .retain(|expanded| !removed_set.contains(expanded));

        self.blocks.retain(|b| !removed_set.contains(&b.page_id));

        let links_removed = |linked: Option<Uuid>| linked.is_some_and(|l| removed_set.contains(&l));
        let mut relinked_pages: Vec<Uuid> = self
            .blocks
            .iter()
            .filter(|b| links_removed(b.linked_page_id))
            .map(|b| b.page_id)
            .collect();
        relinked_pages.sort();
        relinked_pages.dedup();
        self.blocks.retain(|b| !links_removed(b.linked_page_id));
        for page in &relinked_pages {
            self.renumber(page);
        }

        removed
    }

    /// Re-parents a document. `None` makes it a root.
    ///
    /// Returns `Ok(false)` without changes when the document or the new parent is
    /// unknown, or when it already sits under `new_parent_id`.
    pub fn move_document(&mut self, id: &Uuid, new_parent_id: Option<Uuid>) -> Result<bool> {
        let Some(document) = self.document(id) else {
            return Ok(false);
        };
        let old_parent_id = document.parent_document_id;
        if old_parent_id == new_parent_id {
            return Ok(false);
        }

        if let Some(target) = new_parent_id {
            if target == *id || self.descendants_of(id).contains(&target) {
                return Err(NestnoteError::Cycle {
                    document: *id,
                    target,
                });
            }
            if self.document(&target).is_none() {
                return Ok(false);
            }
        }

        if let Some(old_parent) = old_parent_id.and_then(|p| self.document_mut(&p)) {
            old_parent.child_document_ids.retain(|c| c != id);
            old_parent.touch();
        }

        let level = match new_parent_id.and_then(|p| self.document_mut(&p)) {
            Some(new_parent) => {
                new_parent.child_document_ids.push(*id);
                new_parent.touch();
                new_parent.level + 1
            }
            None => 0,
        };

        if let Some(document) = self.document_mut(id) {
            document.parent_document_id = new_parent_id;
            document.level = level;
            document.touch();
        }
        self.relevel_subtree(id);

        Ok(true)
    }

    /// Documents whose parent is `parent_id`, in collection order.
    pub fn child_documents(&self, parent_id: &Uuid) -> Vec<&Document> {
        self.documents
            .iter()
            .filter(|d| d.parent_document_id == Some(*parent_id))
            .collect()
    }

    pub fn root_documents(&self) -> Vec<&Document> {
        self.documents.iter().filter(|d| d.is_root()).collect()
    }

    /// Every document below `id`, breadth first. Does not include `id`.
    pub fn descendants_of(&self, id: &Uuid) -> Vec<Uuid> {
        let mut visited = HashSet::from([*id]);
        let mut queue: VecDeque<Uuid> = self
            .document(id)
            .map(|d| d.child_document_ids.iter().copied().collect())
            .unwrap_or_default();
        let mut descendants = Vec::new();

        while let Some(next) = queue.pop_front() {
            if !visited.insert(next) {
                continue;
            }
            descendants.push(next);
            if let Some(document) = self.document(&next) {
                queue.extend(document.child_document_ids.iter().copied());
            }
        }
        descendants
    }

    /// Flips `id` in the expanded set and returns whether it is now expanded.
    /// Unknown documents are never expanded.
    pub fn toggle_folder(&mut self, id: &Uuid) -> bool {
        if self.document(id).is_none() {
            return false;
        }
        if self.expanded_documents.remove(id) {
            false
        } else {
            self.expanded_documents.insert(*id);
            true
        }
    }

    pub fn is_expanded(&self, id: &Uuid) -> bool {
        self.expanded_documents.contains(id)
    }

    /// Recomputes `level` for everything below `id` from its current level.
    pub(crate) fn relevel_subtree(&mut self, id: &Uuid) {
        let mut visited = HashSet::from([*id]);
        let mut queue = VecDeque::from([*id]);

        while let Some(current) = queue.pop_front() {
            let Some(document) = self.document(&current) else {
                continue;
            };
            let child_level = document.level + 1;
            let children = document.child_document_ids.clone();
            for child_id in children {
                if !visited.insert(child_id) {
                    continue;
                }
                if let Some(child) = self.document_mut(&child_id) {
                    child.level = child_level;
                    queue.push_back(child_id);
                }
            }
        }
    }
}
