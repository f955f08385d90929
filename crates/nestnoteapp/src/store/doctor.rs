//! # Doctor
//!
//! Repairs a loaded [`Snapshot`] so every store invariant holds again. Blobs
//! written by older clients (or edited by hand) can carry dangling parents,
//! stale child lists, gapped orders and expanded ids of deleted documents.
//!
//! Passes run in this order, each relying on the previous ones:
//!
//! 1. Reattach documents whose parent is missing, or whose ancestry loops, as roots.
//! 2. Rebuild every `child_document_ids` from the parent links, keeping the
//!    existing sequence for children that were already listed.
//! 3. Recompute `level` from the roots down.
//! 4. Drop blocks whose owning document is gone.
//! 5. Turn `page` blocks that link to a missing document into unlinked placeholders.
//! 6. Renumber block orders densely per document.
//! 7. Forget expanded ids of missing documents.
//!
//! Running the doctor on a healthy snapshot changes nothing.

use super::snapshot::Snapshot;
use super::DoctorReport;
use std::collections::{HashSet, VecDeque};
use uuid::Uuid;

impl Snapshot {
    pub fn repair(&mut self) -> DoctorReport {
        let mut report = DoctorReport::default();

        report.reattached_documents = self.reattach_orphans();
        report.rebuilt_child_lists = self.rebuild_child_lists();
        report.relevelled_documents = self.recompute_levels();

        let known: HashSet<Uuid> = self.documents.iter().map(|d| d.id).collect();

        let before = self.blocks.len();
        self.blocks.retain(|b| known.contains(&b.page_id));
        report.dropped_blocks = before - self.blocks.len();

        for block in &mut self.blocks {
            if block.linked_page_id.is_some_and(|l| !known.contains(&l)) {
                block.linked_page_id = None;
                report.unlinked_page_blocks += 1;
            }
        }

        let pages: Vec<Uuid> = self.documents.iter().map(|d| d.id).collect();
        for page in &pages {
            if self.renumber(page) {
                report.renumbered_documents += 1;
            }
        }

        let before = self.expanded_documents.len();
        self.expanded_documents.retain(|id| known.contains(id));
        report.dropped_expanded = before - self.expanded_documents.len();

        report
    }

    fn reattach_orphans(&mut self) -> usize {
        let known: HashSet<Uuid> = self.documents.iter().map(|d| d.id).collect();
        let mut reattached = 0;

        for document in &mut self.documents {
            if document
                .parent_document_id
                .is_some_and(|p| p == document.id || !known.contains(&p))
            {
                document.parent_document_id = None;
                reattached += 1;
            }
        }

        let ids: Vec<Uuid> = self.documents.iter().map(|d| d.id).collect();
        for id in ids {
            if self.break_ancestry_loop(id) {
                reattached += 1;
            }
        }
        reattached
    }

    /// Walks up from `start`; when a parent repeats, the document whose parent
    /// closes the loop becomes a root.
    fn break_ancestry_loop(&mut self, start: Uuid) -> bool {
        let mut seen = vec![start];
        let mut current = start;

        while let Some(parent) = self.document(&current).and_then(|d| d.parent_document_id) {
            if seen.contains(&parent) {
                if let Some(document) = self.documents.iter_mut().find(|d| d.id == current) {
                    document.parent_document_id = None;
                }
                return true;
            }
            seen.push(parent);
            current = parent;
        }
        false
    }

    fn rebuild_child_lists(&mut self) -> usize {
        let links: Vec<(Uuid, Uuid)> = self
            .documents
            .iter()
            .filter_map(|d| d.parent_document_id.map(|p| (p, d.id)))
            .collect();
        let mut rebuilt = 0;

        for document in &mut self.documents {
            let actual: Vec<Uuid> = links
                .iter()
                .filter(|(parent, _)| *parent == document.id)
                .map(|(_, child)| *child)
                .collect();

            let mut children: Vec<Uuid> = Vec::with_capacity(actual.len());
            let listed_first = document.child_document_ids.iter().filter(|c| actual.contains(c));
            for child in listed_first.chain(actual.iter()) {
                if !children.contains(child) {
                    children.push(*child);
                }
            }

            if children != document.child_document_ids {
                document.child_document_ids = children;
                rebuilt += 1;
            }
        }
        rebuilt
    }

    fn recompute_levels(&mut self) -> usize {
        let mut queue: VecDeque<(Uuid, u32)> = self
            .documents
            .iter()
            .filter(|d| d.is_root())
            .map(|d| (d.id, 0))
            .collect();
        let mut visited = HashSet::new();
        let mut relevelled = 0;

        while let Some((id, level)) = queue.pop_front() {
            if !visited.insert(id) {
                continue;
            }
            let Some(document) = self.documents.iter_mut().find(|d| d.id == id) else {
                continue;
            };
            if document.level != level {
                document.level = level;
                relevelled += 1;
            }
            queue.extend(document.child_document_ids.iter().map(|c| (*c, level + 1)));
        }
        relevelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, BlockType};

    #[test]
    fn test_healthy_snapshot_is_untouched() {
        let mut snapshot = Snapshot::default();
        let a = snapshot.create_document("A", None, None);
        let b = snapshot.create_document("B", Some(a.id), None);
        snapshot.add_block(&a.id, Block::paragraph(a.id, 0));
        snapshot.add_block(&a.id, Block::page_link(a.id, &b, 1));
        snapshot.toggle_folder(&a.id);
        let before = snapshot.clone();

        let report = snapshot.repair();

        assert!(report.is_clean());
        assert_eq!(snapshot, before);
    }

    #[test]
    fn test_missing_parent_becomes_root() {
        let mut snapshot = Snapshot::default();
        let a = snapshot.create_document("A", None, None);
        let b = snapshot.create_document("B", Some(a.id), None);
        let c = snapshot.create_document("C", Some(b.id), None);
        snapshot.documents.retain(|d| d.id != a.id);

        let report = snapshot.repair();

        assert_eq!(report.reattached_documents, 1);
        let b = snapshot.document(&b.id).unwrap();
        assert!(b.is_root());
        assert_eq!(b.level, 0);
        assert_eq!(snapshot.document(&c.id).unwrap().level, 1);
    }

    #[test]
    fn test_ancestry_loop_is_broken() {
        let mut snapshot = Snapshot::default();
        let a = snapshot.create_document("A", None, None);
        let b = snapshot.create_document("B", Some(a.id), None);
        snapshot.documents[0].parent_document_id = Some(b.id);

        let report = snapshot.repair();

        assert_eq!(report.reattached_documents, 1);
        assert_eq!(snapshot.root_documents().len(), 1);
        let root = snapshot.root_documents()[0].id;
        assert_eq!(snapshot.descendants_of(&root).len(), 1);
    }

    #[test]
    fn test_child_lists_are_rebuilt_from_parent_links() {
        let mut snapshot = Snapshot::default();
        let a = snapshot.create_document("A", None, None);
        let b = snapshot.create_document("B", Some(a.id), None);
        let c = snapshot.create_document("C", Some(a.id), None);
        snapshot.documents[0].child_document_ids = vec![c.id, Uuid::new_v4(), c.id];

        let report = snapshot.repair();

        assert_eq!(report.rebuilt_child_lists, 1);
        assert_eq!(snapshot.document(&a.id).unwrap().child_document_ids, vec![c.id, b.id]);
    }

    #[test]
    fn test_gapped_orders_and_orphan_blocks() {
        let mut snapshot = Snapshot::default();
        let a = snapshot.create_document("A", None, None);
        for i in 0..3 {
            snapshot.add_block(&a.id, Block::new(a.id, BlockType::Paragraph, format!("{}", i), i));
        }
        snapshot.blocks[1].order = 5;
        snapshot.blocks[2].order = 9;
        let ghost = Uuid::new_v4();
        snapshot.blocks.push(Block::paragraph(ghost, 0));

        let report = snapshot.repair();

        assert_eq!(report.dropped_blocks, 1);
        assert_eq!(report.renumbered_documents, 1);
        let orders: Vec<usize> = snapshot.blocks_of(&a.id).iter().map(|b| b.order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
    }

    #[test]
    fn test_dangling_links_and_expanded_ids() {
        let mut snapshot = Snapshot::default();
        let a = snapshot.create_document("A", None, None);
        let mut link = Block::new(a.id, BlockType::Page, "Gone", 0);
        link.linked_page_id = Some(Uuid::new_v4());
        snapshot.add_block(&a.id, link);
        snapshot.expanded_documents.insert(Uuid::new_v4());

        let report = snapshot.repair();

        assert_eq!(report.unlinked_page_blocks, 1);
        assert_eq!(report.dropped_expanded, 1);
        let block = snapshot.blocks_of(&a.id)[0];
        assert_eq!(block.block_type, BlockType::Page);
        assert!(block.linked_page_id.is_none());
        assert!(snapshot.expanded_documents.is_empty());
    }

    #[test]
    fn test_wrong_levels_are_recomputed() {
        let mut snapshot = Snapshot::default();
        let a = snapshot.create_document("A", None, None);
        let b = snapshot.create_document("B", Some(a.id), None);
        snapshot.documents[1].level = 4;

        let report = snapshot.repair();

        assert_eq!(report.relevelled_documents, 1);
        assert_eq!(snapshot.document(&b.id).unwrap().level, 1);
    }
}
