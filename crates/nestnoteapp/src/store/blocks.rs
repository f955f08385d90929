//! Block operations over a [`Snapshot`].
//!
//! Orders are kept dense and zero-based per document: inserts open a gap by
//! shifting, deletes close it by renumbering, moves rotate the range between the
//! two positions.

use super::snapshot::Snapshot;
use crate::model::{Block, BlockPatch};
use uuid::Uuid;

impl Snapshot {
    /// Blocks of `page_id` sorted by `order`.
    pub fn blocks_of(&self, page_id: &Uuid) -> Vec<&Block> {
        let mut blocks: Vec<&Block> = self.blocks.iter().filter(|b| b.page_id == *page_id).collect();
        blocks.sort_by_key(|b| b.order);
        blocks
    }

    pub fn block(&self, page_id: &Uuid, block_id: &Uuid) -> Option<&Block> {
        self.blocks
            .iter()
            .find(|b| b.id == *block_id && b.page_id == *page_id)
    }

    /// Looks a block up by id alone, whatever document owns it.
    pub fn block_by_id(&self, block_id: &Uuid) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == *block_id)
    }

    fn block_mut(&mut self, page_id: &Uuid, block_id: &Uuid) -> Option<&mut Block> {
        self.blocks
            .iter_mut()
            .find(|b| b.id == *block_id && b.page_id == *page_id)
    }

    fn block_count(&self, page_id: &Uuid) -> usize {
        self.blocks.iter().filter(|b| b.page_id == *page_id).count()
    }

    /// Inserts `block` into `page_id` at `block.order`, clamped to the end.
    ///
    /// Blocks at or after that position shift down by one. Fails for unknown
    /// documents and duplicate block ids.
    pub fn add_block(&mut self, page_id: &Uuid, mut block: Block) -> bool {
        if self.document(page_id).is_none() || self.blocks.iter().any(|b| b.id == block.id) {
            return false;
        }

        let order = block.order.min(self.block_count(page_id));
        for existing in self.blocks.iter_mut().filter(|b| b.page_id == *page_id) {
            if existing.order >= order {
                existing.order += 1;
            }
        }

        block.page_id = *page_id;
        block.order = order;
        self.blocks.push(block);
        true
    }

    /// Merges `patch` into the block. The block's `order` and page never change here.
    pub fn update_block(&mut self, page_id: &Uuid, block_id: &Uuid, patch: &BlockPatch) -> bool {
        match self.block_mut(page_id, block_id) {
            Some(block) => {
                patch.apply(block);
                true
            }
            None => false,
        }
    }

    /// Removes a block and closes the gap it leaves.
    pub fn delete_block(&mut self, page_id: &Uuid, block_id: &Uuid) -> Option<Block> {
        let index = self
            .blocks
            .iter()
            .position(|b| b.id == *block_id && b.page_id == *page_id)?;
        let removed = self.blocks.remove(index);
        self.renumber(page_id);
        Some(removed)
    }

    /// Moves a block to `new_order` (clamped to the last position) and shifts the
    /// blocks in between by one.
    pub fn move_block(&mut self, page_id: &Uuid, block_id: &Uuid, new_order: usize) -> bool {
        let Some(old_order) = self.block(page_id, block_id).map(|b| b.order) else {
            return false;
        };
        let last = self.block_count(page_id).saturating_sub(1);
        let new_order = new_order.min(last);
        if new_order == old_order {
            return true;
        }

        for block in self.blocks.iter_mut().filter(|b| b.page_id == *page_id) {
            if block.id == *block_id {
                block.order = new_order;
            } else if old_order < new_order && block.order > old_order && block.order <= new_order {
                block.order -= 1;
            } else if new_order < old_order && block.order >= new_order && block.order < old_order {
                block.order += 1;
            }
        }
        true
    }

    /// Rewrites orders of `page_id` to `0..n`, keeping the current sequence.
    /// Returns whether any order changed.
    pub fn renumber(&mut self, page_id: &Uuid) -> bool {
        let sequence: Vec<Uuid> = self.blocks_of(page_id).iter().map(|b| b.id).collect();
        let mut changed = false;
        for (order, id) in sequence.iter().enumerate() {
            if let Some(block) = self.block_mut(page_id, id) {
                if block.order != order {
                    block.order = order;
                    changed = true;
                }
            }
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BlockType;

    fn contents(snapshot: &Snapshot, page: &Uuid) -> Vec<String> {
        snapshot
            .blocks_of(page)
            .iter()
            .map(|b| b.content.clone())
            .collect()
    }

    fn assert_dense(snapshot: &Snapshot, page: &Uuid) {
        let orders: Vec<usize> = snapshot.blocks_of(page).iter().map(|b| b.order).collect();
        let expected: Vec<usize> = (0..orders.len()).collect();
        assert_eq!(orders, expected);
    }

    fn page_with(contents: &[&str]) -> (Snapshot, Uuid) {
        let mut snapshot = Snapshot::default();
        let page = snapshot.create_document("Page", None, None);
        for (i, text) in contents.iter().enumerate() {
            snapshot.add_block(&page.id, Block::new(page.id, BlockType::Paragraph, *text, i));
        }
        (snapshot, page.id)
    }

    #[test]
    fn test_add_in_middle_shifts_followers() {
        let (mut snapshot, page) = page_with(&["X", "Y", "Z"]);

        assert!(snapshot.add_block(&page, Block::new(page, BlockType::Paragraph, "W", 1)));

        assert_eq!(contents(&snapshot, &page), vec!["X", "W", "Y", "Z"]);
        assert_dense(&snapshot, &page);
    }

    #[test]
    fn test_add_past_end_is_clamped() {
        let (mut snapshot, page) = page_with(&["X", "Y"]);

        snapshot.add_block(&page, Block::new(page, BlockType::Paragraph, "Z", 99));

        assert_eq!(contents(&snapshot, &page), vec!["X", "Y", "Z"]);
        assert_dense(&snapshot, &page);
    }

    #[test]
    fn test_add_rejects_unknown_page_and_duplicate_id() {
        let (mut snapshot, page) = page_with(&["X"]);
        let stranger = Uuid::new_v4();

        assert!(!snapshot.add_block(&stranger, Block::paragraph(stranger, 0)));

        let existing = snapshot.blocks_of(&page)[0].clone();
        assert!(!snapshot.add_block(&page, existing));
        assert_eq!(snapshot.blocks.len(), 1);
    }

    #[test]
    fn test_add_rebinds_page_id() {
        let (mut snapshot, page) = page_with(&[]);

        snapshot.add_block(&page, Block::paragraph(Uuid::new_v4(), 0));

        assert_eq!(snapshot.blocks[0].page_id, page);
    }

    #[test]
    fn test_update_keeps_order() {
        let (mut snapshot, page) = page_with(&["X", "Y"]);
        let id = snapshot.blocks_of(&page)[1].id;

        assert!(snapshot.update_block(&page, &id, &BlockPatch::content("Changed")));

        let block = snapshot.block(&page, &id).unwrap();
        assert_eq!(block.content, "Changed");
        assert_eq!(block.order, 1);
    }

    #[test]
    fn test_update_requires_matching_page() {
        let (mut snapshot, page) = page_with(&["X"]);
        let id = snapshot.blocks_of(&page)[0].id;

        assert!(!snapshot.update_block(&Uuid::new_v4(), &id, &BlockPatch::content("nope")));
        assert!(!snapshot.update_block(&page, &Uuid::new_v4(), &BlockPatch::content("nope")));
        assert_eq!(contents(&snapshot, &page), vec!["X"]);
    }

    #[test]
    fn test_delete_renumbers() {
        let (mut snapshot, page) = page_with(&["X", "Y", "Z"]);
        let y = snapshot.blocks_of(&page)[1].id;

        let removed = snapshot.delete_block(&page, &y).unwrap();

        assert_eq!(removed.content, "Y");
        assert_eq!(contents(&snapshot, &page), vec!["X", "Z"]);
        assert_dense(&snapshot, &page);
        assert!(snapshot.delete_block(&page, &y).is_none());
    }

    #[test]
    fn test_move_forward_and_back() {
        let (mut snapshot, page) = page_with(&["A", "B", "C", "D"]);
        let a = snapshot.blocks_of(&page)[0].id;

        assert!(snapshot.move_block(&page, &a, 2));
        assert_eq!(contents(&snapshot, &page), vec!["B", "C", "A", "D"]);
        assert_dense(&snapshot, &page);

        assert!(snapshot.move_block(&page, &a, 0));
        assert_eq!(contents(&snapshot, &page), vec!["A", "B", "C", "D"]);
        assert_dense(&snapshot, &page);
    }

    #[test]
    fn test_move_is_clamped_to_last() {
        let (mut snapshot, page) = page_with(&["A", "B", "C"]);
        let a = snapshot.blocks_of(&page)[0].id;

        assert!(snapshot.move_block(&page, &a, 50));

        assert_eq!(contents(&snapshot, &page), vec!["B", "C", "A"]);
        assert_dense(&snapshot, &page);
    }

    #[test]
    fn test_move_unknown_block() {
        let (mut snapshot, page) = page_with(&["A"]);
        assert!(!snapshot.move_block(&page, &Uuid::new_v4(), 0));
    }

    #[test]
    fn test_blocks_of_other_pages_are_untouched() {
        let (mut snapshot, page) = page_with(&["A", "B"]);
        let other = snapshot.create_document("Other", None, None);
        snapshot.add_block(&other.id, Block::new(other.id, BlockType::Paragraph, "O1", 0));
        snapshot.add_block(&other.id, Block::new(other.id, BlockType::Paragraph, "O2", 1));

        let a = snapshot.blocks_of(&page)[0].id;
        snapshot.add_block(&page, Block::new(page, BlockType::Paragraph, "new", 0));
        snapshot.move_block(&page, &a, 2);
        snapshot.delete_block(&page, &a);

        assert_eq!(contents(&snapshot, &other.id), vec!["O1", "O2"]);
        assert_dense(&snapshot, &other.id);
        assert_dense(&snapshot, &page);
    }

    #[test]
    fn test_renumber_repairs_gaps() {
        let (mut snapshot, page) = page_with(&["A", "B", "C"]);
        snapshot.blocks[1].order = 7;
        snapshot.blocks[2].order = 9;

        assert!(snapshot.renumber(&page));
        assert_dense(&snapshot, &page);
        assert!(!snapshot.renumber(&page));
    }
}
