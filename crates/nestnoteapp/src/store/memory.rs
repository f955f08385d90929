use super::mem_backend::MemBackend;
use super::note_store::NoteStore;

pub type InMemoryStore = NoteStore<MemBackend>;

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        NoteStore::with_backend(MemBackend::new())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{Block, BlockType, Document};
    use crate::store::DataStore;
    use uuid::Uuid;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        /// Adds `count` root documents titled "Test Page 1..".
        pub fn with_pages(mut self, count: usize) -> Self {
            for i in 0..count {
                let title = format!("Test Page {}", i + 1);
                self.store.create_document(Some(&title), None, None);
            }
            self
        }

        pub fn with_page(mut self, title: &str) -> Self {
            self.store.create_document(Some(title), None, None);
            self
        }

        /// Adds a document under the first document titled `parent`.
        pub fn with_subpage(mut self, parent: &str, title: &str) -> Self {
            let parent_id = self.id_of(parent);
            self.store.create_document(Some(title), Some(parent_id), None);
            self
        }

        /// Appends paragraph blocks with the given contents to the page titled `page`.
        pub fn with_paragraphs(mut self, page: &str, contents: &[&str]) -> Self {
            let page_id = self.id_of(page);
            for content in contents {
                let order = self.store.get_blocks_by_document_id(&page_id).len();
                self.store.add_block_to_document(
                    &page_id,
                    Block::new(page_id, BlockType::Paragraph, *content, order),
                );
            }
            self
        }

        pub fn document(&self, title: &str) -> &Document {
            self.store
                .documents()
                .iter()
                .find(|d| d.title == title)
                .unwrap_or_else(|| panic!("no document titled '{}'", title))
        }

        pub fn id_of(&self, title: &str) -> Uuid {
            self.document(title).id
        }

        /// Contents of the page's blocks in order.
        pub fn contents(&self, page: &str) -> Vec<String> {
            self.store
                .get_blocks_by_document_id(&self.id_of(page))
                .iter()
                .map(|b| b.content.clone())
                .collect()
        }

        /// Block id at `order` in the page titled `page`.
        pub fn block_at(&self, page: &str, order: usize) -> Uuid {
            self.store.get_blocks_by_document_id(&self.id_of(page))[order].id
        }
    }
}
