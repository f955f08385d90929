use crate::commands::{CmdMessage, CmdResult};
use crate::error::{NestnoteError, Result};
use crate::model::Document;
use crate::store::DataStore;
use serde::Serialize;
use std::collections::HashSet;
use uuid::Uuid;

/// One row of the navigation tree.
///
/// `children` is only filled for expanded documents; `has_children` tells the
/// view whether to draw an expander either way.
#[derive(Debug, Clone, Serialize)]
pub struct TreeNode {
    pub document: Document,
    pub expanded: bool,
    pub selected: bool,
    pub has_children: bool,
    pub children: Vec<TreeNode>,
}

/// Builds the navigation tree: root documents in collection order, descending
/// into the children of expanded documents only.
pub fn run<S: DataStore>(store: &S) -> Result<CmdResult> {
    let selected = store.current_document_id();
    let mut visited = HashSet::new();
    let tree = store
        .root_documents()
        .into_iter()
        .filter_map(|root| build_node(store, root, selected, &mut visited))
        .collect();

    Ok(CmdResult {
        tree,
        ..Default::default()
    })
}

fn build_node<S: DataStore>(
    store: &S,
    document: &Document,
    selected: Option<Uuid>,
    visited: &mut HashSet<Uuid>,
) -> Option<TreeNode> {
    if !visited.insert(document.id) {
        return None;
    }

    let child_documents = store.get_child_documents(&document.id);
    let expanded = store.is_expanded(&document.id);
    let children = if expanded {
        child_documents
            .iter()
            .filter_map(|child| build_node(store, child, selected, visited))
            .collect()
    } else {
        Vec::new()
    };

    Some(TreeNode {
        document: document.clone(),
        expanded,
        selected: selected == Some(document.id),
        has_children: !child_documents.is_empty(),
        children,
    })
}

/// Expands or collapses a document in the navigation tree.
pub fn toggle<S: DataStore>(store: &mut S, document_id: &Uuid) -> Result<CmdResult> {
    if !store.toggle_folder(document_id) {
        return Err(NestnoteError::DocumentNotFound(*document_id));
    }
    let state = if store.is_expanded(document_id) {
        "Expanded"
    } else {
        "Collapsed"
    };
    let mut result = CmdResult::default();
    if let Some(document) = store.get_document_by_id(document_id) {
        result.add_message(CmdMessage::info(format!("{} '{}'", state, document.title)));
        result.affected_documents.push(document.clone());
    }
    Ok(result)
}

/// Which timestamp the home listings sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecentOrder {
    Updated,
    Created,
}

/// The home page listings: the `limit` most recently edited (or created) documents.
pub fn recent<S: DataStore>(store: &S, limit: usize, order: RecentOrder) -> Result<CmdResult> {
    let documents = match order {
        RecentOrder::Updated => store.recently_updated(limit),
        RecentOrder::Created => store.recently_created(limit),
    };
    Ok(CmdResult::default().with_listed_documents(documents.into_iter().cloned().collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    fn titles(nodes: &[TreeNode]) -> Vec<&str> {
        nodes.iter().map(|n| n.document.title.as_str()).collect()
    }

    #[test]
    fn test_collapsed_tree_shows_roots_only() {
        let fixture = StoreFixture::new()
            .with_page("A")
            .with_subpage("A", "A1")
            .with_page("B");

        let result = run(&fixture.store).unwrap();

        assert_eq!(titles(&result.tree), vec!["A", "B"]);
        assert!(result.tree[0].has_children);
        assert!(result.tree[0].children.is_empty());
        assert!(!result.tree[1].has_children);
    }

    #[test]
    fn test_expanded_documents_show_children() {
        let mut fixture = StoreFixture::new()
            .with_page("A")
            .with_subpage("A", "A1")
            .with_subpage("A1", "A1a")
            .with_subpage("A", "A2");
        let (a, a1) = (fixture.id_of("A"), fixture.id_of("A1"));
        fixture.store.toggle_folder(&a);
        fixture.store.select_document(&a1);

        let result = run(&fixture.store).unwrap();

        let root = &result.tree[0];
        assert!(root.expanded);
        assert_eq!(titles(&root.children), vec!["A1", "A2"]);
        assert!(root.children[0].selected);
        assert!(root.children[0].has_children);
        assert!(root.children[0].children.is_empty());

        fixture.store.toggle_folder(&a1);
        let result = run(&fixture.store).unwrap();
        assert_eq!(titles(&result.tree[0].children[0].children), vec!["A1a"]);
    }

    #[test]
    fn test_toggle_flips_expansion() {
        let mut fixture = StoreFixture::new().with_page("A").with_subpage("A", "A1");
        let a = fixture.id_of("A");

        let result = toggle(&mut fixture.store, &a).unwrap();
        assert!(fixture.store.is_expanded(&a));
        assert_eq!(result.messages[0].content, "Expanded 'A'");

        toggle(&mut fixture.store, &a).unwrap();
        assert!(!fixture.store.is_expanded(&a));
        assert!(matches!(
            toggle(&mut fixture.store, &Uuid::new_v4()),
            Err(NestnoteError::DocumentNotFound(_))
        ));
    }

    #[test]
    fn test_recent_limits() {
        let fixture = StoreFixture::new().with_pages(8);

        let updated = recent(&fixture.store, 6, RecentOrder::Updated).unwrap();
        let created = recent(&fixture.store, 3, RecentOrder::Created).unwrap();

        assert_eq!(updated.listed_documents.len(), 6);
        assert_eq!(created.listed_documents.len(), 3);
    }
}
