use nestnoteapp::api::NestnoteApi;
use nestnoteapp::config::{DeletePolicy, NestnoteConfig};
use nestnoteapp::error::NestnoteError;
use nestnoteapp::model::BlockType;
use nestnoteapp::store::fs::FileStore;
use nestnoteapp::store::DataStore;
use tempfile::TempDir;

fn open(dir: &TempDir, config: &NestnoteConfig) -> NestnoteApi<FileStore> {
    let store = FileStore::open_dir(dir.path().to_path_buf(), config).unwrap();
    NestnoteApi::new(store).with_config(config)
}

fn setup() -> (TempDir, NestnoteApi<FileStore>) {
    let dir = TempDir::new().unwrap();
    let api = open(&dir, &NestnoteConfig::default());
    (dir, api)
}

fn contents(api: &NestnoteApi<FileStore>, page: &str) -> Vec<String> {
    let id = api.resolve_document(page).unwrap();
    api.store()
        .get_blocks_by_document_id(&id)
        .iter()
        .map(|b| b.content.clone())
        .collect()
}

#[test]
fn test_deleting_parent_removes_child() {
    let (dir, mut api) = setup();
    api.create_page(Some("A"), None, None).unwrap();
    api.create_page(Some("B"), Some("A"), None).unwrap();
    let (a, b) = (api.resolve_document("A").unwrap(), api.resolve_document("B").unwrap());

    let children: Vec<_> = api.store().get_child_documents(&a).iter().map(|d| d.id).collect();
    assert_eq!(children, vec![b]);

    api.toggle_folder("A").unwrap();
    api.delete_page("A", true).unwrap();

    assert!(api.store().get_document_by_id(&a).is_none());
    assert!(api.store().get_document_by_id(&b).is_none());
    assert!(api.store().expanded_documents().is_empty());

    let reopened = open(&dir, &NestnoteConfig::default());
    assert!(reopened.store().documents().is_empty());
}

#[test]
fn test_heading_shorthand_in_seeded_block() {
    let (_dir, mut api) = setup();
    api.create_page(Some("P"), None, None).unwrap();

    let opened = api.open("P").unwrap();
    let seeded = opened.focus.unwrap().block_id;
    api.change_block_content("P", "1", "# Title").unwrap();

    let block = api.store().get_block_by_id(&seeded).unwrap();
    assert_eq!(block.block_type, BlockType::Heading1);
    assert_eq!(block.content, "Title");
    assert_eq!(block.order, 0);
}

#[test]
fn test_deleting_middle_block_keeps_sequence() {
    let (_dir, mut api) = setup();
    api.create_page(Some("P"), None, None).unwrap();
    api.open("P").unwrap();
    api.change_block_content("P", "1", "first").unwrap();
    api.append_block("P", BlockType::Paragraph, "second").unwrap();
    api.append_block("P", BlockType::Paragraph, "third").unwrap();

    api.delete_block("P", "2").unwrap();

    assert_eq!(contents(&api, "P"), vec!["first", "third"]);
    let p = api.resolve_document("P").unwrap();
    let orders: Vec<_> = api
        .store()
        .get_blocks_by_document_id(&p)
        .iter()
        .map(|b| b.order)
        .collect();
    assert_eq!(orders, vec![0, 1]);
}

#[test]
fn test_divider_shorthand() {
    let (_dir, mut api) = setup();
    api.create_page(Some("P"), None, None).unwrap();
    api.open("P").unwrap();

    api.change_block_content("P", "1", "---").unwrap();

    let p = api.resolve_document("P").unwrap();
    let blocks = api.store().get_blocks_by_document_id(&p);
    assert_eq!(blocks[0].block_type, BlockType::Divider);
    assert_eq!(blocks[0].content, "");
}

#[test]
fn test_page_command_then_retype_deletes_subpage() {
    let (_dir, mut api) = setup();
    api.create_page(Some("Home"), None, None).unwrap();
    api.open("Home").unwrap();
    api.change_block_content("Home", "1", "intro").unwrap();
    api.append_block("Home", BlockType::Paragraph, "/page Ideas").unwrap();

    assert_eq!(contents(&api, "Home"), vec!["intro", "Ideas"]);
    let ideas = api.resolve_document("Ideas").unwrap();

    api.change_block_type("Home", "2", BlockType::Paragraph).unwrap();

    assert!(api.store().get_document_by_id(&ideas).is_none());
    assert_eq!(contents(&api, "Home"), vec!["intro", ""]);
}

#[test]
fn test_placeholder_page_block_materializes() {
    let (_dir, mut api) = setup();
    api.create_page(Some("Home"), None, None).unwrap();
    api.open("Home").unwrap();
    api.change_block_type("Home", "1", BlockType::Page).unwrap();
    api.change_block_content("Home", "1", "Drafts").unwrap();

    let result = api.open_page_block("Home", "1").unwrap();

    let drafts = result.navigate_to.unwrap();
    assert_eq!(api.store().get_document_by_id(&drafts).unwrap().title, "Drafts");
    let home = api.resolve_document("Home").unwrap();
    let block = &api.store().get_blocks_by_document_id(&home)[0];
    assert_eq!(block.linked_page_id, Some(drafts));

    let again = api.open_page_block("Home", "1").unwrap();
    assert_eq!(again.navigate_to, Some(drafts));
    assert_eq!(api.store().documents().len(), 2);
}

#[test]
fn test_move_under_own_child_is_rejected() {
    let (_dir, mut api) = setup();
    api.create_page(Some("A"), None, None).unwrap();
    api.create_page(Some("B"), Some("A"), None).unwrap();

    let err = api.move_page("A", Some("B")).unwrap_err();

    assert!(matches!(err, NestnoteError::Cycle { .. }));
    let a = api.resolve_document("A").unwrap();
    assert!(api.store().get_document_by_id(&a).unwrap().is_root());
}

#[test]
fn test_shallow_delete_leaves_grandchild_for_repair() {
    let dir = TempDir::new().unwrap();
    let config = NestnoteConfig {
        delete_policy: DeletePolicy::Shallow,
        ..Default::default()
    };
    let mut api = open(&dir, &config);
    api.create_page(Some("A"), None, None).unwrap();
    api.create_page(Some("B"), Some("A"), None).unwrap();
    api.create_page(Some("C"), Some("B"), None).unwrap();

    api.delete_page("A", true).unwrap();
    let titles: Vec<_> = api.store().documents().iter().map(|d| d.title.clone()).collect();
    assert_eq!(titles, vec!["C"]);

    let reopened = open(&dir, &config);
    let c = reopened.resolve_document("C").unwrap();
    let document = reopened.store().get_document_by_id(&c).unwrap();
    assert!(document.is_root());
    assert_eq!(document.level, 0);
    assert!(reopened.store().is_dirty());
}

#[test]
fn test_opening_parent_links_new_children() {
    let (_dir, mut api) = setup();
    api.create_page(Some("A"), None, None).unwrap();
    api.open("A").unwrap();
    api.change_block_content("A", "1", "notes").unwrap();
    api.create_page(Some("Child"), Some("A"), None).unwrap();

    api.open("A").unwrap();

    assert_eq!(contents(&api, "A"), vec!["notes", "Child"]);
}
