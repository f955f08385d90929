//! Turns command results into terminal text.
//!
//! Every function here returns a `String`; printing is left to the handlers so
//! output can be checked in tests without a terminal.

use super::styles::STYLES;
use chrono::{DateTime, Utc};
use nestnoteapp::commands::{CmdMessage, MessageLevel, TreeNode};
use nestnoteapp::display::{
    creation_date, page_block_icon, page_block_title, relative_time, truncate_title,
    CARD_TITLE_CHARS,
};
use nestnoteapp::model::{Block, BlockType, Document};
use nestnoteapp::store::DataStore;
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

const DIVIDER: &str = "────────────────────────────────";
const SHORT_ID: usize = 8;

pub fn render_messages(messages: &[CmdMessage]) -> String {
    let mut out = String::new();
    for message in messages {
        let style = match message.level {
            MessageLevel::Info => &STYLES.info,
            MessageLevel::Success => &STYLES.success,
            MessageLevel::Warning => &STYLES.warning,
            MessageLevel::Error => &STYLES.error,
        };
        out.push_str(&format!("{}\n", style.apply_to(&message.content)));
    }
    out
}

fn short_id(document: &Document) -> String {
    document.id.to_string().chars().take(SHORT_ID).collect()
}

fn labelled_title(document: &Document) -> String {
    match &document.icon {
        Some(icon) => format!("{} {}", icon, document.title),
        None => document.title.clone(),
    }
}

pub fn render_tree(nodes: &[TreeNode]) -> String {
    if nodes.is_empty() {
        return "No pages yet. Create one with `nestnote new <title>`.\n".to_string();
    }
    let mut out = String::new();
    for node in nodes {
        render_tree_node(node, 0, &mut out);
    }
    out
}

fn render_tree_node(node: &TreeNode, depth: usize, out: &mut String) {
    let expander = match (node.has_children, node.expanded) {
        (false, _) => " ",
        (true, false) => "▸",
        (true, true) => "▾",
    };
    let title = labelled_title(&node.document);
    let title = if node.selected {
        STYLES.selected.apply_to(title).to_string()
    } else {
        title
    };
    out.push_str(&format!(
        "{}{} {}  {}\n",
        "  ".repeat(depth),
        STYLES.faint.apply_to(expander),
        title,
        STYLES.muted.apply_to(short_id(&node.document))
    ));
    for child in &node.children {
        render_tree_node(child, depth + 1, out);
    }
}

/// A document followed by its numbered blocks.
pub fn render_page<S: DataStore>(
    store: &S,
    document: &Document,
    blocks: &[&Block],
    now: DateTime<Utc>,
) -> String {
    let mut out = format!("{}\n", STYLES.title.apply_to(labelled_title(document)));
    out.push_str(&format!(
        "{}\n\n",
        STYLES.time.apply_to(format!(
            "{} · {}",
            creation_date(document.created_at),
            relative_time(document.updated_at, now)
        ))
    ));

    let mut list_number = 0;
    for (position, block) in blocks.iter().enumerate() {
        if block.block_type == BlockType::NumberedList {
            list_number += 1;
        } else {
            list_number = 0;
        }
        out.push_str(&format!(
            "{} {}\n",
            STYLES.index.apply_to(format!("{:>3}.", position + 1)),
            render_block(store, block, list_number)
        ));
    }
    out
}

fn render_block<S: DataStore>(store: &S, block: &Block, list_number: usize) -> String {
    let text = if block.content.is_empty() {
        STYLES.placeholder.apply_to(block.block_type.placeholder()).to_string()
    } else {
        block.content.clone()
    };

    match block.block_type {
        BlockType::Paragraph => text,
        BlockType::Heading1 => STYLES.title.apply_to(format!("# {}", text)).to_string(),
        BlockType::Heading2 => STYLES.title.apply_to(format!("## {}", text)).to_string(),
        BlockType::Heading3 => STYLES.title.apply_to(format!("### {}", text)).to_string(),
        BlockType::BulletedList => format!("{} {}", STYLES.marker.apply_to("•"), text),
        BlockType::NumberedList => {
            format!("{} {}", STYLES.marker.apply_to(format!("{}.", list_number)), text)
        }
        BlockType::Checkbox if block.is_checked() => format!(
            "{} {}",
            STYLES.marker.apply_to("[x]"),
            STYLES.checked.apply_to(&block.content)
        ),
        BlockType::Checkbox => format!("{} {}", STYLES.marker.apply_to("[ ]"), text),
        BlockType::Divider => STYLES.faint.apply_to(DIVIDER).to_string(),
        BlockType::Page => {
            let title = page_block_title(store, block);
            let label = match page_block_icon(store, block) {
                Some(icon) => format!("{} {}", icon, title),
                None => title.to_string(),
            };
            if block.is_linked_page() {
                format!("{} {}", STYLES.marker.apply_to("↳"), STYLES.link.apply_to(label))
            } else {
                format!(
                    "{} {} {}",
                    STYLES.marker.apply_to("↳"),
                    label,
                    STYLES.muted.apply_to("(not created yet)")
                )
            }
        }
    }
}

/// Home-page style cards: a truncated title and how long ago it changed.
pub fn render_recent(documents: &[Document], created: bool, now: DateTime<Utc>) -> String {
    if documents.is_empty() {
        return "No pages yet.\n".to_string();
    }
    let mut out = String::new();
    for document in documents {
        let title = truncate_title(&labelled_title(document), CARD_TITLE_CHARS);
        let padding = (CARD_TITLE_CHARS + 5).saturating_sub(title.width());
        let when = if created {
            creation_date(document.created_at)
        } else {
            relative_time(document.updated_at, now)
        };
        out.push_str(&format!(
            "{}{}{}\n",
            title,
            " ".repeat(padding),
            STYLES.time.apply_to(when)
        ));
    }
    out
}

#[derive(Serialize)]
pub struct PageView<'a> {
    pub document: &'a Document,
    pub blocks: &'a [&'a Block],
}

pub fn render_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value).map(|json| format!("{}\n", json))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nestnoteapp::commands::tree;
    use nestnoteapp::model::BlockPatch;
    use nestnoteapp::store::memory::InMemoryStore;

    fn plain() {
        console::set_colors_enabled(false);
    }

    #[test]
    fn test_render_messages() {
        plain();
        let out = render_messages(&[CmdMessage::success("Done"), CmdMessage::warning("Careful")]);
        assert_eq!(out, "Done\nCareful\n");
    }

    #[test]
    fn test_render_tree_marks_expansion() {
        plain();
        let mut store = InMemoryStore::new();
        let a = store.create_document(Some("A"), None, Some("📁".into()));
        store.create_document(Some("A1"), Some(a.id), None);
        store.create_document(Some("B"), None, None);
        store.toggle_folder(&a.id);

        let out = render_tree(&tree::run(&store).unwrap().tree);

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("▾ 📁 A"));
        assert!(lines[1].starts_with("    A1"));
        assert!(lines[2].starts_with("  B"));
    }

    #[test]
    fn test_render_empty_tree() {
        assert!(render_tree(&[]).contains("No pages yet"));
    }

    #[test]
    fn test_render_page_blocks() {
        plain();
        let mut store = InMemoryStore::new();
        let page = store.create_document(Some("Plan"), None, None);
        let child = store.create_document(Some("Details"), Some(page.id), None);
        let kinds = [
            (BlockType::Heading1, "Goals"),
            (BlockType::NumberedList, "first"),
            (BlockType::NumberedList, "second"),
            (BlockType::Checkbox, "ship"),
            (BlockType::Divider, ""),
            (BlockType::Paragraph, ""),
        ];
        for (order, (kind, content)) in kinds.iter().enumerate() {
            store.add_block_to_document(&page.id, Block::new(page.id, *kind, *content, order));
        }
        store.add_block_to_document(&page.id, Block::page_link(page.id, &child, kinds.len()));
        let ship = store.get_blocks_by_document_id(&page.id)[3].id;
        store.update_block_in_document(&page.id, &ship, &BlockPatch::checked(true));

        let document = store.get_document_by_id(&page.id).unwrap();
        let blocks = store.get_blocks_by_document_id(&page.id);
        let out = render_page(&store, document, &blocks, Utc::now());

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Plan");
        assert!(lines[1].starts_with("created "));
        assert!(lines[1].ends_with("edited just now"));
        assert_eq!(lines[3], "  1. # Goals");
        assert_eq!(lines[4], "  2. 1. first");
        assert_eq!(lines[5], "  3. 2. second");
        assert_eq!(lines[6], "  4. [x] ship");
        assert_eq!(lines[7], format!("  5. {}", DIVIDER));
        assert_eq!(lines[8], "  6. Type '/' for commands");
        assert_eq!(lines[9], "  7. ↳ Details");
    }

    #[test]
    fn test_render_recent_truncates_titles() {
        plain();
        let mut store = InMemoryStore::new();
        store.create_document(Some("A very long page title indeed"), None, None);

        let out = render_recent(
            &store.documents().to_vec(),
            false,
            Utc::now(),
        );

        assert!(out.starts_with("A very long page tit..."));
        assert!(out.trim_end().ends_with("edited just now"));
    }
}
