//! Text helpers shared by views: relative edit times, creation dates, title
//! truncation for cards, and what a `page` block shows.

use crate::model::{Block, DEFAULT_TITLE};
use crate::store::DataStore;
use chrono::{DateTime, Duration, Utc};

/// Titles longer than this are cut on home cards.
pub const CARD_TITLE_CHARS: usize = 20;

/// "edited just now", "edited 5 minutes ago", ... up to a week, then the date.
pub fn relative_time(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(at);
    if elapsed < Duration::minutes(1) {
        return "edited just now".to_string();
    }
    if elapsed < Duration::days(7) {
        let formatter = timeago::Formatter::new();
        return format!("edited {}", formatter.convert(elapsed.to_std().unwrap_or_default()));
    }
    at.format("%Y-%m-%d").to_string()
}

pub fn creation_date(at: DateTime<Utc>) -> String {
    at.format("created %B %-d, %Y").to_string()
}

/// Cuts `title` to `max_chars` characters, marking the cut with "...".
pub fn truncate_title(title: &str, max_chars: usize) -> String {
    if title.chars().count() > max_chars {
        let cut: String = title.chars().take(max_chars).collect();
        format!("{}...", cut)
    } else {
        title.to_string()
    }
}

/// The label of a `page` block: the linked document's current title, else the
/// block's own content, else the default title.
pub fn page_block_title<'a, S: DataStore>(store: &'a S, block: &'a Block) -> &'a str {
    block
        .linked_page_id
        .and_then(|id| store.get_document_by_id(&id))
        .map(|d| d.title.as_str())
        .filter(|t| !t.is_empty())
        .or_else(|| Some(block.content.as_str()).filter(|c| !c.is_empty()))
        .unwrap_or(DEFAULT_TITLE)
}

/// The icon of a `page` block: the linked document's, else the block's own.
pub fn page_block_icon<'a, S: DataStore>(store: &'a S, block: &'a Block) -> Option<&'a str> {
    block
        .linked_page_id
        .and_then(|id| store.get_document_by_id(&id))
        .and_then(|d| d.icon.as_deref())
        .or(block.icon.as_deref())
}
