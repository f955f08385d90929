use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::DataStore;

pub fn run<S: DataStore>(store: &mut S) -> Result<CmdResult> {
    let report = store.doctor()?;
    let mut result = CmdResult::default();

    if report.is_clean() {
        result.add_message(CmdMessage::success("No inconsistencies found."));
        return Ok(result);
    }

    result.add_message(CmdMessage::warning("Inconsistencies found and fixed:"));
    let lines = [
        (report.reattached_documents, "page(s) reattached to a live parent or made root"),
        (report.rebuilt_child_lists, "child list(s) rebuilt"),
        (report.relevelled_documents, "page level(s) recomputed"),
        (report.dropped_blocks, "block(s) of missing pages removed"),
        (report.unlinked_page_blocks, "page block(s) pointing at missing pages unlinked"),
        (report.renumbered_documents, "page(s) with gaps in block order renumbered"),
        (report.dropped_expanded, "stale expanded folder(s) forgotten"),
    ];
    for (count, what) in lines {
        if count > 0 {
            result.add_message(CmdMessage::info(format!("  - {} {}", count, what)));
        }
    }

    Ok(result)
}
