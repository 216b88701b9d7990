use anyhow::Result;

use crate::catalog::entry::EntryDraft;
use crate::catalog::markdown::render_entry;
use crate::catalog::util::today;
use crate::commands::CommandReport;

/// Render an entry's Markdown without writing anything.
pub fn run(draft: &EntryDraft) -> Result<CommandReport> {
    let mut report = CommandReport::new("preview");

    let mut draft = draft.clone();
    if draft.date.trim().is_empty() {
        draft.date = today();
    }
    match draft.into_entry() {
        Ok(entry) => {
            report.detail(format!("path={}", entry.entry_file_path()));
            report.body(render_entry(&entry));
        }
        Err(err) => report.issue(err.to_string()),
    }

    Ok(report)
}
