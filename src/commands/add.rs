use anyhow::Result;

use crate::catalog::entry::EntryDraft;
use crate::catalog::model::CatalogCommand;
use crate::catalog::util::today;
use crate::commands::{CommandReport, Session};

#[derive(Debug, Clone, Default)]
pub struct AddOptions {
    pub draft: EntryDraft,
}

pub fn run(opts: &AddOptions) -> Result<CommandReport> {
    let mut report = CommandReport::new("add");

    let mut draft = opts.draft.clone();
    if draft.date.trim().is_empty() {
        draft.date = today();
    }
    let entry = match draft.into_entry() {
        Ok(entry) => entry,
        Err(err) => {
            report.issue(err.to_string());
            return Ok(report);
        }
    };
    report.detail(format!("slug={}", entry.slug));

    let mut session = Session::open()?;
    let applied = session.apply(
        &mut report,
        "add",
        |sync| sync.create(&entry),
        CatalogCommand::Create(entry.clone()),
    )?;
    if applied.is_some() {
        report.detail(format!("saved {}", entry.title));
    }

    Ok(report)
}
