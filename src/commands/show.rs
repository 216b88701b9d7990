use anyhow::Result;

use crate::catalog::markdown::render_entry;
use crate::commands::{CommandReport, Session};

pub fn run(slug: &str) -> Result<CommandReport> {
    let mut report = CommandReport::new("show");
    let session = Session::open()?;

    match session.model.find(slug) {
        Some(entry) => {
            report.detail(format!("path={}", entry.entry_file_path()));
            report.body(render_entry(entry));
        }
        None => report.issue(format!("no entry `{slug}` in the local catalog")),
    }

    Ok(report)
}
