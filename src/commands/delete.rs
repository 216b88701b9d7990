use anyhow::Result;

use crate::catalog::model::CatalogCommand;
use crate::commands::{CommandReport, Session};

#[derive(Debug, Clone, Default)]
pub struct DeleteOptions {
    pub slug: String,
}

pub fn run(opts: &DeleteOptions) -> Result<CommandReport> {
    let mut report = CommandReport::new("delete");
    let slug = opts.slug.trim();
    if slug.is_empty() {
        report.issue("slug cannot be empty");
        return Ok(report);
    }

    let mut session = Session::open()?;
    session.apply(
        &mut report,
        "delete",
        |sync| sync.delete(slug),
        CatalogCommand::Delete {
            slug: slug.to_string(),
        },
    )?;

    Ok(report)
}
