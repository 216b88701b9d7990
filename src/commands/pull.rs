use anyhow::Result;

use crate::catalog::mirror;
use crate::catalog::model::{CatalogCommand, entry_count_label};
use crate::catalog::sync::IndexSynchronizer;
use crate::commands::{Backend, CommandReport, Session};

/// Replace the local mirror with the index currently in the repository.
pub fn run() -> Result<CommandReport> {
    let mut report = CommandReport::new("pull");
    let mut session = Session::open()?;

    let store = match session.backend() {
        Ok(Backend::Remote(store)) => store,
        Ok(Backend::Local(_)) => {
            report.issue("remote not configured; the local catalog is already authoritative");
            return Ok(report);
        }
        Err(err) => {
            report.issue(err.to_string());
            return Ok(report);
        }
    };

    let snapshot = match IndexSynchronizer::new(&store).read_index() {
        Ok(snapshot) => snapshot,
        Err(err) => {
            report.issue(format!("could not load catalog: {err}"));
            return Ok(report);
        }
    };
    if let Some(sha) = &snapshot.sha {
        report.detail(format!("index_sha={sha}"));
    }

    session.model.dispatch(CatalogCommand::Load(snapshot.entries));
    let file = mirror::save(&session.paths, session.model.entries())?;
    report.detail(format!("mirror={}", file.display()));
    report.detail(entry_count_label(session.model.entries().len()));

    Ok(report)
}
