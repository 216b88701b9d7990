use anyhow::Result;

use crate::catalog::entry::{Entry, platform_class};
use crate::catalog::model::{CatalogCommand, entry_count_label};
use crate::catalog::query::SELECT_ALL;
use crate::commands::{CommandReport, Session};

#[derive(Debug, Clone)]
pub struct ListOptions {
    pub search: String,
    pub filter: String,
    pub pages: usize,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            search: String::new(),
            filter: SELECT_ALL.to_string(),
            pages: 1,
        }
    }
}

fn entry_line(entry: &Entry) -> String {
    format!(
        "{} | {} | {} [{}] | {}",
        entry.slug,
        entry.title,
        entry.platform,
        platform_class(&entry.platform),
        if entry.date.is_empty() { "-" } else { entry.date.as_str() }
    )
}

pub fn run(opts: &ListOptions) -> Result<CommandReport> {
    let mut report = CommandReport::new("list");
    let mut session = Session::open()?;
    let model = &mut session.model;

    model.dispatch(CatalogCommand::Filter {
        text: opts.search.clone(),
        selector: opts.filter.clone(),
    });
    let pages = opts.pages.max(1);
    if pages > 1 {
        // Restore the pages already seen, then load one more.
        model.show_pages(pages - 1);
        model.dispatch(CatalogCommand::LoadMore);
    }

    let filters = model.filters();
    report.detail(format!(
        "filter={} search={:?} limit={}",
        filters.selector,
        filters.text,
        model.visible_limit()
    ));

    let view = model.view();
    let shown = view.clone().count();
    for entry in view {
        report.detail(entry_line(entry));
    }

    let total = model.total_matches();
    report.detail(format!("showing {shown} of {total}"));
    if model.has_more() {
        report.detail(format!(
            "more available: rerun with --pages {}",
            pages.saturating_add(1)
        ));
    }
    report.detail(entry_count_label(model.entries().len()));

    Ok(report)
}
