use anyhow::Result;

use crate::catalog::entry::EntryDraft;
use crate::catalog::model::CatalogCommand;
use crate::commands::{CommandReport, Session};

#[derive(Debug, Clone, Default)]
pub struct EditOptions {
    pub slug: String,
    pub title: Option<String>,
    pub platform: Option<String>,
    pub image_url: Option<String>,
    pub date: Option<String>,
    pub tags: Option<String>,
    pub prompt: Option<String>,
}

fn merge(base: EntryDraft, opts: &EditOptions) -> EntryDraft {
    EntryDraft {
        title: opts.title.clone().unwrap_or(base.title),
        platform: opts.platform.clone().unwrap_or(base.platform),
        image_url: opts.image_url.clone().unwrap_or(base.image_url),
        date: opts.date.clone().unwrap_or(base.date),
        tags: opts.tags.clone().unwrap_or(base.tags),
        prompt: opts.prompt.clone().unwrap_or(base.prompt),
    }
}

pub fn run(opts: &EditOptions) -> Result<CommandReport> {
    let mut report = CommandReport::new("edit");
    let mut session = Session::open()?;

    let Some(existing) = session.model.find(&opts.slug) else {
        report.issue(format!(
            "no entry `{}` in the local catalog; run `catalog pull` first",
            opts.slug
        ));
        return Ok(report);
    };

    let entry = match merge(EntryDraft::from(existing), opts).into_entry() {
        Ok(entry) => entry,
        Err(err) => {
            report.issue(err.to_string());
            return Ok(report);
        }
    };
    if entry.slug != opts.slug && session.model.find(&entry.slug).is_some() {
        report.issue(format!(
            "another entry already uses slug `{}`; pick a different title",
            entry.slug
        ));
        return Ok(report);
    }
    if entry.slug != opts.slug {
        report.detail(format!("rename {} -> {}", opts.slug, entry.slug));
    }

    let old_slug = opts.slug.clone();
    session.apply(
        &mut report,
        "edit",
        |sync| sync.update(&old_slug, &entry),
        CatalogCommand::Update {
            old_slug: old_slug.clone(),
            entry: entry.clone(),
        },
    )?;

    Ok(report)
}
