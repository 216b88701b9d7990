use crate::catalog::config::GallerySettings;
use crate::catalog::entry::Entry;
use crate::catalog::index::{remove_entry, replace_entry, upsert_entry};
use crate::catalog::query::{SELECT_ALL, matching, query};

/// Discrete front-end events. Mutating commands are only dispatched after
/// the matching remote operation has succeeded.
#[derive(Debug, Clone)]
pub enum CatalogCommand {
    /// Replace the whole collection, e.g. after reading the remote index.
    Load(Vec<Entry>),
    Create(Entry),
    Update { old_slug: String, entry: Entry },
    Delete { slug: String },
    Filter { text: String, selector: String },
    LoadMore,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filters {
    pub text: String,
    pub selector: String,
}

impl Default for Filters {
    fn default() -> Self {
        Self {
            text: String::new(),
            selector: SELECT_ALL.to_string(),
        }
    }
}

/// In-memory catalog state: the collection, active filters and page cutoff.
#[derive(Debug, Clone)]
pub struct CatalogModel {
    entries: Vec<Entry>,
    filters: Filters,
    page_size: usize,
    page_increment: usize,
    visible: usize,
}

impl CatalogModel {
    pub fn new(entries: Vec<Entry>, gallery: &GallerySettings) -> Self {
        Self {
            entries,
            filters: Filters::default(),
            page_size: gallery.page_size,
            page_increment: gallery.page_increment,
            visible: gallery.page_size,
        }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn visible_limit(&self) -> usize {
        self.visible
    }

    pub fn find(&self, slug: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.slug == slug)
    }

    /// Jump straight to the cutoff reached after `pages` pages, as if
    /// `LoadMore` had been dispatched `pages - 1` times.
    pub fn show_pages(&mut self, pages: usize) {
        let extra = self.page_increment.saturating_mul(pages.max(1) - 1);
        self.visible = self.page_size.saturating_add(extra);
    }

    fn reset_page(&mut self) {
        self.visible = self.page_size;
    }

    pub fn dispatch(&mut self, command: CatalogCommand) {
        match command {
            CatalogCommand::Load(entries) => {
                self.entries = entries;
                self.reset_page();
            }
            CatalogCommand::Create(entry) => {
                upsert_entry(&mut self.entries, entry);
                // A new entry is shown against a clean gallery.
                self.filters = Filters::default();
                self.reset_page();
            }
            CatalogCommand::Update { old_slug, entry } => {
                replace_entry(&mut self.entries, &old_slug, entry);
            }
            CatalogCommand::Delete { slug } => {
                remove_entry(&mut self.entries, &slug);
            }
            CatalogCommand::Filter { text, selector } => {
                let next = Filters { text, selector };
                if next != self.filters {
                    self.filters = next;
                    self.reset_page();
                }
            }
            CatalogCommand::LoadMore => {
                self.visible = self.visible.saturating_add(self.page_increment);
            }
        }
    }

    /// Current page of the filtered gallery.
    pub fn view(&self) -> impl Iterator<Item = &Entry> + Clone + '_ {
        query(
            &self.entries,
            &self.filters.text,
            &self.filters.selector,
            self.visible,
        )
    }

    pub fn total_matches(&self) -> usize {
        matching(&self.entries, &self.filters.text, &self.filters.selector).count()
    }

    pub fn has_more(&self) -> bool {
        self.total_matches() > self.visible
    }
}

pub fn entry_count_label(count: usize) -> String {
    format!("{count} {}", if count == 1 { "entry" } else { "entries" })
}
