//! Ordered multi-file operations that keep `entries.json` and the
//! per-entry Markdown files consistent.
//!
//! Every operation writes the per-entry file first and the index last, so a
//! failure part way through can leave an orphan Markdown file but never an
//! index entry pointing at a missing file. The index token captured by the
//! read is the one sent with the write; a concurrent change in between
//! surfaces as a conflict and nothing is retried or rolled back.

use crate::catalog::entry::{Entry, entry_file_path};
use crate::catalog::index::{parse_index, remove_entry, replace_entry, serialize_index, upsert_entry};
use crate::catalog::markdown::render_entry;
use crate::catalog::INDEX_FILE;
use crate::error::CatalogResult;
use crate::logging;
use crate::remote::ContentStore;

/// The index as read from the store, with the token needed to write it back.
#[derive(Debug, Clone)]
pub struct IndexSnapshot {
    pub entries: Vec<Entry>,
    pub sha: Option<String>,
}

/// What a completed operation did, for reporting and the local mirror.
#[derive(Debug, Clone, Default)]
pub struct SyncOutcome {
    pub entries: Vec<Entry>,
    pub index_sha: Option<String>,
    pub steps: Vec<String>,
    pub warnings: Vec<String>,
}

impl SyncOutcome {
    fn step(&mut self, text: impl Into<String>) {
        let text = text.into();
        logging::info("sync.step", &[("step", &text)]);
        self.steps.push(text);
    }
}

pub struct IndexSynchronizer<'a, S: ContentStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: ContentStore + ?Sized> IndexSynchronizer<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Read and decode the index. A missing index reads as empty and is
    /// created, rather than updated, on the next write.
    pub fn read_index(&self) -> CatalogResult<IndexSnapshot> {
        match self.store.get(INDEX_FILE)? {
            Some(file) => Ok(IndexSnapshot {
                entries: parse_index(&file.path, &file.content)?,
                sha: Some(file.sha),
            }),
            None => {
                logging::info("sync.read_index", &[("path", INDEX_FILE), ("state", "missing")]);
                Ok(IndexSnapshot {
                    entries: Vec::new(),
                    sha: None,
                })
            }
        }
    }

    fn write_index(
        &self,
        snapshot: &IndexSnapshot,
        entries: &[Entry],
        message: &str,
    ) -> CatalogResult<String> {
        let content = serialize_index(entries);
        match snapshot.sha.as_deref() {
            Some(sha) => self.store.update(INDEX_FILE, &content, sha, message),
            None => self.store.put(INDEX_FILE, &content, None, message),
        }
    }

    fn write_entry_file(&self, entry: &Entry, message: &str) -> CatalogResult<String> {
        self.store
            .create(&entry.entry_file_path(), &render_entry(entry), message)
    }

    pub fn create(&self, entry: &Entry) -> CatalogResult<SyncOutcome> {
        let mut outcome = SyncOutcome::default();

        let path = entry.entry_file_path();
        self.write_entry_file(entry, &format!("Add entry: {}", entry.title))?;
        outcome.step(format!("wrote {path}"));

        let snapshot = self.read_index()?;
        let mut entries = snapshot.entries.clone();
        upsert_entry(&mut entries, entry.clone());

        let sha = self.write_index(
            &snapshot,
            &entries,
            &format!("Update index: add {}", entry.title),
        )?;
        outcome.step(format!("updated {INDEX_FILE} ({} entries)", entries.len()));

        outcome.entries = entries;
        outcome.index_sha = Some(sha);
        Ok(outcome)
    }

    pub fn update(&self, old_slug: &str, entry: &Entry) -> CatalogResult<SyncOutcome> {
        let mut outcome = SyncOutcome::default();

        let path = entry.entry_file_path();
        self.write_entry_file(entry, &format!("Update entry: {}", entry.title))?;
        outcome.step(format!("wrote {path}"));

        if old_slug != entry.slug {
            let old_path = entry_file_path(old_slug);
            match self
                .store
                .delete(&old_path, &format!("Remove renamed entry: {old_slug}"))
            {
                Ok(()) => outcome.step(format!("removed {old_path}")),
                Err(err) if err.is_not_found() => {
                    outcome
                        .warnings
                        .push(format!("{old_path} was already absent"));
                }
                Err(err) => {
                    let err_text = err.to_string();
                    logging::warn(
                        "sync.update",
                        &[("path", &old_path), ("action", "skip_old_file"), ("err", &err_text)],
                    );
                    outcome
                        .warnings
                        .push(format!("could not remove {old_path}: {err_text}"));
                }
            }
        }

        let snapshot = self.read_index()?;
        let mut entries = snapshot.entries.clone();
        replace_entry(&mut entries, old_slug, entry.clone());

        let sha = self.write_index(
            &snapshot,
            &entries,
            &format!("Update index: edit {}", entry.title),
        )?;
        outcome.step(format!("updated {INDEX_FILE} ({} entries)", entries.len()));

        outcome.entries = entries;
        outcome.index_sha = Some(sha);
        Ok(outcome)
    }

    pub fn delete(&self, slug: &str) -> CatalogResult<SyncOutcome> {
        let mut outcome = SyncOutcome::default();

        let path = entry_file_path(slug);
        self.store.delete(&path, &format!("Delete entry: {slug}"))?;
        outcome.step(format!("removed {path}"));

        let snapshot = self.read_index()?;
        let mut entries = snapshot.entries.clone();
        let removed = remove_entry(&mut entries, slug);
        if removed == 0 {
            outcome
                .warnings
                .push(format!("{slug} was not listed in {INDEX_FILE}; index unchanged"));
            outcome.entries = entries;
            outcome.index_sha = snapshot.sha;
            return Ok(outcome);
        }

        let sha = self.write_index(
            &snapshot,
            &entries,
            &format!("Update index: remove {slug}"),
        )?;
        outcome.step(format!("updated {INDEX_FILE} ({} entries)", entries.len()));

        outcome.entries = entries;
        outcome.index_sha = Some(sha);
        Ok(outcome)
    }
}
