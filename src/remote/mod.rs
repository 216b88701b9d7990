pub mod codec;
pub mod github;
pub mod local;

use crate::error::{CatalogError, CatalogResult};
use crate::logging;

/// A file as read from a store: decoded text plus the concurrency token
/// that must accompany any later update or delete of the same path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFile {
    pub path: String,
    pub content: String,
    pub sha: String,
}

/// A content-addressed file store keyed by repository-relative path.
///
/// Implementors supply the three raw primitives; `create`, `update` and
/// `delete` layer the token discipline on top and are what callers use.
pub trait ContentStore {
    /// Human readable location, used in reports and logs.
    fn describe(&self) -> String;

    /// Read `path`, returning `Ok(None)` when it does not exist.
    fn get(&self, path: &str) -> CatalogResult<Option<RemoteFile>>;

    /// Write `content` to `path`. With `sha` set the write only succeeds if
    /// it matches the current token; without it the path must not exist.
    /// Returns the new token.
    fn put(&self, path: &str, content: &str, sha: Option<&str>, message: &str)
    -> CatalogResult<String>;

    /// Remove `path` if its current token equals `sha`.
    fn remove(&self, path: &str, sha: &str, message: &str) -> CatalogResult<()>;

    /// Upsert: picks up the existing token when the file is already there so
    /// the write becomes an update.
    fn create(&self, path: &str, content: &str, message: &str) -> CatalogResult<String> {
        let existing = self.get(path)?;
        let sha = existing.as_ref().map(|f| f.sha.as_str());
        if sha.is_some() {
            logging::debug("store.create", &[("path", path), ("mode", "overwrite")]);
        }
        self.put(path, content, sha, message)
    }

    /// Conditional write; fails with a conflict when `sha` is stale.
    fn update(&self, path: &str, content: &str, sha: &str, message: &str) -> CatalogResult<String> {
        self.put(path, content, Some(sha), message)
    }

    /// Fetch the current token then delete conditioned on it.
    fn delete(&self, path: &str, message: &str) -> CatalogResult<()> {
        let Some(file) = self.get(path)? else {
            return Err(CatalogError::NotFound(path.to_string()));
        };
        self.remove(path, &file.sha, message)
    }
}
