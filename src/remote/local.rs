use crate::error::{CatalogError, CatalogResult, SHA_NOT_SUPPLIED, STATUS_UNPROCESSABLE};
use crate::logging;
use crate::remote::{ContentStore, RemoteFile};
use fs2::FileExt;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use tempfile::NamedTempFile;

const LOCK_FILE: &str = ".catalog.lock";

/// Directory-backed store used when no remote repository is configured.
/// Produces the same file layout as the remote; tokens are SHA-256 digests.
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

pub fn content_sha(content: &str) -> String {
    let digest = Sha256::digest(content.as_bytes());
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

fn io_err(path: &Path, err: std::io::Error) -> CatalogError {
    CatalogError::Transport(format!("{}: {err}", path.display()))
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> CatalogResult<PathBuf> {
        let rel = Path::new(path);
        let clean = rel
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if path.trim().is_empty() || !clean {
            return Err(CatalogError::Validation(format!(
                "store path must be relative without `..`: {path}"
            )));
        }
        Ok(self.root.join(rel))
    }

    fn lock(&self) -> CatalogResult<fs::File> {
        fs::create_dir_all(&self.root).map_err(|err| io_err(&self.root, err))?;
        let lock_path = self.root.join(LOCK_FILE);
        let file = fs::OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .map_err(|err| io_err(&lock_path, err))?;
        file.lock_exclusive()
            .map_err(|err| io_err(&lock_path, err))?;
        Ok(file)
    }

    fn read_current(&self, path: &str) -> CatalogResult<Option<RemoteFile>> {
        let full = self.resolve(path)?;
        if !full.is_file() {
            return Ok(None);
        }
        let content = fs::read_to_string(&full).map_err(|err| io_err(&full, err))?;
        let sha = content_sha(&content);
        Ok(Some(RemoteFile {
            path: path.to_string(),
            content,
            sha,
        }))
    }

    fn check_token(
        &self,
        path: &str,
        current: Option<&RemoteFile>,
        sha: Option<&str>,
    ) -> CatalogResult<()> {
        match (current, sha) {
            (None, None) => Ok(()),
            (Some(file), Some(sha)) if file.sha == sha => Ok(()),
            (Some(_), Some(sha)) => Err(CatalogError::conflict(
                path,
                format!("{path} does not match {sha}"),
            )),
            (None, Some(_)) => Err(CatalogError::conflict(
                path,
                format!("{path} no longer exists"),
            )),
            (Some(_), None) => Err(CatalogError::Rejected {
                path: path.to_string(),
                status: STATUS_UNPROCESSABLE,
                message: format!("Invalid request. {SHA_NOT_SUPPLIED}."),
            }),
        }
    }
}

impl ContentStore for LocalStore {
    fn describe(&self) -> String {
        format!("local:{}", self.root.display())
    }

    fn get(&self, path: &str) -> CatalogResult<Option<RemoteFile>> {
        self.read_current(path)
    }

    fn put(
        &self,
        path: &str,
        content: &str,
        sha: Option<&str>,
        message: &str,
    ) -> CatalogResult<String> {
        let full = self.resolve(path)?;
        let _guard = self.lock()?;
        let current = self.read_current(path)?;
        self.check_token(path, current.as_ref(), sha)?;

        let parent = full.parent().unwrap_or(&self.root);
        fs::create_dir_all(parent).map_err(|err| io_err(parent, err))?;
        let mut tmp = NamedTempFile::new_in(parent).map_err(|err| io_err(parent, err))?;
        tmp.write_all(content.as_bytes())
            .map_err(|err| io_err(&full, err))?;
        tmp.persist(&full).map_err(|err| io_err(&full, err.error))?;

        logging::debug("store.local.put", &[("path", path), ("message", message)]);
        Ok(content_sha(content))
    }

    fn remove(&self, path: &str, sha: &str, message: &str) -> CatalogResult<()> {
        let full = self.resolve(path)?;
        let _guard = self.lock()?;
        let Some(current) = self.read_current(path)? else {
            return Err(CatalogError::NotFound(path.to_string()));
        };
        self.check_token(path, Some(&current), Some(sha))?;
        fs::remove_file(&full).map_err(|err| io_err(&full, err))?;

        logging::debug("store.local.remove", &[("path", path), ("message", message)]);
        Ok(())
    }
}
