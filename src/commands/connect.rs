use anyhow::Result;

use crate::catalog::config::load_config;
use crate::catalog::paths::resolve_paths;
use crate::commands::CommandReport;
use crate::error::CatalogError;
use crate::remote::github::{ConnectionCheck, GitHubStore};

pub fn run() -> Result<CommandReport> {
    let mut report = CommandReport::new("connect");
    let paths = resolve_paths()?;
    let cfg = load_config(&paths)?;

    if !cfg.remote.is_configured() {
        report.issue("fill in owner, repo and token first (see `catalog configure`)");
        return Ok(report);
    }

    let store = GitHubStore::new(&cfg.remote)?;
    match store.check_connection() {
        Ok(ConnectionCheck::Connected { full_name }) => {
            report.detail(format!("Connected to {full_name}"));
            report.detail(format!("branch={}", cfg.remote.branch));
        }
        Ok(ConnectionCheck::InvalidToken) => {
            report.issue("Invalid token. Check your Personal Access Token.");
        }
        Ok(ConnectionCheck::RepoNotFound) => {
            report.issue("Repo not found. Check owner and repo name.");
        }
        Ok(ConnectionCheck::Failed(status)) => {
            report.issue(format!("Connection failed (HTTP {status})"));
        }
        Err(CatalogError::Transport(_)) => {
            report.issue("Network error. Check your connection.");
        }
        Err(err) => report.issue(err.to_string()),
    }

    Ok(report)
}
