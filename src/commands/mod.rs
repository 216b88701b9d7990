pub mod add;
pub mod configure;
pub mod connect;
pub mod delete;
pub mod edit;
pub mod list;
pub mod preview;
pub mod pull;
pub mod show;
pub mod status;

use anyhow::Result;
use serde::Serialize;

use crate::catalog::audit;
use crate::catalog::config::{CatalogConfig, load_config};
use crate::catalog::mirror;
use crate::catalog::model::{CatalogCommand, CatalogModel, entry_count_label};
use crate::catalog::paths::{CatalogPaths, resolve_paths};
use crate::catalog::sync::{IndexSynchronizer, SyncOutcome};
use crate::error::CatalogResult;
use crate::logging;
use crate::remote::ContentStore;
use crate::remote::github::GitHubStore;
use crate::remote::local::LocalStore;

#[derive(Debug, Clone, Serialize)]
pub struct CommandReport {
    pub command: String,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    pub details: Vec<String>,
    pub issues: Vec<String>,
}

impl CommandReport {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ok: true,
            body: None,
            details: Vec::new(),
            issues: Vec::new(),
        }
    }

    pub fn detail(&mut self, text: impl Into<String>) {
        self.details.push(text.into());
    }

    pub fn issue(&mut self, text: impl Into<String>) {
        self.ok = false;
        self.issues.push(text.into());
    }

    pub fn body(&mut self, text: impl Into<String>) {
        self.body = Some(text.into());
    }
}

/// Where entry writes go: the configured repository, or the data directory
/// when no remote is set up.
pub enum Backend {
    Remote(GitHubStore),
    Local(LocalStore),
}

impl Backend {
    pub fn store(&self) -> &(dyn ContentStore + 'static) {
        match self {
            Backend::Remote(store) => store,
            Backend::Local(store) => store,
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Backend::Remote(_))
    }
}

/// Resolved paths, config and the catalog model loaded from the local mirror.
pub struct Session {
    pub paths: CatalogPaths,
    pub config: CatalogConfig,
    pub model: CatalogModel,
}

impl Session {
    pub fn open() -> Result<Self> {
        let paths = resolve_paths()?;
        let config = load_config(&paths)?;
        let entries = mirror::load(&paths)?;
        let model = CatalogModel::new(entries, &config.gallery);
        Ok(Self {
            paths,
            config,
            model,
        })
    }

    pub fn backend(&self) -> CatalogResult<Backend> {
        if self.config.remote.is_configured() {
            return Ok(Backend::Remote(GitHubStore::new(&self.config.remote)?));
        }
        logging::info(
            "backend",
            &[
                ("mode", "local"),
                ("dir", &self.paths.data_dir.display().to_string()),
            ],
        );
        Ok(Backend::Local(LocalStore::new(&self.paths.data_dir)))
    }

    /// Two-phase apply: run the remote operation, and only when every remote
    /// write succeeded dispatch `command` to the model and refresh the mirror.
    pub fn apply<F>(
        &mut self,
        report: &mut CommandReport,
        phase: &str,
        operation: F,
        command: CatalogCommand,
    ) -> Result<Option<SyncOutcome>>
    where
        F: FnOnce(&IndexSynchronizer<'_, dyn ContentStore>) -> CatalogResult<SyncOutcome>,
    {
        let backend = match self.backend() {
            Ok(backend) => backend,
            Err(err) => {
                report.issue(err.to_string());
                return Ok(None);
            }
        };
        let store = backend.store();
        let store_name = store.describe();
        report.detail(format!("store={store_name}"));

        let sync = IndexSynchronizer::new(store);
        let outcome = match operation(&sync) {
            Ok(outcome) => outcome,
            Err(err) => {
                let message = err.to_string();
                report.issue(format!("{phase} failed: {message}"));
                if err.is_conflict() {
                    report.issue(format!(
                        "the index changed since it was read; run `catalog pull` and retry {phase}"
                    ));
                }
                self.record_audit(report, phase, "failed", &store_name, &message);
                return Ok(None);
            }
        };

        for step in &outcome.steps {
            report.detail(step.clone());
        }
        report.detail(format!(
            "index={}",
            entry_count_label(outcome.entries.len())
        ));
        if let Some(sha) = &outcome.index_sha {
            report.detail(format!("index_sha={sha}"));
        }
        for warning in &outcome.warnings {
            report.detail(format!("warning: {warning}"));
        }

        self.model.dispatch(command);
        if self.model.entries() != outcome.entries.as_slice() {
            // The local view was stale; adopt the index that was just committed.
            logging::info(
                "mirror.reconcile",
                &[("phase", phase), ("entries", &outcome.entries.len().to_string())],
            );
            self.model.dispatch(CatalogCommand::Load(outcome.entries.clone()));
        }
        if backend.is_remote() {
            match mirror::save(&self.paths, self.model.entries()) {
                Ok(file) => report.detail(format!("mirror={}", file.display())),
                Err(err) => {
                    logging::warn("mirror.save", &[("error", &format!("{err:#}"))]);
                    report.detail(format!("warning: local mirror not updated: {err:#}"));
                }
            }
        }

        self.record_audit(report, phase, "ok", &store_name, &outcome.steps.join("; "));
        Ok(Some(outcome))
    }

    /// Audit entries never change a command's outcome; a failed write is
    /// logged and noted in the report.
    fn record_audit(
        &self,
        report: &mut CommandReport,
        phase: &str,
        status: &str,
        store: &str,
        message: &str,
    ) {
        if let Err(err) = audit::append_event(&self.paths, phase, status, store, message) {
            let err = format!("{err:#}");
            logging::warn("audit.append", &[("phase", phase), ("error", &err)]);
            report.detail(format!("warning: audit log not written: {err}"));
        }
    }
}
