use anyhow::Result;

use crate::catalog::model::entry_count_label;
use crate::commands::{CommandReport, Session};
use crate::env_loader;

pub fn run() -> Result<CommandReport> {
    let mut report = CommandReport::new("status");
    let session = Session::open()?;
    let paths = &session.paths;
    let remote = &session.config.remote;

    if remote.is_configured() {
        report.detail(format!("connection={}", remote.display_name()));
        report.detail(format!("branch={}", remote.branch));
        report.detail(format!("api_base={}", remote.api_base));
    } else {
        report.detail("connection=Not connected (local files only)");
    }
    report.detail(format!("catalog_home={}", paths.catalog_home.display()));
    report.detail(format!("config_file={}", paths.config_file.display()));
    report.detail(format!("logs_dir={}", paths.logs_dir.display()));
    report.detail(format!("data_dir={}", paths.data_dir.display()));
    report.detail(format!(
        "mirror={} ({})",
        paths.mirror_file.display(),
        entry_count_label(session.model.entries().len())
    ));
    report.detail(format!(
        "page_size={} page_increment={}",
        session.config.gallery.page_size, session.config.gallery.page_increment
    ));
    report.detail(format!("build_id={}", env_loader::build_id()));

    let env_keys = env_loader::active_catalog_env_keys();
    if !env_keys.is_empty() {
        report.detail(format!("env={}", env_keys.join(",")));
    }

    if !paths.data_dir.exists() {
        report.issue(format!("data dir does not exist: {}", paths.data_dir.display()));
    }

    Ok(report)
}
