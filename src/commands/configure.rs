use anyhow::Result;

use crate::catalog::config::{load_file_config, save_file_config};
use crate::catalog::paths::resolve_paths;
use crate::commands::CommandReport;

#[derive(Debug, Clone, Default)]
pub struct ConfigureOptions {
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub branch: Option<String>,
    pub token: Option<String>,
    pub api_base: Option<String>,
}

fn apply(target: &mut String, value: &Option<String>) {
    if let Some(v) = value {
        *target = v.trim().to_string();
    }
}

pub fn run(opts: &ConfigureOptions) -> Result<CommandReport> {
    let mut report = CommandReport::new("configure");
    let paths = resolve_paths()?;
    let mut cfg = load_file_config(&paths)?;

    apply(&mut cfg.remote.owner, &opts.owner);
    apply(&mut cfg.remote.repo, &opts.repo);
    apply(&mut cfg.remote.branch, &opts.branch);
    apply(&mut cfg.remote.token, &opts.token);
    apply(&mut cfg.remote.api_base, &opts.api_base);
    if cfg.remote.branch.is_empty() {
        cfg.remote.branch = "main".to_string();
    }

    save_file_config(&paths, &cfg)?;
    report.detail("Settings saved");
    report.detail(format!("config_file={}", paths.config_file.display()));
    if cfg.remote.is_configured() {
        report.detail(format!("remote={}", cfg.remote.display_name()));
    } else {
        report.detail("remote=Not connected (owner, repo and token are all required)");
    }

    Ok(report)
}
