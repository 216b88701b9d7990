use crate::catalog::paths::CatalogPaths;
use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Repository coordinates and credential for the remote store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteSettings {
    pub owner: String,
    pub repo: String,
    pub branch: String,
    pub token: String,
    pub api_base: String,
    pub request_timeout_secs: u64,
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            owner: String::new(),
            repo: String::new(),
            branch: "main".to_string(),
            token: String::new(),
            api_base: DEFAULT_API_BASE.to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl RemoteSettings {
    pub fn is_configured(&self) -> bool {
        !self.owner.trim().is_empty()
            && !self.repo.trim().is_empty()
            && !self.token.trim().is_empty()
    }

    pub fn display_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GallerySettings {
    pub page_size: usize,
    pub page_increment: usize,
}

impl Default for GallerySettings {
    fn default() -> Self {
        Self {
            page_size: 12,
            page_increment: 12,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CatalogConfig {
    pub remote: RemoteSettings,
    pub gallery: GallerySettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PartialCatalogConfig {
    remote: Option<RemoteSettings>,
    gallery: Option<GallerySettings>,
}

fn env_or_string(var: &str, fallback: &str) -> String {
    match env::var(var) {
        Ok(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => fallback.to_string(),
    }
}

fn env_or_u64(var: &str, fallback: u64) -> u64 {
    match env::var(var) {
        Ok(v) => v.trim().parse::<u64>().ok().unwrap_or(fallback),
        Err(_) => fallback,
    }
}

fn env_or_usize(var: &str, fallback: usize) -> usize {
    match env::var(var) {
        Ok(v) => v.trim().parse::<usize>().ok().unwrap_or(fallback),
        Err(_) => fallback,
    }
}

fn validate(cfg: &CatalogConfig) -> Result<()> {
    if cfg.remote.branch.trim().is_empty() {
        return Err(anyhow!("invalid remote branch: cannot be empty"));
    }
    if cfg.remote.request_timeout_secs == 0 {
        return Err(anyhow!("invalid request timeout: must be >= 1 second"));
    }
    if cfg.gallery.page_size == 0 {
        return Err(anyhow!("invalid gallery page size: must be >= 1"));
    }
    if cfg.gallery.page_increment == 0 {
        return Err(anyhow!("invalid gallery page increment: must be >= 1"));
    }
    Ok(())
}

fn parse_file_config(raw: &str, path: &Path) -> Result<PartialCatalogConfig> {
    toml::from_str(raw)
        .map_err(|err| anyhow!("failed to parse catalog config {}: {err}", path.display()))
}

fn merge_file_config(base: &mut CatalogConfig, path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }

    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let parsed = parse_file_config(&raw, path)?;
    if let Some(remote) = parsed.remote {
        base.remote = remote;
    }
    if let Some(gallery) = parsed.gallery {
        base.gallery = gallery;
    }
    Ok(())
}

fn apply_env_overrides(cfg: &mut CatalogConfig) {
    cfg.remote.owner = env_or_string("CATALOG_GITHUB_OWNER", &cfg.remote.owner);
    cfg.remote.repo = env_or_string("CATALOG_GITHUB_REPO", &cfg.remote.repo);
    cfg.remote.branch = env_or_string("CATALOG_GITHUB_BRANCH", &cfg.remote.branch);
    cfg.remote.token = env_or_string("CATALOG_GITHUB_TOKEN", &cfg.remote.token);
    cfg.remote.api_base = env_or_string("CATALOG_API_BASE", &cfg.remote.api_base);
    cfg.remote.request_timeout_secs = env_or_u64(
        "CATALOG_REQUEST_TIMEOUT_SECS",
        cfg.remote.request_timeout_secs,
    );
    cfg.gallery.page_size = env_or_usize("CATALOG_PAGE_SIZE", cfg.gallery.page_size);
    cfg.gallery.page_increment =
        env_or_usize("CATALOG_PAGE_INCREMENT", cfg.gallery.page_increment);
}

pub fn load_config(paths: &CatalogPaths) -> Result<CatalogConfig> {
    let mut cfg = CatalogConfig::default();
    merge_file_config(&mut cfg, &paths.config_file)?;
    apply_env_overrides(&mut cfg);
    validate(&cfg)?;
    Ok(cfg)
}

/// Write `cfg` to the config file. Pass a config from [`load_file_config`]
/// so environment overrides never end up on disk.
pub fn save_file_config(paths: &CatalogPaths, cfg: &CatalogConfig) -> Result<()> {
    validate(cfg)?;
    let path = &paths.config_file;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let data = toml::to_string_pretty(cfg).context("failed to serialize catalog config")?;
    fs::write(path, data).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Config as stored on disk, without environment overrides.
pub fn load_file_config(paths: &CatalogPaths) -> Result<CatalogConfig> {
    let mut cfg = CatalogConfig::default();
    merge_file_config(&mut cfg, &paths.config_file)?;
    Ok(cfg)
}
