use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct CatalogPaths {
    pub catalog_home: PathBuf,
    pub config_file: PathBuf,
    pub logs_dir: PathBuf,
    pub data_dir: PathBuf,
    pub mirror_file: PathBuf,
}

fn required_home_dir() -> Result<PathBuf> {
    if let Some(home) = dirs::home_dir() {
        return Ok(home);
    }
    Err(anyhow::anyhow!("HOME directory could not be resolved"))
}

fn env_path(var: &str) -> Option<PathBuf> {
    match env::var(var) {
        Ok(v) if !v.trim().is_empty() => Some(PathBuf::from(v.trim())),
        _ => None,
    }
}

pub fn resolve_paths() -> Result<CatalogPaths> {
    let catalog_home = match env_path("CATALOG_HOME") {
        Some(path) => path,
        None => required_home_dir()?.join(".prompt-catalog"),
    };
    let config_file =
        env_path("CATALOG_CONFIG_PATH").unwrap_or_else(|| catalog_home.join("catalog.toml"));
    let logs_dir = env_path("CATALOG_LOGS_DIR").unwrap_or_else(|| catalog_home.join("logs"));
    let data_dir = match env_path("CATALOG_DIR") {
        Some(path) => path,
        None => env::current_dir().context("failed to resolve current directory")?,
    };
    let mirror_file = data_dir.join(super::INDEX_FILE);

    Ok(CatalogPaths {
        catalog_home,
        config_file,
        logs_dir,
        data_dir,
        mirror_file,
    })
}
