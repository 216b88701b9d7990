use std::env;
use std::path::PathBuf;

include!(concat!(env!("OUT_DIR"), "/catalog_env_allowlist.rs"));

fn fallback_dotenv_path(
    catalog_home: Option<PathBuf>,
    home_dir: Option<PathBuf>,
) -> Option<PathBuf> {
    if let Some(home) = catalog_home {
        return Some(home.join(".env"));
    }
    Some(home_dir?.join(".prompt-catalog/.env"))
}

pub fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    let fallback = fallback_dotenv_path(
        env::var_os("CATALOG_HOME").map(PathBuf::from),
        dirs::home_dir(),
    );

    let Some(path) = fallback else {
        return;
    };
    if path.is_file() {
        let _ = dotenvy::from_path(&path);
    }
}

/// Names of the `CATALOG_*` variables this build reads that are currently set.
pub fn active_catalog_env_keys() -> Vec<&'static str> {
    GENERATED_CATALOG_ENV_ALLOWLIST
        .iter()
        .copied()
        .filter(|key| matches!(env::var(key), Ok(v) if !v.trim().is_empty()))
        .collect()
}

pub fn build_id() -> &'static str {
    env!("BUILD_UUID")
}
