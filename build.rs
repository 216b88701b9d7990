use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

const ENV_PREFIX: &str = "CATALOG_";

/// Every `CATALOG_*` name spelled out in `source`. Names ending in `_` are
/// format fragments and `*_ALLOWLIST` is the generated constant itself.
fn env_keys_in(source: &str) -> impl Iterator<Item = &str> {
    source.match_indices(ENV_PREFIX).filter_map(|(start, _)| {
        let preceded_by_ident = source[..start]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_');
        let tail = &source[start + ENV_PREFIX.len()..];
        let len = tail
            .find(|c: char| !(c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_'))
            .unwrap_or(tail.len());
        let key = &source[start..start + ENV_PREFIX.len() + len];
        let usable = !preceded_by_ident
            && len > 0
            && !key.ends_with('_')
            && !key.ends_with("_ALLOWLIST");
        usable.then_some(key)
    })
}

fn scan_sources(dir: &Path, keys: &mut BTreeSet<String>) -> std::io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            scan_sources(&path, keys)?;
            continue;
        }
        if path.extension().is_some_and(|ext| ext == "rs") {
            if let Ok(source) = fs::read_to_string(&path) {
                keys.extend(env_keys_in(&source).map(str::to_owned));
            }
        }
    }
    Ok(())
}

fn render_allowlist(keys: &BTreeSet<String>) -> String {
    let body: String = keys.iter().map(|key| format!("    {key:?},\n")).collect();
    format!("pub const GENERATED_CATALOG_ENV_ALLOWLIST: &[&str] = &[\n{body}];\n")
}

fn main() {
    let mut keys = BTreeSet::new();
    scan_sources(Path::new("src"), &mut keys).expect("failed to scan src for CATALOG_* keys");

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is set by cargo");
    fs::write(
        Path::new(&out_dir).join("catalog_env_allowlist.rs"),
        render_allowlist(&keys),
    )
    .expect("failed to write CATALOG env allowlist");

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before 1970");
    println!(
        "cargo:rustc-env=BUILD_UUID={:x}-{:x}",
        now.as_secs(),
        now.subsec_nanos()
    );
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=src");
}
