use crate::catalog::entry::Entry;
use crate::catalog::index::{parse_index, serialize_index};
use crate::catalog::paths::CatalogPaths;
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Load the local copy of the index. A missing file is an empty catalog.
pub fn load(paths: &CatalogPaths) -> Result<Vec<Entry>> {
    let file = &paths.mirror_file;
    if !file.exists() {
        return Ok(Vec::new());
    }

    let raw =
        fs::read_to_string(file).with_context(|| format!("failed to read {}", file.display()))?;
    let entries = parse_index(&file.display().to_string(), &raw)
        .with_context(|| format!("failed to parse {}", file.display()))?;
    Ok(entries)
}

pub fn save(paths: &CatalogPaths, entries: &[Entry]) -> Result<PathBuf> {
    let file = paths.mirror_file.clone();
    if let Some(parent) = file.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(&file, serialize_index(entries))
        .with_context(|| format!("failed to write {}", file.display()))?;
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::entry::EntryDraft;
    use tempfile::tempdir;

    fn paths_in(root: &std::path::Path) -> CatalogPaths {
        CatalogPaths {
            catalog_home: root.join("home"),
            config_file: root.join("home/catalog.toml"),
            logs_dir: root.join("home/logs"),
            data_dir: root.join("data"),
            mirror_file: root.join("data/entries.json"),
        }
    }

    #[test]
    fn missing_mirror_is_empty() {
        let tmp = tempdir().expect("tempdir");
        assert!(load(&paths_in(tmp.path())).expect("load").is_empty());
    }

    #[test]
    fn save_then_load_preserves_order() {
        let tmp = tempdir().expect("tempdir");
        let paths = paths_in(tmp.path());
        let entries: Vec<Entry> = ["Zeta", "Alpha"]
            .into_iter()
            .map(|title| {
                EntryDraft {
                    title: title.into(),
                    platform: "Grok".into(),
                    image_url: "u".into(),
                    prompt: "p".into(),
                    ..EntryDraft::default()
                }
                .into_entry()
                .expect("valid")
            })
            .collect();

        let file = save(&paths, &entries).expect("save");
        let raw = fs::read_to_string(file).expect("read");
        assert!(raw.ends_with("]\n"));
        assert_eq!(load(&paths).expect("load"), entries);
    }
}
