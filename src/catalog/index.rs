use crate::catalog::entry::Entry;
use crate::error::{CatalogError, CatalogResult};

pub fn parse_index(path: &str, raw: &str) -> CatalogResult<Vec<Entry>> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw).map_err(|err| CatalogError::corrupt(path, err))
}

/// Pretty-printed JSON array with a trailing newline.
pub fn serialize_index(entries: &[Entry]) -> String {
    // Serializing a Vec of plain string structs cannot fail.
    let data = serde_json::to_string_pretty(entries).unwrap_or_else(|_| "[]".to_string());
    format!("{data}\n")
}

/// Replace the entry carrying `old_slug` in place, or append when absent.
/// Any other entry already holding the new slug is dropped so slugs stay unique.
pub fn replace_entry(entries: &mut Vec<Entry>, old_slug: &str, entry: Entry) {
    let position = entries.iter().position(|e| e.slug == old_slug);
    let new_slug = entry.slug.clone();
    match position {
        Some(idx) => entries[idx] = entry,
        None => entries.push(entry),
    }
    let keep_idx = position.unwrap_or(entries.len() - 1);
    let mut idx = 0usize;
    entries.retain(|e| {
        let keep = idx == keep_idx || e.slug != new_slug;
        idx += 1;
        keep
    });
}

/// Insert keyed by the entry's own slug.
pub fn upsert_entry(entries: &mut Vec<Entry>, entry: Entry) {
    let slug = entry.slug.clone();
    replace_entry(entries, &slug, entry);
}

/// Remove every entry with `slug`; returns how many were removed.
pub fn remove_entry(entries: &mut Vec<Entry>, slug: &str) -> usize {
    let before = entries.len();
    entries.retain(|e| e.slug != slug);
    before - entries.len()
}
