pub mod audit;
pub mod config;
pub mod entry;
pub mod index;
pub mod markdown;
pub mod mirror;
pub mod model;
pub mod paths;
pub mod query;
pub mod sync;
pub mod util;

/// Repository-relative path of the authoritative index.
pub const INDEX_FILE: &str = "entries.json";
/// Directory holding one generated Markdown file per entry.
pub const ENTRIES_DIR: &str = "entries";
