use crate::error::{CatalogError, CatalogResult};
use serde::{Deserialize, Serialize};

pub const MAX_SLUG_CHARS: usize = 60;

/// One cataloged image. Field order matches `entries.json` on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub slug: String,
    pub title: String,
    pub image_url: String,
    pub platform: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub tags: String,
    pub prompt: String,
}

/// Raw user input before validation and slug derivation.
#[derive(Debug, Clone, Default)]
pub struct EntryDraft {
    pub title: String,
    pub platform: String,
    pub image_url: String,
    pub date: String,
    pub tags: String,
    pub prompt: String,
}

/// Lowercase, collapse every run of non `[a-z0-9]` characters into one hyphen,
/// strip leading/trailing hyphens and cap at [`MAX_SLUG_CHARS`].
pub fn slugify(text: &str) -> String {
    let lower = text.to_lowercase();
    let mut out = String::with_capacity(lower.len());
    let mut pending_sep = false;
    for ch in lower.chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_sep && !out.is_empty() {
                out.push('-');
            }
            pending_sep = false;
            out.push(ch);
        } else {
            pending_sep = true;
        }
    }
    // Output is pure ASCII here, so byte truncation is char-safe.
    out.truncate(MAX_SLUG_CHARS);
    while out.ends_with('-') {
        out.pop();
    }
    out
}

impl EntryDraft {
    fn trimmed(&self) -> EntryDraft {
        EntryDraft {
            title: self.title.trim().to_string(),
            platform: self.platform.trim().to_string(),
            image_url: self.image_url.trim().to_string(),
            date: self.date.trim().to_string(),
            tags: self.tags.trim().to_string(),
            prompt: self.prompt.trim().to_string(),
        }
    }

    /// Validate required fields and derive the slug. Runs before any remote call.
    pub fn into_entry(self) -> CatalogResult<Entry> {
        let draft = self.trimmed();
        let missing: Vec<&str> = [
            ("title", draft.title.is_empty()),
            ("platform", draft.platform.is_empty()),
            ("imageUrl", draft.image_url.is_empty()),
            ("prompt", draft.prompt.is_empty()),
        ]
        .into_iter()
        .filter_map(|(name, empty)| empty.then_some(name))
        .collect();
        if !missing.is_empty() {
            return Err(CatalogError::Validation(format!(
                "please fill in all required fields (missing: {})",
                missing.join(", ")
            )));
        }

        let slug = slugify(&draft.title);
        if slug.is_empty() {
            return Err(CatalogError::Validation(format!(
                "title `{}` must contain at least one ASCII letter or digit",
                draft.title
            )));
        }

        Ok(Entry {
            slug,
            title: draft.title,
            image_url: draft.image_url,
            platform: draft.platform,
            date: draft.date,
            tags: draft.tags,
            prompt: draft.prompt,
        })
    }
}

impl From<&Entry> for EntryDraft {
    fn from(entry: &Entry) -> Self {
        EntryDraft {
            title: entry.title.clone(),
            platform: entry.platform.clone(),
            image_url: entry.image_url.clone(),
            date: entry.date.clone(),
            tags: entry.tags.clone(),
            prompt: entry.prompt.clone(),
        }
    }
}

impl Entry {
    pub fn tag_list(&self) -> impl Iterator<Item = &str> + Clone {
        self.tags.split(',').map(str::trim).filter(|t| !t.is_empty())
    }

    pub fn entry_file_path(&self) -> String {
        entry_file_path(&self.slug)
    }
}

pub fn entry_file_path(slug: &str) -> String {
    format!("{}/{slug}.md", super::ENTRIES_DIR)
}

/// Badge class used when listing entries, keyed off the platform name.
pub fn platform_class(platform: &str) -> &'static str {
    let p = platform.to_lowercase();
    if p.is_empty() {
        "other"
    } else if p.contains("gemini") {
        "gemini"
    } else if p.contains("grok") {
        "grok"
    } else if p.contains("meta") {
        "meta-ai"
    } else if p.contains("chatgpt") || p.contains("dall") {
        "chatgpt"
    } else if p.contains("midjourney") {
        "midjourney"
    } else {
        "other"
    }
}
