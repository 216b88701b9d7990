use crate::catalog::entry::Entry;

pub const PROMPT_WRAP_COLUMNS: usize = 72;

/// Greedy word wrap. A line never exceeds `max_len` characters unless it
/// holds a single word that is longer on its own.
pub fn wrap_text(text: &str, max_len: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current_len > 0 && current_len + 1 + word_len > max_len {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Render the per-entry document stored at `entries/<slug>.md`.
pub fn render_entry(entry: &Entry) -> String {
    let prompt_block = wrap_text(&entry.prompt, PROMPT_WRAP_COLUMNS)
        .iter()
        .map(|line| format!("> {line}"))
        .collect::<Vec<_>>()
        .join("\n");

    let mut md = String::new();
    md.push_str(&format!("### {}\n\n", entry.title));
    md.push_str(&format!("![{}]({})\n\n", entry.title, entry.image_url));
    md.push_str(&format!("- **Platform:** {}\n", entry.platform));
    md.push_str(&format!("- **Date:** {}\n", entry.date));
    if !entry.tags.is_empty() {
        md.push_str(&format!("- **Tags:** {}\n", entry.tags));
    }
    md.push('\n');
    md.push_str(&prompt_block);
    md.push('\n');
    md
}
