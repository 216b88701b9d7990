use crate::catalog::entry::Entry;

/// Selector value meaning "no tag/platform restriction".
pub const SELECT_ALL: &str = "all";

fn selector_matches(entry: &Entry, selector: &str) -> bool {
    let selector = selector.trim().to_lowercase();
    if selector.is_empty() || selector == SELECT_ALL {
        return true;
    }
    entry.platform.to_lowercase().contains(&selector)
        || entry.tag_list().any(|tag| tag.to_lowercase() == selector)
}

fn text_matches(entry: &Entry, text: &str) -> bool {
    let q = text.trim().to_lowercase();
    if q.is_empty() {
        return true;
    }
    entry.title.to_lowercase().contains(&q)
        || entry.prompt.to_lowercase().contains(&q)
        || entry.tags.to_lowercase().contains(&q)
        || entry.platform.to_lowercase().contains(&q)
}

/// Entries matching both filters, newest (last inserted) first.
pub fn matching<'a>(
    entries: &'a [Entry],
    text: &'a str,
    selector: &'a str,
) -> impl Iterator<Item = &'a Entry> + Clone + 'a {
    entries
        .iter()
        .rev()
        .filter(move |e| selector_matches(e, selector))
        .filter(move |e| text_matches(e, text))
}

/// The visible page: [`matching`] truncated to `page_size`. Nothing is
/// evaluated until iterated and the view can be cloned to restart it.
pub fn query<'a>(
    entries: &'a [Entry],
    text: &'a str,
    selector: &'a str,
    page_size: usize,
) -> impl Iterator<Item = &'a Entry> + Clone + 'a {
    matching(entries, text, selector).take(page_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str, platform: &str, tags: &str, prompt: &str) -> Entry {
        Entry {
            slug: crate::catalog::entry::slugify(title),
            title: title.into(),
            image_url: "https://x/y.png".into(),
            platform: platform.into(),
            date: "2024-05-01".into(),
            tags: tags.into(),
            prompt: prompt.into(),
        }
    }

    fn sample() -> Vec<Entry> {
        vec![
            entry("Sunset Over Kyoto", "Midjourney", "", "a calm sunset ..."),
            entry("Beach Day", "ChatGPT", "beach, summer", "waves and sand"),
            entry("Neon Alley", "Grok", "city, night", "rain soaked street"),
        ]
    }

    fn slugs<'a>(view: impl Iterator<Item = &'a Entry>) -> Vec<&'a str> {
        view.map(|e| e.slug.as_str()).collect()
    }

    #[test]
    fn kyoto_example_filters() {
        let entries = sample();
        assert_eq!(
            slugs(query(&entries, "kyoto", "", 10)),
            vec!["sunset-over-kyoto"]
        );
        assert!(slugs(query(&entries, "", "midjourney", 10)).contains(&"sunset-over-kyoto"));
        assert!(!slugs(query(&entries, "", "beach", 10)).contains(&"sunset-over-kyoto"));
    }

    #[test]
    fn newest_first_and_truncated() {
        let entries = sample();
        assert_eq!(
            slugs(query(&entries, "", SELECT_ALL, 2)),
            vec!["neon-alley", "beach-day"]
        );
    }

    #[test]
    fn tag_selector_requires_exact_tag() {
        let entries = sample();
        assert_eq!(slugs(query(&entries, "", "beach", 10)), vec!["beach-day"]);
        assert!(slugs(query(&entries, "", "bea", 10)).is_empty());
        assert_eq!(slugs(query(&entries, "", "NIGHT", 10)), vec!["neon-alley"]);
    }

    #[test]
    fn platform_selector_is_substring() {
        let entries = sample();
        assert_eq!(slugs(query(&entries, "", "chat", 10)), vec!["beach-day"]);
    }

    #[test]
    fn text_searches_prompt_tags_and_platform() {
        let entries = sample();
        assert_eq!(slugs(query(&entries, "SAND", "", 10)), vec!["beach-day"]);
        assert_eq!(slugs(query(&entries, "summ", "", 10)), vec!["beach-day"]);
        assert_eq!(slugs(query(&entries, "grok", "", 10)), vec!["neon-alley"]);
        assert_eq!(slugs(query(&entries, "rain", "grok", 10)), vec!["neon-alley"]);
        assert!(slugs(query(&entries, "rain", "chatgpt", 10)).is_empty());
    }

    #[test]
    fn view_is_restartable() {
        let entries = sample();
        let view = query(&entries, "", "", 3);
        let first: Vec<_> = slugs(view.clone());
        let second: Vec<_> = slugs(view);
        assert_eq!(first, second);
    }
}
