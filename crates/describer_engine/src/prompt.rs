pub const SYSTEM_PROMPT: &str = "You write short descriptions for bookmarked web links. \
Reply with one or two plain sentences describing what the page offers. \
No markdown, no quotes, no preamble.";

/// User message for one link.
pub fn build_prompt(title: &str, url: &str) -> String {
    let title = title.trim();
    let title = if title.is_empty() { "(untitled)" } else { title };
    format!(
        "Write a concise description (at most 200 characters) for this link.\nTitle: {}\nURL: {}",
        title,
        url.trim()
    )
}

/// Trims whitespace and one pair of surrounding quotes. Returns `None` when nothing is left.
pub fn clean_description(raw: &str) -> Option<String> {
    let mut text = raw.trim();
    for (open, close) in [('"', '"'), ('\'', '\''), ('\u{201c}', '\u{201d}')] {
        if text.len() >= open.len_utf8() + close.len_utf8()
            && text.starts_with(open)
            && text.ends_with(close)
        {
            text = text[open.len_utf8()..text.len() - close.len_utf8()].trim();
            break;
        }
    }
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_mentions_title_and_url() {
        let prompt = build_prompt("  Rust ", "https://www.rust-lang.org ");
        assert!(prompt.contains("Title: Rust\n"));
        assert!(prompt.ends_with("URL: https://www.rust-lang.org"));
    }

    #[test]
    fn untitled_links_get_placeholder() {
        assert!(build_prompt("", "https://a.example").contains("(untitled)"));
    }

    #[test]
    fn clean_strips_quotes_and_whitespace() {
        assert_eq!(
            clean_description("  \"A language.\"\n").as_deref(),
            Some("A language.")
        );
        assert_eq!(
            clean_description("\u{201c}Smart quotes\u{201d}").as_deref(),
            Some("Smart quotes")
        );
        assert_eq!(clean_description("it's fine").as_deref(), Some("it's fine"));
    }

    #[test]
    fn clean_rejects_blank() {
        assert_eq!(clean_description("   "), None);
        assert_eq!(clean_description("\"\""), None);
        assert_eq!(clean_description("\"").as_deref(), Some("\""));
    }
}
