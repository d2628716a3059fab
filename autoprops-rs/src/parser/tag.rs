//! Inline tag extraction (#tag and #tag/subtag) from a note body.

use regex::Regex;
use std::sync::LazyLock;

// A tag is # followed by word characters, `/` or `-`, and must not follow a
// word character, `&` (HTML entity), `#` or `/` (URL fragment).
static TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^\w&#/])#([\w/-]+)").unwrap()
});

// Opening or closing fence of a code block.
static FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(`{3,}|~{3,})").unwrap()
});

static INLINE_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"`[^`\n]*`").unwrap()
});

static WIKILINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\[[^\]\n]*\]\]").unwrap()
});

/// Parse inline tags, in order of appearance, each with its leading `#`.
///
/// Tags inside fenced code, inline code and wikilinks are ignored, as are
/// purely numeric ones like `#123`.
pub fn parse_inline_tags(body: &str) -> Vec<String> {
    let mut tags = Vec::new();
    let mut open_fence: Option<String> = None;

    for line in body.lines() {
        if let Some(cap) = FENCE.captures(line) {
            let marker = &cap[1];
            match &open_fence {
                None => open_fence = Some(marker.to_string()),
                Some(open) if marker.starts_with(open.as_str()) => open_fence = None,
                Some(_) => {}
            }
            continue;
        }
        if open_fence.is_some() {
            continue;
        }

        let without_code = INLINE_CODE.replace_all(line, " ");
        let cleaned = WIKILINK.replace_all(&without_code, " ");

        for cap in TAG.captures_iter(&cleaned) {
            let name = &cap[1];
            if name.chars().any(|c| !c.is_ascii_digit()) {
                tags.push(format!("#{}", name));
            }
        }
    }

    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_and_nested_tags() {
        assert_eq!(parse_inline_tags("Some #rust and #tray/urgent here."), vec!["#rust", "#tray/urgent"]);
    }

    #[test]
    fn test_hyphen_underscore_unicode() {
        assert_eq!(parse_inline_tags("#my-tag #_private #日本"), vec!["#my-tag", "#_private", "#日本"]);
    }

    #[test]
    fn test_not_tags() {
        assert!(parse_inline_tags("Issue #123 is fixed.").is_empty());
        assert!(parse_inline_tags("# Heading\n## Sub").is_empty());
        assert!(parse_inline_tags("Use &#39; entity").is_empty());
        assert!(parse_inline_tags("see https://x.com/#anchor and a#b").is_empty());
    }

    #[test]
    fn test_code_is_skipped() {
        let body = "Real #tag\n\n```\n#fake\n```\nand `#inline` here\n~~~~\n#also-fake\n~~~~\n#after";
        assert_eq!(parse_inline_tags(body), vec!["#tag", "#after"]);
    }

    #[test]
    fn test_wikilink_heading_is_skipped() {
        assert_eq!(parse_inline_tags("#tag and [[#heading]] and [[Note#h]]"), vec!["#tag"]);
    }

    #[test]
    fn test_duplicates_are_kept() {
        assert_eq!(parse_inline_tags("#a #b #a"), vec!["#a", "#b", "#a"]);
    }
}
