//! Exclusion matching: decide whether a note is off-limits before any
//! property is applied to it.
//!
//! Folder rules are checked first. Content rules (tags and frontmatter
//! `key` / `key:value` patterns) only run when the note's metadata is
//! available. Bad rules (empty patterns, invalid regexes, empty keys) never
//! match and never stop the remaining rules from being checked.

use crate::types::{DocumentMetadata, DocumentView, ExclusionKind, ExclusionRule, FolderRule};
use crate::value::{stringify, strip_hash};
use regex::Regex;
use serde::Serialize;
use serde_yaml::{Mapping, Value as YamlValue};
use unicode_normalization::UnicodeNormalization;

/// Why a note was excluded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "rule", content = "pattern", rename_all = "lowercase")]
pub enum ExclusionReason {
    Folder(String),
    Tag(String),
    Property(String),
}

#[derive(Debug, Clone)]
enum FolderMatcher {
    Literal { pattern: String, normalized: String },
    Regex(Regex),
}

/// Precompiled exclusion rules.
#[derive(Debug, Clone)]
pub struct ExclusionMatcher {
    folders: Vec<FolderMatcher>,
    content_rules: Vec<ExclusionRule>,
}

impl ExclusionMatcher {
    pub fn new(folder_rules: &[FolderRule], content_rules: &[ExclusionRule]) -> Self {
        let folders = folder_rules
            .iter()
            .filter(|rule| !rule.pattern.is_empty())
            .filter_map(|rule| {
                if !rule.use_regex {
                    return Some(FolderMatcher::Literal {
                        pattern: rule.pattern.clone(),
                        normalized: normalize_folder_path(&rule.pattern),
                    });
                }
                match Regex::new(&rule.pattern) {
                    Ok(re) => Some(FolderMatcher::Regex(re)),
                    Err(e) => {
                        tracing::debug!(pattern = %rule.pattern, error = %e, "ignoring invalid folder regex");
                        None
                    }
                }
            })
            .collect();

        Self {
            folders,
            content_rules: content_rules.to_vec(),
        }
    }

    /// Whether any rule matches the document.
    pub fn is_excluded(&self, document: &DocumentView) -> bool {
        self.explain(document).is_some()
    }

    /// The first rule that matches the document, if any.
    pub fn explain(&self, document: &DocumentView) -> Option<ExclusionReason> {
        let reason = self.match_folder(&document.folder).or_else(|| {
            document
                .metadata
                .as_ref()
                .and_then(|metadata| self.match_content(metadata))
        });
        if let Some(ref reason) = reason {
            tracing::debug!(folder = %document.folder, ?reason, "document excluded");
        }
        reason
    }

    fn match_folder(&self, folder: &str) -> Option<ExclusionReason> {
        let folder = normalize_folder_path(folder);
        self.folders.iter().find_map(|matcher| match matcher {
            FolderMatcher::Literal { pattern, normalized } => {
                (*normalized == folder).then(|| ExclusionReason::Folder(pattern.clone()))
            }
            FolderMatcher::Regex(re) => {
                re.is_match(&folder).then(|| ExclusionReason::Folder(re.as_str().to_string()))
            }
        })
    }

    fn match_content(&self, metadata: &DocumentMetadata) -> Option<ExclusionReason> {
        let mut tag_set: Option<Vec<String>> = None;

        for rule in &self.content_rules {
            let pattern = rule.pattern.trim();
            if pattern.is_empty() {
                continue;
            }

            match rule.kind {
                ExclusionKind::Tag => {
                    let wanted = pattern.strip_prefix('#').unwrap_or(pattern);
                    let tags = tag_set.get_or_insert_with(|| collect_tags(metadata));
                    if tags.iter().any(|tag| tag == wanted) {
                        return Some(ExclusionReason::Tag(pattern.to_string()));
                    }
                }
                ExclusionKind::Property => {
                    let Some(frontmatter) = metadata.frontmatter.as_ref() else {
                        continue;
                    };
                    if property_matches(frontmatter, pattern) {
                        return Some(ExclusionReason::Property(pattern.to_string()));
                    }
                }
            }
        }

        None
    }
}

/// Check a document against folder and content rules in one call.
pub fn is_excluded(
    document: &DocumentView,
    folder_rules: &[FolderRule],
    content_rules: &[ExclusionRule],
) -> bool {
    ExclusionMatcher::new(folder_rules, content_rules).is_excluded(document)
}

/// Every tag on the note, without its `#`: inline tags first, then the
/// frontmatter `tags` key.
fn collect_tags(metadata: &DocumentMetadata) -> Vec<String> {
    let inline = metadata.tags.iter().map(|tag| strip_hash(tag));

    let frontmatter: Vec<String> = match metadata.frontmatter.as_ref().and_then(|fm| fm.get("tags")) {
        Some(YamlValue::Sequence(seq)) => seq.iter().map(|tag| strip_hash(&stringify(tag))).collect(),
        Some(YamlValue::String(s)) => s
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(strip_hash)
            .collect(),
        Some(YamlValue::Null) | None => Vec::new(),
        Some(other) => vec![strip_hash(&stringify(other))],
    };

    inline.chain(frontmatter).collect()
}

/// Match a `key` or `key:value` pattern against frontmatter.
fn property_matches(frontmatter: &Mapping, pattern: &str) -> bool {
    let Some((key, expected)) = pattern.split_once(':') else {
        // A key that is present with an explicit null still counts.
        return lookup_key(frontmatter, pattern).is_some();
    };

    let key = key.trim();
    let expected = expected.trim();
    if key.is_empty() {
        tracing::debug!(pattern, "ignoring property rule with empty key");
        return false;
    }

    match lookup_key(frontmatter, key) {
        Some(YamlValue::Sequence(seq)) => seq.iter().any(|item| scalar_matches(item, expected)),
        Some(value) => scalar_matches(value, expected),
        None => false,
    }
}

/// Find a frontmatter value by its key's text, so `2024:` or `true:` keys
/// are reachable from a rule.
fn lookup_key<'a>(frontmatter: &'a Mapping, key: &str) -> Option<&'a YamlValue> {
    frontmatter.get(key).or_else(|| {
        frontmatter
            .iter()
            .find(|(candidate, _)| !candidate.is_string() && stringify(candidate) == key)
            .map(|(_, value)| value)
    })
}

/// Compare a frontmatter value against a rule's expected text.
fn scalar_matches(value: &YamlValue, expected: &str) -> bool {
    stringify(value) == expected
}

/// Normalize a vault-relative folder path.
///
/// Backslashes become `/`, repeated slashes collapse, leading and trailing
/// slashes and `.` segments are dropped, non-breaking spaces become spaces and the result is
/// NFC-normalized. The vault root is `/`.
pub fn normalize_folder_path(path: &str) -> String {
    let replaced: String = path
        .chars()
        .map(|c| match c {
            '\\' => '/',
            '\u{00A0}' | '\u{202F}' => ' ',
            other => other,
        })
        .collect();

    let joined = replaced
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/");

    if joined.is_empty() {
        "/".to_string()
    } else {
        joined.nfc().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frontmatter(yaml: &str) -> Mapping {
        serde_yaml::from_str(yaml).unwrap()
    }

    fn doc(folder: &str, tags: &[&str], fm: Option<&str>) -> DocumentView {
        DocumentView::new(folder)
            .with_metadata(tags.iter().map(|t| t.to_string()).collect(), fm.map(frontmatter))
    }

    #[test]
    fn test_no_rules_never_excludes() {
        assert!(!is_excluded(&doc("notes", &["#draft"], Some("a: 1")), &[], &[]));
    }

    #[test]
    fn test_literal_folder_match() {
        let rules = [FolderRule::literal("Templates")];
        assert!(is_excluded(&DocumentView::new("Templates"), &rules, &[]));
        assert!(!is_excluded(&DocumentView::new("Templates/sub"), &rules, &[]));
        assert!(!is_excluded(&DocumentView::new("templates"), &rules, &[]));
    }

    #[test]
    fn test_literal_folder_is_normalized() {
        let rules = [FolderRule::literal("/Archive\\2023/")];
        assert!(is_excluded(&DocumentView::new("Archive/2023"), &rules, &[]));

        let root = [FolderRule::literal("/")];
        assert!(is_excluded(&DocumentView::new(""), &root, &[]));
    }

    #[test]
    fn test_regex_folder_is_a_search() {
        let rules = [FolderRule::regex("^Archive")];
        assert!(is_excluded(&DocumentView::new("Archive/2023"), &rules, &[]));
        assert!(!is_excluded(&DocumentView::new("Notes/Archive"), &rules, &[]));

        let unanchored = [FolderRule::regex("daily")];
        assert!(is_excluded(&DocumentView::new("journal/daily/2024"), &unanchored, &[]));
    }

    #[test]
    fn test_invalid_regex_never_matches() {
        let rules = [FolderRule::regex("(unclosed"), FolderRule::regex("Inbox")];
        assert!(!is_excluded(&DocumentView::new("(unclosed"), &rules, &[]));
        assert!(is_excluded(&DocumentView::new("Inbox"), &rules, &[]));
    }

    #[test]
    fn test_empty_folder_pattern_is_ignored() {
        let rules = [FolderRule::literal("")];
        assert!(!is_excluded(&DocumentView::new(""), &rules, &[]));
    }

    #[test]
    fn test_tag_rule_matches_inline_and_frontmatter() {
        let rules = [ExclusionRule::tag("#draft")];
        assert!(is_excluded(&doc("", &["#draft"], None), &[], &rules));
        assert!(is_excluded(&doc("", &[], Some("tags: [draft]")), &[], &rules));
        assert!(is_excluded(&doc("", &[], Some("tags: ['#draft']")), &[], &rules));
        assert!(is_excluded(&doc("", &[], Some("tags: review, draft")), &[], &rules));
        assert!(!is_excluded(&doc("", &["#Draft"], Some("tags: [drafts]")), &[], &rules));
    }

    #[test]
    fn test_tag_rule_without_hash() {
        let rules = [ExclusionRule::tag("project/x")];
        assert!(is_excluded(&doc("", &["#project/x"], None), &[], &rules));
        assert!(!is_excluded(&doc("", &["#project"], None), &[], &rules));
    }

    #[test]
    fn test_content_rules_need_metadata() {
        let rules = [ExclusionRule::tag("draft")];
        assert!(!is_excluded(&DocumentView::new(""), &[], &rules));
    }

    #[test]
    fn test_property_existence() {
        let rules = [ExclusionRule::property("template")];
        assert!(is_excluded(&doc("", &[], Some("template: true")), &[], &rules));
        assert!(is_excluded(&doc("", &[], Some("template: null")), &[], &rules));
        assert!(is_excluded(&doc("", &[], Some("template:")), &[], &rules));
        assert!(!is_excluded(&doc("", &[], Some("Template: true")), &[], &rules));
        assert!(!is_excluded(&doc("", &[], None), &[], &rules));
    }

    #[test]
    fn test_property_value() {
        let rules = [ExclusionRule::property("status:done")];
        assert!(is_excluded(&doc("", &[], Some("status: done")), &[], &rules));
        assert!(is_excluded(&doc("", &[], Some("status: [doing, done]")), &[], &rules));
        assert!(!is_excluded(&doc("", &[], Some("status: doing")), &[], &rules));
        assert!(!is_excluded(&doc("", &[], Some("other: done")), &[], &rules));
    }

    #[test]
    fn test_property_value_trims_and_stringifies() {
        let rules = [ExclusionRule::property(" priority : 3 ")];
        assert!(is_excluded(&doc("", &[], Some("priority: 3")), &[], &rules));

        let rules = [ExclusionRule::property("url:https://example.com")];
        assert!(is_excluded(&doc("", &[], Some("url: 'https://example.com'")), &[], &rules));

        let rules = [ExclusionRule::property("done:true")];
        assert!(is_excluded(&doc("", &[], Some("done: true")), &[], &rules));
    }

    #[test]
    fn test_property_keys_are_compared_as_text() {
        let document = doc("", &[], Some("2024: x\ntrue: yes\n1.5: [a, b]"));
        assert!(is_excluded(&document, &[], &[ExclusionRule::property("2024")]));
        assert!(is_excluded(&document, &[], &[ExclusionRule::property("2024:x")]));
        assert!(is_excluded(&document, &[], &[ExclusionRule::property("true: yes")]));
        assert!(is_excluded(&document, &[], &[ExclusionRule::property("1.5:b")]));
        assert!(!is_excluded(&document, &[], &[ExclusionRule::property("2024:y")]));
        assert!(!is_excluded(&document, &[], &[ExclusionRule::property("2025")]));
    }

    #[test]
    fn test_property_rule_with_empty_key_is_skipped() {
        let rules = [ExclusionRule::property(":done"), ExclusionRule::property("   ")];
        assert!(!is_excluded(&doc("", &[], Some("'': done")), &[], &rules));
    }

    #[test]
    fn test_explain_reports_first_match() {
        let matcher = ExclusionMatcher::new(
            &[FolderRule::literal("Inbox")],
            &[ExclusionRule::property("status:done"), ExclusionRule::tag("draft")],
        );
        let document = doc("Inbox", &["#draft"], Some("status: done"));
        assert_eq!(matcher.explain(&document), Some(ExclusionReason::Folder("Inbox".into())));

        let document = doc("Notes", &["#draft"], Some("status: done"));
        assert_eq!(matcher.explain(&document), Some(ExclusionReason::Property("status:done".into())));

        let document = doc("Notes", &[], Some("status: open"));
        assert_eq!(matcher.explain(&document), None);
    }

    #[test]
    fn test_normalize_folder_path() {
        assert_eq!(normalize_folder_path(""), "/");
        assert_eq!(normalize_folder_path("/"), "/");
        assert_eq!(normalize_folder_path("a//b/"), "a/b");
        assert_eq!(normalize_folder_path("a\\b"), "a/b");
        assert_eq!(normalize_folder_path("my\u{00A0}notes"), "my notes");
        assert_eq!(normalize_folder_path("cafe\u{0301}"), "caf\u{00E9}");
        assert_eq!(normalize_folder_path("./Templates/."), "Templates");
        assert_eq!(normalize_folder_path("."), "/");
    }

    #[test]
    fn test_current_dir_segments_do_not_hide_folder() {
        let literal = [FolderRule::literal("Templates")];
        assert!(is_excluded(&DocumentView::new("./Templates"), &literal, &[]));

        let anchored = [FolderRule::regex("^Templates")];
        assert!(is_excluded(&DocumentView::new("./Templates"), &anchored, &[]));
    }
}
