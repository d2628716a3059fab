//! Tag sanitization.
//!
//! Obsidian tags may contain letters, digits, `_`, `-` and `/`. Anything on
//! the denylist below is stripped before a value is stored under `tags`.

/// Characters that may not appear in a tag.
pub static KNOWN_BAD_CHARACTERS: &[char] = &[
    '‒', '–', '—', '―', '⁏', '‽', '‘', '‚', '‛', '‹', '›', '“', '”', '„', '‟',
    '⁅', '⁆', '⁋', '⁎', '⁑', '⁄', '⁊', '‰', '‱', '⁒', '†', '‡', '•', '‣', '⁃',
    '⁌', '⁍', '′', '‵', '‸', '※', '⁐', '⁁', '⁂', '‖', '‑', '″', '‴', '⁗', '‶',
    '‷', '`', '^', '‾', '‗', '⁓', ';', ':', '!', '‼', '⁉', '?', '⁈', '⁇', '.',
    '․', '‥', '…', '\'', '"', '(', ')', '[', ']', '{', '}', '@', '*', '&', '%',
    '⁔', '+', '<', '=', '>', '|', '~', '$', '⁕', '⁖', '⁘', '⁙', '⁚', '⁛', '⁜',
    '⁝', '⁞', '⸀', '⸁', '⸂', '⸃', '⸄', '⸅', '⸆', '⸇', '⸈', '⸉', '⸊', '⸋', '⸌',
    '⸍', '⸎', '⸏', '⸐', '⸑', '⸒', '⸓', '⸔', '⸕', '⸖', '⸗', '⸜', '⸝', ' ', '#',
];

/// Whether `c` is illegal inside a tag.
pub fn is_bad_tag_char(c: char) -> bool {
    KNOWN_BAD_CHARACTERS.contains(&c)
}

/// Remove every denylisted character from `raw`.
pub fn sanitize_tag(raw: &str) -> String {
    raw.chars().filter(|c| !is_bad_tag_char(*c)).collect()
}
