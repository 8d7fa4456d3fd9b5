//! Small text utilities shared by the session and the terminal front end.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::Language;

/// Default preview length used by [`truncate_text`] callers.
pub const DEFAULT_PREVIEW_CHARS: usize = 100;

static DEVANAGARI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\u{0900}-\u{097F}]").expect("Invalid devanagari regex"));

/// Truncate `text` to at most `max_chars` characters, appending `...` when cut.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        None => text.to_string(),
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
    }
}

/// Guess the language of `text`: any Devanagari character means Hindi.
pub fn detect_language(text: &str) -> Language {
    if DEVANAGARI.is_match(text) {
        Language::Hindi
    } else {
        Language::English
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_text_unchanged() {
        assert_eq!(truncate_text("hello", 10), "hello");
        assert_eq!(truncate_text("hello", 5), "hello");
        assert_eq!(truncate_text("", 0), "");
    }

    #[test]
    fn test_truncate_long_text() {
        assert_eq!(truncate_text("hello world", 5), "hello...");
        assert_eq!(truncate_text("abc", 0), "...");
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let text = "नमस्ते दुनिया";
        let cut = truncate_text(text, 3);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 6);
    }

    #[test]
    fn test_detect_language() {
        assert_eq!(detect_language("How are you?"), Language::English);
        assert_eq!(detect_language("आप कैसे हैं?"), Language::Hindi);
        assert_eq!(detect_language("mixed नमस्ते text"), Language::Hindi);
        assert_eq!(detect_language(""), Language::English);
    }
}
