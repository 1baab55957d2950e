//! Best-effort cleanup of user-supplied strings.
//!
//! These helpers do not replace validation: they normalize input before a
//! rule is applied, or defang text that is stored without a strict wrapper.

use ammonia::Builder;
use unicode_normalization::UnicodeNormalization;
use validator::ValidateNonControlCharacter;

use crate::registry::{defaults, FieldKind, Requirement, Verdict};

/// Trims surrounding whitespace and, when `max_length` is given, truncates
/// to that many characters. Truncation never splits a character.
pub fn sanitize_string(value: &str, max_length: Option<usize>) -> String {
    let trimmed = value.trim();
    match max_length {
        Some(max) => trimmed.chars().take(max).collect(),
        None => trimmed.to_string(),
    }
}

/// Trims and lowercases an email address, returning `None` unless the result
/// passes the built-in email rule.
pub fn normalize_email(value: &str) -> Option<String> {
    let email = value.trim().to_lowercase();
    match defaults().evaluate(FieldKind::Email, Some(&email), Requirement::Required) {
        Verdict::Valid => Some(email),
        Verdict::Invalid(_) => None,
    }
}

/// Strips all HTML from `value`, keeping only its text content.
pub fn strip_html(value: &str) -> String {
    Builder::new()
        .tags(Default::default())
        .clean(value)
        .to_string()
}

/// Reports whether `value` contains control characters.
pub fn has_control_characters(value: &str) -> bool {
    !value.validate_non_control_character()
}

/// Applies NFKC normalization so equivalent spellings compare equal.
pub fn normalize_unicode(value: &str) -> String {
    value.nfkc().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_string_trims_and_truncates() {
        assert_eq!(sanitize_string("  hello  ", None), "hello");
        assert_eq!(sanitize_string("  hello world  ", Some(5)), "hello");
        assert_eq!(sanitize_string("", Some(10)), "");
    }

    #[test]
    fn test_truncation_respects_character_boundaries() {
        // Four two-byte characters; a byte-based cut at 5 would panic.
        assert_eq!(sanitize_string("ééééé", Some(3)), "ééé");
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(
            normalize_email("  USER@Example.COM "),
            Some("user@example.com".to_string())
        );
        assert_eq!(normalize_email("not-an-email"), None);
        assert_eq!(normalize_email(""), None);
    }

    #[test]
    fn test_strip_html() {
        assert_eq!(strip_html("plain text"), "plain text");
        assert_eq!(strip_html("<b>bold</b> move"), "bold move");
    }

    #[test]
    fn test_has_control_characters() {
        assert!(!has_control_characters("ordinary text"));
        assert!(has_control_characters("broken\u{0000}text"));
    }

    #[test]
    fn test_normalize_unicode() {
        // The ligature ﬁ decomposes to "fi" under NFKC.
        assert_eq!(normalize_unicode("ﬁle"), "file");
    }
}
