//! Validated post text.
//!
//! Titles and bodies share a pipeline: trim, check against the field's rule,
//! reject control characters and embedded HTML, then normalize Unicode so
//! equivalent spellings are stored identically.

use std::fmt;

use ammonia::is_html;
use anyhow::{bail, Result};
use unicode_normalization::UnicodeNormalization;
use validator::ValidateNonControlCharacter;

use crate::registry::{defaults, FieldKind, Requirement, RuleSet, Verdict};

fn validated_text(raw: &str, kind: FieldKind, rules: &RuleSet) -> Result<String> {
    let trimmed = raw.trim();

    match rules.evaluate(kind, Some(trimmed), Requirement::Required) {
        Verdict::Valid => {}
        Verdict::Invalid(message) => bail!("{message}"),
    }

    if !trimmed.validate_non_control_character() {
        bail!("Text contains invalid control characters");
    }

    if is_html(trimmed) {
        bail!("Text cannot contain HTML");
    }

    Ok(trimmed.nfkc().collect::<String>())
}

/// A post title that satisfied the post-title rule at construction time.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PostTitle {
    title: String,
}

impl PostTitle {
    /// Validates `raw` against the built-in post-title rule.
    pub fn new(raw: &str) -> Result<Self> {
        Self::with_rules(raw, defaults())
    }

    /// Validates `raw` against a caller-supplied rule table.
    pub fn with_rules(raw: &str, rules: &RuleSet) -> Result<Self> {
        Ok(Self {
            title: validated_text(raw, FieldKind::PostTitle, rules)?,
        })
    }

    /// Returns the validated title as a string slice
    pub fn as_str(&self) -> &str {
        &self.title
    }
}

impl fmt::Display for PostTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

impl AsRef<str> for PostTitle {
    fn as_ref(&self) -> &str {
        &self.title
    }
}

/// A post body that satisfied the post-content rule at construction time.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PostContent {
    content: String,
}

impl PostContent {
    /// Validates `raw` against the built-in post-content rule.
    pub fn new(raw: &str) -> Result<Self> {
        Self::with_rules(raw, defaults())
    }

    /// Validates `raw` against a caller-supplied rule table.
    pub fn with_rules(raw: &str, rules: &RuleSet) -> Result<Self> {
        Ok(Self {
            content: validated_text(raw, FieldKind::PostContent, rules)?,
        })
    }

    /// Returns the validated body as a string slice
    pub fn as_str(&self) -> &str {
        &self.content
    }
}

impl fmt::Display for PostContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl AsRef<str> for PostContent {
    fn as_ref(&self) -> &str {
        &self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_titles() {
        let valid_titles = vec![
            "Morning pages",
            "Notes from the 3rd retreat",
            "  A padded title  ", // Should be trimmed
            "Unicode is fine: ñáéíóú",
        ];

        for title in valid_titles {
            let result = PostTitle::new(title);
            assert!(result.is_ok(), "Should accept valid title: {}", title);
        }
    }

    #[test]
    fn test_invalid_titles() {
        let binding = "x".repeat(101);
        let invalid_titles = vec![
            "",                           // Empty
            "   ",                        // Only whitespace
            &binding,                     // Too long
            "<h1>Heading</h1>",           // HTML
            "Broken\u{0000}title",        // Control character
        ];

        for title in invalid_titles {
            let result = PostTitle::new(title);
            assert!(result.is_err(), "Should reject invalid title: {}", title);
        }
    }

    #[test]
    fn test_content_length_limit() {
        let at_limit = "x".repeat(5_000);
        assert!(PostContent::new(&at_limit).is_ok());

        let over_limit = "x".repeat(5_001);
        assert!(PostContent::new(&over_limit).is_err());
    }

    #[test]
    fn test_content_rejects_html() {
        assert!(PostContent::new("<script>alert(1)</script>").is_err());
        assert!(PostContent::new("plain text body").is_ok());
    }

    #[test]
    fn test_unicode_normalization() {
        let title = PostTitle::new("café").unwrap();
        assert_eq!(title.as_str().chars().count(), 4);
    }

    #[test]
    fn test_display_and_asref() {
        let content = PostContent::new("An ordinary body").unwrap();
        assert_eq!(format!("{}", content), "An ordinary body");

        let reference: &str = content.as_ref();
        assert_eq!(reference, "An ordinary body");
    }
}
