//! A validated email address.
//!
//! Addresses are trimmed and lowercased before validation so that two
//! spellings of the same mailbox compare equal.

use std::fmt;

use anyhow::{bail, Result};

use crate::registry::{defaults, FieldKind, Requirement, RuleSet, Verdict};

/// An email address that satisfied the email rule at construction time,
/// stored in its normalized (trimmed, lowercased) form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EmailAddress {
    email: String,
}

impl EmailAddress {
    /// Validates `raw` against the built-in email rule.
    pub fn new(raw: &str) -> Result<Self> {
        Self::with_rules(raw, defaults())
    }

    /// Validates `raw` against a caller-supplied rule table.
    pub fn with_rules(raw: &str, rules: &RuleSet) -> Result<Self> {
        let normalized = raw.trim().to_lowercase();
        match rules.evaluate(FieldKind::Email, Some(&normalized), Requirement::Required) {
            Verdict::Valid => Ok(Self { email: normalized }),
            Verdict::Invalid(message) => bail!("{message}"),
        }
    }

    /// Returns the normalized address as a string slice
    pub fn as_str(&self) -> &str {
        &self.email
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.email)
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.email
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        let valid_emails = vec![
            "user@example.com",
            "user.name@example.com",
            "user+tag@example.com",
            "USER@EXAMPLE.COM",       // Should be normalized to lowercase
            "   user@example.com   ", // Should be trimmed
        ];

        for email in valid_emails {
            let result = EmailAddress::new(email);
            assert!(result.is_ok(), "Should accept valid email: {}", email);
        }
    }

    #[test]
    fn test_invalid_emails() {
        let invalid_emails = vec![
            "", // Empty
            "not-an-email",
            "@example.com",
            "user@",
            "user@domain",
            "user name@example.com",
        ];

        for email in invalid_emails {
            let result = EmailAddress::new(email);
            assert!(result.is_err(), "Should reject invalid email: {}", email);
        }
    }

    #[test]
    fn test_email_normalization() {
        let email = EmailAddress::new("   USER@EXAMPLE.COM   ").unwrap();
        assert_eq!(email.as_str(), "user@example.com");
    }

    #[test]
    fn test_display_and_asref() {
        let email = EmailAddress::new("user@example.com").unwrap();
        assert_eq!(format!("{}", email), "user@example.com");

        let reference: &str = email.as_ref();
        assert_eq!(reference, "user@example.com");
    }
}
