//! A validated account handle.

use std::fmt;

use anyhow::{bail, Result};

use crate::registry::{defaults, FieldKind, Requirement, RuleSet, Verdict};

/// A username that satisfied the username rule at construction time.
/// Surrounding whitespace is stripped before validation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Username {
    username: String,
}

impl Username {
    /// Validates `raw` against the built-in username rule.
    pub fn new(raw: &str) -> Result<Self> {
        Self::with_rules(raw, defaults())
    }

    /// Validates `raw` against a caller-supplied rule table.
    pub fn with_rules(raw: &str, rules: &RuleSet) -> Result<Self> {
        let trimmed = raw.trim();
        match rules.evaluate(FieldKind::Username, Some(trimmed), Requirement::Required) {
            Verdict::Valid => Ok(Self {
                username: trimmed.to_string(),
            }),
            Verdict::Invalid(message) => bail!("{message}"),
        }
    }

    /// Returns the validated username as a string slice
    pub fn as_str(&self) -> &str {
        &self.username
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.username)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.username
    }
}
