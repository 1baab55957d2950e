//! The rule table and its evaluation function.
//!
//! A [`RuleSet`] maps every [`FieldKind`] to exactly one [`Rule`]. The table
//! is built once, validated at construction, and never mutated afterwards,
//! so it can be shared freely across threads. Evaluation is a pure function:
//! every outcome is returned as a [`Verdict`], never as an error.

use std::fmt;

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    CONTENT_MAX_LENGTH, CONTENT_MESSAGE, EMAIL_MESSAGE, EMAIL_PATTERN, PASSWORD_MESSAGE,
    PASSWORD_MIN_LENGTH, PASSWORD_MISMATCH_MESSAGE, REQUIRED_MESSAGE, TITLE_MAX_LENGTH,
    TITLE_MESSAGE, USERNAME_MAX_LENGTH, USERNAME_MESSAGE, USERNAME_MIN_LENGTH, USERNAME_PATTERN,
};

/// The categories of user-input field this crate knows how to validate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Username,
    Password,
    Email,
    PostTitle,
    PostContent,
}

impl FieldKind {
    /// All kinds, in table order.
    pub const ALL: [FieldKind; 5] = [
        FieldKind::Username,
        FieldKind::Password,
        FieldKind::Email,
        FieldKind::PostTitle,
        FieldKind::PostContent,
    ];

    /// The snake_case name used in configuration documents and error payloads.
    pub fn name(self) -> &'static str {
        match self {
            FieldKind::Username => "username",
            FieldKind::Password => "password",
            FieldKind::Email => "email",
            FieldKind::PostTitle => "post_title",
            FieldKind::PostContent => "post_content",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether a field may be left blank by the caller.
///
/// Requiredness is a property of the form, not of the rule table: the same
/// email rule backs a mandatory login email and an optional profile email.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Required,
    Optional,
}

/// The outcome of checking one value against one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Valid,
    Invalid(String),
}

impl Verdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid)
    }

    /// The failure message, if the verdict is invalid.
    pub fn message(&self) -> Option<&str> {
        match self {
            Verdict::Valid => None,
            Verdict::Invalid(message) => Some(message),
        }
    }
}

/// The constraint bundle for one field kind: optional length bounds, an
/// optional anchored pattern, and the message shown when a check fails.
#[derive(Debug, Clone)]
pub struct Rule {
    min_length: Option<usize>,
    max_length: Option<usize>,
    pattern: Option<Regex>,
    message: String,
}

impl Rule {
    /// Creates a rule carrying only a failure message. Constraints are added
    /// with the builder methods below.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            min_length: None,
            max_length: None,
            pattern: None,
            message: message.into(),
        }
    }

    /// Requires at least `length` characters.
    pub fn min_length(mut self, length: usize) -> Self {
        self.min_length = Some(length);
        self
    }

    /// Allows at most `length` characters.
    pub fn max_length(mut self, length: usize) -> Self {
        self.max_length = Some(length);
        self
    }

    /// Requires the value to match `pattern`. The pattern should be anchored
    /// with `^...$`; an unanchored pattern accepts any value containing a
    /// match, which is rarely what a form wants.
    pub fn pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// The message reported when this rule rejects a value.
    pub fn message(&self) -> &str {
        &self.message
    }

    fn check(&self, kind: FieldKind) -> Result<(), RuleSetError> {
        if self.message.is_empty() {
            return Err(RuleSetError::EmptyMessage(kind));
        }
        if let (Some(min), Some(max)) = (self.min_length, self.max_length) {
            if min > max {
                return Err(RuleSetError::InvertedBounds { kind, min, max });
            }
        }
        Ok(())
    }
}

/// A rule table failed to construct. These are authoring defects surfaced at
/// startup, not runtime validation failures.
#[derive(Debug, Error)]
pub enum RuleSetError {
    #[error("no rule defined for field kind `{0}`")]
    MissingKind(FieldKind),
    #[error("more than one rule defined for field kind `{0}`")]
    DuplicateKind(FieldKind),
    #[error("rule for `{0}` has an empty message")]
    EmptyMessage(FieldKind),
    #[error("rule for `{kind}` has min_length {min} greater than max_length {max}")]
    InvertedBounds {
        kind: FieldKind,
        min: usize,
        max: usize,
    },
    #[error("rule for `{kind}` has an invalid pattern: {source}")]
    BadPattern {
        kind: FieldKind,
        #[source]
        source: regex::Error,
    },
    #[error("failed to parse rule table: {0}")]
    Parse(String),
}

/// An immutable registry holding exactly one rule per field kind.
#[derive(Debug, Clone)]
pub struct RuleSet {
    username: Rule,
    password: Rule,
    email: Rule,
    post_title: Rule,
    post_content: Rule,
}

impl RuleSet {
    /// Builds a registry from `(kind, rule)` pairs, enforcing the table
    /// invariants: every kind covered exactly once, non-empty messages, and
    /// coherent length bounds.
    pub fn from_rules<I>(rules: I) -> Result<Self, RuleSetError>
    where
        I: IntoIterator<Item = (FieldKind, Rule)>,
    {
        let mut slots: [Option<Rule>; 5] = [None, None, None, None, None];
        for (kind, rule) in rules {
            rule.check(kind)?;
            let slot = &mut slots[kind as usize];
            if slot.replace(rule).is_some() {
                return Err(RuleSetError::DuplicateKind(kind));
            }
        }

        let [username, password, email, post_title, post_content] = slots;
        Ok(Self {
            username: username.ok_or(RuleSetError::MissingKind(FieldKind::Username))?,
            password: password.ok_or(RuleSetError::MissingKind(FieldKind::Password))?,
            email: email.ok_or(RuleSetError::MissingKind(FieldKind::Email))?,
            post_title: post_title.ok_or(RuleSetError::MissingKind(FieldKind::PostTitle))?,
            post_content: post_content
                .ok_or(RuleSetError::MissingKind(FieldKind::PostContent))?,
        })
    }

    /// The rule registered for `kind`.
    pub fn rule(&self, kind: FieldKind) -> &Rule {
        match kind {
            FieldKind::Username => &self.username,
            FieldKind::Password => &self.password,
            FieldKind::Email => &self.email,
            FieldKind::PostTitle => &self.post_title,
            FieldKind::PostContent => &self.post_content,
        }
    }

    /// Checks `value` against the rule for `kind`.
    ///
    /// An absent or empty value short-circuits: invalid with the generic
    /// required message when the field is [`Requirement::Required`], valid
    /// otherwise. Present values are checked against the rule's minimum
    /// length, maximum length, and pattern, in that order, and the rule's own
    /// message is returned verbatim on the first failed check. Lengths are
    /// counted in characters, not bytes.
    pub fn evaluate(
        &self,
        kind: FieldKind,
        value: Option<&str>,
        requirement: Requirement,
    ) -> Verdict {
        let value = match value {
            Some(value) if !value.is_empty() => value,
            _ => {
                return match requirement {
                    Requirement::Required => {
                        debug!("{kind}: rejected empty value for required field");
                        Verdict::Invalid(REQUIRED_MESSAGE.to_string())
                    }
                    Requirement::Optional => Verdict::Valid,
                };
            }
        };

        let rule = self.rule(kind);
        let length = value.chars().count();

        if let Some(min) = rule.min_length {
            if length < min {
                debug!("{kind}: length {length} below minimum {min}");
                return Verdict::Invalid(rule.message.clone());
            }
        }

        if let Some(max) = rule.max_length {
            if length > max {
                debug!("{kind}: length {length} above maximum {max}");
                return Verdict::Invalid(rule.message.clone());
            }
        }

        if let Some(pattern) = &rule.pattern {
            if !pattern.is_match(value) {
                debug!("{kind}: value does not match pattern");
                return Verdict::Invalid(rule.message.clone());
            }
        }

        Verdict::Valid
    }
}

impl Default for RuleSet {
    /// The built-in rule table.
    fn default() -> Self {
        let username_pattern =
            Regex::new(USERNAME_PATTERN).expect("built-in username pattern is well formed");
        let email_pattern =
            Regex::new(EMAIL_PATTERN).expect("built-in email pattern is well formed");

        Self::from_rules([
            (
                FieldKind::Username,
                Rule::new(USERNAME_MESSAGE)
                    .min_length(USERNAME_MIN_LENGTH)
                    .max_length(USERNAME_MAX_LENGTH)
                    .pattern(username_pattern),
            ),
            (
                FieldKind::Password,
                Rule::new(PASSWORD_MESSAGE).min_length(PASSWORD_MIN_LENGTH),
            ),
            (
                FieldKind::Email,
                Rule::new(EMAIL_MESSAGE).pattern(email_pattern),
            ),
            (
                FieldKind::PostTitle,
                Rule::new(TITLE_MESSAGE).max_length(TITLE_MAX_LENGTH),
            ),
            (
                FieldKind::PostContent,
                Rule::new(CONTENT_MESSAGE).max_length(CONTENT_MAX_LENGTH),
            ),
        ])
        .expect("built-in rule table is well formed")
    }
}

static DEFAULTS: Lazy<RuleSet> = Lazy::new(RuleSet::default);

/// The process-wide built-in rule table.
pub fn defaults() -> &'static RuleSet {
    &DEFAULTS
}

/// Checks that a password and its confirmation agree.
///
/// This is a plain equality comparison: both operands are user-supplied
/// plaintext from the same form, so constant-time comparison does not apply.
pub fn passwords_match(password: &str, confirmation: &str) -> Verdict {
    if password == confirmation {
        Verdict::Valid
    } else {
        Verdict::Invalid(PASSWORD_MISMATCH_MESSAGE.to_string())
    }
}
