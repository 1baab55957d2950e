//! Loading a rule table from a configuration document.
//!
//! The built-in table covers the common case, but deployments can tune
//! bounds and copy without recompiling by shipping a YAML or JSON document.
//! Documents are parsed into a raw form first, then compiled into a
//! [`RuleSet`] so that every authoring invariant is re-checked on load.

use log::info;
use regex::Regex;
use serde::Deserialize;

use crate::registry::{FieldKind, Rule, RuleSet, RuleSetError};

/// One rule as it appears in a configuration document. The pattern is kept
/// as a string until compilation.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawRule {
    #[serde(default)]
    pub min_length: Option<usize>,
    #[serde(default)]
    pub max_length: Option<usize>,
    #[serde(default)]
    pub pattern: Option<String>,
    pub message: String,
}

impl RawRule {
    fn compile(self, kind: FieldKind) -> Result<Rule, RuleSetError> {
        let mut rule = Rule::new(self.message);
        if let Some(min) = self.min_length {
            rule = rule.min_length(min);
        }
        if let Some(max) = self.max_length {
            rule = rule.max_length(max);
        }
        if let Some(pattern) = self.pattern {
            let pattern = Regex::new(&pattern)
                .map_err(|source| RuleSetError::BadPattern { kind, source })?;
            rule = rule.pattern(pattern);
        }
        Ok(rule)
    }
}

/// A full rule table as it appears in a configuration document.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawRuleSet {
    pub username: RawRule,
    pub password: RawRule,
    pub email: RawRule,
    pub post_title: RawRule,
    pub post_content: RawRule,
}

impl RawRuleSet {
    /// Compiles the raw table into a validated registry.
    pub fn compile(self) -> Result<RuleSet, RuleSetError> {
        let rules = RuleSet::from_rules([
            (FieldKind::Username, self.username.compile(FieldKind::Username)?),
            (FieldKind::Password, self.password.compile(FieldKind::Password)?),
            (FieldKind::Email, self.email.compile(FieldKind::Email)?),
            (
                FieldKind::PostTitle,
                self.post_title.compile(FieldKind::PostTitle)?,
            ),
            (
                FieldKind::PostContent,
                self.post_content.compile(FieldKind::PostContent)?,
            ),
        ])?;
        info!("loaded rule table from configuration document");
        Ok(rules)
    }
}

impl RuleSet {
    /// Parses and compiles a YAML rule table.
    pub fn from_yaml_str(document: &str) -> Result<Self, RuleSetError> {
        let raw: RawRuleSet = serde_yaml::from_str(document)
            .map_err(|error| RuleSetError::Parse(error.to_string()))?;
        raw.compile()
    }

    /// Parses and compiles a JSON rule table.
    pub fn from_json_str(document: &str) -> Result<Self, RuleSetError> {
        let raw: RawRuleSet = serde_json::from_str(document)
            .map_err(|error| RuleSetError::Parse(error.to_string()))?;
        raw.compile()
    }
}
