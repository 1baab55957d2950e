//! Whole-payload validation.
//!
//! Forms bundle the per-field checks a submit handler runs, collecting every
//! failure instead of stopping at the first so the caller can surface all of
//! them at once.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::registry::{passwords_match, FieldKind, Requirement, RuleSet, Verdict};

const IDENTIFIER_REQUIRED_MESSAGE: &str = "Username, email, or phone is required";
const PASSWORD_REQUIRED_MESSAGE: &str = "Password is required";

/// One failed field with its user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Every failure a form produced. Guaranteed non-empty when returned from a
/// `validate` method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    fn push(&mut self, field: &'static str, message: String) {
        self.errors.push(FieldError { field, message });
    }

    fn push_verdict(&mut self, field: &'static str, verdict: Verdict) {
        if let Verdict::Invalid(message) = verdict {
            self.push(field, message);
        }
    }

    fn into_result(self) -> Result<(), FieldErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// The failed fields in the order they were checked.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failed: ")?;
        for (index, error) in self.errors.iter().enumerate() {
            if index > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// A signup payload. Email is optional; the confirmation, when supplied,
/// must match the password.
#[derive(Debug, Clone, Deserialize)]
pub struct SignupForm {
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    pub password: String,
    #[serde(default)]
    pub password_confirm: Option<String>,
}

impl SignupForm {
    pub fn validate(&self, rules: &RuleSet) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();

        errors.push_verdict(
            "username",
            rules.evaluate(
                FieldKind::Username,
                Some(self.username.trim()),
                Requirement::Required,
            ),
        );
        errors.push_verdict(
            "email",
            rules.evaluate(
                FieldKind::Email,
                self.email.as_deref().map(str::trim),
                Requirement::Optional,
            ),
        );
        errors.push_verdict(
            "password",
            rules.evaluate(
                FieldKind::Password,
                Some(self.password.as_str()),
                Requirement::Required,
            ),
        );
        if let Some(confirmation) = &self.password_confirm {
            errors.push_verdict(
                "password_confirm",
                passwords_match(&self.password, confirmation),
            );
        }

        errors.into_result()
    }
}

/// A login payload. The identifier may be a username, an email, or a phone
/// number, so only presence is checked here.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub identifier: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();

        if self.identifier.as_deref().unwrap_or("").is_empty() {
            errors.push("identifier", IDENTIFIER_REQUIRED_MESSAGE.to_string());
        }
        if self.password.as_deref().unwrap_or("").is_empty() {
            errors.push("password", PASSWORD_REQUIRED_MESSAGE.to_string());
        }

        errors.into_result()
    }
}

/// A new-post payload. The title is optional; the body is not.
#[derive(Debug, Clone, Deserialize)]
pub struct PostForm {
    #[serde(default)]
    pub title: Option<String>,
    pub content: String,
}

impl PostForm {
    pub fn validate(&self, rules: &RuleSet) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();

        errors.push_verdict(
            "title",
            rules.evaluate(
                FieldKind::PostTitle,
                self.title.as_deref().map(str::trim),
                Requirement::Optional,
            ),
        );
        errors.push_verdict(
            "content",
            rules.evaluate(
                FieldKind::PostContent,
                Some(self.content.trim()),
                Requirement::Required,
            ),
        );

        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{PASSWORD_MESSAGE, PASSWORD_MISMATCH_MESSAGE, USERNAME_MESSAGE};
    use crate::registry::defaults;

    fn signup(username: &str, email: Option<&str>, password: &str) -> SignupForm {
        SignupForm {
            username: username.to_string(),
            email: email.map(str::to_string),
            password: password.to_string(),
            password_confirm: None,
        }
    }

    #[test]
    fn test_signup_accepts_valid_payload() {
        let form = signup("reader_1", Some("user@example.com"), "123456");
        assert!(form.validate(defaults()).is_ok());
    }

    #[test]
    fn test_signup_email_is_optional() {
        let form = signup("reader_1", None, "123456");
        assert!(form.validate(defaults()).is_ok());

        let form = signup("reader_1", Some(""), "123456");
        assert!(form.validate(defaults()).is_ok());
    }

    #[test]
    fn test_signup_collects_every_failure() {
        let form = signup("ab", Some("not-an-email"), "12345");
        let errors = form.validate(defaults()).unwrap_err();

        assert_eq!(errors.len(), 3);
        let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
        assert!(messages.contains(&USERNAME_MESSAGE));
        assert!(messages.contains(&PASSWORD_MESSAGE));
    }

    #[test]
    fn test_signup_checks_confirmation_when_present() {
        let mut form = signup("reader_1", None, "123456");
        form.password_confirm = Some("123456".to_string());
        assert!(form.validate(defaults()).is_ok());

        form.password_confirm = Some("654321".to_string());
        let errors = form.validate(defaults()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.iter().next().unwrap().message,
            PASSWORD_MISMATCH_MESSAGE
        );
    }

    #[test]
    fn test_login_requires_both_fields() {
        let form = LoginForm {
            identifier: None,
            password: Some("".to_string()),
        };
        let errors = form.validate().unwrap_err();

        assert_eq!(errors.len(), 2);
        let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["identifier", "password"]);
    }

    #[test]
    fn test_login_accepts_any_identifier() {
        let form = LoginForm {
            identifier: Some("+41791234567".to_string()),
            password: Some("hunter2".to_string()),
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_post_title_is_optional_but_bounded() {
        let form = PostForm {
            title: None,
            content: "A body".to_string(),
        };
        assert!(form.validate(defaults()).is_ok());

        let form = PostForm {
            title: Some("x".repeat(101)),
            content: "A body".to_string(),
        };
        let errors = form.validate(defaults()).unwrap_err();
        assert_eq!(errors.iter().next().unwrap().field, "title");
    }

    #[test]
    fn test_post_content_is_required() {
        let form = PostForm {
            title: Some("A title".to_string()),
            content: "   ".to_string(),
        };
        let errors = form.validate(defaults()).unwrap_err();
        assert_eq!(errors.iter().next().unwrap().field, "content");
    }

    #[test]
    fn test_field_errors_display() {
        let form = signup("", None, "");
        let errors = form.validate(defaults()).unwrap_err();
        let rendered = errors.to_string();
        assert!(rendered.starts_with("validation failed: "));
        assert!(rendered.contains("username: This field is required"));
    }
}
