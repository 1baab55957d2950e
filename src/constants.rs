//! Length bounds, patterns, and user-facing messages for the built-in rules

/// Minimum username length in characters
pub const USERNAME_MIN_LENGTH: usize = 3;
/// Maximum username length in characters
pub const USERNAME_MAX_LENGTH: usize = 30;
/// Minimum password length in characters
pub const PASSWORD_MIN_LENGTH: usize = 6;
/// Maximum post title length in characters
pub const TITLE_MAX_LENGTH: usize = 100;
/// Maximum post content length in characters
pub const CONTENT_MAX_LENGTH: usize = 5_000;

/// Usernames allow ASCII letters, digits, and underscores only
pub const USERNAME_PATTERN: &str = r"^[a-zA-Z0-9_]+$";
/// Local part, a single `@`, and a domain containing a dot; no whitespace
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

pub const USERNAME_MESSAGE: &str =
    "Username must be 3-30 characters (letters, numbers, underscore only)";
pub const PASSWORD_MESSAGE: &str = "Password must be at least 6 characters";
pub const EMAIL_MESSAGE: &str = "Invalid email format";
pub const TITLE_MESSAGE: &str = "Title must be 100 characters or less";
pub const CONTENT_MESSAGE: &str = "Content must be 5000 characters or less";

pub const REQUIRED_MESSAGE: &str = "This field is required";
pub const PASSWORD_MISMATCH_MESSAGE: &str = "Passwords do not match";
