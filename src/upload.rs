//! Upload metadata validation.
//!
//! Checks filenames and declared sizes before any bytes are accepted. This
//! is pure metadata work: no file is opened and no content is decoded.

use std::path::Path;

use log::debug;

use crate::registry::Verdict;

/// Maximum accepted upload size (10MB)
pub const MAX_UPLOAD_SIZE_BYTES: u64 = 10 * 1024 * 1024;

const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];
const ALLOWED_DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "doc", "docx"];

/// The category an upload is validated as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Image,
    Document,
}

impl UploadKind {
    /// Extensions accepted for this kind, lowercase and without the dot.
    pub fn allowed_extensions(self) -> &'static [&'static str] {
        match self {
            UploadKind::Image => ALLOWED_IMAGE_EXTENSIONS,
            UploadKind::Document => ALLOWED_DOCUMENT_EXTENSIONS,
        }
    }

    fn type_message(self) -> String {
        match self {
            UploadKind::Image => format!(
                "Invalid image type. Allowed: {}",
                ALLOWED_IMAGE_EXTENSIONS.join(", ")
            ),
            UploadKind::Document => format!(
                "Invalid file type. Allowed: {}",
                ALLOWED_DOCUMENT_EXTENSIONS.join(", ")
            ),
        }
    }
}

/// Strips any path components from a client-supplied filename, returning
/// `None` when nothing usable remains. Keeping only the final component
/// defuses traversal names like `../../etc/passwd`.
pub fn sanitize_filename(filename: &str) -> Option<String> {
    let trimmed = filename.trim();
    if trimmed.is_empty() {
        return None;
    }

    Path::new(trimmed)
        .file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.to_string())
}

/// The lowercase extension of `filename`, without the dot.
pub fn file_extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|extension| extension.to_str())
        .map(|extension| extension.to_lowercase())
}

/// Checks an upload's filename and declared size against the constraints for
/// `kind`. The type check runs first, then the size cap.
pub fn validate_upload(filename: &str, size_bytes: u64, kind: UploadKind) -> Verdict {
    let Some(sanitized) = sanitize_filename(filename) else {
        debug!("upload rejected: unusable filename {filename:?}");
        return Verdict::Invalid(kind.type_message());
    };

    let allowed = file_extension(&sanitized)
        .map(|extension| kind.allowed_extensions().contains(&extension.as_str()))
        .unwrap_or(false);
    if !allowed {
        debug!("upload rejected: extension of {sanitized:?} not allowed for {kind:?}");
        return Verdict::Invalid(kind.type_message());
    }

    if size_bytes > MAX_UPLOAD_SIZE_BYTES {
        debug!("upload rejected: {size_bytes} bytes exceeds cap");
        return Verdict::Invalid(
            "File size exceeds maximum allowed size of 10MB".to_string(),
        );
    }

    Verdict::Valid
}
