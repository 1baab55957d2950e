//! Clamping of client-supplied pagination parameters.

use serde::Deserialize;

/// Default number of items per page
pub const DEFAULT_PAGE_SIZE: usize = 20;
/// Largest accepted page size
pub const MAX_PAGE_SIZE: usize = 100;

/// Validated pagination parameters: how many items to skip and how many to
/// return. Construction clamps rather than rejects, since out-of-range
/// paging values are noise, not user error worth reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PageParams {
    pub skip: usize,
    pub limit: usize,
}

impl PageParams {
    /// Builds parameters from raw `skip`/`limit` query values. The limit is
    /// clamped to `1..=MAX_PAGE_SIZE`, defaulting to [`DEFAULT_PAGE_SIZE`].
    pub fn clamped(skip: Option<usize>, limit: Option<usize>) -> Self {
        Self {
            skip: skip.unwrap_or(0),
            limit: limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Builds parameters from 1-indexed `page`/`page_size` query values.
    pub fn from_page(page: Option<usize>, page_size: Option<usize>) -> Self {
        let page = page.unwrap_or(1).max(1);
        let page_size = page_size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        Self {
            skip: (page - 1) * page_size,
            limit: page_size,
        }
    }
}

impl Default for PageParams {
    fn default() -> Self {
        Self::clamped(None, None)
    }
}
