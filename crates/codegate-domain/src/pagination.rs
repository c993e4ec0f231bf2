//! Keyset (cursor) pagination types.
//!
//! A page is addressed by the last id the client has seen rather than by an
//! offset, so inserts and deletes between requests never shift page boundaries.

use serde::{Deserialize, Serialize};

use crate::id::CodeId;

/// Smallest accepted page size.
pub const MIN_PAGE_SIZE: u32 = 1;

/// Largest accepted page size.
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Page size used when the client does not send one.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Returned when a requested page size is outside `MIN_PAGE_SIZE..=MAX_PAGE_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("page size must be between {min} and {max}", min = MIN_PAGE_SIZE, max = MAX_PAGE_SIZE)]
pub struct InvalidPageSize(pub u32);

/// Cursor pagination parameters.
///
/// - `skip_token`: last id seen on the previous page; absent for the first page
/// - `page_size`: 1–1000, default 100
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorRequest {
    #[serde(default)]
    pub skip_token: Option<CodeId>,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for CursorRequest {
    fn default() -> Self {
        Self {
            skip_token: None,
            page_size: default_page_size(),
        }
    }
}

impl CursorRequest {
    /// Reject out-of-range page sizes rather than silently clamping them.
    pub fn validated(self) -> Result<Self, InvalidPageSize> {
        if (MIN_PAGE_SIZE..=MAX_PAGE_SIZE).contains(&self.page_size) {
            Ok(self)
        } else {
            Err(InvalidPageSize(self.page_size))
        }
    }

    /// Number of rows to fetch: one extra answers `has_more` without a count query.
    pub fn fetch_limit(&self) -> u64 {
        u64::from(self.page_size) + 1
    }
}

/// One page of results plus the cursor for the next page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorPage<T> {
    pub items: Vec<T>,
    pub next_cursor: Option<CodeId>,
    pub has_more: bool,
}

impl<T> CursorPage<T> {
    /// Build a page from up to `page_size + 1` rows ordered by id ascending.
    ///
    /// `id_of` extracts the cursor from the last kept row.
    pub fn from_overfetch(mut rows: Vec<T>, page_size: u32, id_of: impl Fn(&T) -> CodeId) -> Self {
        let page_size = page_size as usize;
        let has_more = rows.len() > page_size;
        rows.truncate(page_size);
        let next_cursor = if has_more { rows.last().map(id_of) } else { None };
        Self {
            items: rows,
            next_cursor,
            has_more,
        }
    }
}
