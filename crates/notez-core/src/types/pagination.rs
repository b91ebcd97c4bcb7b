//! Page window and paged result envelope.

use serde::{Deserialize, Serialize};

/// Page size used when the caller gives none.
pub const DEFAULT_PAGE_SIZE: u64 = 10;
/// Largest page a caller may ask for.
pub const MAX_PAGE_SIZE: u64 = 100;

/// A 1-based page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u64,
    pub page_size: u64,
}

impl PageRequest {
    /// Builds a window, pulling out-of-range values back into bounds.
    pub fn new(page: u64, page_size: u64) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Rows to skip.
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    /// Rows to take.
    pub fn limit(&self) -> u64 {
        self.page_size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

/// One page of results with enough metadata to render pager controls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T: Serialize> {
    pub items: Vec<T>,
    pub page: u64,
    pub page_size: u64,
    /// Matches across every page.
    pub total_items: u64,
    /// At least 1, even when nothing matched.
    pub total_pages: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T: Serialize> PageResponse<T> {
    /// Wraps the rows of `window` out of `total_items` matches.
    pub fn new(items: Vec<T>, window: PageRequest, total_items: u64) -> Self {
        let total_pages = total_items.div_ceil(window.page_size).max(1);
        Self {
            items,
            page: window.page,
            page_size: window.page_size,
            total_items,
            total_pages,
            has_next: window.page < total_pages,
            has_previous: window.page > 1,
        }
    }
}
