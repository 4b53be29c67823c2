/// Pagination support for the feed
///
/// Page numbers are 1-based and forwarded to the remote API untouched.
use serde::{Deserialize, Serialize};

/// Number of records requested per page
pub const PAGE_SIZE: u32 = 8;

/// Ordering criterion sent with every page request
pub const PAGE_ORDER: &str = "popularity";

/// Pagination parameters for a single page request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationParams {
    pub page: i64,
    pub limit: u32,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: 1,
            limit: PAGE_SIZE,
        }
    }
}

impl PaginationParams {
    pub fn new(page: i64) -> Self {
        Self {
            page,
            limit: PAGE_SIZE,
        }
    }

    /// Query pairs in the order the API documents them
    pub fn query_pairs(&self) -> [(&'static str, String); 3] {
        [
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
            ("order", PAGE_ORDER.to_string()),
        ]
    }
}

/// Monotonic page counter. Starts at 1 and only ever moves forward by one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCursor(i64);

impl Default for PageCursor {
    fn default() -> Self {
        Self(1)
    }
}

impl PageCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> i64 {
        self.0
    }

    /// Advance by exactly one and return the new page. No upper bound.
    pub fn advance(&mut self) -> i64 {
        self.0 = self.0.saturating_add(1);
        self.0
    }
}
