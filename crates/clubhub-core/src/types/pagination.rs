//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};

/// Default number of items per page.
const DEFAULT_PER_PAGE: u64 = 25;
/// Upper bound on items per page.
const MAX_PER_PAGE: u64 = 100;

/// Page selection for a list query.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-based).
    #[serde(default = "default_page")]
    pub page: u64,
    /// Items per page.
    #[serde(default = "default_per_page")]
    pub per_page: u64,
}

impl Page {
    /// Create a page selection, clamping out-of-range values.
    pub fn new(page: u64, per_page: u64) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    /// SQL `OFFSET` for this page.
    ///
    /// Clamps like [`Page::limit`] so values deserialized straight from a
    /// query string stay in range.
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1) * self.limit()
    }

    /// SQL `LIMIT` for this page, clamped to the allowed range.
    pub fn limit(&self) -> u64 {
        self.per_page.clamp(1, MAX_PER_PAGE)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

/// One page of results together with totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Current page number (1-based).
    pub page: u64,
    /// Items per page.
    pub per_page: u64,
    /// Total matching items across all pages.
    pub total: u64,
}

impl<T> Paginated<T> {
    /// Wrap a page of items with totals.
    pub fn new(items: Vec<T>, page: &Page, total: u64) -> Self {
        Self {
            items,
            page: page.page,
            per_page: page.per_page,
            total,
        }
    }

    /// Total number of pages (at least 1).
    pub fn total_pages(&self) -> u64 {
        if self.total == 0 {
            1
        } else {
            self.total.div_ceil(self.per_page)
        }
    }
}

fn default_page() -> u64 {
    1
}

fn default_per_page() -> u64 {
    DEFAULT_PER_PAGE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_and_limit() {
        let page = Page::new(3, 10);
        assert_eq!(page.offset(), 20);
        assert_eq!(page.limit(), 10);
    }

    #[test]
    fn clamps_out_of_range_values() {
        let page = Page::new(0, 10_000);
        assert_eq!(page.page, 1);
        assert_eq!(page.per_page, MAX_PER_PAGE);
    }

    #[test]
    fn raw_query_values_are_clamped_at_use() {
        let page = Page {
            page: 2,
            per_page: 10_000,
        };
        assert_eq!(page.limit(), MAX_PER_PAGE);
        assert_eq!(page.offset(), MAX_PER_PAGE);
    }

    #[test]
    fn total_pages_rounds_up() {
        let result = Paginated::new(vec![1, 2, 3], &Page::new(1, 10), 21);
        assert_eq!(result.total_pages(), 3);

        let empty: Paginated<i32> = Paginated::new(vec![], &Page::default(), 0);
        assert_eq!(empty.total_pages(), 1);
    }
}
