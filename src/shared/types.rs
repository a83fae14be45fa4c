use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::shared::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub errors: Option<Vec<String>>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: Option<T>, message: Option<String>) -> Self {
        Self {
            success: true,
            data,
            message,
            timestamp: Utc::now(),
            errors: None,
        }
    }

    pub fn error(message: Option<String>, errors: Option<Vec<String>>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message,
            timestamp: Utc::now(),
            errors,
        }
    }
}

// =============================================================================
// PAGINATION
// =============================================================================

/// Standard pagination query parameters for all list endpoints.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct PaginationQuery {
    /// Page number (1-indexed, default: 1)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,

    /// Number of items per page (default: 10, max: 50)
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 50)]
    pub limit: i64,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PaginationQuery {
    /// Calculate SQL OFFSET from page number
    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.limit()
    }

    /// Get page number clamped to a minimum of 1
    pub fn page(&self) -> i64 {
        self.page.max(1)
    }

    /// Get clamped limit (respects MAX_PAGE_SIZE)
    pub fn limit(&self) -> i64 {
        self.limit.clamp(1, MAX_PAGE_SIZE)
    }
}

/// Pagination block returned alongside every file listing or search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PageInfo {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_items: i64,
    pub has_next: bool,
    pub has_prev: bool,
    pub limit: i64,
}

impl PageInfo {
    /// Derive the pagination block from page, limit, and the total item count.
    ///
    /// `has_next` is computed purely from `skip + limit < total_items`, and
    /// `has_prev` from `page > 1`.
    pub fn new(page: i64, limit: i64, total_items: i64) -> Self {
        let skip = (page - 1) * limit;
        let total_pages = if total_items == 0 {
            0
        } else {
            (total_items + limit - 1) / limit
        };

        Self {
            current_page: page,
            total_pages,
            total_items,
            has_next: skip + limit < total_items,
            has_prev: page > 1,
            limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_info_second_page_of_fifteen() {
        // page=2, limit=10, totalItems=15 -> items 11-15, no next, has prev
        let info = PageInfo::new(2, 10, 15);
        assert_eq!(info.total_pages, 2);
        assert!(!info.has_next);
        assert!(info.has_prev);
    }

    #[test]
    fn page_info_first_page_with_more_available() {
        let info = PageInfo::new(1, 10, 15);
        assert!(info.has_next);
        assert!(!info.has_prev);
    }

    #[test]
    fn page_info_empty_result_set() {
        let info = PageInfo::new(1, 10, 0);
        assert_eq!(info.total_pages, 0);
        assert!(!info.has_next);
        assert!(!info.has_prev);
    }

    #[test]
    fn page_info_invariants_hold_across_inputs() {
        for page in 1..6 {
            for limit in [1, 7, 10, 50] {
                for total in [0, 1, 9, 10, 11, 49, 100] {
                    let info = PageInfo::new(page, limit, total);
                    let skip = (page - 1) * limit;
                    assert_eq!(info.has_next, skip + limit < total);
                    assert_eq!(info.has_prev, page > 1);
                    assert_eq!(info.total_pages, (total + limit - 1) / limit.max(1));
                }
            }
        }
    }

    #[test]
    fn pagination_query_clamps_limit_and_page() {
        let query = PaginationQuery { page: 0, limit: 500 };
        assert_eq!(query.page(), 1);
        assert_eq!(query.limit(), MAX_PAGE_SIZE);
        assert_eq!(query.offset(), 0);

        let query = PaginationQuery { page: 3, limit: 10 };
        assert_eq!(query.offset(), 20);
    }
}
