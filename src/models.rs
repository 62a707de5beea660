//! Data models and DTOs (Data Transfer Objects)
//!
//! Contains all request/response structures used by the API.

pub mod form;
pub mod response;

// Re-export commonly used types
pub use form::*;
pub use response::*;

use serde::{Deserialize, Serialize};

/// Message-only response (no data)
#[derive(Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Default number of forms per listing page
pub const DEFAULT_PAGE_SIZE: i64 = 5;

/// Hard cap on the requested page size
pub const MAX_PAGE_SIZE: i64 = 50;

/// Pagination query parameters (?page=&pageSize=)
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl PageQuery {
    /// Normalize into a concrete (page, page_size) pair.
    ///
    /// Out-of-range values (zero, negative, above the cap) fall back to the
    /// defaults rather than clamping.
    pub fn normalize(&self) -> (i64, i64) {
        let page = match self.page {
            Some(p) if p > 0 => p,
            _ => 1,
        };
        let page_size = match self.page_size {
            Some(s) if s > 0 && s <= MAX_PAGE_SIZE => s,
            _ => DEFAULT_PAGE_SIZE,
        };
        (page, page_size)
    }
}

/// Page envelope for paginated listings
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T: Serialize> {
    pub data: Vec<T>,
    pub total_count: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
}

impl<T: Serialize> Page<T> {
    pub fn new(data: Vec<T>, total_count: i64, page: i64, page_size: i64) -> Self {
        Self {
            data,
            total_count,
            page,
            page_size,
            total_pages: (total_count + page_size - 1) / page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn query(page: Option<i64>, page_size: Option<i64>) -> PageQuery {
        PageQuery { page, page_size }
    }

    #[test]
    fn test_normalize_defaults() {
        assert_eq!(query(None, None).normalize(), (1, DEFAULT_PAGE_SIZE));
    }

    #[test]
    fn test_normalize_in_range_values_pass_through() {
        assert_eq!(query(Some(3), Some(50)).normalize(), (3, 50));
        assert_eq!(query(Some(1), Some(1)).normalize(), (1, 1));
    }

    #[test]
    fn test_normalize_out_of_range_falls_back_to_defaults() {
        assert_eq!(query(Some(0), Some(0)).normalize(), (1, DEFAULT_PAGE_SIZE));
        assert_eq!(query(Some(-2), Some(-7)).normalize(), (1, DEFAULT_PAGE_SIZE));
        // Above the cap is a fallback, not a clamp
        assert_eq!(query(Some(2), Some(51)).normalize(), (2, DEFAULT_PAGE_SIZE));
    }

    #[test]
    fn test_page_math() {
        let page = Page::new(vec![1, 2, 3, 4, 5], 11, 1, 5);
        assert_eq!(page.total_pages, 3);

        let exact = Page::<i32>::new(vec![], 10, 3, 5);
        assert_eq!(exact.total_pages, 2);

        let empty = Page::<i32>::new(vec![], 0, 1, 5);
        assert_eq!(empty.total_pages, 0);
    }

    #[test]
    fn test_page_envelope_serializes_camel_case() {
        let page = Page::new(vec![1], 1, 1, 5);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["totalCount"], 1);
        assert_eq!(json["pageSize"], 5);
        assert_eq!(json["totalPages"], 1);
        assert_eq!(json["data"], serde_json::json!([1]));
    }
}
