use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Requested page, as received from the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PageInfo {
    pub page: i64,
    pub page_size: i64,
}

impl PageInfo {
    pub fn new(page: i64, page_size: i64) -> Self {
        Self { page, page_size }
    }

    /// Non-positive values fall back to page 1 / 10 items.
    pub fn normalized(self) -> Self {
        Self {
            page: if self.page <= 0 { DEFAULT_PAGE } else { self.page },
            page_size: if self.page_size <= 0 {
                DEFAULT_PAGE_SIZE
            } else {
                self.page_size
            },
        }
    }

    /// `(offset, limit)` of the normalized page
    pub fn offset_limit(self) -> (u64, u64) {
        let PageInfo { page, page_size } = self.normalized();
        let offset = (page - 1).saturating_mul(page_size);
        (offset as u64, page_size as u64)
    }
}

/// One page of results
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PageResponse<T> {
    pub list: Vec<T>,
    /// Number of rows matching the filters, across all pages
    pub total: u64,
    pub page: i64,
    pub page_size: i64,
}

impl<T> PageResponse<T> {
    pub fn new(list: Vec<T>, total: u64, page: i64, page_size: i64) -> Self {
        let PageInfo { page, page_size } = PageInfo::new(page, page_size).normalized();
        Self {
            list,
            total,
            page,
            page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_positive_values_are_clamped() {
        assert_eq!(PageInfo::new(0, -5).normalized(), PageInfo::new(1, 10));
        assert_eq!(PageInfo::new(-3, 0).normalized(), PageInfo::new(1, 10));
        assert_eq!(PageInfo::new(4, 25).normalized(), PageInfo::new(4, 25));
    }

    #[test]
    fn offset_follows_normalized_page() {
        assert_eq!(PageInfo::new(1, 10).offset_limit(), (0, 10));
        assert_eq!(PageInfo::new(3, 20).offset_limit(), (40, 20));
        assert_eq!(PageInfo::new(0, 0).offset_limit(), (0, 10));
        assert_eq!(PageInfo::new(2, -1).offset_limit(), (10, 10));
    }

    #[test]
    fn page_response_reports_normalized_values() {
        let resp = PageResponse::new(vec!["a", "b"], 2, 0, -5);
        assert_eq!((resp.page, resp.page_size), (1, 10));
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"list": ["a", "b"], "total": 2, "page": 1, "page_size": 10})
        );
    }
}
