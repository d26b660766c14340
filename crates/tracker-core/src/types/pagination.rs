//! Offset/limit pagination types for list endpoints.

use serde::{Deserialize, Serialize};

/// Default page size.
const DEFAULT_LIMIT: u32 = 50;
/// Maximum page size.
pub const MAX_LIMIT: u32 = 1000;

/// Request parameters for paginated queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Number of items to skip.
    #[serde(default)]
    pub offset: u32,
    /// Number of items to return.
    #[serde(default = "default_limit")]
    pub limit: u32,
}

impl PageRequest {
    /// Create a new page request, clamping the limit to `1..=MAX_LIMIT`.
    pub fn new(offset: u32, limit: u32) -> Self {
        Self {
            offset,
            limit: limit.clamp(1, MAX_LIMIT),
        }
    }

    /// Return this request with its limit clamped.
    pub fn normalized(self) -> Self {
        Self::new(self.offset, self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Paginated response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T: Serialize> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Offset the page starts at.
    pub offset: u32,
    /// Requested page size.
    pub limit: u32,
    /// Total number of matching items.
    pub total: u64,
    /// Whether this page reaches the end of the result set.
    pub is_last: bool,
}

impl<T: Serialize> PageResponse<T> {
    /// Create a new paginated response.
    pub fn new(items: Vec<T>, page: &PageRequest, total: u64) -> Self {
        let is_last = u64::from(page.offset) + items.len() as u64 >= total;
        Self {
            items,
            offset: page.offset,
            limit: page.limit,
            total,
            is_last,
        }
    }

    /// Create an empty response.
    pub fn empty(page: &PageRequest) -> Self {
        Self::new(Vec::new(), page, 0)
    }
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_is_clamped() {
        assert_eq!(PageRequest::new(0, 0).limit, 1);
        assert_eq!(PageRequest::new(0, 5000).limit, MAX_LIMIT);
    }

    #[test]
    fn test_is_last() {
        let page = PageRequest::new(0, 2);
        assert!(!PageResponse::new(vec![1, 2], &page, 3).is_last);
        assert!(PageResponse::new(vec![3], &PageRequest::new(2, 2), 3).is_last);
        assert!(PageResponse::<u8>::empty(&page).is_last);
    }
}
