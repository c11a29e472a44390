//! Pagination for list endpoints

use serde::Serialize;

/// Requested page after clamping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-indexed page number
    pub page: i64,
    /// Rows per page
    pub size: i64,
}

impl PageRequest {
    /// Clamp raw query values. `size` falls back to `default_size` and is
    /// bounded by `max_size`.
    pub fn new(page: Option<i64>, size: Option<i64>, default_size: i64, max_size: i64) -> Self {
        let size = size.unwrap_or(default_size).clamp(1, max_size.max(1));
        Self {
            page: page.unwrap_or(1).max(1),
            size,
        }
    }

    /// Offset for SQL `LIMIT/OFFSET` once the total is known.
    ///
    /// A page past the end is clamped to the last page.
    pub fn offset(&self, total: i64) -> i64 {
        let total_pages = (total + self.size - 1) / self.size;
        let page = self.page.min(total_pages.max(1));
        (page - 1) * self.size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: 1, size: 10 }
    }
}

/// One page of results with the total match count
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub count: i64,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            count: self.count,
            results: self.results.into_iter().map(f).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_is_clamped() {
        assert_eq!(PageRequest::new(None, None, 10, 100).size, 10);
        assert_eq!(PageRequest::new(None, Some(0), 10, 100).size, 1);
        assert_eq!(PageRequest::new(None, Some(500), 10, 100).size, 100);
    }

    #[test]
    fn offset_normal() {
        let request = PageRequest::new(Some(2), Some(100), 10, 100);
        assert_eq!(request.offset(250), 100);
    }

    #[test]
    fn offset_out_of_bounds_high() {
        let request = PageRequest::new(Some(99), Some(100), 10, 100);
        assert_eq!(request.offset(150), 100);
    }

    #[test]
    fn offset_out_of_bounds_low() {
        let request = PageRequest::new(Some(0), Some(100), 10, 100);
        assert_eq!(request.page, 1);
        assert_eq!(request.offset(150), 0);
    }

    #[test]
    fn offset_empty() {
        assert_eq!(PageRequest::default().offset(0), 0);
    }

    #[test]
    fn page_map_keeps_count() {
        let page = Page {
            count: 7,
            results: vec![1, 2],
        };
        let mapped = page.map(|n| n * 10);
        assert_eq!(mapped.count, 7);
        assert_eq!(mapped.results, vec![10, 20]);
    }
}
