use serde::Serialize;

/// Page size used when the caller does not pick one.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;
/// Upper bound accepted for a single page.
pub const MAX_ITEMS_PER_PAGE: usize = 1000;

/// 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    /// Builds a page request, treating page 0 as page 1 and clamping the size.
    pub fn new(page: usize, per_page: usize) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_ITEMS_PER_PAGE),
        }
    }

    /// Number of rows preceding this page.
    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.per_page)
    }

    pub fn limit(&self) -> usize {
        self.per_page
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, DEFAULT_ITEMS_PER_PAGE)
    }
}

/// One page of records plus the size of the whole result set.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ListResult<T> {
    pub data: Vec<T>,
    pub total: usize,
}

impl<T> ListResult<T> {
    pub fn new(data: Vec<T>, total: usize) -> Self {
        Self { data, total }
    }

    pub fn empty() -> Self {
        Self {
            data: Vec::new(),
            total: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_derived_from_one_based_page() {
        assert_eq!(Pagination::new(1, 10).offset(), 0);
        assert_eq!(Pagination::new(3, 25).offset(), 50);
        assert_eq!(Pagination::new(0, 10).offset(), 0);
    }

    #[test]
    fn huge_page_number_saturates_offset() {
        assert_eq!(Pagination::new(usize::MAX, 10).offset(), usize::MAX);
    }

    #[test]
    fn page_size_is_clamped() {
        assert_eq!(Pagination::new(1, 0).per_page, 1);
        assert_eq!(Pagination::new(1, 5000).per_page, MAX_ITEMS_PER_PAGE);
    }
}
