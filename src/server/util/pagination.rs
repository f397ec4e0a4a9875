//! Page/limit handling shared by list endpoints.

use crate::model::api::PaginationDto;

/// Maximum page size a client may request.
pub const MAX_LIMIT: u64 = 100;

/// A normalized page request. Pages are 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page {
    pub page: u64,
    pub limit: u64,
}

impl Page {
    /// Normalizes client supplied values, falling back to page 1 and `default_limit`.
    ///
    /// The limit is clamped to `1..=MAX_LIMIT`. The page is capped so that the row offset
    /// `(page - 1) * limit` fits a signed 64-bit `OFFSET`; pages past the cap are empty anyway.
    pub fn new(page: Option<u64>, limit: Option<u64>, default_limit: u64) -> Self {
        let limit = limit.unwrap_or(default_limit).clamp(1, MAX_LIMIT);
        let max_page = i64::MAX as u64 / limit;

        Self {
            page: page.filter(|p| *p > 0).unwrap_or(1).min(max_page),
            limit,
        }
    }

    /// Zero-based page index as used by SeaORM's paginator.
    pub fn index(&self) -> u64 {
        self.page - 1
    }

    /// Builds the pagination block returned to the client.
    pub fn to_dto(&self, total: u64) -> PaginationDto {
        PaginationDto {
            page: self.page,
            limit: self.limit,
            total,
            pages: total.div_ceil(self.limit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Expect missing values to use the defaults and oversized limits to be clamped
    #[test]
    fn normalizes_input() {
        assert_eq!(Page::new(None, None, 10), Page { page: 1, limit: 10 });
        assert_eq!(Page::new(Some(0), Some(500), 10), Page { page: 1, limit: 100 });
        assert_eq!(Page::new(Some(3), Some(0), 20), Page { page: 3, limit: 1 });
    }

    /// Expect the page count to round up
    #[test]
    fn pages_round_up() {
        let page = Page::new(Some(2), Some(10), 10);

        assert_eq!(page.index(), 1);
        assert_eq!(page.to_dto(21).pages, 3);
        assert_eq!(page.to_dto(0).pages, 0);
    }

    /// Expect an enormous page to be capped so the row offset cannot overflow
    #[test]
    fn caps_page_to_representable_offset() {
        let page = Page::new(Some(u64::MAX), Some(10), 10);

        assert_eq!(page.page, i64::MAX as u64 / 10);
        assert!(page.index().checked_mul(page.limit).is_some_and(|o| o <= i64::MAX as u64));

        let largest_limit = Page::new(Some(u64::MAX), Some(MAX_LIMIT), 10);
        assert!(largest_limit.index() * largest_limit.limit <= i64::MAX as u64);
    }
}
