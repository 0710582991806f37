//! # Pagination
//!
//! Normalizes raw `page`/`size`/`sort`/`direction` query parameters into a
//! [`PageRequest`] and wraps windowed query results in a [`PagedResult`].
//!
//! The defaults are centralized here so they stay in lockstep with the
//! frontend's: page 0, size 5, sorted ascending by `id`.
//!
//! `direction` is a binary fallback, not a validated enumeration: anything
//! that is not `"asc"` (case-insensitive) sorts descending. The sort field
//! is handed to the store unvalidated — an unknown field is a query-time
//! failure, not a normalizer-time one. Page and size, however, are range
//! checked here and rejected before they reach the store.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default page index when the query omits `page`.
pub const DEFAULT_PAGE: i64 = 0;
/// Default page size when the query omits `size`.
pub const DEFAULT_PAGE_SIZE: i64 = 5;
/// Default sort field when the query omits `sort`.
pub const DEFAULT_SORT_FIELD: &str = "id";
/// Default sort direction when the query omits `direction`.
pub const DEFAULT_SORT_DIRECTION: &str = "asc";

/// Sort order for a windowed query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Interpret a raw `direction` parameter: `"asc"` in any casing sorts
    /// ascending, every other string sorts descending.
    pub fn from_param(direction: &str) -> Self {
        if direction.eq_ignore_ascii_case("asc") {
            Self::Ascending
        } else {
            Self::Descending
        }
    }

    pub fn is_ascending(self) -> bool {
        matches!(self, Self::Ascending)
    }
}

/// Rejected pagination parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageRequestError {
    #[error("Page index must not be negative")]
    NegativePage,
    #[error("Page size must not be less than one")]
    SizeTooSmall,
}

/// A normalized, bounded, ordered query window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    size: i64,
    sort: String,
    direction: SortDirection,
}

impl PageRequest {
    /// Normalize raw parameters into a request.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError`] for a negative page or a size below
    /// one. The sort field is passed through unchecked.
    pub fn new(
        page: i64,
        size: i64,
        sort: impl Into<String>,
        direction: &str,
    ) -> Result<Self, PageRequestError> {
        if page < 0 {
            return Err(PageRequestError::NegativePage);
        }
        if size < 1 {
            return Err(PageRequestError::SizeTooSmall);
        }
        Ok(Self {
            page,
            size,
            sort: sort.into(),
            direction: SortDirection::from_param(direction),
        })
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn size(&self) -> i64 {
        self.size
    }

    /// The requested sort field, unvalidated.
    pub fn sort(&self) -> &str {
        &self.sort
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Number of records to skip: `page * size`.
    pub fn offset(&self) -> i64 {
        self.page * self.size
    }

    /// Maximum number of records in the window.
    pub fn limit(&self) -> i64 {
        self.size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            size: DEFAULT_PAGE_SIZE,
            sort: DEFAULT_SORT_FIELD.to_string(),
            direction: SortDirection::from_param(DEFAULT_SORT_DIRECTION),
        }
    }
}

/// One page of records plus its position within the full ordered set.
///
/// Transient view type, constructed per request and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    pub content: Vec<T>,
    pub page: i64,
    pub size: i64,
    pub total_elements: u64,
    pub total_pages: u64,
    pub last: bool,
}

impl<T> PagedResult<T> {
    /// Wrap one window of records.
    ///
    /// `total_pages` is `ceil(total_elements / size)`; a non-positive size
    /// yields a single page. The page is `last` when no further page
    /// exists, which is also true of an empty result set.
    pub fn new(content: Vec<T>, page: i64, size: i64, total_elements: u64) -> Self {
        let total_pages = if size <= 0 {
            1
        } else {
            total_elements.div_ceil(size as u64)
        };
        let last = page + 1 >= total_pages as i64;
        Self {
            content,
            page,
            size,
            total_elements,
            total_pages,
            last,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_frontend_contract() {
        let request = PageRequest::default();
        assert_eq!(request.page(), 0);
        assert_eq!(request.size(), 5);
        assert_eq!(request.sort(), "id");
        assert!(request.direction().is_ascending());
    }

    #[test]
    fn direction_asc_is_case_insensitive() {
        for raw in ["asc", "ASC", "Asc", "aSc"] {
            assert!(SortDirection::from_param(raw).is_ascending(), "raw {raw:?}");
        }
    }

    #[test]
    fn unrecognized_direction_falls_back_to_descending() {
        for raw in ["desc", "DESC", "descending", "sideways", ""] {
            assert!(!SortDirection::from_param(raw).is_ascending(), "raw {raw:?}");
        }
    }

    #[test]
    fn offset_is_page_times_size() {
        let request = PageRequest::new(3, 7, "id", "asc").unwrap();
        assert_eq!(request.offset(), 21);
        assert_eq!(request.limit(), 7);
    }

    #[test]
    fn negative_page_is_rejected() {
        assert_eq!(
            PageRequest::new(-1, 5, "id", "asc"),
            Err(PageRequestError::NegativePage)
        );
    }

    #[test]
    fn zero_or_negative_size_is_rejected() {
        assert_eq!(
            PageRequest::new(0, 0, "id", "asc"),
            Err(PageRequestError::SizeTooSmall)
        );
        assert_eq!(
            PageRequest::new(0, -5, "id", "asc"),
            Err(PageRequestError::SizeTooSmall)
        );
    }

    #[test]
    fn sort_field_is_passed_through_unchecked() {
        let request = PageRequest::new(0, 5, "noSuchField", "asc").unwrap();
        assert_eq!(request.sort(), "noSuchField");
    }

    #[test]
    fn twelve_records_at_size_five_make_three_pages() {
        let first: PagedResult<i64> = PagedResult::new(vec![1, 2, 3, 4, 5], 0, 5, 12);
        assert_eq!(first.total_pages, 3);
        assert!(!first.last);

        let third: PagedResult<i64> = PagedResult::new(vec![11, 12], 2, 5, 12);
        assert_eq!(third.total_pages, 3);
        assert!(third.last);
    }

    #[test]
    fn empty_result_set_is_a_single_last_empty_page() {
        let page: PagedResult<i64> = PagedResult::new(vec![], 0, 5, 0);
        assert_eq!(page.total_pages, 0);
        assert!(page.last);
        assert!(page.content.is_empty());
    }

    #[test]
    fn exact_multiple_has_no_partial_page() {
        let page: PagedResult<i64> = PagedResult::new(vec![6, 7, 8, 9, 10], 1, 5, 10);
        assert_eq!(page.total_pages, 2);
        assert!(page.last);
    }

    #[test]
    fn paged_result_serializes_camel_case() {
        let page: PagedResult<i64> = PagedResult::new(vec![1], 0, 5, 1);
        let value = serde_json::to_value(&page).unwrap();
        assert_eq!(value["totalElements"], 1);
        assert_eq!(value["totalPages"], 1);
        assert_eq!(value["last"], true);
    }
}
