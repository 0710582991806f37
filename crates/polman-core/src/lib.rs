//! # polman-core — Policy Manager Domain Types
//!
//! Pure domain layer for the insurance policy manager. No I/O, no web
//! framework — everything here is data and checks over data:
//!
//! - **Records** ([`policy`]): the persisted [`PolicyRecord`], its
//!   [`PolicyStatus`] lifecycle enum, and the [`PolicyInput`] transfer
//!   shape accepted over the API boundary.
//!
//! - **Validation** ([`validate`]): the two independent validation passes.
//!   Field presence runs over the transfer shape and collects every
//!   violation; coverage-date consistency runs on the entity path right
//!   before persistence and fails fast with a single message. The passes
//!   are deliberately not merged — each defends its invariant on its own.
//!
//! - **Pagination** ([`pagination`]): normalizes raw `page`/`size`/`sort`/
//!   `direction` query parameters into a [`PageRequest`] and wraps windowed
//!   query results in a [`PagedResult`].

pub mod pagination;
pub mod policy;
pub mod validate;

pub use pagination::{
    PageRequest, PageRequestError, PagedResult, SortDirection, DEFAULT_PAGE, DEFAULT_PAGE_SIZE,
    DEFAULT_SORT_DIRECTION, DEFAULT_SORT_FIELD,
};
pub use policy::{PolicyInput, PolicyRecord, PolicyStatus};
pub use validate::{check_coverage_dates, CoverageDateError, FieldErrors};
