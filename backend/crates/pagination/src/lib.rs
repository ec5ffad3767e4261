//! Offset pagination primitives shared by the subscription API list endpoints.
//!
//! A [`PageRequest`] is the only way to ask for a page: it can only be built
//! from a 1-based page number and a positive page size, so invalid paging
//! parameters are rejected before any storage adapter runs. A
//! [`PaginatedList`] is the immutable page produced for that request,
//! carrying the sliced items plus the metadata clients need to navigate.
//!
//! ```
//! use pagination::{PageRequest, PaginatedList};
//!
//! let request = PageRequest::try_new(3, 10).expect("valid paging parameters");
//! let page = PaginatedList::from_ordered(1..=25, request);
//!
//! assert_eq!(page.items(), &[21, 22, 23, 24, 25]);
//! assert_eq!(page.total_pages(), 3);
//! assert!(page.has_previous_page());
//! assert!(!page.has_next_page());
//! ```

mod list;
mod request;

pub use list::PaginatedList;
pub use request::{
    DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, PageRequest, PageRequestError, PageRequestViolation,
};
