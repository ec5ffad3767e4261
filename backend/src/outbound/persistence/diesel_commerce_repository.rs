//! PostgreSQL-backed storage for every commerce resource.
//!
//! One adapter value serves all five [`ResourceRepository`] instantiations;
//! each resource lives in its own submodule. Business-rule checks run inside
//! a transaction together with the write they guard, and refusals are
//! returned as [`Outcome`] failures built by [`crate::domain::rules`].
//!
//! [`ResourceRepository`]: crate::domain::ports::ResourceRepository
//! [`Outcome`]: crate::domain::Outcome

use std::sync::Arc;

use mockable::Clock;
use pagination::PageRequest;

use super::pool::DbPool;

mod brands;
mod customers;
mod offers;
mod orders;
mod products;

/// Evaluate `SELECT EXISTS (query)` on a connection.
macro_rules! row_exists {
    ($conn:expr, $query:expr) => {{
        use diesel_async::RunQueryDsl as _;
        diesel::select(diesel::dsl::exists($query)).get_result::<bool>($conn)
    }};
}
pub(crate) use row_exists;

/// Diesel-backed implementation of the resource storage port.
#[derive(Clone)]
pub struct DieselCommerceRepository {
    pool: DbPool,
    clock: Arc<dyn Clock>,
}

impl DieselCommerceRepository {
    /// Create a repository over `pool`, stamping rows with `clock`.
    pub fn new(pool: DbPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }
}

/// `OFFSET` and `LIMIT` for a page request.
///
/// Values beyond `BIGINT` clamp to `i64::MAX`; such an offset skips every
/// row, so a far page comes back empty.
fn page_window(request: PageRequest) -> (i64, i64) {
    let offset = i64::try_from(request.offset()).unwrap_or(i64::MAX);
    let limit = i64::try_from(request.page_size()).unwrap_or(i64::MAX);
    (offset, limit)
}

/// Convert a row count reported by `COUNT(*)`.
#[expect(
    clippy::cast_sign_loss,
    reason = "COUNT(*) is never negative"
)]
const fn total_from_count(count: i64) -> u64 {
    count as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn window_follows_page_request() {
        let request = PageRequest::try_new(3, 10).expect("valid request");
        assert_eq!(page_window(request), (20, 10));
    }

    #[rstest]
    #[case(1 << 62, 10, 10)]
    #[case(i64::MAX, i64::MAX, i64::MAX)]
    fn far_pages_clamp_to_an_empty_window(
        #[case] page_number: i64,
        #[case] page_size: i64,
        #[case] expected_limit: i64,
    ) {
        let request = PageRequest::try_new(page_number, page_size).expect("valid request");
        assert_eq!(page_window(request), (i64::MAX, expected_limit));
    }

    #[rstest]
    fn counts_convert_to_totals() {
        assert_eq!(total_from_count(25), 25);
    }
}
