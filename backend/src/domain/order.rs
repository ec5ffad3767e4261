//! Orders: a customer's subscription to an offer.

use chrono::{DateTime, Months, Utc};

use crate::domain::validation::{self, DraftValidationError};
use crate::domain::{RecordId, Resource, Term};

/// Maximum length of a cancellation reason, in characters.
pub const ORDER_REASON_MAX: usize = 50;

/// A persisted order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    /// Identity.
    pub id: RecordId,
    /// Offer subscribed to.
    pub offer_id: RecordId,
    /// Subscribing customer.
    pub customer_id: RecordId,
    /// Start of the subscription period.
    pub start_date: DateTime<Utc>,
    /// End of the subscription period.
    pub end_date: DateTime<Utc>,
    /// Whether the order has been paid.
    pub paid: bool,
    /// Whether the order has been cancelled.
    pub cancelled: bool,
    /// Why the order was cancelled.
    pub reason: Option<String>,
    /// When the order was stored.
    pub date_created: DateTime<Utc>,
    /// When the order last changed.
    pub date_modified: DateTime<Utc>,
}

/// Input for placing an order. Existence rules are checked by storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDraft {
    offer_id: RecordId,
    customer_id: RecordId,
    start_date: Option<DateTime<Utc>>,
}

impl OrderDraft {
    /// Describe an order; `start_date` defaults to the time of storage.
    pub const fn new(
        offer_id: RecordId,
        customer_id: RecordId,
        start_date: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            offer_id,
            customer_id,
            start_date,
        }
    }

    /// Offer subscribed to.
    pub const fn offer_id(&self) -> RecordId {
        self.offer_id
    }

    /// Subscribing customer.
    pub const fn customer_id(&self) -> RecordId {
        self.customer_id
    }

    /// Requested start, if any.
    pub const fn start_date(&self) -> Option<DateTime<Utc>> {
        self.start_date
    }
}

/// Validated changes to an order's status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderUpdate {
    paid: bool,
    cancelled: bool,
    reason: Option<String>,
}

impl OrderUpdate {
    /// Validate status changes.
    pub fn try_new(
        paid: bool,
        cancelled: bool,
        reason: Option<String>,
    ) -> Result<Self, DraftValidationError> {
        let checks = validation::optional_text("Reason", reason.as_deref(), ORDER_REASON_MAX);
        validation::finish(checks, || Self {
            paid,
            cancelled,
            reason,
        })
    }

    /// Whether the order is paid.
    pub const fn paid(&self) -> bool {
        self.paid
    }

    /// Whether the order is cancelled.
    pub const fn cancelled(&self) -> bool {
        self.cancelled
    }

    /// Cancellation reason.
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }
}

/// Order list filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilter {
    /// Exact offer.
    pub offer_id: Option<RecordId>,
    /// Exact customer.
    pub customer_id: Option<RecordId>,
}

/// Marker type for the order resource.
#[derive(Debug)]
pub enum Orders {}

impl Resource for Orders {
    type Record = Order;
    type Draft = OrderDraft;
    type Changes = OrderUpdate;
    type Filter = OrderFilter;

    const SINGULAR: &'static str = "Order";

    fn id_of(record: &Order) -> RecordId {
        record.id
    }
}

/// End of a subscription covering `number_of_terms` terms from `start`.
///
/// Returns `None` when the term count is not positive or the end falls
/// outside the representable date range.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use subscriptions::domain::{subscription_end, Term};
///
/// let start = Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap();
/// let end = subscription_end(start, Term::Monthly, 1).expect("in range");
/// assert_eq!(end, Utc.with_ymd_and_hms(2024, 2, 29, 0, 0, 0).unwrap());
/// ```
pub fn subscription_end(
    start: DateTime<Utc>,
    term: Term,
    number_of_terms: i32,
) -> Option<DateTime<Utc>> {
    let terms = u32::try_from(number_of_terms).ok().filter(|count| *count >= 1)?;
    let months = term.months().checked_mul(terms)?;
    start.checked_add_months(Months::new(months))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 9, 30, 0)
            .single()
            .expect("valid timestamp")
    }

    #[rstest]
    #[case(Term::Monthly, 3, at(2024, 4, 15))]
    #[case(Term::Annually, 1, at(2025, 1, 15))]
    #[case(Term::Annually, 2, at(2026, 1, 15))]
    fn end_adds_whole_terms(
        #[case] term: Term,
        #[case] count: i32,
        #[case] expected: DateTime<Utc>,
    ) {
        assert_eq!(subscription_end(at(2024, 1, 15), term, count), Some(expected));
    }

    #[rstest]
    #[case(0)]
    #[case(-1)]
    fn non_positive_term_count_has_no_end(#[case] count: i32) {
        assert!(subscription_end(at(2024, 1, 15), Term::Monthly, count).is_none());
    }

    #[rstest]
    fn overflowing_period_has_no_end() {
        assert!(subscription_end(at(2024, 1, 15), Term::Annually, i32::MAX).is_none());
    }

    #[rstest]
    fn update_rejects_long_reason() {
        let error = OrderUpdate::try_new(false, true, Some("r".repeat(51))).expect_err("too long");
        assert_eq!(error.message(), "Reason should be at most 50 characters");
    }
}
