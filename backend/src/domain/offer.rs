//! Offers: a priced bundle of terms for one product.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive as _;

use crate::domain::validation::{self, DraftValidationError};
use crate::domain::{Outcome, RecordId, Resource};

/// Maximum length of an offer description, in characters.
pub const OFFER_DESCRIPTION_MAX: usize = 100;

/// A price held as a whole number of cents.
///
/// ## Invariants
/// - `0 <= cents <= Price::MAX_CENTS` (at most 9999.99).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(i64);

impl Price {
    /// Largest representable price, in cents.
    pub const MAX_CENTS: i64 = 999_999;

    /// Wrap a cent amount, returning `None` when it is out of range.
    pub const fn from_cents(cents: i64) -> Option<Self> {
        if cents >= 0 && cents <= Self::MAX_CENTS {
            Some(Self(cents))
        } else {
            None
        }
    }

    /// Parse a decimal amount with at most two fractional digits.
    ///
    /// The range is checked before the precision, so `-0.001` reports the
    /// range rather than the extra digit.
    ///
    /// # Examples
    /// ```
    /// use rust_decimal::Decimal;
    /// use subscriptions::domain::Price;
    ///
    /// let price = Price::from_decimal(Decimal::new(125, 1)).into_data().expect("valid price");
    /// assert_eq!(price.cents(), 1250);
    /// assert!(!Price::from_decimal(Decimal::new(125, 3)).is_success());
    /// ```
    pub fn from_decimal(amount: Decimal) -> Outcome<Self> {
        let max = Decimal::new(Self::MAX_CENTS, 2);
        if (amount.is_sign_negative() && !amount.is_zero()) || amount > max {
            return Outcome::fail("Price should be between 0 and 9999.99");
        }
        if amount.normalize().scale() > 2 {
            return Outcome::fail("Price should have at most two decimal places");
        }
        let cents = (amount * Decimal::ONE_HUNDRED).to_i64().and_then(Self::from_cents);
        cents.map_or_else(
            || Outcome::fail("Price should be between 0 and 9999.99"),
            Outcome::success,
        )
    }

    /// The amount in cents.
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// The amount as an exact two-place decimal.
    pub fn as_decimal(self) -> Decimal {
        Decimal::new(self.0, 2)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0.div_euclid(100), self.0.rem_euclid(100))
    }
}

/// A persisted offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Offer {
    /// Identity.
    pub id: RecordId,
    /// Product sold by the offer.
    pub product_id: RecordId,
    /// Free-form description.
    pub description: Option<String>,
    /// Price of one term.
    pub price: Price,
    /// Number of product terms an order of this offer covers.
    pub number_of_terms: i32,
    /// When the offer was stored.
    pub date_created: DateTime<Utc>,
    /// When the offer last changed.
    pub date_modified: DateTime<Utc>,
}

/// Validated input for creating or updating an offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferDraft {
    product_id: RecordId,
    description: Option<String>,
    price: Price,
    number_of_terms: i32,
}

impl OfferDraft {
    /// Validate offer fields.
    pub fn try_new(
        product_id: RecordId,
        description: Option<String>,
        price: Decimal,
        number_of_terms: i32,
    ) -> Result<Self, DraftValidationError> {
        let parsed_price = Price::from_decimal(price);
        let checks = validation::optional_text(
            "Description",
            description.as_deref(),
            OFFER_DESCRIPTION_MAX,
        )
        .and(parsed_price.clone())
        .and(validation::at_least_one("NumberOfTerms", number_of_terms));
        checks
            .and_then(|()| {
                parsed_price.map(|valid_price| Self {
                    product_id,
                    description,
                    price: valid_price,
                    number_of_terms,
                })
            })
            .into_result()
            .map_err(DraftValidationError::from)
    }

    /// Product sold by the offer.
    pub const fn product_id(&self) -> RecordId {
        self.product_id
    }

    /// Free-form description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Price of one term.
    pub const fn price(&self) -> Price {
        self.price
    }

    /// Number of product terms covered.
    pub const fn number_of_terms(&self) -> i32 {
        self.number_of_terms
    }
}

/// Offer list filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OfferFilter {
    /// Case-insensitive substring of the description.
    pub description: Option<String>,
    /// Exact product.
    pub product_id: Option<RecordId>,
    /// Activity flag of the offer's product.
    pub active_product: Option<bool>,
}

/// Marker type for the offer resource.
#[derive(Debug)]
pub enum Offers {}

impl Resource for Offers {
    type Record = Offer;
    type Draft = OfferDraft;
    type Changes = OfferDraft;
    type Filter = OfferFilter;

    const SINGULAR: &'static str = "Offer";

    fn id_of(record: &Offer) -> RecordId {
        record.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn dec(raw: &str) -> Decimal {
        raw.parse().expect("decimal literal")
    }

    #[rstest]
    #[case("0", 0)]
    #[case("9.99", 999)]
    #[case("19.9", 1990)]
    #[case("19.90", 1990)]
    #[case("12.500", 1250)]
    #[case("9999.99", 999_999)]
    fn decimal_prices_convert_to_cents(#[case] amount: &str, #[case] cents: i64) {
        let price = Price::from_decimal(dec(amount)).into_data().expect("valid price");
        assert_eq!(price.cents(), cents);
    }

    #[rstest]
    #[case("-0.01")]
    #[case("-0.001")]
    #[case("10000")]
    #[case("9999.991")]
    fn out_of_range_prices_are_refused(#[case] amount: &str) {
        assert_eq!(
            Price::from_decimal(dec(amount)).message(),
            Some("Price should be between 0 and 9999.99")
        );
    }

    #[rstest]
    #[case("0.000000001")]
    #[case("0.125")]
    #[case("19.999")]
    fn sub_cent_prices_are_refused(#[case] amount: &str) {
        assert_eq!(
            Price::from_decimal(dec(amount)).message(),
            Some("Price should have at most two decimal places")
        );
    }

    #[rstest]
    fn price_displays_two_decimals() {
        let price = Price::from_cents(1205).expect("in range");
        assert_eq!(price.to_string(), "12.05");
        assert_eq!(price.as_decimal(), dec("12.05"));
    }

    #[rstest]
    fn draft_reports_all_field_problems() {
        let error = OfferDraft::try_new(1, Some("d".repeat(101)), Decimal::NEGATIVE_ONE, 0)
            .expect_err("invalid");
        assert_eq!(
            error.reasons(),
            vec![
                "Description should be at most 100 characters",
                "Price should be between 0 and 9999.99",
                "NumberOfTerms should be >= 1",
            ]
        );
    }

    #[rstest]
    fn draft_accepts_missing_description() {
        let draft = OfferDraft::try_new(3, None, dec("49.5"), 12).expect("valid draft");
        assert_eq!(draft.product_id(), 3);
        assert!(draft.description().is_none());
        assert_eq!(draft.price().cents(), 4950);
        assert_eq!(draft.number_of_terms(), 12);
    }
}
