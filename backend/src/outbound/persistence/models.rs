//! Internal Diesel row structs for the commerce tables.
//!
//! These types never leave the persistence layer; conversions into domain
//! records validate column values that the schema alone cannot constrain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::ports::RepositoryError;
use crate::domain::{Brand, Customer, Offer, Order, Price, Product, RecordId};

use super::schema::{brands, customers, offers, orders, products};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = brands)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BrandRow {
    pub id: RecordId,
    pub name: String,
    pub date_created: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = brands)]
pub(crate) struct NewBrandRow<'a> {
    pub name: &'a str,
    pub date_created: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = brands)]
pub(crate) struct BrandChanges<'a> {
    pub name: &'a str,
    pub date_modified: DateTime<Utc>,
}

impl From<BrandRow> for Brand {
    fn from(row: BrandRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            date_created: row.date_created,
            date_modified: row.date_modified,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProductRow {
    pub id: RecordId,
    pub name: String,
    pub is_active: bool,
    pub term: String,
    pub brand_id: RecordId,
    pub date_created: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = products)]
pub(crate) struct NewProductRow<'a> {
    pub name: &'a str,
    pub is_active: bool,
    pub term: &'a str,
    pub brand_id: RecordId,
    pub date_created: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = products)]
pub(crate) struct ProductChanges<'a> {
    pub name: &'a str,
    pub is_active: bool,
    pub term: &'a str,
    pub brand_id: RecordId,
    pub date_modified: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let term = row.term.parse().map_err(|err| {
            RepositoryError::query(format!("product {} has an invalid term: {err}", row.id))
        })?;
        Ok(Self {
            id: row.id,
            name: row.name,
            is_active: row.is_active,
            term,
            brand_id: row.brand_id,
            date_created: row.date_created,
            date_modified: row.date_modified,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = offers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct OfferRow {
    pub id: RecordId,
    pub product_id: RecordId,
    pub description: Option<String>,
    pub price_cents: i64,
    pub number_of_terms: i32,
    pub date_created: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = offers)]
pub(crate) struct NewOfferRow<'a> {
    pub product_id: RecordId,
    pub description: Option<&'a str>,
    pub price_cents: i64,
    pub number_of_terms: i32,
    pub date_created: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = offers)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct OfferChanges<'a> {
    pub product_id: RecordId,
    pub description: Option<&'a str>,
    pub price_cents: i64,
    pub number_of_terms: i32,
    pub date_modified: DateTime<Utc>,
}

impl TryFrom<OfferRow> for Offer {
    type Error = RepositoryError;

    fn try_from(row: OfferRow) -> Result<Self, Self::Error> {
        let price = Price::from_cents(row.price_cents).ok_or_else(|| {
            RepositoryError::query(format!(
                "offer {} has an out-of-range price: {}",
                row.id, row.price_cents
            ))
        })?;
        Ok(Self {
            id: row.id,
            product_id: row.product_id,
            description: row.description,
            price,
            number_of_terms: row.number_of_terms,
            date_created: row.date_created,
            date_modified: row.date_modified,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = customers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CustomerRow {
    pub id: RecordId,
    pub email_address: String,
    pub first_name: String,
    pub last_name: String,
    pub date_created: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = customers)]
pub(crate) struct NewCustomerRow<'a> {
    pub email_address: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub date_created: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = customers)]
pub(crate) struct CustomerChanges<'a> {
    pub email_address: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub date_modified: DateTime<Utc>,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Self {
            id: row.id,
            email_address: row.email_address,
            first_name: row.first_name,
            last_name: row.last_name,
            date_created: row.date_created,
            date_modified: row.date_modified,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct OrderRow {
    pub id: RecordId,
    pub offer_id: RecordId,
    pub customer_id: RecordId,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub paid: bool,
    pub cancelled: bool,
    pub reason: Option<String>,
    pub date_created: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = orders)]
pub(crate) struct NewOrderRow {
    pub offer_id: RecordId,
    pub customer_id: RecordId,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub paid: bool,
    pub cancelled: bool,
    pub date_created: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = orders)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct OrderChanges<'a> {
    pub paid: bool,
    pub cancelled: bool,
    pub reason: Option<&'a str>,
    pub date_modified: DateTime<Utc>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
            id: row.id,
            offer_id: row.offer_id,
            customer_id: row.customer_id,
            start_date: row.start_date,
            end_date: row.end_date,
            paid: row.paid,
            cancelled: row.cancelled,
            reason: row.reason,
            date_created: row.date_created,
            date_modified: row.date_modified,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    use crate::domain::Term;

    #[fixture]
    fn stamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    #[rstest]
    fn product_row_parses_term(stamp: DateTime<Utc>) {
        let row = ProductRow {
            id: 1,
            name: "Gym".to_owned(),
            is_active: true,
            term: "annually".to_owned(),
            brand_id: 2,
            date_created: stamp,
            date_modified: stamp,
        };
        let product = Product::try_from(row).expect("valid row");
        assert_eq!(product.term, Term::Annually);
    }

    #[rstest]
    fn product_row_with_unknown_term_is_a_query_error(stamp: DateTime<Utc>) {
        let row = ProductRow {
            id: 1,
            name: "Gym".to_owned(),
            is_active: true,
            term: "weekly".to_owned(),
            brand_id: 2,
            date_created: stamp,
            date_modified: stamp,
        };
        let error = Product::try_from(row).expect_err("invalid term");
        assert!(matches!(error, RepositoryError::Query { .. }));
    }

    #[rstest]
    fn offer_row_rejects_out_of_range_price(stamp: DateTime<Utc>) {
        let row = OfferRow {
            id: 5,
            product_id: 1,
            description: None,
            price_cents: -1,
            number_of_terms: 1,
            date_created: stamp,
            date_modified: stamp,
        };
        let error = Offer::try_from(row).expect_err("negative price");
        assert!(error.to_string().contains("out-of-range price"));
    }
}
