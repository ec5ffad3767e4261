//! Customers who place orders.

use chrono::{DateTime, Utc};

use crate::domain::validation::{self, DraftValidationError};
use crate::domain::{RecordId, Resource};

/// Maximum length of the e-mail address and of each name, in characters.
pub const CUSTOMER_FIELD_MAX: usize = 100;

/// A persisted customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    /// Identity.
    pub id: RecordId,
    /// Unique e-mail address.
    pub email_address: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// When the customer was stored.
    pub date_created: DateTime<Utc>,
    /// When the customer last changed.
    pub date_modified: DateTime<Utc>,
}

/// Validated input for registering or updating a customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerDraft {
    email_address: String,
    first_name: String,
    last_name: String,
}

impl CustomerDraft {
    /// Validate customer fields. The e-mail address is trimmed.
    pub fn try_new(
        email_address: &str,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Result<Self, DraftValidationError> {
        let email = email_address.trim().to_owned();
        let first = first_name.into();
        let last = last_name.into();
        let checks = validation::required_text("EmailAddress", &email, CUSTOMER_FIELD_MAX)
            .and(validation::email_format("EmailAddress", &email))
            .and(validation::required_text(
                "FirstName",
                &first,
                CUSTOMER_FIELD_MAX,
            ))
            .and(validation::required_text(
                "LastName",
                &last,
                CUSTOMER_FIELD_MAX,
            ));
        validation::finish(checks, || Self {
            email_address: email,
            first_name: first,
            last_name: last,
        })
    }

    /// E-mail address.
    pub fn email_address(&self) -> &str {
        &self.email_address
    }

    /// Given name.
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Family name.
    pub fn last_name(&self) -> &str {
        &self.last_name
    }
}

/// Customer list filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerFilter {
    /// Case-insensitive substring of the first or the last name.
    pub name: Option<String>,
    /// Case-insensitive substring of the e-mail address.
    pub email: Option<String>,
    /// Only customers with at least one order for this offer.
    pub offer_id: Option<RecordId>,
}

/// Marker type for the customer resource.
#[derive(Debug)]
pub enum Customers {}

impl Resource for Customers {
    type Record = Customer;
    type Draft = CustomerDraft;
    type Changes = CustomerDraft;
    type Filter = CustomerFilter;

    const SINGULAR: &'static str = "Customer";

    fn id_of(record: &Customer) -> RecordId {
        record.id
    }
}
