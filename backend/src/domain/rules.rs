//! Business-rule failures reported by storage adapters.
//!
//! Adapters of every storage technology build their refusals here so the
//! wording clients see does not depend on the adapter in use.

use crate::domain::{Outcome, RecordId};

/// A referenced or updated record does not exist.
pub fn missing<T>(entity: &str, id: RecordId) -> Outcome<T> {
    Outcome::fail(format!("{entity} with id = {id} does not exist"))
}

/// A delete is refused because other records still reference the target.
pub fn delete_blocked<T>(entity: &str, id: RecordId, dependant: &str) -> Outcome<T> {
    Outcome::fail(format!(
        "{entity} with id = {id} can't be deleted (referenced by some {dependant})"
    ))
}

/// Another customer already uses the e-mail address.
pub fn email_taken<T>(email: &str) -> Outcome<T> {
    Outcome::fail(format!("e-mail {email} already registered"))
}

/// An order was placed for an offer whose product is inactive.
pub fn inactive_product<T>(offer_id: RecordId) -> Outcome<T> {
    Outcome::fail(format!(
        "Offer with id = {offer_id} linked to inactive Product"
    ))
}

/// The subscription period of an order cannot be represented.
pub fn end_date_out_of_range<T>(offer_id: RecordId) -> Outcome<T> {
    Outcome::fail(format!(
        "Offer with id = {offer_id} produces an end date out of range"
    ))
}
