//! Products sold under a brand on a monthly or annual term.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::validation::{self, DraftValidationError};
use crate::domain::{Outcome, RecordId, Resource};

/// Maximum length of a product name, in characters.
pub const PRODUCT_NAME_MAX: usize = 50;

/// Billing term of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Term {
    /// Billed every month.
    Monthly,
    /// Billed every year.
    Annually,
}

impl Term {
    /// Every accepted term, in wire form.
    pub const ALLOWED: [&'static str; 2] = ["annually", "monthly"];

    /// Wire form of the term.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Annually => "annually",
        }
    }

    /// Length of one term in months.
    pub const fn months(self) -> u32 {
        match self {
            Self::Monthly => 1,
            Self::Annually => 12,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a term is not one of [`Term::ALLOWED`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown term: {0}")]
pub struct UnknownTerm(pub String);

impl FromStr for Term {
    type Err = UnknownTerm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "monthly" => Ok(Self::Monthly),
            "annually" => Ok(Self::Annually),
            other => Err(UnknownTerm(other.to_owned())),
        }
    }
}

/// A persisted product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// Identity.
    pub id: RecordId,
    /// Display name.
    pub name: String,
    /// Whether new orders may be placed for offers of this product.
    pub is_active: bool,
    /// Billing term.
    pub term: Term,
    /// Owning brand.
    pub brand_id: RecordId,
    /// When the product was stored.
    pub date_created: DateTime<Utc>,
    /// When the product last changed.
    pub date_modified: DateTime<Utc>,
}

/// Validated input for creating or updating a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    name: String,
    is_active: bool,
    term: Term,
    brand_id: RecordId,
}

impl ProductDraft {
    /// Validate product fields; the term is checked before the name.
    ///
    /// # Examples
    /// ```
    /// use subscriptions::domain::ProductDraft;
    ///
    /// let error = ProductDraft::try_new("", true, "weekly", 1).expect_err("invalid");
    /// assert_eq!(
    ///     error.message(),
    ///     "Term allowed values annually or monthly\nand\nName should not be empty"
    /// );
    /// ```
    pub fn try_new(
        name: impl Into<String>,
        is_active: bool,
        term: &str,
        brand_id: RecordId,
    ) -> Result<Self, DraftValidationError> {
        let name = name.into();
        let parsed_term = term.parse::<Term>().map_or_else(
            |_| {
                Outcome::fail(format!(
                    "Term allowed values {}",
                    Term::ALLOWED.join(" or ")
                ))
            },
            Outcome::success,
        );
        let checks = parsed_term
            .clone()
            .and(validation::required_text("Name", &name, PRODUCT_NAME_MAX));
        checks
            .and_then(|()| {
                parsed_term.map(|term| Self {
                    name,
                    is_active,
                    term,
                    brand_id,
                })
            })
            .into_result()
            .map_err(DraftValidationError::from)
    }

    /// Product name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the product is active.
    pub const fn is_active(&self) -> bool {
        self.is_active
    }

    /// Billing term.
    pub const fn term(&self) -> Term {
        self.term
    }

    /// Owning brand.
    pub const fn brand_id(&self) -> RecordId {
        self.brand_id
    }
}

/// Product list filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Case-insensitive substring of the product name.
    pub name: Option<String>,
    /// Case-insensitive substring of the owning brand's name.
    pub brand_name: Option<String>,
    /// Exact activity flag.
    pub is_active: Option<bool>,
}

/// Marker type for the product resource.
#[derive(Debug)]
pub enum Products {}

impl Resource for Products {
    type Record = Product;
    type Draft = ProductDraft;
    type Changes = ProductDraft;
    type Filter = ProductFilter;

    const SINGULAR: &'static str = "Product";

    fn id_of(record: &Product) -> RecordId {
        record.id
    }
}
