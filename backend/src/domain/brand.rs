//! Brands: the top of the catalogue hierarchy.

use chrono::{DateTime, Utc};

use crate::domain::validation::{self, DraftValidationError};
use crate::domain::{RecordId, Resource};

/// Maximum length of a brand name, in characters.
pub const BRAND_NAME_MAX: usize = 50;

/// A persisted brand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Brand {
    /// Identity.
    pub id: RecordId,
    /// Display name.
    pub name: String,
    /// When the brand was stored.
    pub date_created: DateTime<Utc>,
    /// When the brand last changed.
    pub date_modified: DateTime<Utc>,
}

/// Validated input for creating or renaming a brand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandDraft {
    name: String,
}

impl BrandDraft {
    /// Validate a brand name.
    ///
    /// # Examples
    /// ```
    /// use subscriptions::domain::BrandDraft;
    ///
    /// assert!(BrandDraft::try_new("Acme").is_ok());
    /// let error = BrandDraft::try_new("  ").expect_err("blank name");
    /// assert_eq!(error.message(), "Name should not be empty");
    /// ```
    pub fn try_new(name: impl Into<String>) -> Result<Self, DraftValidationError> {
        let name = name.into();
        let checks = validation::required_text("Name", &name, BRAND_NAME_MAX);
        validation::finish(checks, || Self { name })
    }

    /// The brand name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Brand list filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrandFilter {
    /// Case-insensitive substring of the name.
    pub name: Option<String>,
}

/// Marker type for the brand resource.
#[derive(Debug)]
pub enum Brands {}

impl Resource for Brands {
    type Record = Brand;
    type Draft = BrandDraft;
    type Changes = BrandDraft;
    type Filter = BrandFilter;

    const SINGULAR: &'static str = "Brand";

    fn id_of(record: &Brand) -> RecordId {
        record.id
    }
}
