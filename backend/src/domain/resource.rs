//! Type-level description of a CRUD resource.
//!
//! Each resource is an uninhabited marker type (for example
//! [`Brands`](crate::domain::Brands)) whose [`Resource`] implementation names
//! the record, write input and list filter types. The repository port and
//! the HTTP handlers are written once against this trait and instantiated
//! per resource.

/// Integer identity shared by every persisted record.
pub type RecordId = i32;

/// The types that make up one CRUD resource.
pub trait Resource: Send + Sync + 'static {
    /// The persisted entity.
    type Record: Clone + Send + Sync + 'static;
    /// Validated input for creating a record.
    type Draft: Send + Sync + 'static;
    /// Validated input for updating a record.
    type Changes: Send + Sync + 'static;
    /// List filter; the default matches every record.
    type Filter: Default + Send + Sync + 'static;

    /// Entity name used in client-facing messages, e.g. `Brand`.
    const SINGULAR: &'static str;

    /// Identity of a record.
    fn id_of(record: &Self::Record) -> RecordId;
}
