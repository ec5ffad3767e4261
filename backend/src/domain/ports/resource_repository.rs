//! Port for listing, reading and mutating the records of one resource.

use async_trait::async_trait;
use pagination::{PageRequest, PaginatedList};

use super::define_port_error;
use crate::domain::{Outcome, RecordId, Resource};

define_port_error! {
    /// Unexpected failures of the storage behind a [`ResourceRepository`].
    ///
    /// Expected refusals, such as a missing parent record, are reported as
    /// an [`Outcome`] failure instead.
    pub enum RepositoryError {
        /// The storage could not be reached.
        Connection { message: String } => "repository connection failed: {message}",
        /// A query failed or returned unusable data.
        Query { message: String } => "repository query failed: {message}",
    }
}

/// Storage port for the records of resource `R`.
///
/// ## Contract
/// - `list` orders records by identity, ascending, before paging.
/// - `find_by_id` reports absence as `Ok(None)`.
/// - `create` and `update` check referenced records, uniqueness and (for
///   `update`) the existence of the target, and refuse with an
///   [`Outcome`] failure; nothing is persisted on refusal.
/// - `delete` of an unknown identity succeeds with that identity; a record
///   still referenced by others is refused.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResourceRepository<R: Resource>: Send + Sync {
    /// One page of the records matching `filter`.
    async fn list(
        &self,
        filter: &R::Filter,
        page: PageRequest,
    ) -> Result<PaginatedList<R::Record>, RepositoryError>;

    /// The record with identity `id`, if stored.
    async fn find_by_id(&self, id: RecordId) -> Result<Option<R::Record>, RepositoryError>;

    /// Store a new record.
    async fn create(&self, draft: &R::Draft) -> Result<Outcome<R::Record>, RepositoryError>;

    /// Replace the mutable fields of record `id`.
    async fn update(
        &self,
        id: RecordId,
        changes: &R::Changes,
    ) -> Result<Outcome<R::Record>, RepositoryError>;

    /// Ensure record `id` is gone, returning the identity.
    async fn delete(&self, id: RecordId) -> Result<Outcome<RecordId>, RepositoryError>;
}
