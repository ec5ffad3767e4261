//! Domain ports for the hexagonal boundary.
//!
//! Storage adapters implement [`ResourceRepository`] once per resource; the
//! HTTP adapter depends only on these traits.

mod macros;
pub(crate) use macros::define_port_error;

mod resource_repository;

pub use resource_repository::{RepositoryError, ResourceRepository};

#[cfg(test)]
pub use resource_repository::MockResourceRepository;
