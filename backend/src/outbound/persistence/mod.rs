//! PostgreSQL persistence adapters using Diesel.
//!
//! Row structs (`models.rs`) and table definitions (`schema.rs`) stay private
//! to this module; adapters translate them into domain records and map every
//! Diesel or pool failure onto [`RepositoryError`].
//!
//! ```no_run
//! # use std::sync::Arc;
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! use subscriptions::outbound::persistence::{DbPool, DieselCommerceRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/shop")).await?;
//! let repository = DieselCommerceRepository::new(pool, Arc::new(mockable::DefaultClock));
//! # let _ = repository;
//! # Ok(())
//! # }
//! ```
//!
//! [`RepositoryError`]: crate::domain::ports::RepositoryError

mod diesel_commerce_repository;
mod diesel_error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_commerce_repository::DieselCommerceRepository;
pub use migrations::run_migrations;
pub use pool::{
    DEFAULT_CONNECTION_TIMEOUT, DEFAULT_MAX_SIZE, DbPool, PoolConfig, PoolError,
};
