//! Outbound adapters implementing domain ports.
//!
//! - **persistence**: PostgreSQL storage via Diesel.
//! - **memory**: process-local storage used when no database is configured.

pub mod memory;
pub mod persistence;
