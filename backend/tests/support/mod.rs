//! Shared helpers for the PostgreSQL integration suites.
//!
//! Integration tests compile as separate crates under `backend/tests/`; this
//! module holds the embedded cluster bootstrap and the database reset used by
//! every suite that needs a real server.

pub mod pg_embed;

use postgres::{Client, NoTls};

/// Render a `postgres` error with its SQLSTATE and detail.
///
/// The `Display` output of `postgres::Error` often collapses to `db error`,
/// which hides the reason a statement failed.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };

    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    summary
}

/// True when `SKIP_TEST_CLUSTER` is `1`, `true` or `yes` (any case).
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Skip the test when `SKIP_TEST_CLUSTER` is set, otherwise fail loudly.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}

/// Drop and recreate `database` through the cluster's `postgres` database.
///
/// Uses the `postgres` client rather than Diesel so `DROP DATABASE` runs
/// outside a transaction.
pub fn reset_database(admin_url: &str, database: &str) -> Result<(), String> {
    let mut client =
        Client::connect(admin_url, NoTls).map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute(&format!(
            "DROP DATABASE IF EXISTS \"{database}\"; CREATE DATABASE \"{database}\";"
        ))
        .map_err(|err| format_postgres_error(&err))
}
