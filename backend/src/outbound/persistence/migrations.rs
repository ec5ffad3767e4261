//! Embedded schema migrations applied at startup.

use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use crate::domain::ports::RepositoryError;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Apply pending migrations over a dedicated synchronous connection.
///
/// Runs on the blocking pool so the async runtime stays responsive while the
/// schema is brought up to date.
pub async fn run_migrations(database_url: &str) -> Result<(), RepositoryError> {
    let url = database_url.to_owned();
    tokio::task::spawn_blocking(move || apply_pending(&url))
        .await
        .map_err(|err| RepositoryError::query(format!("migration task failed: {err}")))?
}

fn apply_pending(database_url: &str) -> Result<(), RepositoryError> {
    let mut conn = PgConnection::establish(database_url)
        .map_err(|err| RepositoryError::connection(err.to_string()))?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| RepositoryError::query(format!("migration: {err}")))?;
    info!(count = applied.len(), "database migrations applied");
    Ok(())
}
