//! Embedded schema migrations.
//!
//! The SQL under `backend/migrations` is compiled into the binary so the CLI
//! and integration tests apply the exact same schema.

use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

/// Migrations creating the `user`, `follower`, `post`, `media` and `comment`
/// tables.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors raised while applying migrations.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    /// The database could not be reached.
    #[error("failed to connect for migrations: {0}")]
    Connect(#[from] diesel::ConnectionError),
    /// A migration failed to apply.
    #[error("failed to apply migrations: {message}")]
    Apply { message: String },
}

/// Apply every pending migration and return the applied versions in order.
///
/// # Errors
///
/// Returns [`MigrationError::Connect`] when the URL cannot be reached and
/// [`MigrationError::Apply`] when a migration fails.
pub fn run_pending_migrations(database_url: &str) -> Result<Vec<String>, MigrationError> {
    let mut conn = PgConnection::establish(database_url)?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::Apply {
            message: err.to_string(),
        })?;

    let versions: Vec<String> = applied.iter().map(ToString::to_string).collect();
    for version in &versions {
        info!(%version, "applied migration");
    }
    if versions.is_empty() {
        info!("schema already up to date");
    }
    Ok(versions)
}
