//! Schema migration runner for the bundled SQL migrations.

use sqlx::PgPool;
use tracing::info;

use wikidocs_core::error::{AppError, ErrorKind};

/// Apply any migrations in `migrations/` not yet recorded in the
/// database.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, format!("Migration run failed: {e}"), e)
        })?;

    info!("Database schema is up to date");
    Ok(())
}
