//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! fc-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `REGISTRY_DATABASE_URL` - `PostgreSQL` connection string (falls back
//!   to `DATABASE_URL`)
//!
//! Migration files live in `crates/server/migrations/` and are embedded
//! into the binary at compile time.

use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use tracing::info;

/// Errors from the migrate command.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run the registry database migrations.
///
/// # Errors
///
/// Returns an error if the database URL is missing, the connection fails,
/// or a migration fails to apply.
pub async fn run() -> Result<(), MigrationError> {
    dotenvy::dotenv().ok();

    let database_url = database_url()?;

    info!("Connecting to registry database...");
    let pool = PgPool::connect(database_url.expose_secret()).await?;

    info!("Running registry migrations...");
    sqlx::migrate!("../server/migrations").run(&pool).await?;

    info!("Registry migrations complete!");
    Ok(())
}

/// Read the database URL, preferring the registry-specific variable.
pub(crate) fn database_url() -> Result<SecretString, MigrationError> {
    std::env::var("REGISTRY_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| MigrationError::MissingEnvVar("REGISTRY_DATABASE_URL"))
}
