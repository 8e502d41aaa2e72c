//! Database operations for the registry `PostgreSQL` store.
//!
//! # Database: `figclover`
//!
//! The store is the single source of truth for registry state:
//!
//! ## Tables
//!
//! - `gift` - Registry items (`id`, `name`, `selected`, `checkin_id`,
//!   `url_image`, `url_shop`)
//! - `checkin` - Guest RSVP records (`id`, `name`, `companions`)
//!
//! A trigger on `gift` emits a `gift_changes` notification for every insert
//! and update; see [`crate::feed`] for the listening side.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p figclover-cli -- migrate
//! ```

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

pub mod checkins;
pub mod gifts;

pub use checkins::CheckinRepository;
pub use gifts::{GiftRepository, ReservationOutcome};

/// Errors from repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
