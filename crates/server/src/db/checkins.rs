//! Checkin repository - the store gateway for the `checkin` relation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use figclover_core::{CheckinId, Companions, GuestName};

use super::RepositoryError;
use crate::models::Checkin;

/// Database row for the `checkin` table.
#[derive(Debug, sqlx::FromRow)]
struct CheckinRow {
    id: CheckinId,
    name: String,
    companions: i32,
    created_at: DateTime<Utc>,
}

impl TryFrom<CheckinRow> for Checkin {
    type Error = RepositoryError;

    fn try_from(row: CheckinRow) -> Result<Self, Self::Error> {
        let name = GuestName::parse(&row.name).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid guest name in database: {e}"))
        })?;
        let companions = Companions::new(row.companions).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid companion count in database: {e}"))
        })?;

        Ok(Self {
            id: row.id,
            name,
            companions,
            created_at: row.created_at,
        })
    }
}

/// Repository for checkin database operations.
pub struct CheckinRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CheckinRepository<'a> {
    /// Create a new checkin repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new checkin; the store assigns the `id`.
    ///
    /// Name and companion validation happens before this is called - the
    /// typed arguments cannot hold invalid values.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        name: &GuestName,
        companions: Companions,
    ) -> Result<Checkin, RepositoryError> {
        let row = sqlx::query_as::<_, CheckinRow>(
            r"
            INSERT INTO checkin (name, companions)
            VALUES ($1, $2)
            RETURNING id, name, companions, created_at
            ",
        )
        .bind(name.as_str())
        .bind(companions.as_i32())
        .fetch_one(self.pool)
        .await?;

        Checkin::try_from(row)
    }

    /// All checkins, newest first. For the hosts' RSVP overview.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, and
    /// `RepositoryError::DataCorruption` if a stored row fails validation.
    pub async fn list(&self) -> Result<Vec<Checkin>, RepositoryError> {
        let rows = sqlx::query_as::<_, CheckinRow>(
            r"
            SELECT id, name, companions, created_at
            FROM checkin
            ORDER BY created_at DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Checkin::try_from).collect()
    }
}
