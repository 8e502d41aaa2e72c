//! Gift repository - the store gateway for the `gift` relation.
//!
//! All registry reads and the reservation write go through here; nothing
//! else in the server talks to the `gift` table. Queries use the runtime
//! sqlx API with explicit row types.

use sqlx::PgPool;

use figclover_core::{CheckinId, GiftId};

use super::RepositoryError;
use crate::models::Gift;

/// Result of attempting to reserve a gift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationOutcome {
    /// The gift was available and is now reserved for the checkin.
    Reserved,
    /// Another guest reserved the gift first; no row was changed.
    AlreadyReserved,
}

/// Database row for the `gift` table.
#[derive(Debug, sqlx::FromRow)]
struct GiftRow {
    id: GiftId,
    name: String,
    selected: bool,
    checkin_id: Option<CheckinId>,
    url_image: Option<String>,
    url_shop: Option<String>,
}

impl From<GiftRow> for Gift {
    fn from(row: GiftRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            selected: row.selected,
            checkin_id: row.checkin_id,
            image_url: row.url_image,
            shop_url: row.url_shop,
        }
    }
}

/// Repository for gift database operations.
pub struct GiftRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> GiftRepository<'a> {
    /// Create a new gift repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Gift names filtered by reservation state, ordered by name ascending.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails. A failure is
    /// never reported as an empty list.
    pub async fn list_names_by_selected(
        &self,
        selected: bool,
    ) -> Result<Vec<String>, RepositoryError> {
        let names = sqlx::query_scalar::<_, String>(
            "SELECT name FROM gift WHERE selected = $1 ORDER BY name ASC",
        )
        .bind(selected)
        .fetch_all(self.pool)
        .await?;

        Ok(names)
    }

    /// All currently-unreserved gifts with full display metadata, ordered by
    /// name ascending.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_available(&self) -> Result<Vec<Gift>, RepositoryError> {
        self.list_by_selected(false).await
    }

    /// All reserved gifts, ordered by name ascending.
    ///
    /// Used to seed the reserved half of the availability projection.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_reserved(&self) -> Result<Vec<Gift>, RepositoryError> {
        self.list_by_selected(true).await
    }

    async fn list_by_selected(&self, selected: bool) -> Result<Vec<Gift>, RepositoryError> {
        let rows = sqlx::query_as::<_, GiftRow>(
            r"
            SELECT id, name, selected, checkin_id, url_image, url_shop
            FROM gift
            WHERE selected = $1
            ORDER BY name ASC
            ",
        )
        .bind(selected)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Gift::from).collect())
    }

    /// Mark a gift reserved by a checkin.
    ///
    /// The update is guarded by `selected = false`, so concurrent guests
    /// racing for the same gift cannot both claim it: the second writer gets
    /// [`ReservationOutcome::AlreadyReserved`] instead of silently
    /// overwriting the first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no gift with `gift_id` exists,
    /// and `RepositoryError::Database` if the update fails.
    pub async fn mark_reserved(
        &self,
        gift_id: GiftId,
        checkin_id: CheckinId,
    ) -> Result<ReservationOutcome, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE gift
            SET selected = true, checkin_id = $2
            WHERE id = $1 AND selected = false
            ",
        )
        .bind(gift_id)
        .bind(checkin_id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() > 0 {
            return Ok(ReservationOutcome::Reserved);
        }

        // Zero rows: either the gift is gone or someone else got there first.
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM gift WHERE id = $1)")
                .bind(gift_id)
                .fetch_one(self.pool)
                .await?;

        if exists {
            Ok(ReservationOutcome::AlreadyReserved)
        } else {
            Err(RepositoryError::NotFound)
        }
    }
}
