//! Reservation submission flow.
//!
//! Orchestrates a guest's RSVP: validate the form input, insert the checkin
//! record, then mark each selected gift reserved. The gift updates are
//! sequential, in selection order, and deliberately not transactional: once
//! the checkin insert succeeds the record persists regardless of per-gift
//! outcomes, and there is no rollback. Gifts that could not be claimed are
//! reported back in the receipt rather than rolled into a failure.

use tracing::instrument;

use figclover_core::{CheckinId, Companions, CompanionsError, GiftId, GuestName, GuestNameError};

use crate::db::{CheckinRepository, GiftRepository, RepositoryError, ReservationOutcome};
use crate::models::Checkin;

/// Store operations the flow needs.
///
/// A seam rather than a direct repository dependency so tests can observe
/// exactly which calls the flow makes.
#[allow(async_fn_in_trait)]
pub trait RegistryStore {
    /// Insert a checkin record; the store assigns the ID.
    async fn create_checkin(
        &self,
        name: &GuestName,
        companions: Companions,
    ) -> Result<Checkin, RepositoryError>;

    /// Attempt to reserve a gift for a checkin.
    async fn mark_reserved(
        &self,
        gift_id: GiftId,
        checkin_id: CheckinId,
    ) -> Result<ReservationOutcome, RepositoryError>;
}

/// [`RegistryStore`] backed by the `PostgreSQL` repositories.
#[derive(Debug, Clone)]
pub struct PgRegistryStore {
    pool: sqlx::PgPool,
}

impl PgRegistryStore {
    /// Create a store over a connection pool.
    #[must_use]
    pub const fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

impl RegistryStore for PgRegistryStore {
    async fn create_checkin(
        &self,
        name: &GuestName,
        companions: Companions,
    ) -> Result<Checkin, RepositoryError> {
        CheckinRepository::new(&self.pool).create(name, companions).await
    }

    async fn mark_reserved(
        &self,
        gift_id: GiftId,
        checkin_id: CheckinId,
    ) -> Result<ReservationOutcome, RepositoryError> {
        GiftRepository::new(&self.pool).mark_reserved(gift_id, checkin_id).await
    }
}

/// A guest's RSVP submission, as received from the form.
#[derive(Debug, Clone)]
pub struct CheckinRequest {
    /// Guest display name, unvalidated.
    pub name: String,
    /// Companion count, unvalidated.
    pub companions: i32,
    /// Gifts the guest selected, in selection order. May be empty.
    pub gift_ids: Vec<GiftId>,
}

/// What actually happened to a completed submission.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct CheckinReceipt {
    /// The persisted checkin.
    pub checkin_id: CheckinId,
    /// Gifts now reserved for this checkin, in selection order.
    pub reserved: Vec<GiftId>,
    /// Gifts that could not be claimed (already reserved by a concurrent
    /// guest, missing, or the update failed).
    pub unavailable: Vec<GiftId>,
}

/// Errors from the submission flow.
#[derive(Debug, thiserror::Error)]
pub enum CheckinError {
    /// Guest name failed validation; nothing was submitted.
    #[error("invalid guest name: {0}")]
    InvalidName(#[from] GuestNameError),

    /// Companion count failed validation; nothing was submitted.
    #[error("invalid companion count: {0}")]
    InvalidCompanions(#[from] CompanionsError),

    /// The checkin insert failed; no gift was marked reserved.
    #[error("checkin could not be stored: {0}")]
    Store(#[from] RepositoryError),
}

/// The reservation submission flow.
#[derive(Debug, Clone)]
pub struct CheckinFlow<S> {
    store: S,
}

impl<S: RegistryStore> CheckinFlow<S> {
    /// Create a flow over a store.
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Submit an RSVP.
    ///
    /// Contract, in order:
    ///
    /// 1. Validation failures return before any store call.
    /// 2. If the checkin insert fails, the error is returned and zero gift
    ///    updates occur - the caller's selection state stays intact.
    /// 3. Each selected gift is marked reserved sequentially. Per-gift
    ///    failures do not abort the loop or the flow; they are logged and
    ///    collected into [`CheckinReceipt::unavailable`].
    /// 4. Completing the loop is success, whatever the per-gift outcomes.
    ///
    /// # Errors
    ///
    /// Returns `CheckinError::InvalidName` / `InvalidCompanions` on form
    /// validation failure and `CheckinError::Store` if the checkin insert
    /// fails.
    #[instrument(skip(self, request), fields(guest = %request.name, gifts = request.gift_ids.len()))]
    pub async fn submit(&self, request: CheckinRequest) -> Result<CheckinReceipt, CheckinError> {
        let name = GuestName::parse(&request.name)?;
        let companions = Companions::new(request.companions)?;

        let checkin = self.store.create_checkin(&name, companions).await?;
        tracing::info!(checkin_id = %checkin.id, "Checkin stored");

        let mut reserved = Vec::new();
        let mut unavailable = Vec::new();

        for gift_id in request.gift_ids {
            match self.store.mark_reserved(gift_id, checkin.id).await {
                Ok(ReservationOutcome::Reserved) => reserved.push(gift_id),
                Ok(ReservationOutcome::AlreadyReserved) => {
                    tracing::warn!(
                        %gift_id,
                        checkin_id = %checkin.id,
                        "Gift already reserved by another guest"
                    );
                    unavailable.push(gift_id);
                }
                Err(e) => {
                    // Non-transactional by design: the checkin stays, the
                    // remaining gifts are still attempted.
                    tracing::error!(
                        %gift_id,
                        checkin_id = %checkin.id,
                        error = %e,
                        "Failed to mark gift reserved"
                    );
                    unavailable.push(gift_id);
                }
            }
        }

        Ok(CheckinReceipt {
            checkin_id: checkin.id,
            reserved,
            unavailable,
        })
    }
}
