//! RSVP route handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use tracing::instrument;

use figclover_core::GiftId;

use crate::db::CheckinRepository;
use crate::error::Result;
use crate::models::Checkin;
use crate::registry::{CheckinReceipt, CheckinRequest};
use crate::state::AppState;

/// RSVP form payload.
#[derive(Debug, Deserialize)]
pub struct CheckinForm {
    /// Guest display name.
    pub name: String,
    /// Number of additional guests. Defaults to none.
    #[serde(default)]
    pub companions: i32,
    /// Selected gifts, in selection order. Defaults to empty.
    #[serde(default)]
    pub gift_ids: Vec<GiftId>,
}

/// Submit an RSVP, optionally reserving gifts.
///
/// Validation failures return 422 before any store call; an insert failure
/// returns 500 with zero gifts touched. A completed submission returns 201
/// with a receipt listing which gifts were reserved and which were already
/// claimed by a faster guest.
#[instrument(skip(state, form), fields(guest = %form.name, gifts = form.gift_ids.len()))]
pub async fn submit(
    State(state): State<AppState>,
    Json(form): Json<CheckinForm>,
) -> Result<(StatusCode, Json<CheckinReceipt>)> {
    let receipt = state
        .checkin_flow()
        .submit(CheckinRequest {
            name: form.name,
            companions: form.companions,
            gift_ids: form.gift_ids,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(receipt)))
}

/// All RSVPs, newest first. For the hosts' overview.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Checkin>>> {
    let checkins = CheckinRepository::new(state.pool()).list().await?;
    Ok(Json(checkins))
}
