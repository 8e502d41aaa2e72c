//! Gift listing route handlers.
//!
//! The available list serves a snapshot of the shared availability
//! projection, so the view every guest sees reflects the change feed, not
//! just their own writes. The reserved list is a plain filtered read
//! through the store gateway.

use axum::{Json, extract::State};

use crate::db::GiftRepository;
use crate::error::Result;
use crate::models::Gift;
use crate::state::AppState;

/// Available gifts with full display metadata, name ascending.
pub async fn list_available(State(state): State<AppState>) -> Json<Vec<Gift>> {
    let projection = state.projection();
    let gifts = projection.read().await.available_gifts();
    Json(gifts)
}

/// Names of already-reserved gifts, name ascending.
///
/// A store failure is a 500, never an empty list.
pub async fn list_reserved(State(state): State<AppState>) -> Result<Json<Vec<String>>> {
    let names = GiftRepository::new(state.pool())
        .list_names_by_selected(true)
        .await?;
    Ok(Json(names))
}
