//! HTTP route handlers for the registry service.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health              - Liveness check
//! GET  /health/ready        - Readiness check (database connectivity)
//!
//! # Registry
//! GET  /api/gifts           - Available gifts (projection snapshot)
//! GET  /api/gifts/reserved  - Reserved gift names
//! GET  /api/gifts/events    - Server-sent stream of gift deltas
//!
//! # RSVP
//! POST /api/checkin         - Submit an RSVP with optional gift selection
//! GET  /api/checkins        - RSVP list (for the hosts)
//! ```

pub mod checkin;
pub mod events;
pub mod gifts;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the registry API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/gifts", get(gifts::list_available))
        .route("/api/gifts/reserved", get(gifts::list_reserved))
        .route("/api/gifts/events", get(events::stream))
        .route("/api/checkin", post(checkin::submit))
        .route("/api/checkins", get(checkin::list))
}
