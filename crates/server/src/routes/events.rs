//! Server-sent gift delta stream.
//!
//! Each connected invitation page holds one feed subscription for the
//! lifetime of its view; closing the page drops the SSE connection, which
//! drops the subscription and releases its feed slot.

use std::convert::Infallible;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use tokio_stream::{Stream, StreamExt, wrappers::errors::BroadcastStreamRecvError};

use crate::state::AppState;

/// Attach to the gift feed and relay deltas as `gift` events.
///
/// Subscribers only see deltas published after they attach; a client must
/// seed its view from `GET /api/gifts` first. The gap between that fetch
/// and this attach is the documented seed/subscribe race.
pub async fn stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = std::result::Result<Event, Infallible>>> {
    let subscription = state.feed().subscribe();
    tracing::debug!(
        subscribers = state.feed().subscriber_count(),
        "SSE client attached to gift feed"
    );

    let stream = subscription.into_stream().filter_map(|next| match next {
        Ok(delta) => match Event::default().event("gift").json_data(&delta) {
            Ok(event) => Some(Ok(event)),
            Err(e) => {
                tracing::error!(error = %e, "Failed to encode gift delta for SSE");
                None
            }
        },
        Err(BroadcastStreamRecvError::Lagged(missed)) => {
            // The client missed deltas and is now stale; it has no replay,
            // so the honest option is to keep relaying and let a reload
            // resync. Mirror that in the log.
            tracing::warn!(missed, "SSE subscriber lagged behind the gift feed");
            None
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
