//! Gift registry sync subsystem.
//!
//! Three pieces, wired together in `main`:
//!
//! - [`projection`] - the in-memory partition of gifts into available and
//!   reserved sets, seeded from the store and kept current by deltas.
//! - [`checkin`] - the reservation submission flow (validate, insert
//!   checkin, mark gifts reserved).
//! - [`run_projection`] - the background task feeding deltas into the
//!   shared projection.

use std::sync::Arc;

use tokio::sync::RwLock;
use tokio::sync::broadcast::error::RecvError;

use crate::feed::FeedSubscription;

pub mod checkin;
pub mod projection;

pub use checkin::{CheckinError, CheckinFlow, CheckinReceipt, CheckinRequest, RegistryStore};
pub use projection::AvailabilityProjection;

/// Apply feed deltas to the shared projection until the feed ends.
///
/// A lagged subscription is logged and resumed: the projection misses the
/// dropped deltas and is stale for those gifts until restart, which matches
/// the feed's no-replay contract.
pub async fn run_projection(
    projection: Arc<RwLock<AvailabilityProjection>>,
    mut subscription: FeedSubscription,
) {
    loop {
        match subscription.recv().await {
            Ok(delta) => {
                projection.write().await.apply(&delta);
            }
            Err(RecvError::Lagged(missed)) => {
                tracing::warn!(missed, "Projection lagged behind the gift feed");
            }
            Err(RecvError::Closed) => {
                tracing::info!("Gift feed closed, projection task ending");
                return;
            }
        }
    }
}
