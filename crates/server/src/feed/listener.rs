//! Long-lived `LISTEN gift_changes` task.

use sqlx::PgPool;
use sqlx::postgres::PgListener;
use tracing::instrument;

use super::{GiftFeed, normalize};

/// Channel the gift-table trigger notifies on.
const CHANNEL: &str = "gift_changes";

/// Subscribe to gift-table change notifications and republish them on the
/// feed until the connection fails.
///
/// A transport error ends the task: it is logged, the feed goes quiet, and
/// the projection is stale until the process restarts. There is no
/// automatic reconnect loop.
///
/// # Errors
///
/// Returns `sqlx::Error` if the `LISTEN` subscription cannot be
/// established in the first place.
#[instrument(skip_all)]
pub async fn run(pool: &PgPool, feed: GiftFeed) -> Result<(), sqlx::Error> {
    let mut listener = PgListener::connect_with(pool).await?;
    listener.listen(CHANNEL).await?;
    tracing::info!(channel = CHANNEL, "Gift change feed attached");

    loop {
        match listener.recv().await {
            Ok(notification) => {
                if let Some(delta) = normalize(notification.payload()) {
                    tracing::debug!(
                        gift = %delta.gift.name,
                        became_selected = delta.became_selected,
                        "Gift delta received"
                    );
                    feed.publish(delta);
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Gift change feed transport error, feed ended");
                return Ok(());
            }
        }
    }
}
