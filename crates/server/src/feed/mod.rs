//! Gift change feed.
//!
//! The `gift` table carries a trigger that emits a `gift_changes`
//! notification for every insert and update (see the migrations). This
//! module is the subscribing side:
//!
//! - [`listener`] holds the long-lived `LISTEN` connection and pushes each
//!   raw change record through [`normalize`].
//! - [`GiftFeed`] republishes the normalized [`GiftDelta`]s to all current
//!   subscribers in arrival order. There is no buffering or replay: late
//!   subscribers must seed their state through the gateway first, then
//!   attach. The window between seed and attach is an accepted race.
//!
//! A subscription is an explicit value ([`FeedSubscription`]); dropping it
//! releases the broadcast slot, so feed lifetime is tied to the owning
//! scope.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;

use figclover_core::{CheckinId, GiftId};

use crate::models::Gift;

pub mod listener;

/// How many deltas a slow subscriber may fall behind before it starts
/// losing events. Registry traffic is a trickle; 64 is generous.
const FEED_CAPACITY: usize = 64;

/// The gift fields carried by a change record's `new` payload.
///
/// Field names match the wire shape of the change record (and therefore the
/// `gift` table columns).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiftRecord {
    pub id: GiftId,
    pub name: String,
    pub selected: bool,
    #[serde(default)]
    pub checkin_id: Option<CheckinId>,
    #[serde(default)]
    pub url_image: Option<String>,
    #[serde(default)]
    pub url_shop: Option<String>,
}

impl From<GiftRecord> for Gift {
    fn from(record: GiftRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            selected: record.selected,
            checkin_id: record.checkin_id,
            image_url: record.url_image,
            shop_url: record.url_shop,
        }
    }
}

/// A normalized description of a single gift-state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GiftDelta {
    /// The gift's state after the change.
    pub gift: GiftRecord,
    /// True if the change reserved the gift, false if it (re)entered the
    /// available set.
    pub became_selected: bool,
}

/// Raw change record as delivered on the `gift_changes` channel.
///
/// Deletions and other events without a `new` payload deserialize with
/// `new: None` and are dropped by [`normalize`].
#[derive(Debug, Deserialize)]
struct ChangeRecord {
    #[serde(default)]
    new: Option<GiftRecord>,
}

/// Normalize a raw change payload into a [`GiftDelta`].
///
/// Returns `None` for records lacking a `new` payload (deletions) and for
/// malformed payloads - both are dropped, not forwarded.
#[must_use]
pub fn normalize(payload: &str) -> Option<GiftDelta> {
    let record = match serde_json::from_str::<ChangeRecord>(payload) {
        Ok(record) => record,
        Err(e) => {
            tracing::warn!(error = %e, "Dropping malformed gift change record");
            return None;
        }
    };

    let Some(gift) = record.new else {
        tracing::debug!("Dropping gift change record without a new payload");
        return None;
    };

    let became_selected = gift.selected;
    Some(GiftDelta {
        gift,
        became_selected,
    })
}

/// Fan-out point for normalized gift deltas.
///
/// Cheap to clone; all clones publish into the same channel.
#[derive(Debug, Clone)]
pub struct GiftFeed {
    tx: broadcast::Sender<GiftDelta>,
}

impl GiftFeed {
    /// Create a new feed with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(FEED_CAPACITY);
        Self { tx }
    }

    /// Attach a subscriber.
    ///
    /// The subscription only sees deltas published after this call.
    #[must_use]
    pub fn subscribe(&self) -> FeedSubscription {
        FeedSubscription {
            rx: self.tx.subscribe(),
        }
    }

    /// Publish a delta to all current subscribers, in arrival order.
    ///
    /// A delta with no subscribers is simply discarded.
    pub fn publish(&self, delta: GiftDelta) {
        let _ = self.tx.send(delta);
    }

    /// Number of currently attached subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for GiftFeed {
    fn default() -> Self {
        Self::new()
    }
}

/// A live attachment to the gift feed.
///
/// Dropping the subscription detaches it from the feed.
#[derive(Debug)]
pub struct FeedSubscription {
    rx: broadcast::Receiver<GiftDelta>,
}

impl FeedSubscription {
    /// Receive the next delta.
    ///
    /// # Errors
    ///
    /// Returns `RecvError::Closed` when the feed has shut down, and
    /// `RecvError::Lagged` when this subscriber fell too far behind and
    /// missed deltas.
    pub async fn recv(&mut self) -> Result<GiftDelta, broadcast::error::RecvError> {
        self.rx.recv().await
    }

    /// Convert into a stream, for SSE relaying.
    #[must_use]
    pub fn into_stream(self) -> BroadcastStream<GiftDelta> {
        BroadcastStream::new(self.rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_json(name: &str, selected: bool) -> String {
        format!(
            r#"{{"new": {{"id": "1f8f7a94-1111-4222-8333-444455556666", "name": "{name}", "selected": {selected}, "url_image": null, "url_shop": null}}}}"#
        )
    }

    #[test]
    fn normalize_maps_selected_to_became_selected() {
        let delta = normalize(&record_json("Toaster", true)).expect("delta");
        assert!(delta.became_selected);
        assert_eq!(delta.gift.name, "Toaster");

        let delta = normalize(&record_json("Toaster", false)).expect("delta");
        assert!(!delta.became_selected);
    }

    #[test]
    fn normalize_drops_records_without_new_payload() {
        // Delete events carry only the old row
        assert_eq!(normalize(r#"{"old": {"id": "x"}}"#), None);
        assert_eq!(normalize("{}"), None);
    }

    #[test]
    fn normalize_drops_malformed_payloads() {
        assert_eq!(normalize("not json"), None);
        assert_eq!(normalize(r#"{"new": {"name": 42}}"#), None);
    }

    #[tokio::test]
    async fn feed_delivers_deltas_in_arrival_order() {
        let feed = GiftFeed::new();
        let mut sub = feed.subscribe();

        for name in ["a", "b", "c"] {
            feed.publish(normalize(&record_json(name, true)).expect("delta"));
        }

        for name in ["a", "b", "c"] {
            let delta = sub.recv().await.expect("delta");
            assert_eq!(delta.gift.name, name);
        }
    }

    #[tokio::test]
    async fn late_subscribers_do_not_see_earlier_deltas() {
        let feed = GiftFeed::new();
        feed.publish(normalize(&record_json("early", true)).expect("delta"));

        let mut sub = feed.subscribe();
        feed.publish(normalize(&record_json("late", true)).expect("delta"));

        let delta = sub.recv().await.expect("delta");
        assert_eq!(delta.gift.name, "late");
    }

    #[test]
    fn dropping_a_subscription_detaches_it() {
        let feed = GiftFeed::new();
        let sub = feed.subscribe();
        assert_eq!(feed.subscriber_count(), 1);
        drop(sub);
        assert_eq!(feed.subscriber_count(), 0);
    }
}
