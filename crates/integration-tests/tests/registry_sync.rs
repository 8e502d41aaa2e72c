//! Feed-to-projection convergence tests.
//!
//! These drive the same pipeline the server wires up in `main`: raw change
//! payloads are normalized, published on a feed, and applied to a shared
//! projection by the background task.

use std::sync::Arc;

use tokio::sync::RwLock;

use figclover_core::GiftId;
use figclover_server::feed::{GiftFeed, normalize};
use figclover_server::models::Gift;
use figclover_server::registry::{AvailabilityProjection, run_projection};
use uuid::Uuid;

fn catalog_gift(name: &str) -> Gift {
    Gift {
        id: GiftId::new(Uuid::new_v4()),
        name: name.to_string(),
        selected: false,
        checkin_id: None,
        image_url: None,
        shop_url: None,
    }
}

fn change_payload(name: &str, selected: bool) -> String {
    format!(
        r#"{{"new": {{"id": "{}", "name": "{name}", "selected": {selected}, "checkin_id": null, "url_image": null, "url_shop": null}}}}"#,
        Uuid::new_v4()
    )
}

#[tokio::test]
async fn projection_converges_with_the_feed() {
    let projection = Arc::new(RwLock::new(AvailabilityProjection::new()));
    projection.write().await.seed(
        vec![
            catalog_gift("Fondue Set"),
            catalog_gift("Picnic Basket"),
            catalog_gift("Stand Mixer"),
        ],
        vec![],
    );

    let feed = GiftFeed::new();
    let task = tokio::spawn(run_projection(Arc::clone(&projection), feed.subscribe()));

    // Two guests reserve, one reservation is released again
    for payload in [
        change_payload("Picnic Basket", true),
        change_payload("Stand Mixer", true),
        change_payload("Picnic Basket", false),
    ] {
        feed.publish(normalize(&payload).expect("delta"));
    }

    drop(feed);
    task.await.expect("projection task");

    let view = projection.read().await;
    assert_eq!(view.available_names(), vec!["Fondue Set", "Picnic Basket"]);
    assert_eq!(view.reserved_names(), vec!["Stand Mixer"]);
    assert!(view.is_disjoint());
}

#[tokio::test]
async fn events_without_new_payload_do_not_reach_the_projection() {
    let projection = Arc::new(RwLock::new(AvailabilityProjection::new()));
    projection
        .write()
        .await
        .seed(vec![catalog_gift("Fondue Set")], vec![]);

    let feed = GiftFeed::new();
    let task = tokio::spawn(run_projection(Arc::clone(&projection), feed.subscribe()));

    // A delete event and two malformed payloads produce no deltas at all
    assert!(normalize(r#"{"old": {"name": "Fondue Set"}}"#).is_none());
    assert!(normalize("garbage").is_none());
    assert!(normalize(r#"{"new": {"selected": "yes"}}"#).is_none());

    feed.publish(normalize(&change_payload("Fondue Set", true)).expect("delta"));
    drop(feed);
    task.await.expect("projection task");

    let view = projection.read().await;
    assert!(view.available_names().is_empty());
    assert_eq!(view.reserved_names(), vec!["Fondue Set"]);
}

#[tokio::test]
async fn duplicate_delivery_leaves_the_projection_unchanged() {
    let projection = Arc::new(RwLock::new(AvailabilityProjection::new()));
    projection
        .write()
        .await
        .seed(vec![catalog_gift("Fondue Set"), catalog_gift("Stand Mixer")], vec![]);

    let feed = GiftFeed::new();
    let task = tokio::spawn(run_projection(Arc::clone(&projection), feed.subscribe()));

    let payload = change_payload("Stand Mixer", true);
    let delta = normalize(&payload).expect("delta");
    feed.publish(delta.clone());
    feed.publish(delta);

    drop(feed);
    task.await.expect("projection task");

    let view = projection.read().await;
    assert_eq!(view.available_names(), vec!["Fondue Set"]);
    assert_eq!(view.reserved_names(), vec!["Stand Mixer"]);
    assert!(view.is_disjoint());
}

#[tokio::test]
async fn late_subscribers_start_from_their_attach_point() {
    let feed = GiftFeed::new();

    // Published before anyone attaches: discarded, not replayed
    feed.publish(normalize(&change_payload("Fondue Set", true)).expect("delta"));

    let mut subscription = feed.subscribe();
    feed.publish(normalize(&change_payload("Stand Mixer", true)).expect("delta"));

    let first = subscription.recv().await.expect("delta");
    assert_eq!(first.gift.name, "Stand Mixer");
}
