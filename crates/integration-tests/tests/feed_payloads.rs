//! Change-record wire shape tests.
//!
//! The `gift_changes` trigger emits `{"new": row_to_json(NEW)}`; these tests
//! pin the listener's normalization against that exact shape, including the
//! fields the sync logic never touches.

use figclover_server::feed::normalize;
use figclover_server::models::Gift;

const RESERVED_ROW: &str = r#"{
    "new": {
        "id": "7b0c2c8e-63d2-4f6a-9f6d-0b2f3a1c9d4e",
        "name": "Stand Mixer",
        "selected": true,
        "checkin_id": 12,
        "url_image": "https://cdn.figclover.com/gifts/stand-mixer.jpg",
        "url_shop": "https://shop.example.com/stand-mixer"
    }
}"#;

#[test]
fn a_full_trigger_row_normalizes_with_all_fields() {
    let delta = normalize(RESERVED_ROW).expect("delta");

    assert!(delta.became_selected);
    assert_eq!(delta.gift.name, "Stand Mixer");
    assert_eq!(
        delta.gift.checkin_id.map(|id| id.as_i32()),
        Some(12)
    );
    assert_eq!(
        delta.gift.url_image.as_deref(),
        Some("https://cdn.figclover.com/gifts/stand-mixer.jpg")
    );

    // The record converts losslessly into the domain gift
    let gift = Gift::from(delta.gift);
    assert!(gift.selected);
    assert_eq!(
        gift.shop_url.as_deref(),
        Some("https://shop.example.com/stand-mixer")
    );
}

#[test]
fn an_insert_row_without_optional_fields_normalizes() {
    let payload = r#"{"new": {"id": "7b0c2c8e-63d2-4f6a-9f6d-0b2f3a1c9d4e", "name": "Fondue Set", "selected": false}}"#;
    let delta = normalize(payload).expect("delta");

    assert!(!delta.became_selected);
    assert!(delta.gift.checkin_id.is_none());
    assert!(delta.gift.url_image.is_none());
    assert!(delta.gift.url_shop.is_none());
}

#[test]
fn delete_events_and_noise_are_dropped() {
    assert!(normalize(r#"{"old": {"name": "Stand Mixer"}}"#).is_none());
    assert!(normalize("{}").is_none());
    assert!(normalize("").is_none());
    assert!(normalize(r#"{"new": null}"#).is_none());
    assert!(normalize(r#"{"new": {"id": "not-a-uuid", "name": "x", "selected": true}}"#).is_none());
}
