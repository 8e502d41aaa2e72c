//! Reservation submission contract tests.
//!
//! The flow is exercised through the public `RegistryStore` seam with a
//! scripted store, verifying the call pattern a real submission produces
//! against the gateway.

use std::sync::Mutex;

use chrono::Utc;
use uuid::Uuid;

use figclover_core::{CheckinId, Companions, GiftId, GuestName};
use figclover_server::db::{RepositoryError, ReservationOutcome};
use figclover_server::models::Checkin;
use figclover_server::registry::{CheckinError, CheckinFlow, CheckinRequest, RegistryStore};

/// Store call, as recorded by [`RecordingStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Insert(String),
    Update(GiftId),
}

/// A store that records calls and reserves every gift it is asked to.
#[derive(Default)]
struct RecordingStore {
    calls: Mutex<Vec<Call>>,
    already_reserved: Vec<GiftId>,
}

impl RegistryStore for &RecordingStore {
    async fn create_checkin(
        &self,
        name: &GuestName,
        companions: Companions,
    ) -> Result<Checkin, RepositoryError> {
        self.calls
            .lock()
            .expect("lock")
            .push(Call::Insert(name.to_string()));
        Ok(Checkin {
            id: CheckinId::new(1),
            name: name.clone(),
            companions,
            created_at: Utc::now(),
        })
    }

    async fn mark_reserved(
        &self,
        gift_id: GiftId,
        _checkin_id: CheckinId,
    ) -> Result<ReservationOutcome, RepositoryError> {
        self.calls.lock().expect("lock").push(Call::Update(gift_id));
        if self.already_reserved.contains(&gift_id) {
            Ok(ReservationOutcome::AlreadyReserved)
        } else {
            Ok(ReservationOutcome::Reserved)
        }
    }
}

fn gift_id(n: u128) -> GiftId {
    GiftId::new(Uuid::from_u128(n))
}

#[tokio::test]
async fn a_submission_is_one_insert_then_updates_in_selection_order() {
    let store = RecordingStore::default();
    let flow = CheckinFlow::new(&store);

    // Selection order is deliberately not name order
    let selection = vec![gift_id(3), gift_id(1), gift_id(2)];
    let receipt = flow
        .submit(CheckinRequest {
            name: "Ana Beatriz".to_string(),
            companions: 1,
            gift_ids: selection.clone(),
        })
        .await
        .expect("success");

    let calls = store.calls.lock().expect("lock").clone();
    assert_eq!(
        calls,
        vec![
            Call::Insert("Ana Beatriz".to_string()),
            Call::Update(gift_id(3)),
            Call::Update(gift_id(1)),
            Call::Update(gift_id(2)),
        ]
    );
    assert_eq!(receipt.reserved, selection);
}

#[tokio::test]
async fn validation_failure_makes_no_store_calls() {
    let store = RecordingStore::default();
    let flow = CheckinFlow::new(&store);

    let result = flow
        .submit(CheckinRequest {
            name: "Jo".to_string(),
            companions: 0,
            gift_ids: vec![gift_id(1)],
        })
        .await;

    assert!(matches!(result, Err(CheckinError::InvalidName(_))));
    assert!(store.calls.lock().expect("lock").is_empty());
}

#[tokio::test]
async fn a_lost_race_shows_up_in_the_receipt() {
    let store = RecordingStore {
        already_reserved: vec![gift_id(2)],
        ..RecordingStore::default()
    };
    let flow = CheckinFlow::new(&store);

    let receipt = flow
        .submit(CheckinRequest {
            name: "Ana Beatriz".to_string(),
            companions: 0,
            gift_ids: vec![gift_id(1), gift_id(2)],
        })
        .await
        .expect("flow completes despite the lost race");

    assert_eq!(receipt.reserved, vec![gift_id(1)]);
    assert_eq!(receipt.unavailable, vec![gift_id(2)]);
}

#[tokio::test]
async fn receipts_serialize_for_the_api() {
    let store = RecordingStore::default();
    let flow = CheckinFlow::new(&store);

    let receipt = flow
        .submit(CheckinRequest {
            name: "Ana Beatriz".to_string(),
            companions: 0,
            gift_ids: vec![gift_id(1)],
        })
        .await
        .expect("success");

    let json = serde_json::to_value(&receipt).expect("serialize");
    assert_eq!(json["checkin_id"], 1);
    assert_eq!(
        json["reserved"][0],
        "00000000-0000-0000-0000-000000000001"
    );
    assert_eq!(json["unavailable"], serde_json::json!([]));
}
