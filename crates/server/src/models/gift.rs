//! Gift domain type.

use serde::Serialize;

use figclover_core::{CheckinId, GiftId};

/// A registry item a guest may reserve.
///
/// A gift is in exactly one of two states at any observation point:
/// available (`selected == false`, no `checkin_id`) or reserved
/// (`selected == true`, `checkin_id` points at the reserving checkin).
/// It transitions from available to reserved exactly once.
#[derive(Debug, Clone, Serialize)]
pub struct Gift {
    /// Store-assigned identifier.
    pub id: GiftId,
    /// Display name; also the dedup key in the availability projection.
    pub name: String,
    /// True once reserved.
    pub selected: bool,
    /// The checkin that reserved this gift, if any.
    pub checkin_id: Option<CheckinId>,
    /// Product photo shown on the registry card. Inert to sync logic.
    pub image_url: Option<String>,
    /// Link to a shop selling the item. Inert to sync logic.
    pub shop_url: Option<String>,
}
