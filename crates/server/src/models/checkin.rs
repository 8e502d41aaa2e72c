//! Checkin domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;

use figclover_core::{CheckinId, Companions, GuestName};

/// A guest's RSVP record.
///
/// Created once per submission; never updated or deleted. One checkin may
/// be referenced by zero or more reserved gifts.
#[derive(Debug, Clone, Serialize)]
pub struct Checkin {
    /// Store-assigned identifier.
    pub id: CheckinId,
    /// Guest display name (validated, minimum 3 characters).
    pub name: GuestName,
    /// Number of additional guests.
    pub companions: Companions,
    /// When the RSVP was submitted.
    pub created_at: DateTime<Utc>,
}
