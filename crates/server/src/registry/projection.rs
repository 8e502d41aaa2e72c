//! Availability projection: the derived view partitioning gifts into
//! available and reserved sets.
//!
//! This is a plain state container with a single mutation entry point,
//! [`AvailabilityProjection::apply`], deliberately decoupled from the I/O
//! that feeds it so the set semantics are testable on their own. It is
//! rebuilt from a full fetch on startup and never persisted - the store
//! remains the source of truth.

use std::collections::BTreeMap;

use crate::feed::GiftDelta;
use crate::models::Gift;

/// In-memory partition of the registry into available and reserved gifts.
///
/// Both sides are keyed by gift name (the registry's dedup key), so
/// duplicate inserts and removals of non-members are no-ops and applying
/// the same delta twice equals applying it once. The two sides are
/// disjoint after every mutation.
///
/// Keying by a `BTreeMap` also gives the ascending-name iteration order the
/// registry view requires, with no separate sort step.
#[derive(Debug, Default)]
pub struct AvailabilityProjection {
    available: BTreeMap<String, Gift>,
    reserved: BTreeMap<String, Gift>,
}

impl AvailabilityProjection {
    /// Create an empty projection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            available: BTreeMap::new(),
            reserved: BTreeMap::new(),
        }
    }

    /// Rebuild both sides from full gateway fetches.
    ///
    /// Any previous contents are discarded. A gift appearing in both input
    /// lists ends up reserved only - the disjointness invariant wins over
    /// an inconsistent snapshot.
    pub fn seed(&mut self, available: Vec<Gift>, reserved: Vec<Gift>) {
        self.available = available
            .into_iter()
            .map(|gift| (gift.name.clone(), gift))
            .collect();
        self.reserved = reserved
            .into_iter()
            .map(|gift| (gift.name.clone(), gift))
            .collect();
        for name in self.reserved.keys() {
            self.available.remove(name);
        }
    }

    /// Apply a single normalized change to the partition.
    ///
    /// `became_selected == true` moves the gift from available to reserved;
    /// `false` moves it back. Either way the gift ends up on exactly one
    /// side.
    pub fn apply(&mut self, delta: &GiftDelta) {
        let gift = Gift::from(delta.gift.clone());
        let name = gift.name.clone();

        if delta.became_selected {
            self.available.remove(&name);
            self.reserved.insert(name, gift);
        } else {
            self.reserved.remove(&name);
            self.available.insert(name, gift);
        }
    }

    /// Snapshot of available gifts, name ascending.
    #[must_use]
    pub fn available_gifts(&self) -> Vec<Gift> {
        self.available.values().cloned().collect()
    }

    /// Names of available gifts, ascending.
    #[must_use]
    pub fn available_names(&self) -> Vec<String> {
        self.available.keys().cloned().collect()
    }

    /// Names of reserved gifts, ascending.
    #[must_use]
    pub fn reserved_names(&self) -> Vec<String> {
        self.reserved.keys().cloned().collect()
    }

    /// Number of available gifts.
    #[must_use]
    pub fn available_len(&self) -> usize {
        self.available.len()
    }

    /// Number of reserved gifts.
    #[must_use]
    pub fn reserved_len(&self) -> usize {
        self.reserved.len()
    }

    /// True if no gift appears on both sides.
    ///
    /// Holds after every `seed`/`apply`; exposed so tests can assert it.
    #[must_use]
    pub fn is_disjoint(&self) -> bool {
        self.available
            .keys()
            .all(|name| !self.reserved.contains_key(name))
    }
}
