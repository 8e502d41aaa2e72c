//! Domain types for the registry.
//!
//! These types represent validated domain objects separate from database row
//! types (which live beside the queries in [`crate::db`]).

pub mod checkin;
pub mod gift;

pub use checkin::Checkin;
pub use gift::Gift;
