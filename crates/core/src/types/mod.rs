//! Core types for Fig & Clover.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod companions;
pub mod guest_name;
pub mod id;

pub use companions::{Companions, CompanionsError};
pub use guest_name::{GuestName, GuestNameError};
pub use id::*;
