//! Fig & Clover Core - Shared types library.
//!
//! This crate provides common types used across all Fig & Clover components:
//! - `server` - Registry and RSVP API service
//! - `cli` - Command-line tools for migrations and catalog seeding
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, guest names, and
//!   companion counts

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
