//! Integration tests for Fig & Clover.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p figclover-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `registry_sync` - Feed-to-projection convergence
//! - `checkin_flow` - Reservation submission contract
//! - `feed_payloads` - Change-record wire shape
//!
//! The tests here run against the server crate's library types with scripted
//! stores and in-process feeds - no live database or HTTP server required.
//! End-to-end coverage against a real `PostgreSQL` (seed, trigger, `LISTEN`)
//! needs a provisioned database and lives outside `cargo test`.
