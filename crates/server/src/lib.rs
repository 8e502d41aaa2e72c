//! Fig & Clover registry server library.
//!
//! This crate provides the registry service as a library, allowing it to be
//! tested and reused.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod feed;
pub mod models;
pub mod registry;
pub mod routes;
pub mod state;
