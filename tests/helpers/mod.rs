//! Test helpers module
//!
//! Shared doubles and fixtures for the integration tests: an in-memory
//! event store, a scripted wallet connector and fake data builders.

#![allow(dead_code)]

pub mod memory_store;
pub mod wallet_mock;
pub mod test_data;
pub mod database_helper;

pub use memory_store::*;
pub use wallet_mock::*;
pub use test_data::*;
