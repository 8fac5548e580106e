//! VolunteerPay Telegram Bot
//!
//! Organisations submit volunteer events, an administrator approves or
//! rejects them, volunteers join approved events with a connected VeChain
//! wallet, and the administrator pays every participant of an event in a
//! single multi-clause transaction.

#![allow(non_snake_case)]

pub mod config;
pub mod handlers;
pub mod services;
pub mod models;
pub mod database;
pub mod state;
pub mod utils;
pub mod middleware;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{VolunteerPayError, WalletError, Result};

// Re-export main components for easy access
pub use database::{DatabaseService, EventStore};
pub use services::ServiceFactory;
pub use state::{AppContext, ScenarioManager, StateStorage};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
