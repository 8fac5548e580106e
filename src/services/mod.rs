//! Services module
//!
//! This module contains business logic services

pub mod admin;
pub mod creation;
pub mod listing;
pub mod wallet;

// Re-export commonly used services
pub use admin::{AdminService, AdminEventView, ActionResult};
pub use creation::{EventCreationService, EventForm, CreationOutcome};
pub use listing::{EventListingService, EventCard, JoinForm, JoinOutcome, JoinStart};
pub use wallet::{WalletConnector, WalletConnectorClient, WalletSession, SharedWalletConnector};

use tracing::warn;

use crate::database::SharedEventStore;

/// Screens a user can be sent to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Listing,
    Create,
    Admin,
}

impl Page {
    pub fn command(&self) -> &'static str {
        match self {
            Page::Listing => "/events",
            Page::Create => "/create",
            Page::Admin => "/admin",
        }
    }
}

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub listing_service: EventListingService,
    pub creation_service: EventCreationService,
    pub admin_service: AdminService,
    pub wallet: SharedWalletConnector,
    /// Connector challenge fetched at startup
    pub challenge: Option<String>,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(store: SharedEventStore, wallet: SharedWalletConnector) -> Self {
        Self {
            listing_service: EventListingService::new(store.clone(), wallet.clone()),
            creation_service: EventCreationService::new(store.clone()),
            admin_service: AdminService::new(store, wallet.clone()),
            wallet,
            challenge: None,
        }
    }

    /// Fetch and keep the connector challenge. Failure is logged, not fatal.
    pub async fn load_challenge(&mut self) {
        match self.wallet.fetch_challenge().await {
            Ok(message) => self.challenge = Some(message),
            Err(e) => warn!(error = %e, "Failed to fetch wallet connector challenge"),
        }
    }

    /// Link a user opens to connect a wallet
    pub fn connect_url(&self, user_id: i64) -> String {
        self.wallet.connect_url(user_id, self.challenge.as_deref())
    }
}
