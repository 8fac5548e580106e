//! Event listing service
//!
//! Reads every event with its participants and lets a user with a
//! connected wallet join an approved event.

use tracing::{debug, info};
use uuid::Uuid;

use crate::database::SharedEventStore;
use crate::models::{CreateParticipantRequest, EventWithParticipants, Participant, ParticipantStatus};
use crate::services::wallet::{SharedWalletConnector, WalletSession};
use crate::utils::errors::{VolunteerPayError, Result};
use crate::utils::helpers::is_valid_wallet_address;
use crate::utils::logging::log_event_action;

pub const MISSING_JOIN_FIELDS: &str = "Please enter both name and contact number";

/// One event as shown in the listing
#[derive(Debug, Clone)]
pub struct EventCard {
    pub event: EventWithParticipants,
    pub join_enabled: bool,
}

/// Details a participant submits when joining
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinForm {
    pub name: String,
    pub contact_number: String,
}

impl JoinForm {
    pub fn new(name: impl Into<String>, contact_number: impl Into<String>) -> Self {
        Self {
            name: name.into().trim().to_string(),
            contact_number: contact_number.into().trim().to_string(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.contact_number.is_empty()
    }
}

/// Result of a join attempt that reached the store, or was stopped before it
#[derive(Debug, Clone)]
pub enum JoinOutcome {
    WalletRequired,
    EventNotOpen,
    AlreadyJoined,
    Joined(Participant),
}

/// Whether a join conversation can start
#[derive(Debug, Clone)]
pub enum JoinStart {
    Ready(WalletSession),
    Blocked(JoinOutcome),
}

#[derive(Clone)]
pub struct EventListingService {
    store: SharedEventStore,
    wallet: SharedWalletConnector,
}

impl EventListingService {
    pub fn new(store: SharedEventStore, wallet: SharedWalletConnector) -> Self {
        Self { store, wallet }
    }

    /// All events in creation order, join enabled only for approved ones
    pub async fn load(&self) -> Result<Vec<EventCard>> {
        let events = self.store.list_events().await?;
        debug!(count = events.len(), "Loaded events for listing");

        Ok(events
            .into_iter()
            .map(|event| {
                let join_enabled = event.status().accepts_participants();
                EventCard { event, join_enabled }
            })
            .collect())
    }

    /// Check wallet and event state before asking the user for details
    pub async fn begin_join(&self, user_id: i64, event_id: Uuid) -> Result<JoinStart> {
        let Some(mut session) = self.wallet.session(user_id).await? else {
            return Ok(JoinStart::Blocked(JoinOutcome::WalletRequired));
        };
        session.account = payout_address(&session)?;

        let event = self.open_event(event_id).await?;
        if !event.status().accepts_participants() {
            return Ok(JoinStart::Blocked(JoinOutcome::EventNotOpen));
        }

        if !self.store.find_participants(event_id, &session.account).await?.is_empty() {
            return Ok(JoinStart::Blocked(JoinOutcome::AlreadyJoined));
        }

        Ok(JoinStart::Ready(session))
    }

    /// Register the user's connected wallet for `event_id`
    pub async fn join(&self, user_id: i64, event_id: Uuid, form: JoinForm) -> Result<JoinOutcome> {
        let Some(session) = self.wallet.session(user_id).await? else {
            return Ok(JoinOutcome::WalletRequired);
        };
        let wallet_address = payout_address(&session)?;

        if !form.is_complete() {
            return Err(VolunteerPayError::InvalidInput(MISSING_JOIN_FIELDS.to_string()));
        }

        let event = self.open_event(event_id).await?;
        if !event.status().accepts_participants() {
            return Ok(JoinOutcome::EventNotOpen);
        }

        let existing = self.store.find_participants(event_id, &wallet_address).await?;
        if !existing.is_empty() {
            debug!(event_id = %event_id, wallet = %wallet_address, "Wallet already joined");
            return Ok(JoinOutcome::AlreadyJoined);
        }

        let request = CreateParticipantRequest {
            event_id,
            name: form.name,
            contact_number: form.contact_number,
            wallet_address: wallet_address.clone(),
            status: ParticipantStatus::Pending,
        };

        match self.store.insert_participant(request).await {
            Ok(participant) => {
                log_event_action(event_id, "join", user_id, Some(&wallet_address));
                info!(event_id = %event_id, participant_id = %participant.id, "Participant joined event");
                Ok(JoinOutcome::Joined(participant))
            }
            Err(VolunteerPayError::DuplicateParticipant { .. }) => Ok(JoinOutcome::AlreadyJoined),
            Err(e) => Err(e),
        }
    }

    async fn open_event(&self, event_id: Uuid) -> Result<EventWithParticipants> {
        self.store
            .find_event(event_id)
            .await?
            .ok_or(VolunteerPayError::EventNotFound { event_id })
    }
}

/// The connected account as stored on a participant row: lowercase and well formed
fn payout_address(session: &WalletSession) -> Result<String> {
    let address = session.account.trim().to_lowercase();
    if !is_valid_wallet_address(&address) {
        return Err(VolunteerPayError::InvalidInput(format!(
            "The connected wallet {} is not a valid address. Reconnect with /wallet.",
            session.account
        )));
    }
    Ok(address)
}
