//! In-memory event store
//!
//! Mirrors the Postgres store: conditional status updates, a unique
//! `(event_id, wallet_address)` pair and creation-ordered listings.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use VolunteerPay::database::{EventStore, SharedEventStore};
use VolunteerPay::models::{
    CreateEventRequest, CreateParticipantRequest, Event, EventStatus, EventWithParticipants,
    Participant,
};
use VolunteerPay::{Result, VolunteerPayError};

#[derive(Default)]
pub struct InMemoryEventStore {
    events: Mutex<Vec<Event>>,
    participants: Mutex<Vec<Participant>>,
    transitions: Mutex<Vec<(Uuid, EventStatus, EventStatus)>>,
    fail_writes: AtomicBool,
    fail_transitions_to: Mutex<Option<EventStatus>>,
    skip_duplicate_lookup: AtomicBool,
}

impl InMemoryEventStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn shared(self: &Arc<Self>) -> SharedEventStore {
        self.clone()
    }

    /// Make every insert and update fail as if the database were down
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Make only status updates into `status` fail, leaving every other write working
    pub fn fail_transitions_to(&self, status: Option<EventStatus>) {
        *self.fail_transitions_to.lock().unwrap() = status;
    }

    /// Make the pre-insert duplicate lookup return nothing, so only the
    /// unique constraint stands between a wallet and a second row
    pub fn skip_duplicate_lookup(&self, skip: bool) {
        self.skip_duplicate_lookup.store(skip, Ordering::SeqCst);
    }

    /// Seed an event directly in the given status
    pub fn seed_event(&self, activity: &str, status: EventStatus) -> Event {
        let event = Event {
            id: Uuid::new_v4(),
            activity: activity.to_string(),
            date: None,
            participant_strength: 0,
            organisation_name: String::new(),
            description: String::new(),
            guarantor: String::new(),
            guarantor_contact: String::new(),
            status,
            created_at: Utc::now(),
        };
        self.events.lock().unwrap().push(event.clone());
        event
    }

    /// Seed a participant row without any checks
    pub fn seed_participant(&self, event_id: Uuid, name: &str, wallet: &str) -> Participant {
        let participant = Participant {
            id: Uuid::new_v4(),
            event_id,
            name: name.to_string(),
            contact_number: "555-0100".to_string(),
            wallet_address: wallet.to_string(),
            status: "pending".to_string(),
            created_at: Utc::now(),
        };
        self.participants.lock().unwrap().push(participant.clone());
        participant
    }

    pub fn status_of(&self, event_id: Uuid) -> Option<EventStatus> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == event_id)
            .map(|e| e.status)
    }

    pub fn event_count(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn participants_of(&self, event_id: Uuid) -> Vec<Participant> {
        self.participants
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.event_id == event_id)
            .cloned()
            .collect()
    }

    /// Successful status changes, in order
    pub fn transitions(&self) -> Vec<(Uuid, EventStatus, EventStatus)> {
        self.transitions.lock().unwrap().clone()
    }

    fn check_writable(&self) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(VolunteerPayError::ServiceUnavailable("database is read-only".to_string()));
        }
        Ok(())
    }

    fn with_participants(&self, event: Event) -> EventWithParticipants {
        let participants = self.participants_of(event.id);
        EventWithParticipants { event, participants }
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn list_events(&self) -> Result<Vec<EventWithParticipants>> {
        let events = self.events();
        Ok(events.into_iter().map(|e| self.with_participants(e)).collect())
    }

    async fn find_event(&self, event_id: Uuid) -> Result<Option<EventWithParticipants>> {
        let event = self.events().into_iter().find(|e| e.id == event_id);
        Ok(event.map(|e| self.with_participants(e)))
    }

    async fn insert_event(&self, request: CreateEventRequest) -> Result<Event> {
        self.check_writable()?;
        let event = Event {
            id: Uuid::new_v4(),
            activity: request.activity,
            date: request.date,
            participant_strength: request.participant_strength,
            organisation_name: request.organisation_name,
            description: request.description,
            guarantor: request.guarantor,
            guarantor_contact: request.guarantor_contact,
            status: EventStatus::Pending,
            created_at: Utc::now(),
        };
        self.events.lock().unwrap().push(event.clone());
        Ok(event)
    }

    async fn transition_event_status(
        &self,
        event_id: Uuid,
        from: EventStatus,
        to: EventStatus,
    ) -> Result<Option<Event>> {
        self.check_writable()?;
        if *self.fail_transitions_to.lock().unwrap() == Some(to) {
            return Err(VolunteerPayError::ServiceUnavailable("connection reset".to_string()));
        }
        let mut events = self.events.lock().unwrap();
        let Some(event) = events.iter_mut().find(|e| e.id == event_id && e.status == from) else {
            return Ok(None);
        };
        event.status = to;
        self.transitions.lock().unwrap().push((event_id, from, to));
        Ok(Some(event.clone()))
    }

    async fn find_participants(&self, event_id: Uuid, wallet_address: &str) -> Result<Vec<Participant>> {
        if self.skip_duplicate_lookup.load(Ordering::SeqCst) {
            return Ok(Vec::new());
        }
        Ok(self
            .participants_of(event_id)
            .into_iter()
            .filter(|p| p.wallet_address == wallet_address)
            .collect())
    }

    async fn insert_participant(&self, request: CreateParticipantRequest) -> Result<Participant> {
        self.check_writable()?;
        let mut participants = self.participants.lock().unwrap();
        if participants
            .iter()
            .any(|p| p.event_id == request.event_id && p.wallet_address == request.wallet_address)
        {
            return Err(VolunteerPayError::DuplicateParticipant {
                event_id: request.event_id,
                wallet_address: request.wallet_address,
            });
        }

        let participant = Participant {
            id: Uuid::new_v4(),
            event_id: request.event_id,
            name: request.name,
            contact_number: request.contact_number,
            wallet_address: request.wallet_address,
            status: request.status.as_str().to_string(),
            created_at: Utc::now(),
        };
        participants.push(participant.clone());
        Ok(participant)
    }
}
