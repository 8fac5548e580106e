//! Store abstraction over the `events` and `participants` tables
//!
//! Services receive an `Arc<dyn EventStore>` so the Postgres-backed
//! `DatabaseService` can be swapped for an in-memory store in tests.

use std::sync::Arc;
use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{
    CreateEventRequest, CreateParticipantRequest, Event, EventStatus, EventWithParticipants,
    Participant,
};
use crate::utils::errors::Result;

pub type SharedEventStore = Arc<dyn EventStore>;

#[async_trait]
pub trait EventStore: Send + Sync {
    /// All events with their participants, in creation order
    async fn list_events(&self) -> Result<Vec<EventWithParticipants>>;

    /// One event with its participants
    async fn find_event(&self, event_id: Uuid) -> Result<Option<EventWithParticipants>>;

    /// Insert an event; the store assigns id, `pending` status and timestamp
    async fn insert_event(&self, request: CreateEventRequest) -> Result<Event>;

    /// Move an event from `from` to `to` in one conditional update.
    ///
    /// Returns `None` when the event does not exist or is not in `from`.
    async fn transition_event_status(
        &self,
        event_id: Uuid,
        from: EventStatus,
        to: EventStatus,
    ) -> Result<Option<Event>>;

    /// Participants of `event_id` registered with `wallet_address`
    async fn find_participants(&self, event_id: Uuid, wallet_address: &str) -> Result<Vec<Participant>>;

    async fn insert_participant(&self, request: CreateParticipantRequest) -> Result<Participant>;
}
