//! Database service layer
//!
//! Combines the event and participant repositories into the `EventStore`
//! the services work against.

use std::collections::HashMap;
use async_trait::async_trait;
use uuid::Uuid;

use crate::database::{DatabasePool, EventRepository, ParticipantRepository};
use crate::database::store::EventStore;
use crate::models::*;
use crate::utils::errors::Result;

#[derive(Clone)]
pub struct DatabaseService {
    pub events: EventRepository,
    pub participants: ParticipantRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            events: EventRepository::new(pool.clone()),
            participants: ParticipantRepository::new(pool),
        }
    }
}

/// Attach each participant to its event, keeping both orders intact
pub fn group_participants(events: Vec<Event>, participants: Vec<Participant>) -> Vec<EventWithParticipants> {
    let mut by_event: HashMap<Uuid, Vec<Participant>> = HashMap::new();
    for participant in participants {
        by_event.entry(participant.event_id).or_default().push(participant);
    }

    events
        .into_iter()
        .map(|event| {
            let participants = by_event.remove(&event.id).unwrap_or_default();
            EventWithParticipants { event, participants }
        })
        .collect()
}

#[async_trait]
impl EventStore for DatabaseService {
    async fn list_events(&self) -> Result<Vec<EventWithParticipants>> {
        let events = self.events.list().await?;
        let ids: Vec<Uuid> = events.iter().map(|e| e.id).collect();
        let participants = self.participants.list_for_events(&ids).await?;

        Ok(group_participants(events, participants))
    }

    async fn find_event(&self, event_id: Uuid) -> Result<Option<EventWithParticipants>> {
        let Some(event) = self.events.find_by_id(event_id).await? else {
            return Ok(None);
        };
        let participants = self.participants.list_for_event(event_id).await?;

        Ok(Some(EventWithParticipants { event, participants }))
    }

    async fn insert_event(&self, request: CreateEventRequest) -> Result<Event> {
        self.events.create(request).await
    }

    async fn transition_event_status(
        &self,
        event_id: Uuid,
        from: EventStatus,
        to: EventStatus,
    ) -> Result<Option<Event>> {
        self.events.transition_status(event_id, from, to).await
    }

    async fn find_participants(&self, event_id: Uuid, wallet_address: &str) -> Result<Vec<Participant>> {
        self.participants.find_by_event_and_wallet(event_id, wallet_address).await
    }

    async fn insert_participant(&self, request: CreateParticipantRequest) -> Result<Participant> {
        self.participants.create(request).await
    }
}
