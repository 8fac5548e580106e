//! Event repository implementation

use sqlx::PgPool;
use uuid::Uuid;
use crate::models::event::{Event, EventStatus, CreateEventRequest};
use crate::utils::errors::VolunteerPayError;

const EVENT_COLUMNS: &str = "id, activity, date, participant_strength, organisation_name, description, guarantor, guarantor_contact, status, created_at";

#[derive(Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new event with `pending` status
    pub async fn create(&self, request: CreateEventRequest) -> Result<Event, VolunteerPayError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            INSERT INTO events (activity, date, participant_strength, organisation_name, description, guarantor, guarantor_contact, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            EVENT_COLUMNS
        ))
        .bind(request.activity)
        .bind(request.date)
        .bind(request.participant_strength)
        .bind(request.organisation_name)
        .bind(request.description)
        .bind(request.guarantor)
        .bind(request.guarantor_contact)
        .bind(EventStatus::Pending)
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    /// Find event by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>, VolunteerPayError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            "SELECT {} FROM events WHERE id = $1",
            EVENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// List all events in creation order
    pub async fn list(&self) -> Result<Vec<Event>, VolunteerPayError> {
        let events = sqlx::query_as::<_, Event>(&format!(
            "SELECT {} FROM events ORDER BY created_at ASC, id ASC",
            EVENT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Update the status only if the event is currently in `from`
    pub async fn transition_status(
        &self,
        id: Uuid,
        from: EventStatus,
        to: EventStatus,
    ) -> Result<Option<Event>, VolunteerPayError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            UPDATE events
            SET status = $3
            WHERE id = $1 AND status = $2
            RETURNING {}
            "#,
            EVENT_COLUMNS
        ))
        .bind(id)
        .bind(from)
        .bind(to)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }
}
