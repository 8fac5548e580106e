//! Participant repository implementation

use sqlx::PgPool;
use uuid::Uuid;
use crate::models::participant::{Participant, CreateParticipantRequest};
use crate::utils::errors::VolunteerPayError;

const PARTICIPANT_COLUMNS: &str = "id, event_id, name, contact_number, wallet_address, status, created_at";

#[derive(Clone)]
pub struct ParticipantRepository {
    pool: PgPool,
}

impl ParticipantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Register a participant for an event.
    ///
    /// A second row for the same wallet and event violates
    /// `participants_event_wallet_key` and is reported as a duplicate.
    pub async fn create(&self, request: CreateParticipantRequest) -> Result<Participant, VolunteerPayError> {
        let result = sqlx::query_as::<_, Participant>(&format!(
            r#"
            INSERT INTO participants (event_id, name, contact_number, wallet_address, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            PARTICIPANT_COLUMNS
        ))
        .bind(request.event_id)
        .bind(&request.name)
        .bind(&request.contact_number)
        .bind(&request.wallet_address)
        .bind(request.status.as_str())
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(participant) => Ok(participant),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(VolunteerPayError::DuplicateParticipant {
                    event_id: request.event_id,
                    wallet_address: request.wallet_address,
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Participants of an event registered with the given wallet address
    pub async fn find_by_event_and_wallet(
        &self,
        event_id: Uuid,
        wallet_address: &str,
    ) -> Result<Vec<Participant>, VolunteerPayError> {
        let participants = sqlx::query_as::<_, Participant>(&format!(
            "SELECT {} FROM participants WHERE wallet_address = $1 AND event_id = $2",
            PARTICIPANT_COLUMNS
        ))
        .bind(wallet_address)
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(participants)
    }

    /// Participants of the given events, in join order
    pub async fn list_for_events(&self, event_ids: &[Uuid]) -> Result<Vec<Participant>, VolunteerPayError> {
        if event_ids.is_empty() {
            return Ok(Vec::new());
        }

        let participants = sqlx::query_as::<_, Participant>(&format!(
            "SELECT {} FROM participants WHERE event_id = ANY($1) ORDER BY created_at ASC, id ASC",
            PARTICIPANT_COLUMNS
        ))
        .bind(event_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(participants)
    }

    /// Participants of a single event, in join order
    pub async fn list_for_event(&self, event_id: Uuid) -> Result<Vec<Participant>, VolunteerPayError> {
        self.list_for_events(&[event_id]).await
    }
}
