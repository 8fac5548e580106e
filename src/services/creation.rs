//! Event creation service

use tracing::{error, info};

use crate::database::SharedEventStore;
use crate::models::{CreateEventRequest, Event};
use crate::services::Page;
use crate::utils::errors::{VolunteerPayError, Result};
use crate::utils::helpers::{normalize_answer, parse_event_date};
use crate::utils::logging::log_user_action;

/// Raw answers collected by the `create_event` conversation.
///
/// Every field may be blank. `date` and `participant_strength` are parsed
/// when the form is turned into a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventForm {
    pub activity: String,
    pub date: String,
    pub participant_strength: String,
    pub organisation_name: String,
    pub description: String,
    pub guarantor: String,
    pub guarantor_contact: String,
}

impl EventForm {
    /// Parse the typed fields; blank date stays unset and blank strength is 0
    pub fn into_request(self) -> Result<CreateEventRequest> {
        let date_text = normalize_answer(&self.date);
        let date = if date_text.is_empty() {
            None
        } else {
            Some(parse_event_date(&date_text).ok_or_else(|| {
                VolunteerPayError::InvalidInput(format!("Invalid date: {}", date_text))
            })?)
        };

        let strength_text = normalize_answer(&self.participant_strength);
        let participant_strength = if strength_text.is_empty() {
            0
        } else {
            strength_text.parse::<i32>().map_err(|_| {
                VolunteerPayError::InvalidInput(format!("Invalid participant strength: {}", strength_text))
            })?
        };

        Ok(CreateEventRequest {
            activity: normalize_answer(&self.activity),
            date,
            participant_strength,
            organisation_name: normalize_answer(&self.organisation_name),
            description: normalize_answer(&self.description),
            guarantor: normalize_answer(&self.guarantor),
            guarantor_contact: normalize_answer(&self.guarantor_contact),
        })
    }
}

/// What happened to a submitted form. The user is always sent to `redirect`.
#[derive(Debug, Clone)]
pub struct CreationOutcome {
    pub event: Option<Event>,
    pub error: Option<String>,
    pub redirect: Page,
}

#[derive(Clone)]
pub struct EventCreationService {
    store: SharedEventStore,
}

impl EventCreationService {
    pub fn new(store: SharedEventStore) -> Self {
        Self { store }
    }

    /// Insert one `pending` event.
    ///
    /// Store failures are logged and reported in the outcome rather than
    /// returned; navigation to the listing happens either way. Malformed
    /// typed fields are rejected before the store is touched.
    pub async fn submit(&self, user_id: i64, form: EventForm) -> Result<CreationOutcome> {
        let request = form.into_request()?;

        match self.store.insert_event(request).await {
            Ok(event) => {
                log_user_action(user_id, "create_event", Some(&event.id.to_string()));
                info!(event_id = %event.id, activity = %event.activity, "Event submitted for approval");
                Ok(CreationOutcome {
                    event: Some(event),
                    error: None,
                    redirect: Page::Listing,
                })
            }
            Err(e) => {
                error!(user_id = user_id, error = %e, "Failed to insert event");
                Ok(CreationOutcome {
                    event: None,
                    error: Some(e.to_string()),
                    redirect: Page::Listing,
                })
            }
        }
    }
}
