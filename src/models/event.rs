//! Event model

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::participant::Participant;

/// Event lifecycle status.
///
/// `pending → approved → paying → paid`, or `pending → disapproved`.
/// `paying` holds the payout claim while a transaction waits on the signer.
/// It falls back to `approved` when the wallet refuses the request. When the
/// outcome is unknown it stays `paying` until an admin marks it paid or
/// releases it after checking the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "text", rename_all = "lowercase")]
pub enum EventStatus {
    Pending,
    Approved,
    Disapproved,
    Paying,
    Paid,
}

/// Actions an administrator can take on an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdminAction {
    Approve,
    Reject,
    Payout,
    MarkPaid,
    Release,
}

impl EventStatus {
    pub const ALL: [EventStatus; 5] = [
        EventStatus::Pending,
        EventStatus::Approved,
        EventStatus::Disapproved,
        EventStatus::Paying,
        EventStatus::Paid,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Pending => "pending",
            EventStatus::Approved => "approved",
            EventStatus::Disapproved => "disapproved",
            EventStatus::Paying => "paying",
            EventStatus::Paid => "paid",
        }
    }

    /// Whether the status machine allows moving from `self` to `next`
    pub fn can_transition_to(&self, next: EventStatus) -> bool {
        matches!(
            (self, next),
            (EventStatus::Pending, EventStatus::Approved)
                | (EventStatus::Pending, EventStatus::Disapproved)
                | (EventStatus::Approved, EventStatus::Paying)
                | (EventStatus::Paying, EventStatus::Paid)
                | (EventStatus::Paying, EventStatus::Approved)
        )
    }

    /// Participants may only join approved events
    pub fn accepts_participants(&self) -> bool {
        *self == EventStatus::Approved
    }

    /// Admin actions offered for an event in this status
    pub fn admin_actions(&self) -> &'static [AdminAction] {
        match self {
            EventStatus::Pending => &[AdminAction::Approve, AdminAction::Reject],
            EventStatus::Approved => &[AdminAction::Payout],
            EventStatus::Paying => &[AdminAction::MarkPaid, AdminAction::Release],
            EventStatus::Disapproved | EventStatus::Paid => &[],
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("Unknown event status: {}", s))
    }
}

impl AdminAction {
    /// Status the event must be in for the action to apply
    pub fn source_status(&self) -> EventStatus {
        match self {
            AdminAction::Approve | AdminAction::Reject => EventStatus::Pending,
            AdminAction::Payout => EventStatus::Approved,
            AdminAction::MarkPaid | AdminAction::Release => EventStatus::Paying,
        }
    }

    /// Status the event ends up in once the action completes
    pub fn target_status(&self) -> EventStatus {
        match self {
            AdminAction::Approve => EventStatus::Approved,
            AdminAction::Reject => EventStatus::Disapproved,
            AdminAction::Payout | AdminAction::MarkPaid => EventStatus::Paid,
            AdminAction::Release => EventStatus::Approved,
        }
    }

    pub fn callback_key(&self) -> &'static str {
        match self {
            AdminAction::Approve => "approve",
            AdminAction::Reject => "reject",
            AdminAction::Payout => "payout",
            AdminAction::MarkPaid => "mark_paid",
            AdminAction::Release => "release",
        }
    }

    pub fn from_callback_key(key: &str) -> Option<Self> {
        match key {
            "approve" => Some(AdminAction::Approve),
            "reject" => Some(AdminAction::Reject),
            "payout" => Some(AdminAction::Payout),
            "mark_paid" => Some(AdminAction::MarkPaid),
            "release" => Some(AdminAction::Release),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: Uuid,
    pub activity: String,
    pub date: Option<NaiveDateTime>,
    pub participant_strength: i32,
    pub organisation_name: String,
    pub description: String,
    pub guarantor: String,
    pub guarantor_contact: String,
    pub status: EventStatus,
    pub created_at: DateTime<Utc>,
}

/// An event together with the participants attached to it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventWithParticipants {
    #[serde(flatten)]
    pub event: Event,
    pub participants: Vec<Participant>,
}

impl EventWithParticipants {
    pub fn id(&self) -> Uuid {
        self.event.id
    }

    pub fn status(&self) -> EventStatus {
        self.event.status
    }
}

/// Insert payload for a new event; status is assigned by the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub activity: String,
    pub date: Option<NaiveDateTime>,
    pub participant_strength: i32,
    pub organisation_name: String,
    pub description: String,
    pub guarantor: String,
    pub guarantor_contact: String,
}
