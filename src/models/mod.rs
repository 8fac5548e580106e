//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod event;
pub mod participant;
pub mod payout;

// Re-export commonly used models
pub use event::{Event, EventStatus, EventWithParticipants, AdminAction, CreateEventRequest};
pub use participant::{Participant, ParticipantStatus, CreateParticipantRequest};
pub use payout::{TransferClause, SigningRequest, PayoutReceipt, PAYOUT_AMOUNT_VET};
