//! Database repositories module
//!
//! This module contains all repository implementations for data access

pub mod event;
pub mod participant;

// Re-export repositories
pub use event::EventRepository;
pub use participant::ParticipantRepository;
