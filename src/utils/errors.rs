//! Error handling for VolunteerPay
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;
use uuid::Uuid;

/// Main error type for VolunteerPay application
#[derive(Error, Debug)]
pub enum VolunteerPayError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("Wallet error: {0}")]
    Wallet(#[from] WalletError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Event not found: {event_id}")]
    EventNotFound { event_id: Uuid },

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("Wallet {wallet_address} already joined event {event_id}")]
    DuplicateParticipant { event_id: Uuid, wallet_address: String },

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Payout for event {event_id} is unconfirmed: {reason}")]
    PayoutUnconfirmed { event_id: Uuid, reason: String },
}

/// Wallet connector specific errors
#[derive(Error, Debug)]
pub enum WalletError {
    #[error("No wallet connected")]
    NotConnected,

    #[error("Signing request rejected: {0}")]
    Rejected(String),

    #[error("Wallet connector request failed: {0}")]
    RequestFailed(String),

    #[error("Wallet connector timeout")]
    Timeout,

    #[error("Invalid wallet connector response: {0}")]
    InvalidResponse(String),

    #[error("Wallet connector unavailable")]
    ServiceUnavailable,
}

impl WalletError {
    /// Whether the transaction may have been signed and broadcast despite the error.
    ///
    /// Only a refused or unsent request is known not to have reached the chain.
    pub fn may_have_submitted(&self) -> bool {
        match self {
            WalletError::NotConnected
            | WalletError::Rejected(_)
            | WalletError::ServiceUnavailable => false,
            WalletError::RequestFailed(_)
            | WalletError::Timeout
            | WalletError::InvalidResponse(_) => true,
        }
    }
}

/// Result type alias for VolunteerPay operations
pub type Result<T> = std::result::Result<T, VolunteerPayError>;

/// Result type alias for wallet connector operations
pub type WalletResult<T> = std::result::Result<T, WalletError>;

impl VolunteerPayError {
    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            VolunteerPayError::Database(_) => ErrorSeverity::Critical,
            VolunteerPayError::Migration(_) => ErrorSeverity::Critical,
            VolunteerPayError::Config(_) => ErrorSeverity::Critical,
            VolunteerPayError::PermissionDenied(_) => ErrorSeverity::Warning,
            VolunteerPayError::InvalidStateTransition { .. } => ErrorSeverity::Warning,
            VolunteerPayError::PayoutUnconfirmed { .. } => ErrorSeverity::Critical,
            VolunteerPayError::DuplicateParticipant { .. } => ErrorSeverity::Info,
            VolunteerPayError::Wallet(WalletError::NotConnected)
            | VolunteerPayError::Wallet(WalletError::Rejected(_)) => ErrorSeverity::Warning,
            VolunteerPayError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wallet_errors_classification() {
        let rejected = WalletError::Rejected("user cancelled".to_string());
        assert!(!rejected.may_have_submitted());
        assert_eq!(VolunteerPayError::Wallet(rejected).severity(), ErrorSeverity::Warning);

        assert!(!WalletError::NotConnected.may_have_submitted());
        assert!(!WalletError::ServiceUnavailable.may_have_submitted());
        assert!(WalletError::Timeout.may_have_submitted());
        assert!(WalletError::RequestFailed("HTTP 502".to_string()).may_have_submitted());
        assert!(WalletError::InvalidResponse("empty transaction id".to_string()).may_have_submitted());

        let timeout = VolunteerPayError::Wallet(WalletError::Timeout);
        assert_eq!(timeout.severity(), ErrorSeverity::Error);
    }

    #[test]
    fn test_error_messages() {
        let err = VolunteerPayError::InvalidStateTransition {
            from: "paid".to_string(),
            to: "paying".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid state transition: paid -> paying");

        let err = VolunteerPayError::Wallet(WalletError::NotConnected);
        assert_eq!(err.to_string(), "Wallet error: No wallet connected");
    }
}
