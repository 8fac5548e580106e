//! Bot handlers module
//!
//! This module contains all Telegram bot handlers organized by type:
//! - Command handlers for bot commands
//! - Callback handlers for inline keyboard interactions
//! - Message handlers for conversation answers

pub mod commands;
pub mod callbacks;
pub mod messages;

pub use commands::{Command, handle_command};
pub use callbacks::{CallbackAction, handle_callback_query};
pub use messages::handle_message;

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, Message};
use crate::services::Page;
use crate::utils::errors::{VolunteerPayError, WalletError, Result};

pub const WALLET_REQUIRED: &str = "⚠️ Wallet Required\n\nConnect a wallet with /wallet first.";
pub const ALREADY_JOINED: &str = "ℹ️ Already Joined\n\nThis wallet is already registered for the event.";

/// Telegram id of the message author
pub fn sender_id(msg: &Message) -> Result<i64> {
    msg.from
        .as_ref()
        .map(|user| user.id.0 as i64)
        .ok_or_else(|| VolunteerPayError::InvalidInput("No user in message".to_string()))
}

/// Text shown to the user for a failed action. Store errors are shown verbatim.
pub fn user_error_text(error: &VolunteerPayError) -> String {
    match error {
        VolunteerPayError::InvalidInput(message) => format!("❌ {}", message),
        VolunteerPayError::Wallet(WalletError::NotConnected) => WALLET_REQUIRED.to_string(),
        VolunteerPayError::Wallet(WalletError::Rejected(reason)) => {
            format!("❌ The transaction was rejected in the wallet: {}", reason)
        }
        VolunteerPayError::PermissionDenied(_) => {
            "⛔ This action is only available to administrators.".to_string()
        }
        VolunteerPayError::EventNotFound { .. } => "❌ Event not found.".to_string(),
        VolunteerPayError::InvalidStateTransition { from, to } => {
            format!("❌ This event is {} and cannot become {}.", from, to)
        }
        VolunteerPayError::DuplicateParticipant { .. } => ALREADY_JOINED.to_string(),
        VolunteerPayError::PayoutUnconfirmed { reason, .. } => format!(
            "⚠️ The payout result is unknown ({}).\n\nThe event stays in paying. Check the transaction in your wallet, then use Mark paid or Release.",
            reason
        ),
        other => format!("❌ {}", other),
    }
}

pub fn nav_callback(page: Page) -> String {
    let key = match page {
        Page::Listing => "events",
        Page::Create => "create",
        Page::Admin => "admin",
    };
    format!("nav:{}", key)
}

/// Navigation buttons shown on the home screen
pub fn home_keyboard(is_admin: bool) -> InlineKeyboardMarkup {
    let mut rows = vec![
        vec![InlineKeyboardButton::callback("📋 Events", nav_callback(Page::Listing))],
        vec![InlineKeyboardButton::callback("➕ Create Event", nav_callback(Page::Create))],
    ];
    if is_admin {
        rows.push(vec![InlineKeyboardButton::callback("🛠 Admin", nav_callback(Page::Admin))]);
    }
    InlineKeyboardMarkup::new(rows)
}
