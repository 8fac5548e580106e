//! Logging middleware
//!
//! Records every incoming update before it reaches the handlers.

use teloxide::types::{Message, Update, UpdateKind};
use tracing::{debug, info};

/// Short description of an update for the log
pub fn describe_update(update: &Update) -> (&'static str, Option<u64>) {
    match &update.kind {
        UpdateKind::Message(message) => ("message", message.from.as_ref().map(|u| u.id.0)),
        UpdateKind::CallbackQuery(query) => ("callback_query", Some(query.from.id.0)),
        _ => ("other", None),
    }
}

/// Log incoming update
pub fn log_update(update: &Update) {
    match &update.kind {
        UpdateKind::Message(message) => log_message(message),
        UpdateKind::CallbackQuery(callback) => {
            info!(
                user_id = callback.from.id.0,
                callback_data = callback.data.as_deref().unwrap_or("none"),
                "Callback query received"
            );
        }
        _ => {
            let (kind, user_id) = describe_update(update);
            debug!(update_type = kind, user_id = ?user_id, "Other update type received");
        }
    }
}

/// Log message details. Message text is only logged at debug level.
pub fn log_message(message: &Message) {
    let user_id = message.from.as_ref().map(|user| user.id.0);

    if let Some(text) = message.text() {
        debug!(user_id = ?user_id, chat_id = message.chat.id.0, text = %text, "Text message received");
    }

    info!(
        user_id = ?user_id,
        chat_id = message.chat.id.0,
        message_id = message.id.0,
        is_command = message.text().map_or(false, |t| t.starts_with('/')),
        "Message processed"
    );
}
