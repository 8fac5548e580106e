//! Callback query handlers module
//!
//! This module contains handlers for all inline keyboard button callbacks

use teloxide::{Bot, types::{CallbackQuery, ChatId, MaybeInaccessibleMessage}, prelude::*};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::handlers::commands::{admin, events};
use crate::models::AdminAction;
use crate::services::Page;
use crate::state::AppContext;
use crate::utils::errors::Result;

/// Parsed inline button payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackAction {
    Join(Uuid),
    Admin(AdminAction, Uuid),
    Navigate(Page),
}

impl CallbackAction {
    pub fn parse(data: &str) -> Option<Self> {
        let parts: Vec<&str> = data.split(':').collect();
        match parts.as_slice() {
            ["join", id] => Uuid::parse_str(id).ok().map(CallbackAction::Join),
            ["admin", key, id] => {
                let action = AdminAction::from_callback_key(key)?;
                let id = Uuid::parse_str(id).ok()?;
                Some(CallbackAction::Admin(action, id))
            }
            ["nav", "events"] => Some(CallbackAction::Navigate(Page::Listing)),
            ["nav", "create"] => Some(CallbackAction::Navigate(Page::Create)),
            ["nav", "admin"] => Some(CallbackAction::Navigate(Page::Admin)),
            _ => None,
        }
    }
}

/// Main callback query dispatcher
pub async fn handle_callback_query(bot: Bot, query: CallbackQuery, app: AppContext) -> Result<()> {
    let user = query.from.clone();
    let user_id = user.id.0 as i64;
    let chat_id = query
        .message
        .as_ref()
        .map(|m| m.chat().id)
        .unwrap_or(ChatId(user_id));
    let message_id = match &query.message {
        Some(MaybeInaccessibleMessage::Regular(message)) => Some(message.id),
        _ => None,
    };

    // Answer first to remove the loading state
    if let Err(e) = bot.answer_callback_query(query.id.clone()).await {
        warn!(error = %e, callback_id = %query.id, "Failed to answer callback query");
    }

    let Some(data) = query.data.as_deref() else {
        return Ok(());
    };
    let Some(action) = CallbackAction::parse(data) else {
        warn!(user_id = user_id, data = %data, "Invalid callback data format");
        return Ok(());
    };

    debug!(user_id = user_id, action = ?action, "Routing callback");

    match action {
        CallbackAction::Join(event_id) => {
            events::handle_join_callback(bot, chat_id, user_id, event_id, app).await
        }
        CallbackAction::Admin(action, event_id) => {
            admin::handle_admin_callback(bot, chat_id, message_id, &user, action, event_id, app).await
        }
        CallbackAction::Navigate(Page::Listing) => events::handle_events_list(bot, chat_id, app).await,
        CallbackAction::Navigate(Page::Create) => events::handle_create(bot, chat_id, user_id, app).await,
        CallbackAction::Navigate(Page::Admin) => admin::handle_admin_panel(bot, chat_id, &user, app).await,
    }
}
