//! Start, wallet and cancel command handlers

use teloxide::{Bot, types::Message, prelude::*};
use tracing::{debug, info};
use crate::handlers::{home_keyboard, sender_id, user_error_text};
use crate::state::AppContext;
use crate::utils::errors::{VolunteerPayError, Result};
use crate::utils::helpers::short_address;
use crate::utils::logging::log_user_action;

const WELCOME_TEXT: &str = "👋 Welcome to VolunteerPay!\n\n\
    Organisations submit volunteer events here. Once an event is approved, \
    volunteers can join it with their wallet and get paid in VET when it is done.";

/// Handle /start command - home screen
pub async fn handle_start(bot: Bot, msg: Message, app: AppContext) -> Result<()> {
    let user_id = sender_id(&msg)?;
    debug!(user_id = user_id, "Processing /start command");

    bot.send_message(msg.chat.id, WELCOME_TEXT)
        .reply_markup(home_keyboard(app.auth.is_admin(user_id)))
        .await?;

    log_user_action(user_id, "start", None);
    Ok(())
}

/// Handle /wallet command - show the connected account or a connect link
pub async fn handle_wallet(bot: Bot, msg: Message, app: AppContext) -> Result<()> {
    let user_id = sender_id(&msg)?;

    let text = match app.services.wallet.session(user_id).await {
        Ok(Some(session)) => format!(
            "👛 Connected wallet: {}\n\nFull address: {}",
            short_address(&session.account),
            session.account
        ),
        Ok(None) => wallet_connect_text(&app.services.connect_url(user_id)),
        Err(e) => user_error_text(&VolunteerPayError::from(e)),
    };

    bot.send_message(msg.chat.id, text).await?;
    Ok(())
}

pub fn wallet_connect_text(link: &str) -> String {
    format!(
        "👛 No wallet connected yet.\n\nOpen this link to connect one, then come back:\n{}",
        link
    )
}

/// Handle /cancel command - drop any running conversation
pub async fn handle_cancel(bot: Bot, msg: Message, app: AppContext) -> Result<()> {
    let user_id = sender_id(&msg)?;

    let had_context = app.state_storage.load_context(user_id).await?.is_some();
    app.state_storage.delete_context(user_id).await?;

    let text = if had_context {
        info!(user_id = user_id, "Conversation cancelled");
        "Cancelled. Use /events to go back to the event list."
    } else {
        "Nothing to cancel."
    };
    bot.send_message(msg.chat.id, text).await?;
    Ok(())
}
