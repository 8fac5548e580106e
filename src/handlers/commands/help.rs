//! Help command handler

use teloxide::{Bot, types::Message, prelude::*};
use crate::utils::errors::Result;

pub const HELP_TEXT: &str = "🤝 VolunteerPay Help\n\n\
    /events - Browse events and join approved ones\n\
    /create - Submit a new event for approval\n\
    /wallet - Connect or show your wallet\n\
    /cancel - Stop the current form\n\
    /admin - Review events and pay participants (admins only)\n\
    /help - Show this help message\n\n\
    While filling in a form, send - to leave a field blank.";

/// Handle /help command
pub async fn handle_help(bot: Bot, msg: Message) -> Result<()> {
    bot.send_message(msg.chat.id, HELP_TEXT).await?;
    Ok(())
}
