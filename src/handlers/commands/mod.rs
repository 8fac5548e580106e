//! Command handlers module
//!
//! This module contains handlers for all bot commands like /start, /help, etc.

pub mod start;
pub mod help;
pub mod events;
pub mod admin;

use teloxide::{Bot, types::Message, utils::command::BotCommands};
use crate::handlers::sender_id;
use crate::state::AppContext;
use crate::utils::errors::{VolunteerPayError, Result};

/// All available bot commands
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "VolunteerPay commands:")]
pub enum Command {
    #[command(description = "Show the home screen")]
    Start,
    #[command(description = "Show help information")]
    Help,
    #[command(description = "Browse events and join approved ones")]
    Events,
    #[command(description = "Submit a new event")]
    Create,
    #[command(description = "Review events and pay participants (admin only)")]
    Admin,
    #[command(description = "Connect or show your wallet")]
    Wallet,
    #[command(description = "Stop the current form")]
    Cancel,
}

/// Main command dispatcher
pub async fn handle_command(bot: Bot, msg: Message, cmd: Command, app: AppContext) -> Result<()> {
    let chat_id = msg.chat.id;

    match cmd {
        Command::Start => start::handle_start(bot, msg, app).await,
        Command::Help => help::handle_help(bot, msg).await,
        Command::Events => events::handle_events_list(bot, chat_id, app).await,
        Command::Create => {
            let user_id = sender_id(&msg)?;
            events::handle_create(bot, chat_id, user_id, app).await
        }
        Command::Admin => {
            let user = msg.from.as_ref().ok_or_else(|| {
                VolunteerPayError::InvalidInput("No user in message".to_string())
            })?;
            admin::handle_admin_panel(bot, chat_id, user, app).await
        }
        Command::Wallet => start::handle_wallet(bot, msg, app).await,
        Command::Cancel => start::handle_cancel(bot, msg, app).await,
    }
}
