//! Message handlers module
//!
//! Plain text messages are answers to the running conversation, if any.

use teloxide::{Bot, types::Message, prelude::*};
use tracing::{debug, error};

use crate::handlers::commands::events::{finish_create, finish_join};
use crate::handlers::{sender_id, user_error_text};
use crate::state::{AppContext, ConversationContext, StepOutcome};
use crate::state::scenarios::{CREATE_EVENT, JOIN_EVENT};
use crate::utils::errors::Result;

/// Handle incoming text messages
pub async fn handle_message(bot: Bot, msg: Message, app: AppContext) -> Result<()> {
    let user_id = sender_id(&msg)?;
    let chat_id = msg.chat.id;

    let Some(text) = msg.text() else {
        return Ok(());
    };

    match app.state_storage.load_context(user_id).await? {
        Some(context) if context.is_active() => {
            handle_conversation_message(bot, &msg, text, context, &app).await
        }
        _ => {
            debug!(user_id = user_id, "Message outside a conversation");
            bot.send_message(chat_id, "Use /events to browse events or /help to see what I can do.")
                .await?;
            Ok(())
        }
    }
}

/// Handle an answer to the current conversation step
async fn handle_conversation_message(
    bot: Bot,
    msg: &Message,
    text: &str,
    mut context: ConversationContext,
    app: &AppContext,
) -> Result<()> {
    let chat_id = msg.chat.id;
    debug!(scenario = ?context.scenario, step = ?context.step, "Handling conversation message");

    let outcome = match app.scenario_manager.apply_input(&mut context, text) {
        Ok(outcome) => outcome,
        Err(e) => {
            bot.send_message(chat_id, user_error_text(&e)).await?;
            return Ok(());
        }
    };

    match outcome {
        StepOutcome::Prompt(prompt) => {
            app.state_storage.save_context(&context).await?;
            bot.send_message(chat_id, prompt).await?;
        }
        StepOutcome::Completed => {
            app.state_storage.delete_context(context.user_id).await?;

            if context.is_in_scenario(JOIN_EVENT) {
                finish_join(bot, chat_id, &context, app).await?;
            } else if context.is_in_scenario(CREATE_EVENT) {
                finish_create(bot, chat_id, &context, app).await?;
            } else {
                error!(scenario = ?context.scenario, "Completed unknown scenario");
            }
        }
    }

    Ok(())
}
