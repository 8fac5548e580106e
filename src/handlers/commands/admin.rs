//! Admin command handlers

use teloxide::{Bot, types::{ChatId, InlineKeyboardButton, InlineKeyboardMarkup, MessageId, User}, prelude::*};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::handlers::user_error_text;
use crate::models::{AdminAction, EventStatus, PAYOUT_AMOUNT_VET};
use crate::services::{ActionResult, AdminEventView};
use crate::state::AppContext;
use crate::utils::errors::{Result, VolunteerPayError};
use crate::utils::helpers::{display_or_dash, format_event_date, short_address};

pub fn admin_callback(action: AdminAction, event_id: Uuid) -> String {
    format!("admin:{}:{}", action.callback_key(), event_id)
}

fn action_label(action: AdminAction) -> &'static str {
    match action {
        AdminAction::Approve => "✅ Approve",
        AdminAction::Reject => "🚫 Reject",
        AdminAction::Payout => "💸 Payout",
        AdminAction::MarkPaid => "🧾 Mark paid",
        AdminAction::Release => "↩️ Release",
    }
}

/// Text of one admin card, participants included
pub fn render_admin_event(view: &AdminEventView) -> String {
    let event = &view.event.event;
    let mut text = format!(
        "🗂 {}\n\
         Status: {}\n\
         Date: {}\n\
         Organisation: {}\n\
         Participants needed: {}\n\
         Guarantor: {} ({})\n\
         Participants: {}",
        display_or_dash(&event.activity),
        event.status,
        format_event_date(event.date),
        display_or_dash(&event.organisation_name),
        event.participant_strength,
        display_or_dash(&event.guarantor),
        display_or_dash(&event.guarantor_contact),
        view.event.participants.len(),
    );

    for participant in &view.event.participants {
        text.push_str(&format!(
            "\n • {} ({}) {}",
            participant.name,
            participant.contact_number,
            short_address(&participant.wallet_address)
        ));
    }

    text
}

/// One button per action the event's status allows
pub fn admin_keyboard(view: &AdminEventView) -> Option<InlineKeyboardMarkup> {
    if view.actions.is_empty() {
        return None;
    }

    let row = view
        .actions
        .iter()
        .map(|action| InlineKeyboardButton::callback(action_label(*action), admin_callback(*action, view.event.id())))
        .collect::<Vec<_>>();
    Some(InlineKeyboardMarkup::new(vec![row]))
}

/// Handle /admin command - all events, most recent first
pub async fn handle_admin_panel(bot: Bot, chat_id: ChatId, user: &User, app: AppContext) -> Result<()> {
    if let Err(e) = app.auth.check_admin_auth(user) {
        bot.send_message(chat_id, user_error_text(&e)).await?;
        return Ok(());
    }

    let user_id = user.id.0 as i64;
    debug!(user_id = user_id, "Processing /admin command");

    let views = match app.services.admin_service.load().await {
        Ok(views) => views,
        Err(e) => {
            bot.send_message(chat_id, user_error_text(&e)).await?;
            return Ok(());
        }
    };

    if views.is_empty() {
        bot.send_message(chat_id, "No events submitted yet.").await?;
        return Ok(());
    }

    for view in &views {
        let request = bot.send_message(chat_id, render_admin_event(view));
        match admin_keyboard(view) {
            Some(keyboard) => request.reply_markup(keyboard).await?,
            None => request.await?,
        };
    }

    info!(user_id = user_id, count = views.len(), "Admin listed events");
    Ok(())
}

/// Handle an admin card button
pub async fn handle_admin_callback(
    bot: Bot,
    chat_id: ChatId,
    message_id: Option<MessageId>,
    user: &User,
    action: AdminAction,
    event_id: Uuid,
    app: AppContext,
) -> Result<()> {
    if let Err(e) = app.auth.check_admin_auth(user) {
        bot.send_message(chat_id, user_error_text(&e)).await?;
        return Ok(());
    }

    let admin_id = user.id.0 as i64;
    if action == AdminAction::Payout {
        bot.send_message(
            chat_id,
            format!("⏳ Confirm the payout of {} VET per participant in your wallet.", PAYOUT_AMOUNT_VET),
        )
        .await?;
    }

    let result = match app.services.admin_service.perform(admin_id, event_id, action).await {
        Ok(result) => result,
        Err(e) => {
            warn!(admin_id = admin_id, event_id = %event_id, error = %e, "Admin action failed");
            bot.send_message(chat_id, user_error_text(&e)).await?;
            if matches!(e, VolunteerPayError::PayoutUnconfirmed { .. }) {
                let view = app.services.admin_service.view(event_id).await?;
                refresh_card(&bot, chat_id, message_id, &view).await?;
            }
            return Ok(());
        }
    };

    let view = match result {
        ActionResult::Updated(view) => view,
        ActionResult::PaidOut { receipt, view } => {
            bot.send_message(
                chat_id,
                format!(
                    "✅ Payout submitted: {} transfers.\nTransaction: {}",
                    receipt.clauses.len(),
                    receipt.tx_id
                ),
            )
            .await?;
            if view.event.status() == EventStatus::Paying {
                bot.send_message(
                    chat_id,
                    "⚠️ The event could not be marked paid. Use Mark paid once the transaction is confirmed.",
                )
                .await?;
            }
            view
        }
    };

    refresh_card(&bot, chat_id, message_id, &view).await
}

/// Re-render the card the button belonged to, or send a fresh one
async fn refresh_card(
    bot: &Bot,
    chat_id: ChatId,
    message_id: Option<MessageId>,
    view: &AdminEventView,
) -> Result<()> {
    let text = render_admin_event(view);
    let keyboard = admin_keyboard(view).unwrap_or_else(|| InlineKeyboardMarkup::new(Vec::<Vec<InlineKeyboardButton>>::new()));

    match message_id {
        Some(message_id) => {
            bot.edit_message_text(chat_id, message_id, text)
                .reply_markup(keyboard)
                .await?;
        }
        None => {
            bot.send_message(chat_id, text).reply_markup(keyboard).await?;
        }
    }
    Ok(())
}
