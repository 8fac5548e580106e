//! Event listing, joining and creation handlers

use teloxide::{Bot, types::{ChatId, InlineKeyboardButton, InlineKeyboardMarkup}, prelude::*};
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::handlers::{user_error_text, ALREADY_JOINED, WALLET_REQUIRED};
use crate::handlers::commands::start::wallet_connect_text;
use crate::services::{EventCard, EventForm, JoinForm, JoinOutcome, JoinStart, Page};
use crate::state::{AppContext, ConversationContext};
use crate::state::scenarios::{CREATE_EVENT, JOIN_EVENT};
use crate::utils::errors::{VolunteerPayError, Result};
use crate::utils::helpers::{display_or_dash, format_event_date, truncate_text};

pub const EVENT_ID_KEY: &str = "event_id";

const EVENT_NOT_OPEN: &str = "ℹ️ This event is not open for sign-ups.";

/// Text of one listing card
pub fn render_event_card(card: &EventCard) -> String {
    let event = &card.event.event;
    let activity = if event.activity.is_empty() { "Untitled event" } else { &event.activity };

    format!(
        "📌 {}\n\
         Status: {}\n\
         Date: {}\n\
         Organisation: {}\n\
         Participants needed: {}\n\
         Description: {}\n\
         Guarantor: {} ({})\n\
         Joined: {}",
        activity,
        event.status,
        format_event_date(event.date),
        display_or_dash(&event.organisation_name),
        event.participant_strength,
        truncate_text(display_or_dash(&event.description), 300),
        display_or_dash(&event.guarantor),
        display_or_dash(&event.guarantor_contact),
        card.event.participants.len(),
    )
}

pub fn join_callback(event_id: Uuid) -> String {
    format!("join:{}", event_id)
}

/// Join button, only for cards that accept sign-ups
pub fn join_keyboard(card: &EventCard) -> Option<InlineKeyboardMarkup> {
    card.join_enabled.then(|| {
        InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
            "🙋 Join Event",
            join_callback(card.event.id()),
        )]])
    })
}

/// Handle /events - one message per event in creation order
pub async fn handle_events_list(bot: Bot, chat_id: ChatId, app: AppContext) -> Result<()> {
    let cards = match app.services.listing_service.load().await {
        Ok(cards) => cards,
        Err(e) => {
            error!(error = %e, "Failed to load events");
            bot.send_message(chat_id, user_error_text(&e)).await?;
            return Ok(());
        }
    };

    if cards.is_empty() {
        bot.send_message(chat_id, "No events yet. Use /create to submit one.").await?;
        return Ok(());
    }

    for card in &cards {
        let request = bot.send_message(chat_id, render_event_card(card));
        match join_keyboard(card) {
            Some(keyboard) => request.reply_markup(keyboard).await?,
            None => request.await?,
        };
    }

    Ok(())
}

/// Handle /create - start the event form
pub async fn handle_create(bot: Bot, chat_id: ChatId, user_id: i64, app: AppContext) -> Result<()> {
    let mut context = ConversationContext::new(user_id);
    let prompt = app.scenario_manager.start_scenario(&mut context, CREATE_EVENT)?;
    app.state_storage.save_context(&context).await?;

    debug!(user_id = user_id, "Started event creation");
    bot.send_message(
        chat_id,
        format!("📝 New event. Send - to leave a field blank, /cancel to stop.\n\n{}", prompt),
    )
    .await?;
    Ok(())
}

/// Handle a Join Event button press
pub async fn handle_join_callback(
    bot: Bot,
    chat_id: ChatId,
    user_id: i64,
    event_id: Uuid,
    app: AppContext,
) -> Result<()> {
    let start = match app.services.listing_service.begin_join(user_id, event_id).await {
        Ok(start) => start,
        Err(e) => {
            bot.send_message(chat_id, user_error_text(&e)).await?;
            return Ok(());
        }
    };

    match start {
        JoinStart::Blocked(JoinOutcome::WalletRequired) => {
            let text = format!(
                "{}\n\n{}",
                WALLET_REQUIRED,
                wallet_connect_text(&app.services.connect_url(user_id))
            );
            bot.send_message(chat_id, text).await?;
        }
        JoinStart::Blocked(outcome) => {
            bot.send_message(chat_id, join_outcome_text(&outcome)).await?;
        }
        JoinStart::Ready(session) => {
            let mut context = ConversationContext::new(user_id);
            let prompt = app.scenario_manager.start_scenario(&mut context, JOIN_EVENT)?;
            context.set_data(EVENT_ID_KEY, event_id)?;
            app.state_storage.save_context(&context).await?;

            debug!(user_id = user_id, event_id = %event_id, wallet = %session.account, "Started join");
            bot.send_message(chat_id, prompt).await?;
        }
    }

    Ok(())
}

pub fn join_outcome_text(outcome: &JoinOutcome) -> String {
    match outcome {
        JoinOutcome::WalletRequired => WALLET_REQUIRED.to_string(),
        JoinOutcome::EventNotOpen => EVENT_NOT_OPEN.to_string(),
        JoinOutcome::AlreadyJoined => ALREADY_JOINED.to_string(),
        JoinOutcome::Joined(participant) => format!(
            "✅ Joined Successfully\n\n{} is registered with wallet {}.",
            participant.name, participant.wallet_address
        ),
    }
}

/// Submit the collected join answers
pub async fn finish_join(
    bot: Bot,
    chat_id: ChatId,
    context: &ConversationContext,
    app: &AppContext,
) -> Result<()> {
    let event_id: Uuid = context
        .get_data(EVENT_ID_KEY)?
        .ok_or_else(|| VolunteerPayError::InvalidInput("Missing event for join".to_string()))?;
    let form = JoinForm::new(context.string_or_blank("name"), context.string_or_blank("contact_number"));

    let text = match app.services.listing_service.join(context.user_id, event_id, form).await {
        Ok(outcome) => join_outcome_text(&outcome),
        Err(e) => user_error_text(&e),
    };
    bot.send_message(chat_id, text).await?;
    Ok(())
}

/// Build the event form from collected answers
pub fn event_form_from_context(context: &ConversationContext) -> EventForm {
    EventForm {
        activity: context.string_or_blank("activity"),
        date: context.string_or_blank("date"),
        participant_strength: context.string_or_blank("participant_strength"),
        organisation_name: context.string_or_blank("organisation_name"),
        description: context.string_or_blank("description"),
        guarantor: context.string_or_blank("guarantor"),
        guarantor_contact: context.string_or_blank("guarantor_contact"),
    }
}

/// Submit the collected event form, then show the listing whatever happened
pub async fn finish_create(
    bot: Bot,
    chat_id: ChatId,
    context: &ConversationContext,
    app: &AppContext,
) -> Result<()> {
    let form = event_form_from_context(context);

    let redirect = match app.services.creation_service.submit(context.user_id, form).await {
        Ok(outcome) => {
            let text = match &outcome.event {
                Some(event) => {
                    info!(event_id = %event.id, "Event created from conversation");
                    "✅ Event submitted. It will be listed as pending until an admin reviews it."
                }
                None => "⚠️ The event could not be saved. Please try again later.",
            };
            bot.send_message(chat_id, text).await?;
            outcome.redirect
        }
        Err(e) => {
            bot.send_message(chat_id, user_error_text(&e)).await?;
            Page::Listing
        }
    };

    if redirect == Page::Listing {
        handle_events_list(bot, chat_id, app.clone()).await?;
    }
    Ok(())
}
