//! Welcome event handler.
//!
//! Greets new members with one pinned welcome per chat. The first join posts
//! and pins it; later joins rewrite it in place with the newest names.

use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::types::MessageId;
use teloxide::{ApiError, RequestError};
use tracing::{debug, error, info, warn};
use url::Url;

use crate::bot::api::{SendOptions, WelcomeApi};
use crate::bot::dispatcher::AppState;
use crate::cache::PinStore;
use crate::config::content::{BOOKING, FALLBACK_NAME, SECTION_ROWS, Section, WELCOME_TEMPLATE};
use crate::error::Error;
use crate::models::{Button, NewMemberEvent, WelcomeMessage};
use crate::utils::{chat_link_base, resolve_link, user_mention};

/// Returns the handler for `new_chat_members` service messages.
pub fn handler() -> UpdateHandler<anyhow::Error> {
    dptree::filter_map(|msg: Message| NewMemberEvent::from_message(&msg)).endpoint(welcome_handler)
}

/// Handle a new member event.
///
/// Never fails: every Telegram error is logged here and the update is
/// still acknowledged.
async fn welcome_handler(event: NewMemberEvent, state: AppState) -> anyhow::Result<()> {
    info!(
        "New members {:?} in chat {}",
        event.member_ids(),
        event.chat.id
    );

    let outcome = welcome_new_members(state.api.as_ref(), &state.pins, &event, state.send_options).await;
    debug!("Welcome in chat {}: {:?}", event.chat.id, outcome);

    Ok(())
}

/// What a welcome attempt did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WelcomeOutcome {
    /// A new welcome was sent. `pinned` is false when pinning failed.
    Posted { message_id: MessageId, pinned: bool },
    /// The pinned welcome was rewritten.
    Updated(MessageId),
    /// The pinned welcome already had this exact content.
    Unchanged(MessageId),
    /// The pinned welcome is gone; the next join posts a fresh one.
    Forgotten(MessageId),
    /// Sending or editing failed.
    Failed,
}

/// Post or refresh the chat's pinned welcome for `event`.
pub async fn welcome_new_members(
    api: &dyn WelcomeApi,
    pins: &PinStore,
    event: &NewMemberEvent,
    options: SendOptions,
) -> WelcomeOutcome {
    let chat_id = event.chat.id;
    let message = render_welcome(event);

    let slot = pins.slot(chat_id);
    let mut pinned = slot.lock().await;

    match *pinned {
        None => {
            let message_id = match api.send_welcome(&event.chat, &message, options).await {
                Ok(id) => id,
                Err(e) => {
                    error!("Failed to send welcome in chat {}: {}", chat_id, e);
                    return WelcomeOutcome::Failed;
                }
            };
            *pinned = Some(message_id);

            match api.pin_message(chat_id, message_id, options.silent).await {
                Ok(()) => {
                    info!("Pinned welcome {} in chat {}", message_id, chat_id);
                    WelcomeOutcome::Posted { message_id, pinned: true }
                }
                Err(e) => {
                    warn!("Failed to pin welcome {} in chat {}: {}", message_id, chat_id, e);
                    WelcomeOutcome::Posted { message_id, pinned: false }
                }
            }
        }
        Some(message_id) => match api.edit_welcome(chat_id, message_id, &message).await {
            Ok(()) => {
                debug!("Updated welcome {} in chat {}", message_id, chat_id);
                WelcomeOutcome::Updated(message_id)
            }
            Err(Error::Telegram(RequestError::Api(ApiError::MessageNotModified))) => {
                debug!("Welcome {} in chat {} already up to date", message_id, chat_id);
                WelcomeOutcome::Unchanged(message_id)
            }
            Err(Error::Telegram(RequestError::Api(
                ApiError::MessageToEditNotFound
                | ApiError::MessageCantBeEdited
                | ApiError::MessageIdInvalid,
            ))) => {
                warn!(
                    "Pinned welcome {} in chat {} can no longer be edited, a new one will be posted",
                    message_id, chat_id
                );
                *pinned = None;
                WelcomeOutcome::Forgotten(message_id)
            }
            Err(e) => {
                warn!("Failed to edit welcome {} in chat {}: {}", message_id, chat_id, e);
                WelcomeOutcome::Failed
            }
        },
    }
}

/// Render the welcome text and keyboard for `event`.
pub fn render_welcome(event: &NewMemberEvent) -> WelcomeMessage {
    let mentions = event
        .members
        .iter()
        .map(|m| user_mention(m.id, &m.display_name, FALLBACK_NAME))
        .collect::<Vec<_>>()
        .join(", ");

    let base = chat_link_base(&event.chat);
    let mut keyboard: Vec<Vec<Button>> = SECTION_ROWS
        .iter()
        .map(|row| build_row(row, &base))
        .collect();
    keyboard.push(build_row(&[BOOKING], &base));
    keyboard.retain(|row| !row.is_empty());

    WelcomeMessage {
        text: WELCOME_TEMPLATE.replace("{members}", &mentions),
        keyboard,
    }
}

fn build_row(sections: &[Section], base: &str) -> Vec<Button> {
    sections
        .iter()
        .filter_map(|section| {
            let raw = resolve_link(section.target, base);
            match Url::parse(&raw) {
                Ok(url) => Some(Button {
                    label: section.label.to_string(),
                    url,
                }),
                Err(e) => {
                    warn!("Skipping button {:?} with invalid url {}: {}", section.label, raw, e);
                    None
                }
            }
        })
        .collect()
}
