//! Telegram calls made on behalf of the welcome handler.
//!
//! The handler talks to this trait rather than to teloxide directly, so the
//! send/pin/edit policy can run against any backend.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{
    ChatId, InlineKeyboardButton, InlineKeyboardMarkup, LinkPreviewOptions, MessageId, ParseMode,
};

use super::dispatcher::ThrottledBot;
use crate::error::Result;
use crate::models::{ChatRef, WelcomeMessage};

/// Delivery options for a new welcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendOptions {
    /// Deliver without a notification sound.
    pub silent: bool,
}

#[async_trait]
pub trait WelcomeApi: Send + Sync {
    /// Post a welcome in `chat` (and its topic, if any). Returns the new message id.
    async fn send_welcome(
        &self,
        chat: &ChatRef,
        message: &WelcomeMessage,
        options: SendOptions,
    ) -> Result<MessageId>;

    async fn pin_message(&self, chat_id: ChatId, message_id: MessageId, silent: bool) -> Result<()>;

    /// Replace text and keyboard of an already posted welcome.
    async fn edit_welcome(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
        message: &WelcomeMessage,
    ) -> Result<()>;
}

/// Build the inline keyboard markup for a welcome.
pub fn keyboard_markup(message: &WelcomeMessage) -> InlineKeyboardMarkup {
    let keyboard: Vec<Vec<InlineKeyboardButton>> = message
        .keyboard
        .iter()
        .map(|row| {
            row.iter()
                .map(|btn| InlineKeyboardButton::url(&btn.label, btn.url.clone()))
                .collect()
        })
        .collect();

    InlineKeyboardMarkup::new(keyboard)
}

fn no_preview() -> LinkPreviewOptions {
    LinkPreviewOptions {
        is_disabled: true,
        url: None,
        prefer_small_media: false,
        prefer_large_media: false,
        show_above_text: false,
    }
}

#[async_trait]
impl WelcomeApi for ThrottledBot {
    async fn send_welcome(
        &self,
        chat: &ChatRef,
        message: &WelcomeMessage,
        options: SendOptions,
    ) -> Result<MessageId> {
        let mut request = self
            .send_message(chat.id, message.text.clone())
            .parse_mode(ParseMode::Html)
            .reply_markup(keyboard_markup(message))
            .link_preview_options(no_preview())
            .disable_notification(options.silent);

        if let Some(thread_id) = chat.thread_id {
            request = request.message_thread_id(thread_id);
        }

        let sent = request.await?;
        Ok(sent.id)
    }

    async fn pin_message(&self, chat_id: ChatId, message_id: MessageId, silent: bool) -> Result<()> {
        self.pin_chat_message(chat_id, message_id)
            .disable_notification(silent)
            .await?;
        Ok(())
    }

    async fn edit_welcome(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
        message: &WelcomeMessage,
    ) -> Result<()> {
        self.edit_message_text(chat_id, message_id, message.text.clone())
            .parse_mode(ParseMode::Html)
            .reply_markup(keyboard_markup(message))
            .link_preview_options(no_preview())
            .await?;
        Ok(())
    }
}
