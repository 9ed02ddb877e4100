//! Utility functions.
//!
//! Collection of helper functions used across the bot.

pub mod links;

pub use links::{chat_link_base, resolve_link};

use teloxide::types::UserId;

/// Escape text for Telegram's HTML parse mode.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Clickable mention linking to the user's profile.
///
/// Blank names fall back to `fallback` so the anchor is never empty.
pub fn user_mention(id: UserId, name: &str, fallback: &str) -> String {
    let name = match name.trim() {
        "" => fallback,
        trimmed => trimmed,
    };
    format!("<a href=\"tg://user?id={}\">{}</a>", id, html_escape(name))
}
