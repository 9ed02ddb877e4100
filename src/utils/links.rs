//! Chat link resolution.
//!
//! Public chats link by @username. Private supergroups and channels use
//! `t.me/c/<internal id>`, where the internal id is the chat id without
//! its `-100` prefix.

use teloxide::types::ChatId;

use crate::config::content::LinkTarget;
use crate::models::ChatRef;

const SUPERGROUP_PREFIX: &str = "-100";

/// Chat id as used in `t.me/c/` links.
pub fn internal_chat_id(chat_id: ChatId) -> String {
    let raw = chat_id.0.to_string();
    match raw.strip_prefix(SUPERGROUP_PREFIX) {
        Some(internal) => internal.to_string(),
        None => raw.trim_start_matches('-').to_string(),
    }
}

/// Base URL for links into `chat`.
pub fn chat_link_base(chat: &ChatRef) -> String {
    match chat.username.as_deref() {
        Some(username) if !username.is_empty() => format!("https://t.me/{username}"),
        _ => format!("https://t.me/c/{}", internal_chat_id(chat.id)),
    }
}

/// Turn a configured link target into a concrete URL for `base`.
pub fn resolve_link(target: LinkTarget, base: &str) -> String {
    match target {
        LinkTarget::Url(url) => url.to_string(),
        LinkTarget::InChat(path) => format!("{}/{}", base, path.trim_start_matches('/')),
    }
}
