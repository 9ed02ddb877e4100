//! Pinned welcome tracking.
//!
//! One slot per chat. A slot is locked for the whole send/pin or edit
//! sequence, so two joins arriving together in the same chat cannot both
//! see "no pin yet" and post two welcomes.

use std::sync::Arc;

use dashmap::DashMap;
use teloxide::types::{ChatId, MessageId};
use tokio::sync::Mutex;

/// Pinned welcome message for a single chat, if any.
pub type PinSlot = Arc<Mutex<Option<MessageId>>>;

/// Per-chat pinned welcome ids.
#[derive(Clone, Default)]
pub struct PinStore {
    slots: Arc<DashMap<ChatId, PinSlot>>,
}

impl PinStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot for `chat`, created empty on first use.
    pub fn slot(&self, chat: ChatId) -> PinSlot {
        self.slots.entry(chat).or_default().clone()
    }

    /// Currently stored pin for `chat`.
    #[cfg(test)]
    pub async fn get(&self, chat: ChatId) -> Option<MessageId> {
        let slot = self.slots.get(&chat).map(|s| s.clone())?;
        let pinned = *slot.lock().await;
        pinned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_slots_are_per_chat() {
        let store = PinStore::new();
        assert_eq!(store.get(ChatId(-1)).await, None);

        *store.slot(ChatId(-1)).lock().await = Some(MessageId(10));

        assert_eq!(store.get(ChatId(-1)).await, Some(MessageId(10)));
        assert_eq!(store.get(ChatId(-2)).await, None);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = PinStore::new();
        let other = store.clone();

        *store.slot(ChatId(-5)).lock().await = Some(MessageId(3));
        assert_eq!(other.get(ChatId(-5)).await, Some(MessageId(3)));
    }
}
