//! New-member events decoded from Telegram service messages.

use teloxide::types::{ChatId, Message, ThreadId, User, UserId};

/// The chat a welcome is posted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRef {
    pub id: ChatId,
    /// Public @username, without the `@`.
    pub username: Option<String>,
    /// Forum topic the join happened in.
    pub thread_id: Option<ThreadId>,
}

#[cfg(test)]
impl ChatRef {
    pub fn new(id: i64) -> Self {
        Self {
            id: ChatId(id),
            username: None,
            thread_id: None,
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }
}

/// A member that just joined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMember {
    pub id: UserId,
    pub display_name: String,
}

impl From<&User> for NewMember {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            display_name: user.first_name.clone(),
        }
    }
}

/// One or more members joining a chat in a single service message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMemberEvent {
    pub chat: ChatRef,
    pub members: Vec<NewMember>,
}

impl NewMemberEvent {
    /// Extract the event from a `new_chat_members` service message.
    ///
    /// Returns `None` for any other message, or an empty member list.
    pub fn from_message(msg: &Message) -> Option<Self> {
        let members = msg.new_chat_members()?;
        if members.is_empty() {
            return None;
        }

        Some(Self {
            chat: ChatRef {
                id: msg.chat.id,
                username: msg.chat.username().map(str::to_owned),
                thread_id: msg.thread_id,
            },
            members: members.iter().map(NewMember::from).collect(),
        })
    }

    pub fn member_ids(&self) -> Vec<u64> {
        self.members.iter().map(|m| m.id.0).collect()
    }
}

#[cfg(test)]
mod tests {
    use teloxide::types::Update;
    use teloxide::types::UpdateKind;

    use super::*;

    fn message(json: serde_json::Value) -> Message {
        let update: Update = serde_json::from_str(&json.to_string()).unwrap();
        match update.kind {
            UpdateKind::Message(msg) => msg,
            other => panic!("expected a message update, got {other:?}"),
        }
    }

    #[test]
    fn test_from_join_message() {
        let msg = message(serde_json::json!({
            "update_id": 1,
            "message": {
                "message_id": 77,
                "date": 1_700_000_000,
                "chat": {
                    "id": -1003239080709i64,
                    "type": "supergroup",
                    "title": "Golden Fork",
                    "username": "goldenfork"
                },
                "from": { "id": 5, "is_bot": false, "first_name": "Anna" },
                "new_chat_members": [
                    { "id": 5, "is_bot": false, "first_name": "Anna" },
                    { "id": 6, "is_bot": false, "first_name": "Luca" }
                ]
            }
        }));

        let event = NewMemberEvent::from_message(&msg).unwrap();
        assert_eq!(event.chat.id, ChatId(-1003239080709));
        assert_eq!(event.chat.username.as_deref(), Some("goldenfork"));
        assert_eq!(event.chat.thread_id, None);
        assert_eq!(event.member_ids(), vec![5, 6]);
        assert_eq!(event.members[1].display_name, "Luca");
    }

    #[test]
    fn test_topic_join_keeps_thread() {
        let msg = message(serde_json::json!({
            "update_id": 3,
            "message": {
                "message_id": 90,
                "message_thread_id": 11,
                "is_topic_message": true,
                "date": 1_700_000_000,
                "chat": {
                    "id": -1003239080709i64,
                    "type": "supergroup",
                    "title": "Golden Fork",
                    "is_forum": true
                },
                "from": { "id": 5, "is_bot": false, "first_name": "Anna" },
                "new_chat_members": [{ "id": 5, "is_bot": false, "first_name": "Anna" }]
            }
        }));

        let event = NewMemberEvent::from_message(&msg).unwrap();
        assert_eq!(event.chat.thread_id, Some(ThreadId(teloxide::types::MessageId(11))));
    }

    #[test]
    fn test_plain_text_is_not_an_event() {
        let msg = message(serde_json::json!({
            "update_id": 2,
            "message": {
                "message_id": 78,
                "date": 1_700_000_000,
                "chat": { "id": -42, "type": "group", "title": "Test" },
                "from": { "id": 5, "is_bot": false, "first_name": "Anna" },
                "text": "ciao"
            }
        }));

        assert!(NewMemberEvent::from_message(&msg).is_none());
    }
}
