use crate::domain::{ChatId, ChatKind, MessageRef, UserId};

/// The bot's own account, known after `getMe` at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BotIdentity {
    pub id: UserId,
    pub username: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sender {
    pub id: UserId,
    pub display_name: String,
    pub username: Option<String>,
}

/// The message a command was issued in reply to.
#[derive(Clone, Debug)]
pub struct RepliedMessage {
    pub id: MessageRef,
    pub sender: Option<Sender>,
}

/// Immutable inbound text message. Built by the adapter, dropped after dispatch.
#[derive(Clone, Debug)]
pub struct IncomingMessage {
    pub id: MessageRef,
    pub chat_kind: ChatKind,
    pub sender: Option<Sender>,
    pub text: String,
    pub reply_to: Option<Box<RepliedMessage>>,
    pub bot: BotIdentity,
}

impl IncomingMessage {
    pub fn chat_id(&self) -> ChatId {
        self.id.chat_id
    }

    pub fn is_private(&self) -> bool {
        self.chat_kind == ChatKind::Private
    }

    /// Display name of whoever sent this, or a placeholder for anonymous posts.
    pub fn sender_name(&self) -> &str {
        self.sender
            .as_ref()
            .map(|s| s.display_name.as_str())
            .unwrap_or("Someone")
    }
}
