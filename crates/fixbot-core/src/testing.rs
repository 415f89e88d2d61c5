//! In-memory `ChatPort` and message builders shared by unit tests.

use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;

use crate::{
    domain::{ChatId, ChatKind, ChatMember, MembershipStatus, MessageId, MessageRef, UserId},
    messaging::{
        port::ChatPort,
        types::{BotIdentity, IncomingMessage, RepliedMessage, Sender},
    },
    Error, Result,
};

pub const CHAT: ChatId = ChatId(-100);
pub const BOT: UserId = UserId(999);
pub const ADMIN: UserId = UserId(1);
pub const MEMBER: UserId = UserId(2);
pub const TARGET: UserId = UserId(3);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Call {
    Lookup(UserId),
    Ban(UserId),
    Unban(UserId),
}

#[derive(Default)]
pub struct FakeChat {
    pub members: HashMap<UserId, ChatMember>,
    pub fail_lookups: bool,
    pub fail_ban: bool,
    pub fail_unban: bool,
    pub calls: Mutex<Vec<Call>>,
    pub sent: Mutex<Vec<String>>,
}

impl FakeChat {
    /// Chat where `ADMIN` is an administrator and the bot may restrict members.
    pub fn new() -> Self {
        Self::default()
            .with_member(ADMIN, MembershipStatus::Administrator, false)
            .with_member(MEMBER, MembershipStatus::Member, false)
            .with_member(TARGET, MembershipStatus::Member, false)
            .with_member(BOT, MembershipStatus::Administrator, true)
    }

    pub fn with_member(mut self, user: UserId, status: MembershipStatus, can_restrict: bool) -> Self {
        self.members.insert(
            user,
            ChatMember {
                user,
                status,
                can_restrict_members: can_restrict,
            },
        );
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn mutations(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| !matches!(c, Call::Lookup(_)))
            .collect()
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatPort for FakeChat {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<MessageRef> {
        let mut sent = self.sent.lock().unwrap();
        sent.push(text.to_string());
        Ok(MessageRef {
            chat_id,
            message_id: MessageId(sent.len() as i32),
        })
    }

    async fn get_member(&self, _chat_id: ChatId, user_id: UserId) -> Result<ChatMember> {
        self.calls.lock().unwrap().push(Call::Lookup(user_id));
        if self.fail_lookups {
            return Err(Error::External("lookup failed".to_string()));
        }
        Ok(self.members.get(&user_id).copied().unwrap_or(ChatMember {
            user: user_id,
            status: MembershipStatus::Left,
            can_restrict_members: false,
        }))
    }

    async fn ban_member(&self, _chat_id: ChatId, user_id: UserId) -> Result<()> {
        self.calls.lock().unwrap().push(Call::Ban(user_id));
        if self.fail_ban {
            return Err(Error::External("ban failed".to_string()));
        }
        Ok(())
    }

    async fn unban_member(&self, _chat_id: ChatId, user_id: UserId) -> Result<()> {
        self.calls.lock().unwrap().push(Call::Unban(user_id));
        if self.fail_unban {
            return Err(Error::External("unban failed".to_string()));
        }
        Ok(())
    }
}

pub fn sender(id: UserId, name: &str) -> Sender {
    Sender {
        id,
        display_name: name.to_string(),
        username: None,
    }
}

pub fn group_message(from: UserId, text: &str) -> IncomingMessage {
    IncomingMessage {
        id: MessageRef {
            chat_id: CHAT,
            message_id: MessageId(10),
        },
        chat_kind: ChatKind::Group,
        sender: Some(sender(from, "Alice")),
        text: text.to_string(),
        reply_to: None,
        bot: BotIdentity {
            id: BOT,
            username: "fixbot".to_string(),
        },
    }
}

pub fn private_message(from: UserId, text: &str) -> IncomingMessage {
    IncomingMessage {
        chat_kind: ChatKind::Private,
        ..group_message(from, text)
    }
}

pub fn reply_to(mut msg: IncomingMessage, author: Option<UserId>) -> IncomingMessage {
    msg.reply_to = Some(Box::new(RepliedMessage {
        id: MessageRef {
            chat_id: msg.id.chat_id,
            message_id: MessageId(5),
        },
        sender: author.map(|id| sender(id, "Bob")),
    }));
    msg
}
