//! Telegram adapter (teloxide).
//!
//! This crate implements the `fixbot-core` ChatPort over the Telegram Bot API.

use async_trait::async_trait;

use teloxide::{prelude::*, types::ChatMemberKind};

pub mod handlers;
pub mod health;
pub mod router;

use fixbot_core::{
    domain::{ChatId, ChatMember, MembershipStatus, MessageId, MessageRef, UserId},
    errors::Error,
    messaging::port::ChatPort,
    Result,
};

#[derive(Clone)]
pub struct TelegramChat {
    bot: Bot,
}

impl TelegramChat {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    fn tg_chat(chat_id: ChatId) -> teloxide::types::ChatId {
        teloxide::types::ChatId(chat_id.0)
    }

    fn tg_user(user_id: UserId) -> teloxide::types::UserId {
        teloxide::types::UserId(user_id.0 as u64)
    }

    fn map_err(e: teloxide::RequestError) -> Error {
        Error::External(format!("telegram error: {e}"))
    }
}

pub(crate) fn membership_status(kind: &ChatMemberKind) -> MembershipStatus {
    if kind.is_owner() {
        MembershipStatus::Creator
    } else if kind.is_administrator() {
        MembershipStatus::Administrator
    } else if kind.is_restricted() {
        MembershipStatus::Restricted
    } else if kind.is_left() {
        MembershipStatus::Left
    } else if kind.is_banned() {
        MembershipStatus::Banned
    } else {
        MembershipStatus::Member
    }
}

#[async_trait]
impl ChatPort for TelegramChat {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<MessageRef> {
        let msg = self
            .bot
            .send_message(Self::tg_chat(chat_id), text.to_string())
            .await
            .map_err(Self::map_err)?;

        Ok(MessageRef {
            chat_id,
            message_id: MessageId(msg.id.0),
        })
    }

    async fn get_member(&self, chat_id: ChatId, user_id: UserId) -> Result<ChatMember> {
        let member = self
            .bot
            .get_chat_member(Self::tg_chat(chat_id), Self::tg_user(user_id))
            .await
            .map_err(Self::map_err)?;

        Ok(ChatMember {
            user: user_id,
            status: membership_status(&member.kind),
            can_restrict_members: member.kind.can_restrict_members(),
        })
    }

    async fn ban_member(&self, chat_id: ChatId, user_id: UserId) -> Result<()> {
        self.bot
            .ban_chat_member(Self::tg_chat(chat_id), Self::tg_user(user_id))
            .await
            .map_err(Self::map_err)?;
        Ok(())
    }

    async fn unban_member(&self, chat_id: ChatId, user_id: UserId) -> Result<()> {
        self.bot
            .unban_chat_member(Self::tg_chat(chat_id), Self::tg_user(user_id))
            .await
            .map_err(Self::map_err)?;
        Ok(())
    }
}
