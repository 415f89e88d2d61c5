use async_trait::async_trait;

use crate::{
    domain::{ChatId, ChatMember, MessageRef, UserId},
    Result,
};

/// Everything a handler may ask of the messenger.
///
/// Telegram is the only implementation; tests substitute in-memory fakes.
/// Membership lookups are never cached behind this trait.
#[async_trait]
pub trait ChatPort: Send + Sync {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<MessageRef>;

    async fn get_member(&self, chat_id: ChatId, user_id: UserId) -> Result<ChatMember>;

    async fn ban_member(&self, chat_id: ChatId, user_id: UserId) -> Result<()>;

    /// Lift a ban. Unbanning someone who is not banned is a no-op on Telegram's side.
    async fn unban_member(&self, chat_id: ChatId, user_id: UserId) -> Result<()>;
}
