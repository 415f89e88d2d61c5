//! Telegram update handlers.
//!
//! Each update is converted into an immutable `IncomingMessage` and handed to
//! the core router together with the shared `ChatPort`.

use std::sync::Arc;

use teloxide::{prelude::*, types::Message};
use tracing::debug;

use fixbot_core::{
    domain::{ChatId, ChatKind, MessageId, MessageRef, UserId},
    messaging::types::{BotIdentity, IncomingMessage, RepliedMessage, Sender},
};

use crate::router::AppState;

pub async fn handle_message(msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(incoming) = incoming_message(&msg, &state.me) else {
        return Ok(());
    };

    let handled = state.router.dispatch(&incoming, state.chat.as_ref()).await;
    debug!(chat_id = incoming.chat_id().0, handled, "message processed");

    Ok(())
}

fn message_ref(msg: &Message) -> MessageRef {
    MessageRef {
        chat_id: ChatId(msg.chat.id.0),
        message_id: MessageId(msg.id.0),
    }
}

/// The posting user. Anonymous admins and channels post on behalf of a chat
/// (`from` is then a placeholder bot), so they have no sender.
fn sender(msg: &Message) -> Option<Sender> {
    if msg.sender_chat().is_some() {
        return None;
    }
    let user = msg.from()?;
    Some(Sender {
        id: UserId(user.id.0 as i64),
        display_name: user.full_name(),
        username: user.username.clone(),
    })
}

/// Text messages only; everything else is ignored.
pub fn incoming_message(msg: &Message, me: &BotIdentity) -> Option<IncomingMessage> {
    let text = msg.text()?;

    let chat_kind = if msg.chat.is_private() {
        ChatKind::Private
    } else {
        ChatKind::Group
    };

    // Inside a forum topic every message replies to the topic root; that is not a target.
    let reply_to = msg
        .reply_to_message()
        .filter(|r| msg.thread_id != Some(r.id.0))
        .map(|r| {
            Box::new(RepliedMessage {
                id: message_ref(r),
                sender: sender(r),
            })
        });

    Some(IncomingMessage {
        id: message_ref(msg),
        chat_kind,
        sender: sender(msg),
        text: text.to_string(),
        reply_to,
        bot: me.clone(),
    })
}
