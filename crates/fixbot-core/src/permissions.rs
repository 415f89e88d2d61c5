use crate::{
    domain::{ChatId, UserId},
    messaging::{port::ChatPort, types::IncomingMessage},
    Result,
};

/// True iff `invoker` is an administrator or the creator of `chat_id`.
pub async fn is_administrator(
    port: &dyn ChatPort,
    chat_id: ChatId,
    invoker: UserId,
) -> Result<bool> {
    let member = port.get_member(chat_id, invoker).await?;
    Ok(member.status.is_privileged())
}

/// True iff the bot account itself may ban/unban members of `chat_id`.
pub async fn bot_can_restrict(port: &dyn ChatPort, chat_id: ChatId, bot: UserId) -> Result<bool> {
    let member = port.get_member(chat_id, bot).await?;
    Ok(member.can_restrict_members)
}

/// True iff `msg` replies to something the bot sent.
pub fn is_reply_to_self(msg: &IncomingMessage) -> bool {
    msg.reply_to
        .as_ref()
        .and_then(|r| r.sender.as_ref())
        .is_some_and(|s| s.id == msg.bot.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MembershipStatus;
    use crate::testing::*;

    #[tokio::test]
    async fn administrator_and_creator_are_privileged() {
        let chat = FakeChat::new().with_member(UserId(7), MembershipStatus::Creator, true);
        assert!(is_administrator(&chat, CHAT, ADMIN).await.unwrap());
        assert!(is_administrator(&chat, CHAT, UserId(7)).await.unwrap());
        assert!(!is_administrator(&chat, CHAT, MEMBER).await.unwrap());
    }

    #[tokio::test]
    async fn restricted_and_banned_are_not_privileged() {
        let chat = FakeChat::new()
            .with_member(UserId(8), MembershipStatus::Restricted, false)
            .with_member(UserId(9), MembershipStatus::Banned, false);
        assert!(!is_administrator(&chat, CHAT, UserId(8)).await.unwrap());
        assert!(!is_administrator(&chat, CHAT, UserId(9)).await.unwrap());
    }

    #[tokio::test]
    async fn bot_capability_follows_flag() {
        let chat = FakeChat::new();
        assert!(bot_can_restrict(&chat, CHAT, BOT).await.unwrap());

        let chat = FakeChat::new().with_member(BOT, MembershipStatus::Administrator, false);
        assert!(!bot_can_restrict(&chat, CHAT, BOT).await.unwrap());
    }

    #[tokio::test]
    async fn lookup_failure_propagates() {
        let chat = FakeChat {
            fail_lookups: true,
            ..FakeChat::new()
        };
        assert!(is_administrator(&chat, CHAT, ADMIN).await.is_err());
        assert!(bot_can_restrict(&chat, CHAT, BOT).await.is_err());
    }

    #[test]
    fn reply_to_self_compares_against_bot_identity() {
        let msg = reply_to(group_message(ADMIN, "/ban"), Some(BOT));
        assert!(is_reply_to_self(&msg));

        let msg = reply_to(group_message(ADMIN, "/ban"), Some(TARGET));
        assert!(!is_reply_to_self(&msg));

        assert!(!is_reply_to_self(&group_message(ADMIN, "/ban")));
        assert!(!is_reply_to_self(&reply_to(group_message(ADMIN, "/ban"), None)));
    }
}
