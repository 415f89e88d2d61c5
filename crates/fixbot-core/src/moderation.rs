//! Permission-gated kick/ban/unban.
//!
//! Every run performs fresh membership lookups for the invoker and for the bot.
//! A successful action is silent in chat; denials and failures get a reply.

use tracing::{debug, error, info, warn};

use crate::{
    audit::{AuditEvent, AuditLogger},
    domain::{ChatId, UserId},
    messaging::{port::ChatPort, types::IncomingMessage},
    permissions::{bot_can_restrict, is_administrator, is_reply_to_self},
    Result,
};

pub const SELF_TARGET_REPLY: &str = "I can't restrict myself.";
pub const NOT_ADMIN_REPLY: &str = "You are not an administrator.";
pub const BOT_CANNOT_RESTRICT_REPLY: &str = "I can't restrict members in this chat.";
pub const FAILURE_REPLY: &str = "Something went wrong, please try again later.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModerationAction {
    /// Remove from the chat but allow rejoining (ban immediately followed by unban).
    Kick,
    Ban,
    Unban,
}

impl ModerationAction {
    pub fn command(self) -> &'static str {
        match self {
            Self::Kick => "kick",
            Self::Ban => "ban",
            Self::Unban => "unban",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModerationRequest {
    pub action: ModerationAction,
    pub chat_id: ChatId,
    pub invoker: UserId,
    pub target: UserId,
}

/// How a single moderation command ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    SelfTarget,
    MissingTarget,
    /// Issued by an anonymous admin or channel; there is no user to check.
    NoInvoker,
    NotAdministrator,
    BotCannotRestrict,
    /// The replied-to message has no author.
    NoTarget,
    Applied(ModerationRequest),
    Failed,
}

impl Outcome {
    fn label(self) -> &'static str {
        match self {
            Self::SelfTarget => "self_target",
            Self::MissingTarget => "missing_target",
            Self::NoInvoker => "no_invoker",
            Self::NotAdministrator => "not_administrator",
            Self::BotCannotRestrict => "bot_cannot_restrict",
            Self::NoTarget => "no_target",
            Self::Applied(_) => "applied",
            Self::Failed => "failed",
        }
    }
}

pub fn usage_reply(action: ModerationAction) -> String {
    format!(
        "Reply to a user's message with /{} to use it.",
        action.command()
    )
}

#[derive(Clone, Debug, Default)]
pub struct Moderator {
    audit: Option<AuditLogger>,
}

impl Moderator {
    pub fn new(audit: Option<AuditLogger>) -> Self {
        Self { audit }
    }

    /// Run `action` as requested by `msg`. Never fails; problems end up as replies and logs.
    pub async fn run(
        &self,
        action: ModerationAction,
        msg: &IncomingMessage,
        port: &dyn ChatPort,
    ) -> Outcome {
        let chat_id = msg.chat_id();

        if is_reply_to_self(msg) {
            send_reply(port, chat_id, SELF_TARGET_REPLY).await;
            return Outcome::SelfTarget;
        }

        let Some(replied) = msg.reply_to.as_deref() else {
            send_reply(port, chat_id, &usage_reply(action)).await;
            return Outcome::MissingTarget;
        };

        let Some(invoker) = msg.sender.as_ref().map(|s| s.id) else {
            debug!(chat_id = chat_id.0, "moderation command without a sender");
            return Outcome::NoInvoker;
        };

        match is_administrator(port, chat_id, invoker).await {
            Ok(true) => {}
            Ok(false) => {
                info!(
                    chat_id = chat_id.0,
                    user_id = invoker.0,
                    action = action.command(),
                    "denied: invoker is not an administrator"
                );
                send_reply(port, chat_id, NOT_ADMIN_REPLY).await;
                return Outcome::NotAdministrator;
            }
            Err(e) => return self.fail(port, action, chat_id, invoker, None, &e).await,
        }

        match bot_can_restrict(port, chat_id, msg.bot.id).await {
            Ok(true) => {}
            Ok(false) => {
                info!(
                    chat_id = chat_id.0,
                    action = action.command(),
                    "denied: bot lacks restrict capability"
                );
                send_reply(port, chat_id, BOT_CANNOT_RESTRICT_REPLY).await;
                return Outcome::BotCannotRestrict;
            }
            Err(e) => return self.fail(port, action, chat_id, invoker, None, &e).await,
        }

        let Some(target) = replied.sender.as_ref().map(|s| s.id) else {
            return Outcome::NoTarget;
        };

        let req = ModerationRequest {
            action,
            chat_id,
            invoker,
            target,
        };

        if let Err(e) = apply(port, req).await {
            return self
                .fail(port, action, chat_id, invoker, Some(target), &e)
                .await;
        }

        info!(
            chat_id = chat_id.0,
            user_id = invoker.0,
            target_id = target.0,
            action = action.command(),
            "moderation applied"
        );
        let outcome = Outcome::Applied(req);
        self.record(action, chat_id, invoker, Some(target), outcome, None);
        outcome
    }

    async fn fail(
        &self,
        port: &dyn ChatPort,
        action: ModerationAction,
        chat_id: ChatId,
        invoker: UserId,
        target: Option<UserId>,
        err: &crate::Error,
    ) -> Outcome {
        error!(
            chat_id = chat_id.0,
            user_id = invoker.0,
            action = action.command(),
            error = %err,
            "moderation failed"
        );
        send_reply(port, chat_id, FAILURE_REPLY).await;
        let err = err.to_string();
        self.record(action, chat_id, invoker, target, Outcome::Failed, Some(&err));
        Outcome::Failed
    }

    fn record(
        &self,
        action: ModerationAction,
        chat_id: ChatId,
        invoker: UserId,
        target: Option<UserId>,
        outcome: Outcome,
        err: Option<&str>,
    ) {
        let Some(audit) = &self.audit else {
            return;
        };
        let event = AuditEvent::moderation(
            chat_id.0,
            invoker.0,
            target.map(|t| t.0),
            action.command(),
            outcome.label(),
            err,
        );
        if let Err(e) = audit.write(event) {
            warn!(path = %audit.path().display(), error = %e, "audit write failed");
        }
    }
}

async fn apply(port: &dyn ChatPort, req: ModerationRequest) -> Result<()> {
    match req.action {
        ModerationAction::Kick => {
            port.ban_member(req.chat_id, req.target).await?;
            port.unban_member(req.chat_id, req.target).await?;
        }
        ModerationAction::Ban => port.ban_member(req.chat_id, req.target).await?,
        ModerationAction::Unban => port.unban_member(req.chat_id, req.target).await?,
    }
    Ok(())
}

async fn send_reply(port: &dyn ChatPort, chat_id: ChatId, text: &str) {
    if let Err(e) = port.send_text(chat_id, text).await {
        warn!(chat_id = chat_id.0, error = %e, "failed to send reply");
    }
}
