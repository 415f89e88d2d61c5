use std::sync::Arc;

use teloxide::{dispatching::Dispatcher, dptree, prelude::*};
use tracing::info;

use fixbot_core::{
    audit::AuditLogger,
    config::Config,
    dispatch::Router,
    domain::UserId,
    messaging::{port::ChatPort, types::BotIdentity},
    moderation::Moderator,
};

use crate::handlers;
use crate::TelegramChat;

/// Process-scoped state shared by every handler invocation. Read-only.
#[derive(Clone)]
pub struct AppState {
    pub chat: Arc<dyn ChatPort>,
    pub router: Arc<Router>,
    pub me: BotIdentity,
}

pub async fn run_polling(cfg: Arc<Config>) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.telegram_bot_token.clone());

    let me = bot.get_me().await?;
    let me = BotIdentity {
        id: UserId(me.user.id.0 as i64),
        username: me.username().to_string(),
    };
    info!(username = %me.username, "fixbot started");

    let audit = cfg
        .audit_log_path
        .as_ref()
        .map(|p| AuditLogger::new(p.clone(), cfg.audit_log_json));
    if let Some(audit) = &audit {
        info!(path = %audit.path().display(), "audit log enabled");
    }

    let router = Router::standard(Moderator::new(audit));
    info!(routes = router.routes().len(), "routes registered");

    let state = Arc::new(AppState {
        chat: Arc::new(TelegramChat::new(bot.clone())),
        router: Arc::new(router),
        me,
    });

    let handler =
        dptree::entry().branch(Update::filter_message().endpoint(handlers::handle_message));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .build()
        .dispatch()
        .await;

    Ok(())
}
