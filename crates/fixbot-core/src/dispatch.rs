//! Maps inbound text to handlers.
//!
//! Routes are an explicit ordered list built once at startup. Every route that
//! matches a message fires, in registration order; none short-circuits another.
//! Commands (`/name` or `/name@bot`) and pattern routes are independent: pattern
//! routes only look at text that is not a command.

use tracing::{debug, warn};

use crate::{
    links::{LinkFamily, NormalizedLink},
    messaging::{port::ChatPort, types::IncomingMessage},
    moderation::{ModerationAction, Moderator},
    spark,
};

pub const START_TEXT: &str = "Hi! I fix social media links so they embed properly, \
and I can help moderate groups.\nSend /help to see what I can do.";

pub const HELP_TEXT: &str = "Links: send a twitter.com / x.com post or a reddit thread \
and I'll reply with a clean, embeddable version.\n\n\
Commands:\n\
/start - Say hi\n\
/help - Show this message\n\
/kick - Remove the replied-to user (they can rejoin)\n\
/ban - Ban the replied-to user\n\
/unban - Unban the replied-to user\n\
/spark <crystals> <tickets> <10-part tickets> - Count your draws\n\n\
Moderation commands must be sent as a reply, by a chat administrator.";

pub const GREETING_REPLY: &str = "Hola! 👋";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Matcher {
    /// `/name`, optionally addressed as `/name@botname`.
    Command(&'static str),
    /// A recognized link anywhere in non-command text.
    Link(LinkFamily),
    /// Exact text (surrounding whitespace ignored).
    Literal {
        text: &'static str,
        private_only: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Handler {
    Start,
    Help,
    Moderate(ModerationAction),
    Spark,
    RewriteLink(LinkFamily),
    Greet,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Route {
    pub matcher: Matcher,
    pub handler: Handler,
}

impl Route {
    pub const fn new(matcher: Matcher, handler: Handler) -> Self {
        Self { matcher, handler }
    }
}

/// What a matcher extracted from the message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Captured {
    Args(String),
    Link(NormalizedLink),
    Text,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matched {
    pub handler: Handler,
    pub captured: Captured,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct CommandToken<'a> {
    name: String,
    addressee: Option<&'a str>,
    args: &'a str,
}

fn parse_command(text: &str) -> Option<CommandToken<'_>> {
    let text = text.trim();
    let rest = text.strip_prefix('/')?;
    let (first, args) = match rest.split_once(char::is_whitespace) {
        Some((first, args)) => (first, args.trim()),
        None => (rest, ""),
    };
    let (name, addressee) = match first.split_once('@') {
        Some((name, bot)) => (name, Some(bot)),
        None => (first, None),
    };
    if name.is_empty() {
        return None;
    }
    Some(CommandToken {
        name: name.to_lowercase(),
        addressee,
        args,
    })
}

impl Matcher {
    fn matches(&self, msg: &IncomingMessage, command: Option<&CommandToken<'_>>) -> Option<Captured> {
        match *self {
            Self::Command(name) => {
                let cmd = command?;
                if cmd.name != name {
                    return None;
                }
                if let Some(bot) = cmd.addressee {
                    if !bot.eq_ignore_ascii_case(&msg.bot.username) {
                        return None;
                    }
                }
                Some(Captured::Args(cmd.args.to_string()))
            }
            Self::Link(family) => {
                if is_command_text(&msg.text) {
                    return None;
                }
                family.normalize(&msg.text).map(Captured::Link)
            }
            Self::Literal { text, private_only } => {
                if private_only && !msg.is_private() {
                    return None;
                }
                (msg.text.trim() == text).then_some(Captured::Text)
            }
        }
    }
}

fn is_command_text(text: &str) -> bool {
    text.trim_start().starts_with('/')
}

pub struct Router {
    routes: Vec<Route>,
    moderator: Moderator,
}

impl Router {
    pub fn new(routes: Vec<Route>, moderator: Moderator) -> Self {
        Self { routes, moderator }
    }

    /// The bot's full route table.
    pub fn standard(moderator: Moderator) -> Self {
        use Handler as H;
        use Matcher as M;

        Self::new(
            vec![
                Route::new(M::Command("start"), H::Start),
                Route::new(M::Command("help"), H::Help),
                Route::new(M::Command("kick"), H::Moderate(ModerationAction::Kick)),
                Route::new(M::Command("ban"), H::Moderate(ModerationAction::Ban)),
                Route::new(M::Command("unban"), H::Moderate(ModerationAction::Unban)),
                Route::new(M::Command("spark"), H::Spark),
                Route::new(M::Link(LinkFamily::Status), H::RewriteLink(LinkFamily::Status)),
                Route::new(M::Link(LinkFamily::Thread), H::RewriteLink(LinkFamily::Thread)),
                Route::new(
                    M::Literal {
                        text: "Hola",
                        private_only: true,
                    },
                    H::Greet,
                ),
            ],
            moderator,
        )
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Every route that applies to `msg`, in registration order.
    pub fn matches(&self, msg: &IncomingMessage) -> Vec<Matched> {
        let command = parse_command(&msg.text);
        self.routes
            .iter()
            .filter_map(|route| {
                route
                    .matcher
                    .matches(msg, command.as_ref())
                    .map(|captured| Matched {
                        handler: route.handler,
                        captured,
                    })
            })
            .collect()
    }

    /// Run every matching handler against `port`. Returns how many ran.
    pub async fn dispatch(&self, msg: &IncomingMessage, port: &dyn ChatPort) -> usize {
        let matched = self.matches(msg);
        if matched.is_empty() {
            return 0;
        }
        for m in &matched {
            debug!(chat_id = msg.chat_id().0, handler = ?m.handler, "dispatching");
            self.run(m, msg, port).await;
        }
        matched.len()
    }

    async fn run(&self, m: &Matched, msg: &IncomingMessage, port: &dyn ChatPort) {
        let reply = match (&m.handler, &m.captured) {
            (Handler::Moderate(action), _) => {
                self.moderator.run(*action, msg, port).await;
                return;
            }
            (Handler::Start, _) => START_TEXT.to_string(),
            (Handler::Help, _) => HELP_TEXT.to_string(),
            (Handler::Greet, _) => GREETING_REPLY.to_string(),
            (Handler::Spark, Captured::Args(args)) => spark::reply(args),
            (Handler::Spark, _) => spark::USAGE.to_string(),
            (Handler::RewriteLink(_), Captured::Link(link)) => link_reply(msg, link),
            (Handler::RewriteLink(_), _) => return,
        };

        if let Err(e) = port.send_text(msg.chat_id(), &reply).await {
            warn!(chat_id = msg.chat_id().0, error = %e, "failed to send reply");
        }
    }
}

pub fn link_reply(msg: &IncomingMessage, link: &NormalizedLink) -> String {
    format!("{} shared {}:\n{}", msg.sender_name(), link.source, link.url)
}
