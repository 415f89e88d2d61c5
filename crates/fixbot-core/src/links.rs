//! Social link rewriting.
//!
//! Two URL families are recognized: status posts on twitter.com / x.com and
//! comment threads on reddit.com. Each is rewritten to an embed-friendly mirror
//! with every tracking segment and query parameter dropped.
//!
//! Only the first URL of a family in a message is rewritten.

use std::sync::OnceLock;

use regex::Regex;

/// Host that serves embeddable status posts.
pub const STATUS_MIRROR_HOST: &str = "fxtwitter.com";
/// Replacement for the `reddit.com` host segment.
pub const THREAD_MIRROR_HOST: &str = "rxddit.com";

const THREAD_HOST: &str = "reddit.com";

static STATUS_RE: OnceLock<Regex> = OnceLock::new();
static THREAD_RE: OnceLock<Regex> = OnceLock::new();

fn status_re() -> &'static Regex {
    STATUS_RE.get_or_init(|| {
        Regex::new(r"https?://(?:www\.|mobile\.)?(?:twitter|x)\.com/(\w{1,15})/status(?:es)?/(\d+)")
            .expect("valid regex")
    })
}

fn thread_re() -> &'static Regex {
    THREAD_RE.get_or_init(|| {
        Regex::new(r"https?://(?:[a-z0-9-]+\.)?reddit\.com/r/(\w+)/comments/[^\s?#]+")
            .expect("valid regex")
    })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkFamily {
    /// `twitter.com/<handle>/status/<id>` and the `x.com` alias.
    Status,
    /// `reddit.com/r/<sub>/comments/...`.
    Thread,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormalizedLink {
    pub family: LinkFamily,
    pub url: String,
    /// Account or community the post came from (`@handle`, `r/sub`).
    pub source: String,
}

impl LinkFamily {
    pub const ALL: [LinkFamily; 2] = [LinkFamily::Status, LinkFamily::Thread];

    /// Rewrite the first URL of this family found in `text`.
    pub fn normalize(self, text: &str) -> Option<NormalizedLink> {
        match self {
            Self::Status => {
                let caps = status_re().captures(text)?;
                let handle = caps.get(1)?.as_str();
                let post_id = caps.get(2)?.as_str();
                Some(NormalizedLink {
                    family: self,
                    url: format!("https://{STATUS_MIRROR_HOST}/{handle}/status/{post_id}"),
                    source: format!("@{handle}"),
                })
            }
            Self::Thread => {
                let caps = thread_re().captures(text)?;
                let prefix = caps.get(0)?.as_str();
                let community = caps.get(1)?.as_str();
                Some(NormalizedLink {
                    family: self,
                    url: prefix.replacen(THREAD_HOST, THREAD_MIRROR_HOST, 1),
                    source: format!("r/{community}"),
                })
            }
        }
    }
}

/// Rewrite the first recognized link in `text`, trying status posts before threads.
pub fn normalize(text: &str) -> Option<NormalizedLink> {
    LinkFamily::ALL.iter().find_map(|f| f.normalize(text))
}
