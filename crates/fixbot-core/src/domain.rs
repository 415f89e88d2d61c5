/// Telegram user id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

/// Telegram chat id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChatId(pub i64);

/// Telegram message id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageId(pub i32);

/// A stable reference to a Telegram message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageRef {
    pub chat_id: ChatId,
    pub message_id: MessageId,
}

/// Private conversation with the bot, or anything with more than two parties.
///
/// Supergroups and channels are folded into `Group`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatKind {
    Private,
    Group,
}

/// Relationship of a user to a chat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MembershipStatus {
    Administrator,
    Creator,
    Member,
    Restricted,
    Left,
    Banned,
}

impl MembershipStatus {
    pub fn is_privileged(self) -> bool {
        matches!(self, Self::Administrator | Self::Creator)
    }
}

/// Fresh membership record for one user in one chat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChatMember {
    pub user: UserId,
    pub status: MembershipStatus,
    /// Whether this member may ban/unban others. Always true for the creator.
    pub can_restrict_members: bool,
}
