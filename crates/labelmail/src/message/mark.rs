//! Shorthand dispositions accepted by [`Message::mark`](super::Message::mark).

use labelmail_imap::Flag;

/// A commonly used operation on a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mark {
    /// Add `\Seen`.
    Read,
    /// Remove `\Seen`.
    Unread,
    /// Move to trash.
    Deleted,
    /// Move to the spam container.
    Spam,
    /// Add any other flag.
    Flag(Flag),
}

impl Mark {
    /// Parses a mark name. Anything other than `read`, `unread`, `deleted`
    /// or `spam` (case-insensitive) is a flag.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "read" => Self::Read,
            "unread" => Self::Unread,
            "deleted" => Self::Deleted,
            "spam" => Self::Spam,
            _ => Self::Flag(Flag::parse(s)),
        }
    }
}

impl From<Flag> for Mark {
    fn from(flag: Flag) -> Self {
        Self::Flag(flag)
    }
}
