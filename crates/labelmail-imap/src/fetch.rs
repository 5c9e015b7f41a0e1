//! Values returned by a single-attribute fetch.

use crate::command::FetchAttribute;
use crate::types::{Envelope, Flags, Labels, ThreadId};

/// FETCH response item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchItem {
    /// RFC822 size.
    Rfc822Size(u32),
    /// Envelope.
    Envelope(Box<Envelope>),
    /// Message flags.
    Flags(Flags),
    /// Provider labels.
    Labels(Labels),
    /// Provider thread id.
    ThreadId(ThreadId),
    /// Full message bytes.
    Rfc822(Vec<u8>),
}

impl FetchItem {
    /// Returns the attribute this item answers.
    #[must_use]
    pub const fn attribute(&self) -> FetchAttribute {
        match self {
            Self::Rfc822Size(_) => FetchAttribute::Rfc822Size,
            Self::Envelope(_) => FetchAttribute::Envelope,
            Self::Flags(_) => FetchAttribute::Flags,
            Self::Labels(_) => FetchAttribute::Labels,
            Self::ThreadId(_) => FetchAttribute::ThreadId,
            Self::Rfc822(_) => FetchAttribute::Rfc822,
        }
    }
}
