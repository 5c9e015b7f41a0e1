//! Command vocabulary passed to the transport.
//!
//! Each type renders its IMAP argument form through `Display`, which the
//! transport can splice into a `UID SEARCH`/`UID FETCH`/`UID STORE` command.

use std::fmt;

use crate::types::{Flag, Label};

/// SEARCH criteria.
///
/// Only the criteria the message core issues are modelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchCriteria {
    /// All messages.
    All,
    /// Header field contains value.
    Header(String, String),
}

impl SearchCriteria {
    /// Criteria matching the `Message-ID` header.
    #[must_use]
    pub fn message_id(id: impl Into<String>) -> Self {
        Self::Header("Message-ID".to_string(), id.into())
    }
}

impl fmt::Display for SearchCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("ALL"),
            Self::Header(name, value) => {
                f.write_str("HEADER ")?;
                write_astring(f, name)?;
                f.write_str(" ")?;
                write_astring(f, value)
            }
        }
    }
}

/// Single FETCH attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchAttribute {
    /// RFC822 size.
    Rfc822Size,
    /// Envelope structure.
    Envelope,
    /// Message flags.
    Flags,
    /// Provider labels (`X-GM-LABELS`).
    Labels,
    /// Provider thread id (`X-GM-THRID`).
    ThreadId,
    /// RFC822 (full message).
    Rfc822,
}

impl FetchAttribute {
    /// Returns the attribute as it appears on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rfc822Size => "RFC822.SIZE",
            Self::Envelope => "ENVELOPE",
            Self::Flags => "FLAGS",
            Self::Labels => "X-GM-LABELS",
            Self::ThreadId => "X-GM-THRID",
            Self::Rfc822 => "RFC822",
        }
    }
}

impl fmt::Display for FetchAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// STORE action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreAction {
    /// Add flags.
    AddFlags(Vec<Flag>),
    /// Remove flags.
    RemoveFlags(Vec<Flag>),
    /// Add labels.
    AddLabels(Vec<Label>),
    /// Remove labels.
    RemoveLabels(Vec<Label>),
}

impl StoreAction {
    /// Returns the data item name, sign included.
    #[must_use]
    pub const fn item_name(&self) -> &'static str {
        match self {
            Self::AddFlags(_) => "+FLAGS",
            Self::RemoveFlags(_) => "-FLAGS",
            Self::AddLabels(_) => "+X-GM-LABELS",
            Self::RemoveLabels(_) => "-X-GM-LABELS",
        }
    }

    /// Returns true if the action adds markers.
    #[must_use]
    pub const fn is_add(&self) -> bool {
        matches!(self, Self::AddFlags(_) | Self::AddLabels(_))
    }
}

impl fmt::Display for StoreAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (", self.item_name())?;
        match self {
            Self::AddFlags(flags) | Self::RemoveFlags(flags) => {
                for (i, flag) in flags.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    f.write_str(flag.as_str())?;
                }
            }
            Self::AddLabels(labels) | Self::RemoveLabels(labels) => {
                for (i, label) in labels.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write_astring(f, label.as_str())?;
                }
            }
        }
        f.write_str(")")
    }
}

/// Writes an astring (atom or quoted string).
fn write_astring(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    if s.is_empty() || s.bytes().any(needs_quoting) || s.bytes().skip(1).any(|b| b == b'\\') {
        f.write_str("\"")?;
        for c in s.chars() {
            if c == '"' || c == '\\' {
                f.write_str("\\")?;
            }
            write!(f, "{c}")?;
        }
        f.write_str("\"")
    } else {
        f.write_str(s)
    }
}

/// Returns true if the byte needs quoting wherever it appears.
///
/// Backslash is handled by the caller: it stays unquoted only as the leading
/// character of a system label such as `\Starred`.
const fn needs_quoting(b: u8) -> bool {
    matches!(b, b' ' | b'"' | b'(' | b')' | b'{' | b'%' | b'*' | b'[' | b']')
        || b < 0x20
        || b == 0x7F
}
