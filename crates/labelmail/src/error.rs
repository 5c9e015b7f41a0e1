//! Error types for the message core.

use thiserror::Error;

/// Errors that can occur while reading or mutating a message.
#[derive(Debug, Error)]
pub enum Error {
    /// The uid could not be resolved from the Message-ID header.
    ///
    /// Terminal for the entity: later calls fail the same way without
    /// searching again.
    #[error("Message not found: no uid matches Message-ID {message_id}")]
    NotFound {
        /// The Message-ID that was searched for.
        message_id: String,
    },

    /// The target label container rejected the copy.
    #[error("Label '{name}' doesn't exist")]
    NoLabel {
        /// Label (container) name.
        name: String,
        /// The server's rejection.
        #[source]
        source: labelmail_imap::Error,
    },

    /// Neither the envelope nor the parsed body provides the field.
    #[error("Unsupported field: {0}")]
    Unsupported(String),

    /// A message was constructed without a uid or a Message-ID.
    #[error("Message needs a uid or a Message-ID")]
    MissingAddress,

    /// The transport answered a fetch with a different attribute.
    #[error("Expected {expected} in FETCH response, got {actual}")]
    UnexpectedFetch {
        /// Attribute that was requested.
        expected: &'static str,
        /// Attribute that was returned.
        actual: &'static str,
    },

    /// The message's container could not be selected.
    #[error("Cannot select mailbox {mailbox}: {source}")]
    Select {
        /// Mailbox that was being selected.
        mailbox: String,
        /// The transport failure.
        #[source]
        source: labelmail_imap::Error,
    },

    /// Transport failure.
    #[error("IMAP error: {0}")]
    Imap(#[from] labelmail_imap::Error),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

impl Error {
    /// Returns true if this is a [`Error::NoLabel`].
    #[must_use]
    pub const fn is_no_label(&self) -> bool {
        matches!(self, Self::NoLabel { .. })
    }

    /// Returns true if the server answered and refused the command (or the
    /// select before it), as opposed to a connectivity or protocol failure.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        match self {
            Self::NoLabel { .. } => true,
            Self::Imap(source) | Self::Select { source, .. } => source.is_rejection(),
            _ => false,
        }
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejections() {
        let no = || labelmail_imap::Error::No("[TRYCREATE] no such mailbox".into());
        assert!(Error::Imap(no()).is_rejection());
        assert!(
            Error::Select {
                mailbox: "Gone".into(),
                source: no(),
            }
            .is_rejection()
        );
        assert!(
            Error::NoLabel {
                name: "Work".into(),
                source: no(),
            }
            .is_rejection()
        );
    }

    #[test]
    fn connectivity_is_not_rejection() {
        let bye = || labelmail_imap::Error::Bye("shutting down".into());
        assert!(!Error::Imap(bye()).is_rejection());
        assert!(
            !Error::Select {
                mailbox: "INBOX".into(),
                source: bye(),
            }
            .is_rejection()
        );
        assert!(!Error::MissingAddress.is_rejection());
    }
}
