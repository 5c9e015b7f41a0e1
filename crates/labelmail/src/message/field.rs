//! Fields readable from either the envelope or the parsed body.

use std::fmt;

use labelmail_imap::{Address, Envelope};

use super::Message;
use crate::connection::Connection;
use crate::{Error, Result};

/// A message field, looked up in the envelope first and the parsed body
/// second.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Field {
    /// `Subject`.
    Subject,
    /// `From`.
    From,
    /// `Sender`.
    Sender,
    /// `Reply-To`.
    ReplyTo,
    /// `To`.
    To,
    /// `Cc`.
    Cc,
    /// `Bcc`.
    Bcc,
    /// `Date`.
    Date,
    /// `In-Reply-To`.
    InReplyTo,
    /// `Message-ID`.
    MessageId,
    /// Any other header, only available from the parsed body.
    Header(String),
}

impl Field {
    /// Returns the header name backing this field.
    #[must_use]
    pub fn header_name(&self) -> &str {
        match self {
            Self::Subject => "Subject",
            Self::From => "From",
            Self::Sender => "Sender",
            Self::ReplyTo => "Reply-To",
            Self::To => "To",
            Self::Cc => "Cc",
            Self::Bcc => "Bcc",
            Self::Date => "Date",
            Self::InReplyTo => "In-Reply-To",
            Self::MessageId => "Message-ID",
            Self::Header(name) => name,
        }
    }

    /// Reads the field from an envelope. Empty address lists count as absent.
    #[must_use]
    pub fn read_envelope(&self, envelope: &Envelope) -> Option<String> {
        match self {
            Self::Subject => envelope.subject.clone(),
            Self::From => join(&envelope.from),
            Self::Sender => join(&envelope.sender),
            Self::ReplyTo => join(&envelope.reply_to),
            Self::To => join(&envelope.to),
            Self::Cc => join(&envelope.cc),
            Self::Bcc => join(&envelope.bcc),
            Self::Date => envelope.date.clone(),
            Self::InReplyTo => envelope.in_reply_to.clone(),
            Self::MessageId => envelope.message_id.clone(),
            Self::Header(_) => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header_name())
    }
}

fn join(addresses: &[Address]) -> Option<String> {
    if addresses.is_empty() {
        return None;
    }
    Some(
        addresses
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", "),
    )
}

impl<C: Connection> Message<C> {
    /// Reads `field` from the envelope, falling back to the parsed body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unsupported`] if neither source has the field, or
    /// any error from fetching them.
    pub async fn field(&mut self, field: &Field) -> Result<String> {
        if let Some(value) = field.read_envelope(self.envelope().await?) {
            return Ok(value);
        }
        self.raw_body()
            .await?
            .headers()
            .get(field.header_name())
            .map(str::to_string)
            .ok_or_else(|| Error::Unsupported(field.to_string()))
    }

    /// Returns the subject.
    ///
    /// # Errors
    ///
    /// See [`Message::field`].
    pub async fn subject(&mut self) -> Result<String> {
        self.field(&Field::Subject).await
    }

    /// Returns the sender addresses, comma separated.
    ///
    /// # Errors
    ///
    /// See [`Message::field`].
    pub async fn from(&mut self) -> Result<String> {
        self.field(&Field::From).await
    }

    /// Returns the body of the parsed raw message as text.
    ///
    /// # Errors
    ///
    /// Returns an error if the raw body cannot be fetched.
    pub async fn body_text(&mut self) -> Result<String> {
        Ok(self.raw_body().await?.body_text())
    }
}
