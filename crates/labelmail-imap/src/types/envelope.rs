//! Message envelope.

use chrono::{DateTime, FixedOffset};

/// Message envelope: the sender/subject/date summary returned by `ENVELOPE`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Envelope {
    /// Date header.
    pub date: Option<String>,
    /// Subject header.
    pub subject: Option<String>,
    /// From addresses.
    pub from: Vec<Address>,
    /// Sender addresses.
    pub sender: Vec<Address>,
    /// Reply-To addresses.
    pub reply_to: Vec<Address>,
    /// To addresses.
    pub to: Vec<Address>,
    /// Cc addresses.
    pub cc: Vec<Address>,
    /// Bcc addresses.
    pub bcc: Vec<Address>,
    /// In-Reply-To header.
    pub in_reply_to: Option<String>,
    /// Message-ID header.
    pub message_id: Option<String>,
}

impl Envelope {
    /// Parses the `date` field as an RFC 2822 timestamp.
    ///
    /// Returns `None` when the date is absent or malformed.
    #[must_use]
    pub fn parsed_date(&self) -> Option<DateTime<FixedOffset>> {
        self.date
            .as_deref()
            .and_then(|d| DateTime::parse_from_rfc2822(d.trim()).ok())
    }
}

/// Email address from envelope.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Address {
    /// Display name.
    pub name: Option<String>,
    /// Source route (obsolete).
    pub adl: Option<String>,
    /// Mailbox name (local part).
    pub mailbox: Option<String>,
    /// Host name (domain part).
    pub host: Option<String>,
}

impl Address {
    /// Creates an address from a local part and a domain.
    #[must_use]
    pub fn new(mailbox: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            mailbox: Some(mailbox.into()),
            host: Some(host.into()),
            ..Self::default()
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns the full email address.
    #[must_use]
    pub fn email(&self) -> Option<String> {
        match (&self.mailbox, &self.host) {
            (Some(m), Some(h)) => Some(format!("{m}@{h}")),
            _ => None,
        }
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let email = self.email().unwrap_or_default();
        match &self.name {
            Some(name) => write!(f, "{name} <{email}>"),
            None => write!(f, "{email}"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn email_needs_both_parts() {
        assert_eq!(
            Address::new("alice", "example.com").email().as_deref(),
            Some("alice@example.com")
        );
        let partial = Address {
            mailbox: Some("undisclosed-recipients".into()),
            ..Address::default()
        };
        assert!(partial.email().is_none());
    }

    #[test]
    fn display_with_name() {
        let addr = Address::new("bob", "example.org").with_name("Bob");
        assert_eq!(addr.to_string(), "Bob <bob@example.org>");
        assert_eq!(
            Address::new("bob", "example.org").to_string(),
            "bob@example.org"
        );
    }

    #[test]
    fn parsed_date() {
        let envelope = Envelope {
            date: Some("Tue, 1 Jul 2003 10:52:37 +0200".into()),
            ..Envelope::default()
        };
        let date = envelope.parsed_date().unwrap();
        assert_eq!(date.year(), 2003);
        assert_eq!(date.month(), 7);
    }

    #[test]
    fn parsed_date_malformed() {
        let envelope = Envelope {
            date: Some("yesterday".into()),
            ..Envelope::default()
        };
        assert!(envelope.parsed_date().is_none());
        assert!(Envelope::default().parsed_date().is_none());
    }
}
