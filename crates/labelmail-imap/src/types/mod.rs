//! Core IMAP types.
//!
//! Identifiers, flags, provider labels, mailbox names and envelopes.

#![allow(clippy::missing_const_for_fn)]

mod envelope;
mod flags;
mod identifiers;
mod labels;
mod mailbox;

pub use envelope::{Address, Envelope};
pub use flags::{Flag, Flags};
pub use identifiers::{ThreadId, Uid};
pub use labels::{Label, Labels};
pub use mailbox::Mailbox;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_uid_new() {
        assert!(Uid::new(0).is_none());
        assert!(Uid::new(1).is_some());
        assert_eq!(Uid::new(123).unwrap().get(), 123);
    }

    #[test]
    fn test_flag_parse() {
        assert_eq!(Flag::parse("\\Seen"), Flag::Seen);
        assert_eq!(Flag::parse("\\FLAGGED"), Flag::Flagged);
        assert_eq!(Flag::parse("custom"), Flag::Keyword("custom".to_string()));
    }

    #[test]
    fn test_label_parse() {
        assert_eq!(Label::parse("\\Starred"), Label::Starred);
        assert_eq!(Label::parse("\\trash"), Label::Trash);
        assert_eq!(Label::parse("Work"), Label::Custom("Work".to_string()));
    }

    #[test]
    fn star_and_seen_are_independent() {
        let mut labels = Labels::new();
        labels.insert(Label::Starred);
        let flags = Flags::new();
        assert!(labels.is_starred());
        assert!(!flags.is_seen());
    }
}
