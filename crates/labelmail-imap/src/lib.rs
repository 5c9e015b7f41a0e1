//! # labelmail-imap
//!
//! Protocol vocabulary for IMAP servers that layer labels on top of folders
//! (Gmail's `X-GM-LABELS` / `X-GM-THRID` extensions).
//!
//! This crate holds the types exchanged between the message core and the
//! transport that actually talks to the server. It performs no I/O.
//!
//! ## Example
//!
//! ```
//! use labelmail_imap::{Flag, Label, StoreAction, Uid};
//!
//! let star = StoreAction::AddLabels(vec![Label::Starred]);
//! assert_eq!(star.item_name(), "+X-GM-LABELS");
//! assert_eq!(star.to_string(), "+X-GM-LABELS (\\Starred)");
//!
//! let read = StoreAction::AddFlags(vec![Flag::Seen]);
//! assert_eq!(read.to_string(), "+FLAGS (\\Seen)");
//!
//! assert!(Uid::new(0).is_none());
//! ```
//!
//! ## Modules
//!
//! - [`command`]: search criteria, fetch attributes and store actions
//! - [`fetch`]: values returned by a single-attribute fetch
//! - [`types`]: identifiers, flags, labels, mailboxes and envelopes

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod command;
mod error;
pub mod fetch;
pub mod types;

pub use command::{FetchAttribute, SearchCriteria, StoreAction};
pub use error::{Error, Result};
pub use fetch::FetchItem;
pub use types::{Address, Envelope, Flag, Flags, Label, Labels, Mailbox, ThreadId, Uid};
