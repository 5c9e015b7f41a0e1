//! # labelmail
//!
//! Message entity and mutation engine for IMAP providers that expose labels
//! as mailboxes (Gmail and compatible servers).
//!
//! This crate provides:
//! - A [`Session`] wrapping one authenticated [`Connection`], scoping every
//!   primitive to the right container
//! - [`Container`]s that hand out messages and keep a listing cache
//! - [`Message`] entities with lazily fetched, cached attributes
//! - Flag and label mutations: star, read, label, move, delete, archive,
//!   spam and [`Mark`] dispositions
//!
//! The wire transport is not part of this crate. Anything implementing
//! [`Connection`] can drive it.
//!
//! ## Example
//!
//! ```ignore
//! use labelmail::{LabelConfig, Mark, Session};
//!
//! let session = Session::shared(connection, LabelConfig::gmail());
//! let inbox = session.container("INBOX");
//!
//! let mut message = inbox.message_by_id("<abc@mail.example.com>");
//! if !message.is_read().await? {
//!     message.mark(Mark::Read).await?;
//! }
//! message.add_label_or_create("Receipts").await?;
//! message.archive().await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod config;
pub mod connection;
pub mod container;
mod error;
pub mod message;
pub mod parsed;
pub mod session;

pub use config::LabelConfig;
pub use connection::Connection;
pub use container::Container;
pub use error::{Error, Result};
pub use message::{Field, Mark, Message, MessageFields};
pub use parsed::{Headers, ParsedMessage};
pub use session::Session;

pub use labelmail_imap;
pub use labelmail_imap::{
    Address, Envelope, FetchAttribute, FetchItem, Flag, Flags, Label, Labels, Mailbox,
    SearchCriteria, StoreAction, ThreadId, Uid,
};
