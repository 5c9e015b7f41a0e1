//! Containers: the named collections messages are listed from.
//!
//! A container hands out [`Message`] entities and remembers the UIDs it has
//! handed out. Messages keep only a weak handle back to that listing, so
//! dropping the container never invalidates a message and a message never
//! keeps the container alive.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, PoisonError, Weak};

use labelmail_imap::{Mailbox, Uid};

use crate::connection::Connection;
use crate::message::{Message, MessageFields};
use crate::session::Session;
use crate::{Error, Result};

/// In-memory listing cache of one container.
#[derive(Debug, Default)]
pub(crate) struct Listing {
    uids: Mutex<BTreeSet<Uid>>,
}

impl Listing {
    fn insert(&self, uid: Uid) {
        self.uids
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(uid);
    }

    fn remove(&self, uid: Uid) -> bool {
        self.uids
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&uid)
    }

    fn contains(&self, uid: Uid) -> bool {
        self.uids
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&uid)
    }

    fn snapshot(&self) -> Vec<Uid> {
        self.uids
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .copied()
            .collect()
    }
}

/// A named remote collection and its listing cache.
#[derive(Debug)]
pub struct Container<C> {
    session: Arc<Session<C>>,
    name: Mailbox,
    listing: Arc<Listing>,
}

impl<C: Connection> Container<C> {
    pub(crate) fn new(session: Arc<Session<C>>, name: Mailbox) -> Self {
        Self {
            session,
            name,
            listing: Arc::new(Listing::default()),
        }
    }

    /// Returns the container name.
    #[must_use]
    pub const fn name(&self) -> &Mailbox {
        &self.name
    }

    /// Returns the session this container lists through.
    #[must_use]
    pub const fn session(&self) -> &Arc<Session<C>> {
        &self.session
    }

    /// Returns the message with a known UID.
    #[must_use]
    pub fn message(&self, uid: Uid) -> Message<C> {
        self.listing.insert(uid);
        Message::new(
            Arc::clone(&self.session),
            self.handle(),
            MessageFields::new().uid(uid),
        )
    }

    /// Returns the message with a known `Message-ID` header.
    ///
    /// The UID is searched for the first time it is needed.
    #[must_use]
    pub fn message_by_id(&self, message_id: impl Into<String>) -> Message<C> {
        Message::new(
            Arc::clone(&self.session),
            self.handle(),
            MessageFields::new().message_id(message_id),
        )
    }

    /// Returns a message pre-populated with whatever a listing already
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingAddress`] if `fields` carries neither a UID
    /// nor a `Message-ID`.
    pub fn message_with(&self, fields: MessageFields) -> Result<Message<C>> {
        if fields.uid.is_none() && fields.message_id.is_none() {
            return Err(Error::MissingAddress);
        }
        if let Some(uid) = fields.uid {
            self.listing.insert(uid);
        }
        Ok(Message::new(
            Arc::clone(&self.session),
            self.handle(),
            fields,
        ))
    }

    /// Returns true if `uid` is in the listing cache.
    #[must_use]
    pub fn is_cached(&self, uid: Uid) -> bool {
        self.listing.contains(uid)
    }

    /// Returns the cached UIDs in ascending order.
    #[must_use]
    pub fn cached_uids(&self) -> Vec<Uid> {
        self.listing.snapshot()
    }

    fn handle(&self) -> ContainerRef {
        ContainerRef {
            name: self.name.clone(),
            listing: Arc::downgrade(&self.listing),
        }
    }
}

/// A message's non-owning back-reference to its originating container.
#[derive(Debug, Clone)]
pub(crate) struct ContainerRef {
    name: Mailbox,
    listing: Weak<Listing>,
}

impl ContainerRef {
    pub(crate) const fn name(&self) -> &Mailbox {
        &self.name
    }

    /// Records a resolved UID, if the container is still alive.
    pub(crate) fn remember(&self, uid: Uid) {
        if let Some(listing) = self.listing.upgrade() {
            listing.insert(uid);
        }
    }

    /// Drops a UID from the listing cache, if the container is still alive.
    pub(crate) fn forget(&self, uid: Uid) -> bool {
        self.listing
            .upgrade()
            .is_some_and(|listing| listing.remove(uid))
    }
}
