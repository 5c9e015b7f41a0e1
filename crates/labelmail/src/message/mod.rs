//! The message entity.
//!
//! A [`Message`] knows how to address one remote message (its UID, or the
//! `Message-ID` header used to find the UID) and caches every attribute it
//! fetches. Each attribute is fetched at most once per entity: a cached
//! empty set or zero size is still a cached value. Fetch failures are not
//! cached, so the next access tries again.
//!
//! Mutations never touch the caches: a message starred after its labels
//! were read still reports the old labels.

mod field;
mod mark;
mod mutation;

use std::fmt;
use std::sync::Arc;

use labelmail_imap::{
    Envelope, FetchAttribute, FetchItem, Flags, Labels, Mailbox, SearchCriteria, ThreadId, Uid,
};
use tracing::debug;

use crate::connection::Connection;
use crate::container::ContainerRef;
use crate::parsed::{Headers, ParsedMessage};
use crate::session::Session;
use crate::{Error, Result};

pub use field::Field;
pub use mark::Mark;

/// Fields a listing may already know when it constructs a message.
///
/// Everything is optional, but a container only accepts fields that carry a
/// UID or a `Message-ID`.
#[derive(Debug, Clone, Default)]
pub struct MessageFields {
    /// UID inside the originating container.
    pub uid: Option<Uid>,
    /// `Message-ID` header.
    pub message_id: Option<String>,
    /// Provider thread id.
    pub thread_id: Option<ThreadId>,
    /// RFC822 size in bytes.
    pub size: Option<u32>,
    /// Envelope.
    pub envelope: Option<Envelope>,
    /// Flags.
    pub flags: Option<Flags>,
    /// Labels.
    pub labels: Option<Labels>,
    /// Headers.
    pub headers: Option<Headers>,
}

impl MessageFields {
    /// Creates an empty field set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the UID.
    #[must_use]
    pub const fn uid(mut self, uid: Uid) -> Self {
        self.uid = Some(uid);
        self
    }

    /// Sets the `Message-ID`.
    #[must_use]
    pub fn message_id(mut self, message_id: impl Into<String>) -> Self {
        self.message_id = Some(message_id.into());
        self
    }

    /// Sets the thread id.
    #[must_use]
    pub const fn thread_id(mut self, thread_id: ThreadId) -> Self {
        self.thread_id = Some(thread_id);
        self
    }

    /// Sets the size.
    #[must_use]
    pub const fn size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    /// Sets the envelope.
    #[must_use]
    pub fn envelope(mut self, envelope: Envelope) -> Self {
        self.envelope = Some(envelope);
        self
    }

    /// Sets the flags.
    #[must_use]
    pub fn flags(mut self, flags: Flags) -> Self {
        self.flags = Some(flags);
        self
    }

    /// Sets the labels.
    #[must_use]
    pub fn labels(mut self, labels: Labels) -> Self {
        self.labels = Some(labels);
        self
    }

    /// Sets the headers.
    #[must_use]
    pub fn headers(mut self, headers: Headers) -> Self {
        self.headers = Some(headers);
        self
    }
}

/// Where the entity stands on its UID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UidState {
    Known(Uid),
    /// Not searched for yet.
    Unresolved,
    /// Searched for and not found. Terminal.
    Missing,
}

/// One remote message, addressed inside its originating container.
pub struct Message<C> {
    session: Arc<Session<C>>,
    container: ContainerRef,
    uid: UidState,
    message_id: Option<String>,
    thread_id: Option<ThreadId>,
    size: Option<u32>,
    envelope: Option<Envelope>,
    flags: Option<Flags>,
    labels: Option<Labels>,
    headers: Option<Headers>,
    body: Option<ParsedMessage>,
}

impl<C: Connection> Message<C> {
    pub(crate) fn new(
        session: Arc<Session<C>>,
        container: ContainerRef,
        fields: MessageFields,
    ) -> Self {
        Self {
            session,
            container,
            uid: fields.uid.map_or(UidState::Unresolved, UidState::Known),
            message_id: fields.message_id,
            thread_id: fields.thread_id,
            size: fields.size,
            envelope: fields.envelope,
            flags: fields.flags,
            labels: fields.labels,
            headers: fields.headers,
            body: None,
        }
    }

    /// Returns the originating container.
    #[must_use]
    pub const fn mailbox(&self) -> &Mailbox {
        self.container.name()
    }

    /// Returns the UID if it is already known, without searching.
    #[must_use]
    pub const fn uid(&self) -> Option<Uid> {
        match self.uid {
            UidState::Known(uid) => Some(uid),
            UidState::Unresolved | UidState::Missing => None,
        }
    }

    /// Returns the `Message-ID` the message was constructed with.
    #[must_use]
    pub fn message_id(&self) -> Option<&str> {
        self.message_id.as_deref()
    }

    /// Returns the UID, searching by `Message-ID` the first time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no message carries the `Message-ID`.
    /// That outcome is remembered and no second search is issued.
    /// Transport failures propagate and leave the UID unresolved.
    pub async fn resolve_uid(&mut self) -> Result<Uid> {
        match self.uid {
            UidState::Known(uid) => return Ok(uid),
            UidState::Missing => return Err(self.not_found()),
            UidState::Unresolved => {}
        }

        let Some(message_id) = self.message_id.as_deref() else {
            return Err(Error::MissingAddress);
        };
        let criteria = SearchCriteria::message_id(message_id);
        let uids = self
            .session
            .search(self.container.name(), &criteria)
            .await?;

        if let Some(&uid) = uids.first() {
            debug!(%uid, message_id, "Resolved uid");
            self.uid = UidState::Known(uid);
            self.container.remember(uid);
            Ok(uid)
        } else {
            self.uid = UidState::Missing;
            Err(self.not_found())
        }
    }

    /// Returns the size in bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the UID cannot be resolved or the fetch fails.
    pub async fn size(&mut self) -> Result<u32> {
        if let Some(size) = self.size {
            return Ok(size);
        }
        let size = match self.fetch(FetchAttribute::Rfc822Size).await? {
            FetchItem::Rfc822Size(size) => size,
            other => return Err(unexpected(FetchAttribute::Rfc822Size, &other)),
        };
        Ok(*self.size.insert(size))
    }

    /// Returns the provider thread id.
    ///
    /// # Errors
    ///
    /// Returns an error if the UID cannot be resolved or the fetch fails.
    pub async fn thread_id(&mut self) -> Result<ThreadId> {
        if let Some(thread_id) = self.thread_id {
            return Ok(thread_id);
        }
        let thread_id = match self.fetch(FetchAttribute::ThreadId).await? {
            FetchItem::ThreadId(id) => id,
            other => return Err(unexpected(FetchAttribute::ThreadId, &other)),
        };
        Ok(*self.thread_id.insert(thread_id))
    }

    /// Returns the envelope.
    ///
    /// # Errors
    ///
    /// Returns an error if the UID cannot be resolved or the fetch fails.
    pub async fn envelope(&mut self) -> Result<&Envelope> {
        let envelope = match self.envelope.take() {
            Some(envelope) => envelope,
            None => match self.fetch(FetchAttribute::Envelope).await? {
                FetchItem::Envelope(envelope) => *envelope,
                other => return Err(unexpected(FetchAttribute::Envelope, &other)),
            },
        };
        Ok(self.envelope.insert(envelope))
    }

    /// Returns the flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the UID cannot be resolved or the fetch fails.
    pub async fn flags(&mut self) -> Result<&Flags> {
        let flags = match self.flags.take() {
            Some(flags) => flags,
            None => match self.fetch(FetchAttribute::Flags).await? {
                FetchItem::Flags(flags) => flags,
                other => return Err(unexpected(FetchAttribute::Flags, &other)),
            },
        };
        Ok(self.flags.insert(flags))
    }

    /// Returns the labels.
    ///
    /// # Errors
    ///
    /// Returns an error if the UID cannot be resolved or the fetch fails.
    pub async fn labels(&mut self) -> Result<&Labels> {
        let labels = match self.labels.take() {
            Some(labels) => labels,
            None => match self.fetch(FetchAttribute::Labels).await? {
                FetchItem::Labels(labels) => labels,
                other => return Err(unexpected(FetchAttribute::Labels, &other)),
            },
        };
        Ok(self.labels.insert(labels))
    }

    /// Returns the full message, parsed into headers and body.
    ///
    /// # Errors
    ///
    /// Returns an error if the UID cannot be resolved or the fetch fails.
    pub async fn raw_body(&mut self) -> Result<&ParsedMessage> {
        let body = match self.body.take() {
            Some(body) => body,
            None => match self.fetch(FetchAttribute::Rfc822).await? {
                FetchItem::Rfc822(raw) => ParsedMessage::parse(raw),
                other => return Err(unexpected(FetchAttribute::Rfc822, &other)),
            },
        };
        Ok(self.body.insert(body))
    }

    /// Alias of [`Message::raw_body`].
    ///
    /// # Errors
    ///
    /// See [`Message::raw_body`].
    pub async fn message(&mut self) -> Result<&ParsedMessage> {
        self.raw_body().await
    }

    /// Returns the headers known from the listing, or those of the parsed
    /// raw body.
    ///
    /// # Errors
    ///
    /// Returns an error if the raw body has to be fetched and that fails.
    pub async fn headers(&mut self) -> Result<&Headers> {
        let headers = match self.headers.take() {
            Some(headers) => headers,
            None => self.raw_body().await?.headers().clone(),
        };
        Ok(self.headers.insert(headers))
    }

    /// Returns true if the message carries `\Seen`.
    ///
    /// # Errors
    ///
    /// Returns an error if the flags have to be fetched and that fails.
    pub async fn is_read(&mut self) -> Result<bool> {
        Ok(self.flags().await?.is_seen())
    }

    async fn fetch(&mut self, attribute: FetchAttribute) -> Result<FetchItem> {
        let uid = self.resolve_uid().await?;
        self.session
            .fetch(self.container.name(), uid, attribute)
            .await
    }

    fn not_found(&self) -> Error {
        Error::NotFound {
            message_id: self.message_id.clone().unwrap_or_default(),
        }
    }
}

fn unexpected(expected: FetchAttribute, actual: &FetchItem) -> Error {
    Error::UnexpectedFetch {
        expected: expected.as_str(),
        actual: actual.attribute().as_str(),
    }
}

impl<C> fmt::Debug for Message<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("Message");
        d.field("mailbox", &self.container.name().as_str());
        if let UidState::Known(uid) = self.uid {
            d.field("uid", &uid.get());
        }
        if let Some(message_id) = &self.message_id {
            d.field("message_id", message_id);
        }
        d.finish()
    }
}
