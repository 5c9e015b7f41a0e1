//! Shared connection with container scoping.
//!
//! The server has one selected mailbox per connection. Every primitive the
//! message core issues runs inside a scope: select the message's container,
//! run the primitive, re-select whatever was active before. The connection
//! sits behind a mutex held for the whole scope, so messages sharing one
//! `Arc<Session<_>>` from several tasks never interleave their selects.
//!
//! ## Example
//!
//! ```ignore
//! use labelmail::{LabelConfig, Session};
//!
//! let session = Session::shared(connection, LabelConfig::gmail());
//! let inbox = session.container("INBOX");
//! let mut message = inbox.message(uid);
//! message.star().await?;
//! ```

use std::sync::Arc;

use labelmail_imap::{FetchAttribute, FetchItem, Mailbox, SearchCriteria, StoreAction, Uid};
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};

use crate::config::LabelConfig;
use crate::connection::Connection;
use crate::container::Container;
use crate::{Error, Result};

/// Connection plus the mailbox the server currently has selected.
struct Active<C> {
    conn: C,
    selected: Option<Mailbox>,
}

/// A connection shared by every message of one account.
pub struct Session<C> {
    active: Mutex<Active<C>>,
    config: LabelConfig,
}

impl<C> std::fmt::Debug for Session<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<C: Connection> Session<C> {
    /// Wraps an authenticated connection. No mailbox is assumed selected.
    #[must_use]
    pub fn new(conn: C, config: LabelConfig) -> Self {
        Self {
            active: Mutex::new(Active {
                conn,
                selected: None,
            }),
            config,
        }
    }

    /// Wraps a connection for sharing between containers and messages.
    #[must_use]
    pub fn shared(conn: C, config: LabelConfig) -> Arc<Self> {
        Arc::new(Self::new(conn, config))
    }

    /// Returns the special-container configuration.
    #[must_use]
    pub const fn config(&self) -> &LabelConfig {
        &self.config
    }

    /// Returns the mailbox currently selected on the server, if any.
    pub async fn selected(&self) -> Option<Mailbox> {
        self.active.lock().await.selected.clone()
    }

    /// Opens the collection for `name`.
    #[must_use]
    pub fn container(self: &Arc<Self>, name: impl Into<Mailbox>) -> Container<C> {
        Container::new(Arc::clone(self), name.into())
    }

    /// Searches `container` for UIDs matching `criteria`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Select`] if the container cannot be selected, or
    /// [`Error::Imap`] if the search fails.
    pub async fn search(
        &self,
        container: &Mailbox,
        criteria: &SearchCriteria,
    ) -> Result<Vec<Uid>> {
        let mut scope = self.enter(container).await?;
        debug!(mailbox = %container, %criteria, "UID SEARCH");
        let result = scope.active.conn.uid_search(criteria).await;
        scope.leave().await;
        Ok(result?)
    }

    /// Fetches one attribute of `uid` inside `container`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Select`] if the container cannot be selected, or
    /// [`Error::Imap`] if the fetch fails.
    pub async fn fetch(
        &self,
        container: &Mailbox,
        uid: Uid,
        attribute: FetchAttribute,
    ) -> Result<FetchItem> {
        let mut scope = self.enter(container).await?;
        debug!(mailbox = %container, %uid, %attribute, "UID FETCH");
        let result = scope.active.conn.uid_fetch(uid, attribute).await;
        scope.leave().await;
        Ok(result?)
    }

    /// Applies a store action to `uid` inside `container`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Select`] if the container cannot be selected, or
    /// [`Error::Imap`] if the store fails.
    pub async fn store(
        &self,
        container: &Mailbox,
        uid: Uid,
        action: &StoreAction,
    ) -> Result<()> {
        let mut scope = self.enter(container).await?;
        debug!(mailbox = %container, %uid, %action, "UID STORE");
        let result = scope.active.conn.uid_store(uid, action).await;
        scope.leave().await;
        Ok(result?)
    }

    /// Copies `uid` from `container` into `target`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Select`] if the container cannot be selected, or
    /// [`Error::Imap`] if the copy fails.
    pub async fn copy(
        &self,
        container: &Mailbox,
        uid: Uid,
        target: &Mailbox,
    ) -> Result<()> {
        let mut scope = self.enter(container).await?;
        debug!(mailbox = %container, %uid, %target, "UID COPY");
        let result = scope.active.conn.uid_copy(uid, target).await;
        scope.leave().await;
        Ok(result?)
    }

    /// Creates a mailbox. Needs no selected container.
    ///
    /// # Errors
    ///
    /// Returns an error if the server refuses the mailbox.
    pub async fn create(&self, mailbox: &Mailbox) -> Result<()> {
        let mut active = self.active.lock().await;
        debug!(%mailbox, "CREATE");
        Ok(active.conn.create(mailbox).await?)
    }

    /// Locks the connection and selects `container` unless already active.
    async fn enter(&self, container: &Mailbox) -> Result<Scope<'_, C>> {
        let mut active = self.active.lock().await;
        let previous = active.selected.clone();
        let switched = previous.as_ref().is_none_or(|p| p != container);

        if switched {
            debug!(mailbox = %container, "SELECT");
            if let Err(e) = active.conn.select(container).await {
                // A failed SELECT leaves the server with nothing selected.
                active.selected = None;
                Scope {
                    active,
                    previous,
                    switched,
                }
                .leave()
                .await;
                return Err(Error::Select {
                    mailbox: container.to_string(),
                    source: e,
                });
            }
            active.selected = Some(container.clone());
        }

        Ok(Scope {
            active,
            previous,
            switched,
        })
    }
}

/// A locked connection with the message's container selected.
struct Scope<'a, C> {
    active: MutexGuard<'a, Active<C>>,
    previous: Option<Mailbox>,
    switched: bool,
}

impl<C: Connection> Scope<'_, C> {
    /// Re-selects the mailbox that was active before the scope began.
    async fn leave(mut self) {
        if !self.switched {
            return;
        }
        let Some(previous) = self.previous.take() else {
            return;
        };
        debug!(mailbox = %previous, "SELECT (restore)");
        match self.active.conn.select(&previous).await {
            Ok(()) => self.active.selected = Some(previous),
            Err(e) => {
                warn!(?e, mailbox = %previous, "Failed to reselect mailbox");
                self.active.selected = None;
            }
        }
    }
}
