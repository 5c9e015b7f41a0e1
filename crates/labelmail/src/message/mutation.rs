//! Flag and label mutations.
//!
//! Two primitives do all the work: STORE adds or removes markers in place,
//! COPY duplicates the message into another container (which is what
//! labelling means on a provider whose labels are mailboxes). Moving is a
//! copy followed by a soft delete.
//!
//! Store-based operations answer `Ok(false)` when the server refuses the
//! store and fail when the connection does. Copy-based operations return an
//! error: [`Error::NoLabel`] when the server rejects the target, the
//! transport error otherwise.

use labelmail_imap::{Flag, Label, Mailbox, StoreAction};
use tracing::{info, warn};

use super::{Mark, Message};
use crate::connection::Connection;
use crate::{Error, Result};

impl<C: Connection> Message<C> {
    /// Adds a flag.
    ///
    /// # Errors
    ///
    /// Returns an error if the UID cannot be resolved or the connection
    /// fails. A refused store is `Ok(false)`.
    pub async fn flag(&mut self, flag: impl Into<Flag>) -> Result<bool> {
        self.store(StoreAction::AddFlags(vec![flag.into()])).await
    }

    /// Removes a flag.
    ///
    /// # Errors
    ///
    /// Returns an error if the UID cannot be resolved or the connection
    /// fails. A refused store is `Ok(false)`.
    pub async fn unflag(&mut self, flag: impl Into<Flag>) -> Result<bool> {
        self.store(StoreAction::RemoveFlags(vec![flag.into()])).await
    }

    /// Adds the starred label.
    ///
    /// # Errors
    ///
    /// Returns an error if the UID cannot be resolved or the connection
    /// fails. A refused store is `Ok(false)`.
    pub async fn star(&mut self) -> Result<bool> {
        self.store(StoreAction::AddLabels(vec![Label::Starred])).await
    }

    /// Removes the starred label.
    ///
    /// # Errors
    ///
    /// Returns an error if the UID cannot be resolved or the connection
    /// fails. A refused store is `Ok(false)`.
    pub async fn unstar(&mut self) -> Result<bool> {
        self.store(StoreAction::RemoveLabels(vec![Label::Starred]))
            .await
    }

    /// Adds `\Seen`.
    ///
    /// # Errors
    ///
    /// Returns an error if the UID cannot be resolved or the connection
    /// fails. A refused store is `Ok(false)`.
    pub async fn mark_read(&mut self) -> Result<bool> {
        self.flag(Flag::Seen).await
    }

    /// Removes `\Seen`.
    ///
    /// # Errors
    ///
    /// Returns an error if the UID cannot be resolved or the connection
    /// fails. A refused store is `Ok(false)`.
    pub async fn mark_unread(&mut self) -> Result<bool> {
        self.unflag(Flag::Seen).await
    }

    /// Adds a label marker in place, without copying.
    ///
    /// # Errors
    ///
    /// Returns an error if the UID cannot be resolved or the connection
    /// fails. A refused store is `Ok(false)`.
    pub async fn add_label(&mut self, name: &str) -> Result<bool> {
        self.store(StoreAction::AddLabels(vec![Label::from(name)]))
            .await
    }

    /// Removes a label marker.
    ///
    /// # Errors
    ///
    /// Returns an error if the UID cannot be resolved or the connection
    /// fails. A refused store is `Ok(false)`.
    pub async fn remove_label(&mut self, name: &str) -> Result<bool> {
        self.store(StoreAction::RemoveLabels(vec![Label::from(name)]))
            .await
    }

    /// Copies the message into the container `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoLabel`] if the server rejects the copy (usually
    /// because the container does not exist). Other failures propagate
    /// unchanged.
    pub async fn label(&mut self, name: &str) -> Result<()> {
        let uid = self.resolve_uid().await?;
        let target = Mailbox::new(name);
        match self.session.copy(self.container.name(), uid, &target).await {
            Err(Error::Imap(source)) if source.is_rejection() => Err(Error::NoLabel {
                name: name.to_string(),
                source,
            }),
            other => other,
        }
    }

    /// Copies the message into `name`, creating the container first if the
    /// copy is rejected. The copy is retried once.
    ///
    /// # Errors
    ///
    /// Returns an error if creation fails, if the retried copy fails, or if
    /// the first copy fails for any reason other than a rejection.
    pub async fn label_or_create(&mut self, name: &str) -> Result<()> {
        match self.label(name).await {
            Err(Error::NoLabel { .. }) => {
                self.create_label(name).await?;
                self.label(name).await
            }
            other => other,
        }
    }

    /// Labels the message, creating the label if it does not exist.
    ///
    /// After creation the label is applied with a store, so the result
    /// reports that store like [`Message::add_label`].
    ///
    /// # Errors
    ///
    /// Returns an error if creation fails or if the copy fails for any
    /// reason other than a rejection.
    pub async fn add_label_or_create(&mut self, name: &str) -> Result<bool> {
        match self.label(name).await {
            Ok(()) => Ok(true),
            Err(Error::NoLabel { .. }) => {
                self.create_label(name).await?;
                self.add_label(name).await
            }
            Err(e) => Err(e),
        }
    }

    /// Copies the message into `name`, then deletes it from its container
    /// unless `name` is the trash.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`Message::label`].
    pub async fn move_to(&mut self, name: &str) -> Result<bool> {
        self.label(name).await?;
        if self.session.config().is_trash(name) {
            return Ok(true);
        }
        self.delete().await
    }

    /// Alias of [`Message::move_to`].
    ///
    /// # Errors
    ///
    /// See [`Message::move_to`].
    pub async fn r#move(&mut self, name: &str) -> Result<bool> {
        self.move_to(name).await
    }

    /// Like [`Message::move_to`], creating the target if needed.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`Message::label_or_create`].
    pub async fn move_to_or_create(&mut self, name: &str) -> Result<bool> {
        self.label_or_create(name).await?;
        self.delete().await
    }

    /// Alias of [`Message::move_to_or_create`].
    ///
    /// # Errors
    ///
    /// See [`Message::move_to_or_create`].
    pub async fn move_or_create(&mut self, name: &str) -> Result<bool> {
        self.move_to_or_create(name).await
    }

    /// Soft-deletes the message: drops it from the container's listing
    /// cache, then adds the trash label.
    ///
    /// # Errors
    ///
    /// Returns an error if the UID cannot be resolved or the connection
    /// fails. A refused store is `Ok(false)`.
    pub async fn delete(&mut self) -> Result<bool> {
        let uid = self.resolve_uid().await?;
        self.container.forget(uid);
        self.store(StoreAction::AddLabels(vec![Label::Trash])).await
    }

    /// Moves the message to the archive container.
    ///
    /// # Errors
    ///
    /// See [`Message::move_to`].
    pub async fn archive(&mut self) -> Result<bool> {
        let all_mail = self.session.config().all_mail.clone();
        self.move_to(&all_mail).await
    }

    /// Moves the message to the spam container.
    ///
    /// # Errors
    ///
    /// See [`Message::move_to`].
    pub async fn spam(&mut self) -> Result<bool> {
        let spam = self.session.config().spam.clone();
        self.move_to(&spam).await
    }

    /// Applies a shorthand disposition.
    ///
    /// # Errors
    ///
    /// Propagates the errors of the operation `mark` dispatches to.
    pub async fn mark(&mut self, mark: Mark) -> Result<bool> {
        match mark {
            Mark::Read => self.mark_read().await,
            Mark::Unread => self.mark_unread().await,
            Mark::Deleted => self.delete().await,
            Mark::Spam => self.spam().await,
            Mark::Flag(flag) => self.flag(flag).await,
        }
    }

    async fn store(&mut self, action: StoreAction) -> Result<bool> {
        let uid = self.resolve_uid().await?;
        match self.session.store(self.container.name(), uid, &action).await {
            Ok(()) => Ok(true),
            Err(e) if e.is_rejection() => {
                warn!(%e, %uid, %action, mailbox = %self.container.name(), "STORE refused");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    async fn create_label(&self, name: &str) -> Result<()> {
        info!(label = name, "Label does not exist, creating it");
        self.session.create(&Mailbox::new(name)).await
    }
}
