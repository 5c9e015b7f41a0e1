//! The transport capability consumed by the message core.
//!
//! Socket handling, authentication, command tagging and mailbox-name
//! encoding all live behind this trait. Every method is one request/response
//! round trip addressed by UID inside the currently selected mailbox.

use std::future::Future;

use labelmail_imap::{FetchAttribute, FetchItem, Mailbox, Result, SearchCriteria, StoreAction, Uid};

/// Request/response primitives of an authenticated IMAP connection.
pub trait Connection: Send {
    /// Switches the active mailbox (`SELECT`).
    fn select(&mut self, mailbox: &Mailbox) -> impl Future<Output = Result<()>> + Send;

    /// Searches the active mailbox (`UID SEARCH`).
    fn uid_search(
        &mut self,
        criteria: &SearchCriteria,
    ) -> impl Future<Output = Result<Vec<Uid>>> + Send;

    /// Fetches a single attribute of one message (`UID FETCH`).
    fn uid_fetch(
        &mut self,
        uid: Uid,
        attribute: FetchAttribute,
    ) -> impl Future<Output = Result<FetchItem>> + Send;

    /// Adds or removes flags or labels on one message (`UID STORE`).
    fn uid_store(
        &mut self,
        uid: Uid,
        action: &StoreAction,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Copies one message into another mailbox (`UID COPY`).
    ///
    /// Fails with a rejection (`NO`/`BAD`) when the target does not exist.
    fn uid_copy(&mut self, uid: Uid, mailbox: &Mailbox) -> impl Future<Output = Result<()>> + Send;

    /// Creates a mailbox, which also creates the label of the same name.
    fn create(&mut self, mailbox: &Mailbox) -> impl Future<Output = Result<()>> + Send;
}
