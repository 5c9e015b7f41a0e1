//! Shared fixtures for the integration tests.
//!
//! `MockConnection` plays a Gmail-like server: mailboxes and labels share one
//! namespace, copying into a missing mailbox is refused with `NO`, and a
//! label store puts the message into the mailbox of that name.

#![allow(dead_code, clippy::unwrap_used, clippy::missing_panics_doc)]

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};

use labelmail::labelmail_imap::{self, Result};
use labelmail::{
    Connection, FetchAttribute, FetchItem, Label, LabelConfig, Mailbox, SearchCriteria, Session,
    StoreAction, Uid,
};

/// One primitive as the server saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Select(String),
    Search(SearchCriteria),
    Fetch(u32, FetchAttribute),
    Store(u32, StoreAction),
    Copy(u32, String),
    Create(String),
}

/// Server-side state, shared between the connection and the test.
#[derive(Debug, Default)]
pub struct State {
    pub calls: Vec<Call>,
    /// Existing mailboxes.
    pub mailboxes: HashSet<String>,
    /// Mailboxes whose SELECT is refused with `NO`.
    pub unselectable: HashSet<String>,
    /// Error returned by the next SELECT, whatever the mailbox.
    pub select_error: Option<labelmail_imap::Error>,
    /// UIDs returned for a `Message-ID` search.
    pub search_results: HashMap<String, Vec<Uid>>,
    /// Queued answers per (uid, attribute); the last one repeats.
    pub items: HashMap<(u32, FetchAttribute), VecDeque<FetchItem>>,
    /// Number of upcoming fetches that fail.
    pub failing_fetches: usize,
    /// Every store is refused with `NO`.
    pub fail_stores: bool,
    /// Error returned by the next store, ahead of `fail_stores`.
    pub store_error: Option<labelmail_imap::Error>,
    /// Error returned by the next copy, whatever the target.
    pub copy_error: Option<labelmail_imap::Error>,
    /// Mailbox membership built from copies and label stores.
    pub members: HashMap<String, BTreeSet<u32>>,
}

/// A scripted connection. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockConnection {
    state: Arc<Mutex<State>>,
}

impl MockConnection {
    /// A server with INBOX and the Gmail special folders.
    pub fn gmail() -> Self {
        let mock = Self::default();
        {
            let mut state = mock.state();
            for name in ["INBOX", "[Gmail]/Trash", "[Gmail]/Spam", "[Gmail]/All Mail"] {
                state.mailboxes.insert(name.to_string());
            }
        }
        mock
    }

    pub fn state(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    pub fn add_mailbox(&self, name: &str) {
        self.state().mailboxes.insert(name.to_string());
    }

    pub fn on_search(&self, message_id: &str, uids: &[u32]) {
        let uids = uids.iter().map(|&n| uid(n)).collect();
        self.state()
            .search_results
            .insert(message_id.to_string(), uids);
    }

    pub fn on_fetch(&self, uid: u32, item: FetchItem) {
        self.state()
            .items
            .entry((uid, item.attribute()))
            .or_default()
            .push_back(item);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }

    /// Calls other than SELECT.
    pub fn primitives(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| !matches!(c, Call::Select(_)))
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.state().calls.iter().filter(|c| pred(*c)).count()
    }

    pub fn clear_calls(&self) {
        self.state().calls.clear();
    }

    pub fn is_member(&self, mailbox: &str, uid: u32) -> bool {
        self.state()
            .members
            .get(mailbox)
            .is_some_and(|m| m.contains(&uid))
    }
}

fn record(state: &mut State, call: Call) {
    state.calls.push(call);
}

impl Connection for MockConnection {
    async fn select(&mut self, mailbox: &Mailbox) -> Result<()> {
        let mut state = self.state();
        record(&mut state, Call::Select(mailbox.to_string()));
        if let Some(err) = state.select_error.take() {
            return Err(err);
        }
        if state.unselectable.contains(mailbox.as_str()) {
            return Err(labelmail_imap::Error::No(format!(
                "[NONEXISTENT] Unknown Mailbox: {mailbox}"
            )));
        }
        Ok(())
    }

    async fn uid_search(&mut self, criteria: &SearchCriteria) -> Result<Vec<Uid>> {
        let mut state = self.state();
        record(&mut state, Call::Search(criteria.clone()));
        let SearchCriteria::Header(_, value) = criteria else {
            return Ok(Vec::new());
        };
        Ok(state.search_results.get(value).cloned().unwrap_or_default())
    }

    async fn uid_fetch(&mut self, uid: Uid, attribute: FetchAttribute) -> Result<FetchItem> {
        let mut state = self.state();
        record(&mut state, Call::Fetch(uid.get(), attribute));
        if state.failing_fetches > 0 {
            state.failing_fetches -= 1;
            return Err(labelmail_imap::Error::Bye("connection reset".into()));
        }
        let queue = state.items.get_mut(&(uid.get(), attribute)).ok_or_else(|| {
            labelmail_imap::Error::Protocol(format!("no {attribute} for uid {uid}"))
        })?;
        let item = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        };
        item.ok_or_else(|| labelmail_imap::Error::Protocol("empty script".into()))
    }

    async fn uid_store(&mut self, uid: Uid, action: &StoreAction) -> Result<()> {
        let mut state = self.state();
        record(&mut state, Call::Store(uid.get(), action.clone()));
        if let Some(err) = state.store_error.take() {
            return Err(err);
        }
        if state.fail_stores {
            return Err(labelmail_imap::Error::No("STORE failed".into()));
        }
        if let StoreAction::AddLabels(labels) = action {
            for label in labels {
                if let Label::Custom(name) = label {
                    state.members.entry(name.clone()).or_default().insert(uid.get());
                }
            }
        }
        Ok(())
    }

    async fn uid_copy(&mut self, uid: Uid, mailbox: &Mailbox) -> Result<()> {
        let mut state = self.state();
        record(&mut state, Call::Copy(uid.get(), mailbox.to_string()));
        if let Some(err) = state.copy_error.take() {
            return Err(err);
        }
        if !state.mailboxes.contains(mailbox.as_str()) {
            return Err(labelmail_imap::Error::No(
                "[TRYCREATE] No folder (Failure)".into(),
            ));
        }
        state
            .members
            .entry(mailbox.to_string())
            .or_default()
            .insert(uid.get());
        Ok(())
    }

    async fn create(&mut self, mailbox: &Mailbox) -> Result<()> {
        let mut state = self.state();
        record(&mut state, Call::Create(mailbox.to_string()));
        if !state.mailboxes.insert(mailbox.to_string()) {
            return Err(labelmail_imap::Error::No("[ALREADYEXISTS] Duplicate".into()));
        }
        Ok(())
    }
}

pub fn uid(n: u32) -> Uid {
    Uid::new(n).unwrap()
}

/// A session over a fresh Gmail-like mock, plus a handle on the mock.
pub fn setup() -> (Arc<Session<MockConnection>>, MockConnection) {
    init_tracing();
    let mock = MockConnection::gmail();
    let session = Session::shared(mock.clone(), LabelConfig::gmail());
    (session, mock)
}

/// Installs a test subscriber once. `RUST_LOG=labelmail=debug` shows the
/// primitives.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
