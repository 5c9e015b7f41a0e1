//! Names of the provider's special containers.

use labelmail_imap::Mailbox;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Configuration naming the trash, spam and archive containers.
///
/// Some Gmail locales call the trash `[Gmail]/Bin` and others use the
/// `[Google Mail]` prefix; the names are injected rather than probed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    /// Trash container. Moves into it skip the trailing delete.
    pub trash: String,
    /// Spam container.
    pub spam: String,
    /// Archive container holding every message.
    pub all_mail: String,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self::gmail()
    }
}

impl LabelConfig {
    /// Gmail's default container names.
    #[must_use]
    pub fn gmail() -> Self {
        Self {
            trash: "[Gmail]/Trash".to_string(),
            spam: "[Gmail]/Spam".to_string(),
            all_mail: "[Gmail]/All Mail".to_string(),
        }
    }

    /// Loads a configuration from JSON. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sets the trash container.
    #[must_use]
    pub fn trash(mut self, name: impl Into<String>) -> Self {
        self.trash = name.into();
        self
    }

    /// Sets the spam container.
    #[must_use]
    pub fn spam(mut self, name: impl Into<String>) -> Self {
        self.spam = name.into();
        self
    }

    /// Sets the archive container.
    #[must_use]
    pub fn all_mail(mut self, name: impl Into<String>) -> Self {
        self.all_mail = name.into();
        self
    }

    /// Returns true if `name` is the trash container.
    #[must_use]
    pub fn is_trash(&self, name: &str) -> bool {
        Mailbox::new(self.trash.as_str()).is(name)
    }
}
