//! Provider labels (`X-GM-LABELS`).
//!
//! Labels are markers layered over folders. System labels carry a leading
//! backslash on the wire; user labels are plain mailbox names.

/// A single provider label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Label {
    /// The inbox.
    Inbox,
    /// Starred marker.
    Starred,
    /// Soft-delete marker.
    Trash,
    /// Spam marker.
    Spam,
    /// Priority-inbox importance marker.
    Important,
    /// Sent mail.
    Sent,
    /// Draft.
    Draft,
    /// User-defined label, named like its container.
    Custom(String),
}

impl Label {
    /// Parses a label string as returned in `X-GM-LABELS`.
    ///
    /// Only backslash-prefixed names are system labels: a user label called
    /// `Starred` stays [`Label::Custom`].
    #[must_use]
    pub fn parse(s: &str) -> Self {
        let Some(system) = s.strip_prefix('\\') else {
            return Self::Custom(s.to_string());
        };
        match system.to_uppercase().as_str() {
            "INBOX" => Self::Inbox,
            "STARRED" => Self::Starred,
            "TRASH" => Self::Trash,
            "SPAM" => Self::Spam,
            "IMPORTANT" => Self::Important,
            "SENT" => Self::Sent,
            "DRAFT" => Self::Draft,
            _ => Self::Custom(s.to_string()),
        }
    }

    /// Returns the label as an IMAP string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Inbox => "\\Inbox",
            Self::Starred => "\\Starred",
            Self::Trash => "\\Trash",
            Self::Spam => "\\Spam",
            Self::Important => "\\Important",
            Self::Sent => "\\Sent",
            Self::Draft => "\\Draft",
            Self::Custom(s) => s,
        }
    }

    /// Returns true for labels the provider manages itself.
    #[must_use]
    pub fn is_system(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<String> for Label {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

/// Unordered set of labels attached to a message.
#[derive(Debug, Clone, Default)]
pub struct Labels {
    labels: Vec<Label>,
}

impl Labels {
    /// Creates an empty label set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a label.
    pub fn insert(&mut self, label: Label) {
        if !self.labels.contains(&label) {
            self.labels.push(label);
        }
    }

    /// Removes a label.
    pub fn remove(&mut self, label: &Label) {
        self.labels.retain(|l| l != label);
    }

    /// Returns true if the label is present.
    #[must_use]
    pub fn contains(&self, label: &Label) -> bool {
        self.labels.contains(label)
    }

    /// Returns true if a label with this name is present.
    #[must_use]
    pub fn contains_name(&self, name: &str) -> bool {
        self.contains(&Label::parse(name))
    }

    /// Returns true if the message is starred.
    #[must_use]
    pub fn is_starred(&self) -> bool {
        self.contains(&Label::Starred)
    }

    /// Returns true if the message carries the trash marker.
    #[must_use]
    pub fn is_trashed(&self) -> bool {
        self.contains(&Label::Trash)
    }

    /// Returns an iterator over the labels.
    pub fn iter(&self) -> impl Iterator<Item = &Label> {
        self.labels.iter()
    }

    /// Returns the number of labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns true if there are no labels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl PartialEq for Labels {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|l| other.contains(l))
    }
}

impl Eq for Labels {}

impl FromIterator<Label> for Labels {
    fn from_iter<I: IntoIterator<Item = Label>>(iter: I) -> Self {
        let mut labels = Self::new();
        for label in iter {
            labels.insert(label);
        }
        labels
    }
}

impl IntoIterator for Labels {
    type Item = Label;
    type IntoIter = std::vec::IntoIter<Label>;

    fn into_iter(self) -> Self::IntoIter {
        self.labels.into_iter()
    }
}
