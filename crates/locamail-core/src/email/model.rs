//! Email model types.

/// Unique identifier for a stored email.
///
/// Assigned by the store on insert and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EmailId(pub i64);

impl EmailId {
    /// Create a new email ID.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EmailId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How the search predicate compares letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseSensitivity {
    /// Exact substring match.
    #[default]
    Sensitive,
    /// ASCII letters compare equal regardless of case; other characters
    /// must match exactly.
    AsciiInsensitive,
}

/// A stored email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    /// Store-assigned identifier.
    pub id: EmailId,
    /// Sender, free-form.
    pub sender: String,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub content: String,
}

impl Email {
    /// Returns the first `max_chars` characters of the body, with an
    /// ellipsis appended when the body was cut.
    #[must_use]
    pub fn snippet(&self, max_chars: usize) -> String {
        let mut chars = self.content.chars();
        let head: String = chars.by_ref().take(max_chars).collect();
        if chars.next().is_some() {
            format!("{head}...")
        } else {
            head
        }
    }

    /// Checks whether `query` occurs in the sender or the subject.
    ///
    /// This is the same predicate the store evaluates in SQL. The body is
    /// not searched. An empty query matches every email.
    #[must_use]
    pub fn matches(&self, query: &str, case: CaseSensitivity) -> bool {
        match case {
            CaseSensitivity::Sensitive => {
                self.sender.contains(query) || self.subject.contains(query)
            }
            CaseSensitivity::AsciiInsensitive => {
                let query = query.to_ascii_lowercase();
                self.sender.to_ascii_lowercase().contains(&query)
                    || self.subject.to_ascii_lowercase().contains(&query)
            }
        }
    }
}

/// An email composed but not yet stored.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewEmail {
    /// Sender, free-form.
    pub sender: String,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub content: String,
}

impl NewEmail {
    /// Creates a new draft.
    #[must_use]
    pub fn new(
        sender: impl Into<String>,
        subject: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            sender: sender.into(),
            subject: subject.into(),
            content: content.into(),
        }
    }

    /// Attaches the identifier the store assigned.
    #[must_use]
    pub fn into_email(self, id: EmailId) -> Email {
        Email {
            id,
            sender: self.sender,
            subject: self.subject,
            content: self.content,
        }
    }
}

impl From<&Email> for EmailId {
    fn from(email: &Email) -> Self {
        email.id
    }
}
