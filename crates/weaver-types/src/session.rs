use serde::{Deserialize, Serialize};
use crate::message::Message;
use crate::project::ProjectSnapshot;

/// A conversation session together with its generated project, as
/// persisted. The session exclusively owns its message log and snapshot;
/// everything else borrows them for the duration of a turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub title: String,
    pub messages: Vec<Message>,
    pub files: ProjectSnapshot,
    pub created_at: String,
    pub updated_at: String,
}

impl Session {
    pub fn new() -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: "New Project".to_string(),
            messages: Vec::new(),
            files: ProjectSnapshot::placeholder(),
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// A session seeded with the prompt the user typed on the landing page.
    /// The first turn must run with echoing suppressed so the message is not
    /// appended twice.
    pub fn with_initial_prompt(prompt: impl Into<String>) -> Self {
        let mut session = Self::new();
        session.messages.push(Message::user(prompt));
        session
    }

    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary of a session for listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: String,
    pub title: String,
    pub updated_at: String,
    pub message_count: usize,
    pub file_count: usize,
}

impl From<&Session> for SessionSummary {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id.clone(),
            title: session.title.clone(),
            updated_at: session.updated_at.clone(),
            message_count: session.messages.len(),
            file_count: session.files.len(),
        }
    }
}
