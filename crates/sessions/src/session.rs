use chrono::{DateTime, Utc};
use serde::Serialize;

use ct_domain::message::{Message, Role};

/// Conversation state for one session key.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub session_key: String,
    /// Alternating user/assistant turns, oldest first.
    pub history: Vec<Message>,
    /// Number of user turns appended since creation or the last reset.
    pub turn_count: u32,
    pub terminated: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    pub fn new(session_key: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            session_key: session_key.into(),
            history: Vec::new(),
            turn_count: 0,
            terminated: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Return to the freshly-created state. The key and `created_at` survive.
    pub fn clear(&mut self) {
        self.history.clear();
        self.turn_count = 0;
        self.terminated = false;
        self.updated_at = Utc::now();
    }

    /// Append the user's turn and bump the counter.
    pub fn push_user(&mut self, content: impl Into<String>) -> u32 {
        self.history.push(Message::user(content));
        self.turn_count = self.turn_count.saturating_add(1);
        self.updated_at = Utc::now();
        self.turn_count
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.history.push(Message::assistant(content));
        self.updated_at = Utc::now();
    }

    pub fn terminate(&mut self) {
        self.terminated = true;
        self.updated_at = Utc::now();
    }

    /// The most recent `window` turns, oldest first.
    pub fn recent(&self, window: usize) -> &[Message] {
        let start = self.history.len().saturating_sub(window);
        &self.history[start..]
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            session_key: self.session_key.clone(),
            turn_count: self.turn_count,
            terminated: self.terminated,
            history_len: self.history.len(),
            last_user_message: self
                .history
                .iter()
                .rev()
                .find(|m| m.role == Role::User)
                .map(|m| m.content.clone()),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Lightweight listing entry (no full history).
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub session_key: String,
    pub turn_count: u32,
    pub terminated: bool,
    pub history_len: usize,
    pub last_user_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
