//! Rule-based conversation state from the user's text and the reply.

use serde::Serialize;

use ct_domain::config::ClassifierConfig;

/// Numeric state codes reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(u8)]
pub enum ConversationState {
    Normal = 1,
    Question = 2,
    Error = 9,
    Ended = 10,
}

impl ConversationState {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn is_terminal(self) -> bool {
        self == ConversationState::Ended
    }
}

/// Keyword containment rules, evaluated in priority order:
/// farewell (user) → error (reply) → question marker (user) → normal.
pub struct StateClassifier {
    farewell: Vec<String>,
    error: Vec<String>,
    question: Vec<String>,
}

fn non_empty(words: &[String]) -> Vec<String> {
    words.iter().filter(|w| !w.is_empty()).cloned().collect()
}

fn contains_any(text: &str, words: &[String]) -> bool {
    words.iter().any(|w| text.contains(w.as_str()))
}

impl StateClassifier {
    pub fn new(config: &ClassifierConfig) -> Self {
        Self {
            farewell: non_empty(&config.farewell_keywords),
            error: non_empty(&config.error_keywords),
            question: non_empty(&config.question_markers),
        }
    }

    pub fn classify(&self, user_text: &str, reply_text: &str) -> ConversationState {
        if contains_any(user_text, &self.farewell) {
            ConversationState::Ended
        } else if contains_any(reply_text, &self.error) {
            ConversationState::Error
        } else if contains_any(user_text, &self.question) {
            ConversationState::Question
        } else {
            ConversationState::Normal
        }
    }
}
