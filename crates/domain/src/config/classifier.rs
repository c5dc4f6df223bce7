use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Rule-based state classifier keywords
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Keyword sets for the conversation state rules. Matching is plain
/// substring containment, so the lists are locale data, not code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Found in the user's text → terminal state.
    #[serde(default = "d_farewell")]
    pub farewell_keywords: Vec<String>,
    /// Found in the generated reply → error state.
    #[serde(default = "d_error")]
    pub error_keywords: Vec<String>,
    /// Found in the user's text → question state.
    #[serde(default = "d_question")]
    pub question_markers: Vec<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            farewell_keywords: d_farewell(),
            error_keywords: d_error(),
            question_markers: d_question(),
        }
    }
}

fn d_farewell() -> Vec<String> {
    vec!["さようなら".into(), "終了".into()]
}
fn d_error() -> Vec<String> {
    vec!["エラー".into()]
}
fn d_question() -> Vec<String> {
    vec!["?".into(), "？".into()]
}
