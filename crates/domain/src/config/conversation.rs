use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Conversation pipeline
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Turn pipeline settings and the fixed texts returned on short-circuit
/// paths. Defaults follow the Japanese-language training scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationConfig {
    /// Session key used when the caller sends none (or an empty one).
    #[serde(default = "d_session_key")]
    pub default_session_key: String,
    /// Number of individual history turns (user + assistant) sent to the
    /// generator. 20 = the last 10 exchanges.
    #[serde(default = "d_20")]
    pub context_window_turns: usize,
    /// Accepted turns after which a session terminates. `0` disables the
    /// ceiling (sessions end only on a farewell keyword or reset).
    #[serde(default = "d_ceiling")]
    pub turn_ceiling: u32,
    /// Persona instruction prepended to every generation request.
    #[serde(default = "d_system_prompt")]
    pub system_prompt: String,
    /// Reply when the moderation gate rejects the input.
    #[serde(default = "d_rejection_reply")]
    pub rejection_reply: String,
    /// Reply for any turn sent to a terminated session.
    #[serde(default = "d_already_ended_reply")]
    pub already_ended_reply: String,
    /// Reply for the turn that pushes the session past its ceiling.
    #[serde(default = "d_ceiling_reply")]
    pub ceiling_reply: String,
    /// Reply substituted when generation fails.
    #[serde(default = "d_generation_apology")]
    pub generation_apology: String,
    /// Greeting returned by the game-engine `/reset` endpoint.
    #[serde(default = "d_reset_first_message")]
    pub reset_first_message: String,
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            default_session_key: d_session_key(),
            context_window_turns: d_20(),
            turn_ceiling: d_ceiling(),
            system_prompt: d_system_prompt(),
            rejection_reply: d_rejection_reply(),
            already_ended_reply: d_already_ended_reply(),
            ceiling_reply: d_ceiling_reply(),
            generation_apology: d_generation_apology(),
            reset_first_message: d_reset_first_message(),
        }
    }
}

impl ConversationConfig {
    /// Map an absent or empty caller key to the configured sentinel.
    /// Any other key is opaque and returned unchanged.
    pub fn resolve_session_key(&self, key: Option<&str>) -> String {
        match key {
            Some(k) if !k.is_empty() => k.to_owned(),
            _ => self.default_session_key.clone(),
        }
    }

    /// The effective turn ceiling, `None` when disabled.
    pub fn ceiling(&self) -> Option<u32> {
        (self.turn_ceiling > 0).then_some(self.turn_ceiling)
    }
}

// ── serde default helpers ───────────────────────────────────────────

fn d_session_key() -> String {
    "default".into()
}
fn d_20() -> usize {
    20
}
fn d_ceiling() -> u32 {
    10
}
fn d_system_prompt() -> String {
    "あなたは親切で役に立つAIアシスタントです。日本語で簡潔に答えてください。".into()
}
fn d_rejection_reply() -> String {
    "申し訳ありませんが、その入力には回答できません。".into()
}
fn d_already_ended_reply() -> String {
    "この会話はすでに終了しています。最初からやり直す場合はリセットしてください。".into()
}
fn d_ceiling_reply() -> String {
    "会話回数の上限に達したので終了します。".into()
}
fn d_generation_apology() -> String {
    "申し訳ありません。エラーが発生しました。".into()
}
fn d_reset_first_message() -> String {
    "最初のメッセージ".into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_session_key_falls_back_to_sentinel() {
        let cfg = ConversationConfig::default();
        assert_eq!(cfg.resolve_session_key(None), "default");
        assert_eq!(cfg.resolve_session_key(Some("")), "default");
        assert_eq!(cfg.resolve_session_key(Some("u1")), "u1");
    }

    #[test]
    fn session_key_is_opaque() {
        let cfg = ConversationConfig::default();
        assert_eq!(cfg.resolve_session_key(Some(" u1")), " u1");
        assert_eq!(cfg.resolve_session_key(Some("   ")), "   ");
    }

    #[test]
    fn ceiling_defaults_when_unset_in_toml() {
        let cfg: ConversationConfig = toml::from_str("context_window_turns = 4").unwrap();
        assert_eq!(cfg.context_window_turns, 4);
        assert_eq!(cfg.ceiling(), Some(10));
    }

    #[test]
    fn zero_ceiling_disables_it() {
        let cfg: ConversationConfig = toml::from_str("turn_ceiling = 0").unwrap();
        assert_eq!(cfg.ceiling(), None);
    }
}
