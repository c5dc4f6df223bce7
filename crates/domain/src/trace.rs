use serde::Serialize;

/// Structured trace events emitted across all commtrainer crates.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event")]
pub enum TraceEvent {
    SessionCreated {
        session_key: String,
    },
    SessionReset {
        session_key: String,
        previous_turn_count: u32,
    },
    SessionTerminated {
        session_key: String,
        turn_count: u32,
        reason: String,
    },
    ModerationRejected {
        session_key: String,
        message_chars: usize,
    },
    LlmRequest {
        provider: String,
        model: String,
        component: String,
        duration_ms: u64,
        ok: bool,
    },
    /// An LLM-backed component degraded to its deterministic default.
    LlmFallback {
        component: String,
        reason: String,
    },
    TurnCompleted {
        session_key: String,
        turn_count: u32,
        emotion_score: u8,
        state_code: u8,
        terminated: bool,
    },
}

impl TraceEvent {
    pub fn emit(&self) {
        let json = serde_json::to_string(self).unwrap_or_default();
        tracing::info!(trace_event = %json, "ct_event");
    }
}
