//! Turn orchestration: the per-session `ACTIVE → TERMINATED` state machine.
//!
//! The session guard is held for the whole turn (including the three LLM
//! calls), so turns on one key run strictly one after another and a reset
//! waits for any in-flight turn.

use std::sync::Arc;

use serde::Serialize;
use tracing::Instrument;

use ct_domain::config::{Config, ConversationConfig};
use ct_domain::trace::TraceEvent;
use ct_providers::LlmProvider;
use ct_sessions::SessionStore;

use super::classifier::{ConversationState, StateClassifier};
use super::generator::ResponseGenerator;
use super::moderation::ModerationGate;
use super::scorer::SentimentScorer;

/// Emotion reported with the rejection reply.
const REJECTION_EMOTION: u8 = 2;
/// Emotion reported with the fixed "ended" replies.
const ENDED_EMOTION: u8 = 5;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Turn result
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Outcome of one `send_turn` call. Not stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnResult {
    pub reply_text: String,
    pub emotion_score: u8,
    pub state_code: u8,
    pub terminated: bool,
}

impl TurnResult {
    fn fixed(reply: &str, emotion_score: u8, state: ConversationState, terminated: bool) -> Self {
        Self {
            reply_text: reply.to_owned(),
            emotion_score,
            state_code: state.code(),
            terminated,
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Orchestrator
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub struct TurnOrchestrator {
    store: Arc<dyn SessionStore>,
    gate: ModerationGate,
    generator: ResponseGenerator,
    scorer: SentimentScorer,
    classifier: StateClassifier,
    conversation: ConversationConfig,
}

impl TurnOrchestrator {
    pub fn new(
        config: &Config,
        provider: Arc<dyn LlmProvider>,
        store: Arc<dyn SessionStore>,
    ) -> Self {
        let judge_temperature = config.llm.sampling.judge_temperature;
        Self {
            store,
            gate: ModerationGate::new(
                provider.clone(),
                &config.llm.models.moderation,
                judge_temperature,
            ),
            generator: ResponseGenerator::new(provider.clone(), config),
            scorer: SentimentScorer::new(provider, &config.llm.models.scoring, judge_temperature),
            classifier: StateClassifier::new(&config.classifier),
            conversation: config.conversation.clone(),
        }
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// Map an absent or empty caller key to the configured default.
    pub fn resolve_key(&self, key: Option<&str>) -> String {
        self.conversation.resolve_session_key(key)
    }

    /// Process one user message for `session_key`.
    ///
    /// Never fails: every LLM problem degrades to a fixed fallback, and the
    /// only caller-visible refusal is the moderation rejection (state 9).
    pub async fn send_turn(&self, session_key: &str, message: &str) -> TurnResult {
        let span = tracing::info_span!(
            "turn",
            turn_id = %uuid::Uuid::new_v4(),
            session_key = %session_key,
            "otel.kind" = "SERVER",
        );
        self.send_turn_inner(session_key, message)
            .instrument(span)
            .await
    }

    async fn send_turn_inner(&self, session_key: &str, message: &str) -> TurnResult {
        let handle = self.store.get_or_create(session_key);
        let mut session = handle.lock().await;

        // 1. Terminated sessions short-circuit with no LLM traffic.
        if session.terminated {
            tracing::debug!("turn on terminated session");
            return TurnResult::fixed(
                &self.conversation.already_ended_reply,
                ENDED_EMOTION,
                ConversationState::Ended,
                true,
            );
        }

        // 2. Moderation. A rejected message leaves the session untouched.
        if !self.gate.check(message).await {
            TraceEvent::ModerationRejected {
                session_key: session_key.to_owned(),
                message_chars: message.chars().count(),
            }
            .emit();
            return TurnResult::fixed(
                &self.conversation.rejection_reply,
                REJECTION_EMOTION,
                ConversationState::Error,
                false,
            );
        }

        // 3. Accept the turn.
        let turn_count = session.push_user(message);
        let ceiling = self.conversation.ceiling();

        // 4. Past the ceiling: end without generating.
        if ceiling.is_some_and(|max| turn_count > max) {
            session.terminate();
            TraceEvent::SessionTerminated {
                session_key: session_key.to_owned(),
                turn_count,
                reason: "turn_ceiling_exceeded".into(),
            }
            .emit();
            return TurnResult::fixed(
                &self.conversation.ceiling_reply,
                ENDED_EMOTION,
                ConversationState::Ended,
                true,
            );
        }

        // 5. Generate over the bounded history.
        let reply = self.generator.generate(&session).await;
        session.push_assistant(reply.clone());

        // 6. Score.
        let emotion_score = self.scorer.score(&reply).await;

        // 7. Classify and apply transitions.
        let state = self.classifier.classify(message, &reply);
        let reason = if state.is_terminal() {
            Some("farewell")
        } else if ceiling.is_some_and(|max| turn_count >= max) {
            Some("turn_ceiling")
        } else {
            None
        };
        if let Some(reason) = reason {
            session.terminate();
            TraceEvent::SessionTerminated {
                session_key: session_key.to_owned(),
                turn_count,
                reason: reason.into(),
            }
            .emit();
        }

        let result = TurnResult {
            reply_text: reply,
            emotion_score,
            state_code: state.code(),
            terminated: session.terminated,
        };

        TraceEvent::TurnCompleted {
            session_key: session_key.to_owned(),
            turn_count,
            emotion_score,
            state_code: result.state_code,
            terminated: result.terminated,
        }
        .emit();

        result
    }

    /// Clear the session for `session_key`, creating it if needed.
    pub async fn reset_session(&self, session_key: &str) -> bool {
        self.store.reset(session_key).await;
        true
    }
}
