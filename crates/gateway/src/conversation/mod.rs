//! The conversation pipeline: moderation → generation → scoring →
//! classification, driven per session by [`TurnOrchestrator`].
//!
//! Every LLM-backed stage degrades to a deterministic fallback instead of
//! returning an error, so a turn always produces a well-formed
//! [`TurnResult`].

pub mod classifier;
pub mod display;
pub mod generator;
pub mod moderation;
pub mod orchestrator;
pub mod scorer;

pub use classifier::{ConversationState, StateClassifier};
pub use display::DisplayProjection;
pub use generator::ResponseGenerator;
pub use moderation::{ModerationGate, Verdict};
pub use orchestrator::{TurnOrchestrator, TurnResult};
pub use scorer::SentimentScorer;

use std::time::Instant;

use ct_domain::error::Result;
use ct_domain::trace::TraceEvent;
use ct_providers::{ChatRequest, ChatResponse, LlmProvider};

/// Issue one completion for a pipeline stage, wrapped in an `llm.call`
/// span and reported as an [`TraceEvent::LlmRequest`].
pub(crate) async fn complete(
    provider: &dyn LlmProvider,
    component: &'static str,
    req: &ChatRequest,
) -> Result<ChatResponse> {
    let span = tracing::info_span!(
        "llm.call",
        "otel.kind" = "CLIENT",
        component,
        model = %req.model,
        input_tokens = tracing::field::Empty,
        output_tokens = tracing::field::Empty,
    );
    let started = Instant::now();
    let result = tracing::Instrument::instrument(provider.chat(req), span.clone()).await;

    if let Ok(resp) = &result {
        if let Some(usage) = &resp.usage {
            span.record("input_tokens", usage.prompt_tokens);
            span.record("output_tokens", usage.completion_tokens);
        }
    }

    TraceEvent::LlmRequest {
        provider: provider.provider_id().to_owned(),
        model: req.model.clone(),
        component: component.to_owned(),
        duration_ms: started.elapsed().as_millis() as u64,
        ok: result.is_ok(),
    }
    .emit();

    result
}

/// Log and trace a stage falling back to its default.
pub(crate) fn fallback(component: &'static str, reason: impl Into<String>) {
    let reason = reason.into();
    tracing::warn!(component, reason = %reason, "LLM stage degraded to fallback");
    TraceEvent::LlmFallback {
        component: component.to_owned(),
        reason,
    }
    .emit();
}
