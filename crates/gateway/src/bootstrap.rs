//! AppState construction shared by `serve`, `send` and `chat`.

use std::sync::Arc;

use anyhow::Context;
use sha2::{Digest, Sha256};

use ct_domain::config::{Config, ConfigSeverity};
use ct_providers::{build_provider, LlmProvider};
use ct_sessions::{InMemorySessionStore, SessionStore};

use crate::conversation::TurnOrchestrator;
use crate::state::AppState;

/// Validate config, build the configured LLM provider and return a
/// fully-wired [`AppState`].
pub fn build_app_state(config: Arc<Config>) -> anyhow::Result<AppState> {
    // ── Config validation ────────────────────────────────────────────
    let issues = config.validate();
    for issue in &issues {
        match issue.severity {
            ConfigSeverity::Warning => tracing::warn!("config: {issue}"),
            ConfigSeverity::Error => tracing::error!("config: {issue}"),
        }
    }
    let errors = issues
        .iter()
        .filter(|i| i.severity == ConfigSeverity::Error)
        .count();
    if errors > 0 {
        anyhow::bail!("config validation failed with {errors} error(s)");
    }

    // ── LLM provider ─────────────────────────────────────────────────
    let provider = build_provider(&config.llm).context("initializing LLM provider")?;

    Ok(app_state_with_provider(config, provider))
}

/// Wire an [`AppState`] around an already-built provider. Skips config
/// validation; tests use this to inject scripted providers.
pub fn app_state_with_provider(config: Arc<Config>, provider: Arc<dyn LlmProvider>) -> AppState {
    // ── Sessions + orchestrator ──────────────────────────────────────
    let sessions: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
    let orchestrator = Arc::new(TurnOrchestrator::new(&config, provider, sessions.clone()));
    tracing::info!(
        moderation = %config.llm.models.moderation,
        generation = %config.llm.models.generation,
        scoring = %config.llm.models.scoring,
        turn_ceiling = config.conversation.turn_ceiling,
        context_window_turns = config.conversation.context_window_turns,
        "conversation pipeline ready"
    );

    // ── API token (read once, store hash) ────────────────────────────
    let env_var = &config.server.api_token_env;
    let api_token_hash = match std::env::var(env_var).ok().filter(|t| !t.is_empty()) {
        Some(token) => {
            tracing::info!(source = %format!("env:{env_var}"), "API bearer-token auth enabled");
            Some(Sha256::digest(token.as_bytes()).to_vec())
        }
        None => {
            tracing::warn!("API bearer-token auth DISABLED, set the {env_var} env var to enable it");
            None
        }
    };

    AppState {
        config,
        orchestrator,
        sessions,
        api_token_hash,
    }
}
