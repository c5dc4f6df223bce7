mod classifier;
mod conversation;
mod llm;
mod observability;
mod server;

pub use classifier::*;
pub use conversation::*;
pub use llm::*;
pub use observability::*;
pub use server::*;

use serde::{Deserialize, Serialize};
use std::fmt;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Top-level config
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub conversation: ConversationConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Config validation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Severity level for a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSeverity {
    Error,
    Warning,
}

/// A single configuration validation issue.
#[derive(Debug, Clone)]
pub struct ConfigError {
    pub severity: ConfigSeverity,
    pub field: String,
    pub message: String,
}

impl ConfigError {
    fn error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: ConfigSeverity::Error,
            field: field.into(),
            message: message.into(),
        }
    }

    fn warning(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: ConfigSeverity::Warning,
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            ConfigSeverity::Error => "ERROR",
            ConfigSeverity::Warning => "WARN",
        };
        write!(f, "[{tag}] {}: {}", self.field, self.message)
    }
}

impl Config {
    /// Validate the configuration and return a list of issues.
    ///
    /// Returns an empty vec when everything looks good.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.server.port == 0 {
            errors.push(ConfigError::error("server.port", "port must be greater than 0"));
        }
        if self.server.host.is_empty() {
            errors.push(ConfigError::error("server.host", "host must not be empty"));
        }
        if self.server.max_concurrent_requests == 0 {
            errors.push(ConfigError::error(
                "server.max_concurrent_requests",
                "must be greater than 0",
            ));
        }
        if let Some(rl) = &self.server.rate_limit {
            if rl.requests_per_second == 0 || rl.burst_size == 0 {
                errors.push(ConfigError::error(
                    "server.rate_limit",
                    "requests_per_second and burst_size must be > 0",
                ));
            }
        }
        if self.server.cors.allowed_origins.len() == 1
            && self.server.cors.allowed_origins[0] == "*"
        {
            errors.push(ConfigError::warning(
                "server.cors.allowed_origins",
                "wildcard \"*\" allows all origins (not recommended for production)",
            ));
        }

        if self.llm.base_url.is_empty() {
            errors.push(ConfigError::error("llm.base_url", "base_url must not be empty"));
        }
        if self.llm.timeout_ms == 0 {
            errors.push(ConfigError::error("llm.timeout_ms", "timeout must be greater than 0"));
        }
        for (field, model) in [
            ("llm.models.moderation", &self.llm.models.moderation),
            ("llm.models.generation", &self.llm.models.generation),
            ("llm.models.scoring", &self.llm.models.scoring),
        ] {
            if normalize_model_name(model).is_empty() {
                errors.push(ConfigError::error(field, "model identifier must not be empty"));
            }
        }

        let sampling = &self.llm.sampling;
        for (field, temp) in [
            ("llm.sampling.judge_temperature", Some(sampling.judge_temperature)),
            ("llm.sampling.generation_temperature", sampling.generation_temperature),
        ] {
            if temp.is_some_and(|t| !(0.0..=2.0).contains(&t)) {
                errors.push(ConfigError::error(field, "temperature must be within 0.0..=2.0"));
            }
        }
        if sampling.generation_max_tokens == Some(0) {
            errors.push(ConfigError::error(
                "llm.sampling.generation_max_tokens",
                "must be greater than 0 when set",
            ));
        }

        let conv = &self.conversation;
        if conv.default_session_key.trim().is_empty() {
            errors.push(ConfigError::error(
                "conversation.default_session_key",
                "sentinel session key must not be empty",
            ));
        }
        if conv.context_window_turns == 0 {
            errors.push(ConfigError::error(
                "conversation.context_window_turns",
                "context window must include at least the current user turn",
            ));
        }
        let no_farewell = self.classifier.farewell_keywords.iter().all(|k| k.is_empty());
        if no_farewell && conv.ceiling().is_none() {
            errors.push(ConfigError::warning(
                "conversation.turn_ceiling",
                "no ceiling and no farewell keywords: sessions never end on their own",
            ));
        } else if no_farewell {
            errors.push(ConfigError::warning(
                "classifier.farewell_keywords",
                "no farewell keywords: sessions only end at the turn ceiling",
            ));
        }

        errors
    }
}
