//! Provider construction.
//!
//! Reads the [`LlmConfig`] and instantiates the adapter for the configured
//! wire protocol. One provider instance serves all three pipeline stages;
//! stages differ only by model identifier.

use std::sync::Arc;

use crate::ollama::OllamaProvider;
use crate::openai_compat::OpenAiCompatProvider;
use crate::traits::LlmProvider;
use ct_domain::config::{LlmConfig, ProviderKind};
use ct_domain::error::Result;

/// Build the provider selected by `config.provider`.
pub fn build_provider(config: &LlmConfig) -> Result<Arc<dyn LlmProvider>> {
    let provider: Arc<dyn LlmProvider> = match config.provider {
        ProviderKind::Ollama => Arc::new(OllamaProvider::from_config(config)?),
        ProviderKind::OpenaiCompat => Arc::new(OpenAiCompatProvider::from_config(config)?),
    };

    tracing::info!(
        provider_id = %provider.provider_id(),
        base_url = %config.base_url,
        timeout_ms = config.timeout_ms,
        "registered LLM provider"
    );

    Ok(provider)
}
