use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// LLM runtime connection
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Wire protocol spoken by the runtime at `base_url`.
    #[serde(default)]
    pub provider: ProviderKind,
    /// Root URL of the runtime. For `ollama` this is the server root
    /// (`/api/chat` is appended); for `openai_compat` it is the API root
    /// (`/chat/completions` is appended, e.g. `http://localhost:11434/v1`).
    #[serde(default = "d_base_url")]
    pub base_url: String,
    /// Client-side timeout for one completion. A timed-out call is treated
    /// exactly like any other LLM failure.
    #[serde(default = "d_60000u")]
    pub timeout_ms: u64,
    /// Environment variable holding a bearer key (OpenAI-compatible
    /// endpoints only). Local runtimes normally need none.
    #[serde(default)]
    pub api_key_env: Option<String>,
    /// Model identifiers per pipeline stage.
    #[serde(default)]
    pub models: ModelsConfig,
    /// Per-stage sampling parameters.
    #[serde(default)]
    pub sampling: SamplingConfig,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            base_url: d_base_url(),
            timeout_ms: d_60000u(),
            api_key_env: None,
            models: ModelsConfig::default(),
            sampling: SamplingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Ollama's native `/api/chat` endpoint.
    #[default]
    Ollama,
    /// Any endpoint following the OpenAI chat completions contract.
    OpenaiCompat,
}

/// One model per pipeline stage. Identifiers are normalized with
/// [`normalize_model_name`] before they reach the runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsConfig {
    #[serde(default = "d_moderation_model")]
    pub moderation: String,
    #[serde(default = "d_generation_model")]
    pub generation: String,
    #[serde(default = "d_scoring_model")]
    pub scoring: String,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            moderation: d_moderation_model(),
            generation: d_generation_model(),
            scoring: d_scoring_model(),
        }
    }
}

/// Sampling knobs sent with each completion.
///
/// The moderation and scoring prompts are parsed for a single token, so
/// they run at `judge_temperature` (deterministic by default). Generation
/// leaves both knobs to the runtime unless set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplingConfig {
    #[serde(default)]
    pub judge_temperature: f32,
    #[serde(default)]
    pub generation_temperature: Option<f32>,
    #[serde(default)]
    pub generation_max_tokens: Option<u32>,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            judge_temperature: 0.0,
            generation_temperature: None,
            generation_max_tokens: None,
        }
    }
}

/// Normalize a caller-supplied model identifier: trim surrounding
/// whitespace and replace each internal space with `-`.
///
/// `" 3.1swallow 8B "` → `"3.1swallow-8B"`.
pub fn normalize_model_name(name: &str) -> String {
    name.trim().replace(' ', "-")
}

// ── serde default helpers ───────────────────────────────────────────

fn d_base_url() -> String {
    "http://localhost:11434".into()
}
fn d_60000u() -> u64 {
    60_000
}
fn d_moderation_model() -> String {
    "llama3.2".into()
}
fn d_generation_model() -> String {
    "3.1swallow-8B".into()
}
fn d_scoring_model() -> String {
    "3.1swallow-8B".into()
}
