//! Ollama native adapter (`POST /api/chat`, non-streaming).

use crate::traits::{ChatRequest, ChatResponse, LlmProvider, Usage};
use crate::util::{from_reqwest, http_client, status_error};
use ct_domain::config::LlmConfig;
use ct_domain::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Adapter for a local Ollama server.
pub struct OllamaProvider {
    id: String,
    base_url: String,
    client: reqwest::Client,
}

impl OllamaProvider {
    pub fn from_config(cfg: &LlmConfig) -> Result<Self> {
        Ok(Self {
            id: "ollama".into(),
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            client: http_client(cfg.timeout_ms)?,
        })
    }
}

// ── Wire types ─────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct OllamaChatBody<'a> {
    model: &'a str,
    messages: Vec<OllamaMessage<'a>>,
    stream: bool,
    #[serde(skip_serializing_if = "OllamaOptions::is_empty")]
    options: OllamaOptions,
}

#[derive(Debug, Serialize)]
struct OllamaMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Default, Serialize)]
struct OllamaOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

impl OllamaOptions {
    fn is_empty(&self) -> bool {
        self.temperature.is_none() && self.num_predict.is_none()
    }
}

#[derive(Debug, Deserialize)]
struct OllamaChatReply {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    message: Option<OllamaReplyMessage>,
    #[serde(default)]
    done_reason: Option<String>,
    #[serde(default)]
    prompt_eval_count: Option<u32>,
    #[serde(default)]
    eval_count: Option<u32>,
    /// Ollama reports some failures in-band with a 200.
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OllamaReplyMessage {
    #[serde(default)]
    content: String,
}

fn build_chat_body(req: &ChatRequest) -> OllamaChatBody<'_> {
    OllamaChatBody {
        model: &req.model,
        messages: req
            .messages
            .iter()
            .map(|m| OllamaMessage {
                role: m.role.as_str(),
                content: &m.content,
            })
            .collect(),
        stream: false,
        options: OllamaOptions {
            temperature: req.temperature,
            num_predict: req.max_tokens,
        },
    }
}

fn parse_chat_reply(provider: &str, raw: &str) -> Result<ChatResponse> {
    let reply: OllamaChatReply = serde_json::from_str(raw)?;
    if let Some(err) = reply.error {
        return Err(Error::Provider {
            provider: provider.to_owned(),
            message: err,
        });
    }
    let message = reply.message.ok_or_else(|| Error::Provider {
        provider: provider.to_owned(),
        message: "no message in response".into(),
    })?;

    let usage = match (reply.prompt_eval_count, reply.eval_count) {
        (Some(p), Some(c)) => Some(Usage {
            prompt_tokens: p,
            completion_tokens: c,
            total_tokens: p + c,
        }),
        _ => None,
    };

    Ok(ChatResponse {
        content: message.content,
        model: reply.model.unwrap_or_else(|| "unknown".into()),
        usage,
        finish_reason: reply.done_reason,
    })
}

#[async_trait::async_trait]
impl LlmProvider for OllamaProvider {
    async fn chat(&self, req: &ChatRequest) -> Result<ChatResponse> {
        let url = format!("{}/api/chat", self.base_url);

        tracing::debug!(provider = %self.id, url = %url, model = %req.model, "ollama chat request");

        let resp = self
            .client
            .post(&url)
            .json(&build_chat_body(req))
            .send()
            .await
            .map_err(from_reqwest)?;

        let status = resp.status();
        let resp_text = resp.text().await.map_err(from_reqwest)?;

        if !status.is_success() {
            return Err(status_error(&self.id, status, &resp_text));
        }

        parse_chat_reply(&self.id, &resp_text)
    }

    fn provider_id(&self) -> &str {
        &self.id
    }
}
