//! Scripted LLM provider and config helpers shared by the integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use ct_domain::config::Config;
use ct_domain::error::{Error, Result};
use ct_domain::message::Role;
use ct_providers::{ChatRequest, ChatResponse, LlmProvider};

pub const MODERATION_MODEL: &str = "mod-model";
pub const GENERATION_MODEL: &str = "gen-model";
pub const SCORING_MODEL: &str = "score-model";

/// What a pipeline stage answers.
#[derive(Clone, Debug)]
pub enum Script {
    Text(String),
    /// Echo the last user message as `re: <text>`.
    Echo,
    Fail,
    Timeout,
}

impl Script {
    pub fn text(s: &str) -> Self {
        Script::Text(s.to_owned())
    }
}

/// Routes each request by model name to a per-stage script and records
/// every request it sees.
pub struct ScriptedProvider {
    pub moderation: Mutex<Script>,
    pub generation: Mutex<Script>,
    pub scoring: Mutex<Script>,
    pub generation_delay: Mutex<Option<Duration>>,
    calls: Mutex<Vec<ChatRequest>>,
}

impl Default for ScriptedProvider {
    fn default() -> Self {
        Self {
            moderation: Mutex::new(Script::text("VALID")),
            generation: Mutex::new(Script::Echo),
            scoring: Mutex::new(Script::text("8")),
            generation_delay: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl ScriptedProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<ChatRequest> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Models of every recorded call, in order.
    pub fn call_models(&self) -> Vec<String> {
        self.calls.lock().iter().map(|r| r.model.clone()).collect()
    }

    pub fn set_moderation(&self, s: Script) {
        *self.moderation.lock() = s;
    }

    pub fn set_generation(&self, s: Script) {
        *self.generation.lock() = s;
    }

    pub fn set_scoring(&self, s: Script) {
        *self.scoring.lock() = s;
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    async fn chat(&self, req: &ChatRequest) -> Result<ChatResponse> {
        self.calls.lock().push(req.clone());

        if req.model == GENERATION_MODEL {
            let delay = *self.generation_delay.lock();
            if let Some(d) = delay {
                tokio::time::sleep(d).await;
            }
        }

        let script = match req.model.as_str() {
            MODERATION_MODEL => self.moderation.lock().clone(),
            GENERATION_MODEL => self.generation.lock().clone(),
            SCORING_MODEL => self.scoring.lock().clone(),
            other => return Err(Error::Other(format!("unexpected model {other}"))),
        };

        let content = match script {
            Script::Text(t) => t,
            Script::Echo => {
                let last_user = req
                    .messages
                    .iter()
                    .rev()
                    .find(|m| m.role == Role::User)
                    .map(|m| m.content.clone())
                    .unwrap_or_default();
                format!("re: {last_user}")
            }
            Script::Fail => {
                return Err(Error::Provider {
                    provider: "scripted".into(),
                    message: "HTTP 503: model loading".into(),
                })
            }
            Script::Timeout => return Err(Error::Timeout("scripted timeout".into())),
        };

        Ok(ChatResponse {
            content,
            model: req.model.clone(),
            usage: None,
            finish_reason: Some("stop".into()),
        })
    }

    fn provider_id(&self) -> &str {
        "scripted"
    }
}

/// Defaults with per-stage model names the scripted provider routes on and
/// ASCII keyword sets that keep assertions readable.
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.llm.models.moderation = MODERATION_MODEL.into();
    config.llm.models.generation = GENERATION_MODEL.into();
    config.llm.models.scoring = SCORING_MODEL.into();
    config.classifier.farewell_keywords = vec!["bye".into()];
    config.classifier.error_keywords = vec!["ERROR".into()];
    config.classifier.question_markers = vec!["?".into()];
    config.conversation.rejection_reply = "rejected".into();
    config.conversation.already_ended_reply = "already ended".into();
    config.conversation.ceiling_reply = "ceiling reached".into();
    config.conversation.generation_apology = "sorry, try again".into();
    config.conversation.reset_first_message = "let's start".into();
    config
}
