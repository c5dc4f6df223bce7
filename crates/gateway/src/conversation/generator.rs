//! Response generation over a bounded window of the session history.

use std::sync::Arc;

use ct_domain::config::{normalize_model_name, Config};
use ct_domain::message::Message;
use ct_providers::{ChatRequest, LlmProvider};
use ct_sessions::Session;

use super::{complete, fallback};

const COMPONENT: &str = "generation";

pub struct ResponseGenerator {
    provider: Arc<dyn LlmProvider>,
    model: String,
    system_prompt: String,
    window: usize,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
    apology: String,
}

impl ResponseGenerator {
    pub fn new(provider: Arc<dyn LlmProvider>, config: &Config) -> Self {
        Self {
            provider,
            model: normalize_model_name(&config.llm.models.generation),
            system_prompt: config.conversation.system_prompt.clone(),
            window: config.conversation.context_window_turns,
            temperature: config.llm.sampling.generation_temperature,
            max_tokens: config.llm.sampling.generation_max_tokens,
            apology: config.conversation.generation_apology.clone(),
        }
    }

    /// System instruction followed by the last `window` turns of the session.
    pub fn build_context(&self, session: &Session) -> Vec<Message> {
        let recent = session.recent(self.window);
        let mut messages = Vec::with_capacity(recent.len() + 1);
        messages.push(Message::system(self.system_prompt.clone()));
        messages.extend_from_slice(recent);
        messages
    }

    /// Generate the assistant reply. Never fails: provider errors yield the
    /// configured apology text.
    pub async fn generate(&self, session: &Session) -> String {
        let req = ChatRequest {
            model: self.model.clone(),
            messages: self.build_context(session),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };
        match complete(self.provider.as_ref(), COMPONENT, &req).await {
            Ok(resp) => resp.content,
            Err(e) => {
                fallback(COMPONENT, e.to_string());
                self.apology.clone()
            }
        }
    }
}
