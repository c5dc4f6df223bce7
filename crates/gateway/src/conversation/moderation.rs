//! Moderation gate: one LLM verdict per incoming message, fail-open.

use std::sync::{Arc, LazyLock};

use regex::Regex;

use ct_domain::config::normalize_model_name;
use ct_providers::{ChatRequest, LlmProvider};

use super::{complete, fallback};

const COMPONENT: &str = "moderation";

static VERDICT_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:IN)?VALID\b").expect("verdict regex is valid"));

/// The model's classification of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Valid,
    Invalid,
}

/// Read a verdict out of free-form model output.
///
/// The text is upper-cased and the first whole-word `VALID` or `INVALID`
/// decides, so `"INVALID"` never counts as a pass and chatter such as
/// `"Answer: valid."` still parses. `None` when neither word appears.
pub fn parse_verdict(output: &str) -> Option<Verdict> {
    let upper = output.to_uppercase();
    VERDICT_TOKEN
        .find(&upper)
        .map(|m| match m.as_str() {
            "INVALID" => Verdict::Invalid,
            _ => Verdict::Valid,
        })
}

fn moderation_prompt(text: &str) -> String {
    format!(
        "You are a content moderator. Analyze the following user input.\n\
         If it contains offensive content, nonsense, or is completely inappropriate for a chat, reply with \"INVALID\".\n\
         Otherwise, reply with \"VALID\".\n\n\
         User Input: \"{text}\"\n\
         Answer (VALID or INVALID):"
    )
}

pub struct ModerationGate {
    provider: Arc<dyn LlmProvider>,
    model: String,
    temperature: f32,
}

impl ModerationGate {
    pub fn new(provider: Arc<dyn LlmProvider>, model: &str, temperature: f32) -> Self {
        Self {
            provider,
            model: normalize_model_name(model),
            temperature,
        }
    }

    /// `true` when the message may proceed. Provider errors, timeouts and
    /// unparseable output all pass.
    pub async fn check(&self, text: &str) -> bool {
        let mut req = ChatRequest::single_prompt(self.model.clone(), moderation_prompt(text));
        req.temperature = Some(self.temperature);
        match complete(self.provider.as_ref(), COMPONENT, &req).await {
            Ok(resp) => match parse_verdict(&resp.content) {
                Some(Verdict::Valid) => true,
                Some(Verdict::Invalid) => false,
                None => {
                    fallback(COMPONENT, "malformed verdict");
                    true
                }
            },
            Err(e) => {
                fallback(COMPONENT, e.to_string());
                true
            }
        }
    }
}
