//! Sentiment scoring of generated replies on the 0–15 emotion scale.

use std::sync::{Arc, LazyLock};

use regex::Regex;

use ct_domain::config::normalize_model_name;
use ct_providers::{ChatRequest, LlmProvider};

use super::{complete, fallback};

const COMPONENT: &str = "scoring";

pub const MAX_SCORE: u8 = 15;
pub const NEUTRAL_SCORE: u8 = 7;

static DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("digit regex is valid"));

/// First run of ASCII digits in `output`, clamped to `0..=15`.
/// Runs too long for `u64` saturate to the maximum.
pub fn extract_score(output: &str) -> Option<u8> {
    let digits = DIGITS.find(output)?.as_str();
    let value = digits.parse::<u64>().unwrap_or(u64::MAX);
    Some(value.min(u64::from(MAX_SCORE)) as u8)
}

fn scoring_prompt(text: &str) -> String {
    format!(
        "Analyze the sentiment of the following text and assign an integer score from 0 to 15.\n\n\
         Scale definition:\n\
         0-4: Sad, Apologetic, Negative\n\
         5-9: Neutral, Calm, Informative\n\
         10-15: Happy, Excited, Positive\n\n\
         Text: \"{text}\"\n\n\
         Return ONLY the integer number. Do not explain."
    )
}

pub struct SentimentScorer {
    provider: Arc<dyn LlmProvider>,
    model: String,
    temperature: f32,
}

impl SentimentScorer {
    pub fn new(provider: Arc<dyn LlmProvider>, model: &str, temperature: f32) -> Self {
        Self {
            provider,
            model: normalize_model_name(model),
            temperature,
        }
    }

    /// Score `reply`. Always within `0..=15`; [`NEUTRAL_SCORE`] on failure.
    pub async fn score(&self, reply: &str) -> u8 {
        let mut req = ChatRequest::single_prompt(self.model.clone(), scoring_prompt(reply));
        req.temperature = Some(self.temperature);
        match complete(self.provider.as_ref(), COMPONENT, &req).await {
            Ok(resp) => extract_score(&resp.content).unwrap_or_else(|| {
                fallback(COMPONENT, "no integer in scorer output");
                NEUTRAL_SCORE
            }),
            Err(e) => {
                fallback(COMPONENT, e.to_string());
                NEUTRAL_SCORE
            }
        }
    }
}
