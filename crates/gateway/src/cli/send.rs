//! `commtrainer send`: one-shot turn.
//!
//! Runs a single message through the full pipeline against a fresh
//! in-memory session and prints the reply. Useful for scripting and for
//! checking that the LLM runtime and models are reachable.

use std::sync::Arc;

use ct_domain::config::Config;

use crate::bootstrap;
use crate::conversation::DisplayProjection;

pub async fn send(
    config: Arc<Config>,
    message: String,
    session: Option<String>,
    json_output: bool,
) -> anyhow::Result<()> {
    let state = bootstrap::build_app_state(config)?;
    let session_key = state.orchestrator.resolve_key(session.as_deref());

    let result = state.orchestrator.send_turn(&session_key, &message).await;

    if json_output {
        let display = DisplayProjection::from_emotion(result.emotion_score);
        let json = serde_json::to_string_pretty(&serde_json::json!({
            "session_key": session_key,
            "result": result,
            "display": display,
        }))
        .map_err(|e| anyhow::anyhow!("serializing result: {e}"))?;
        println!("{json}");
    } else {
        println!("{}", result.reply_text);
        eprintln!(
            "\x1b[2m[emotion {} | state {}{}]\x1b[0m",
            result.emotion_score,
            result.state_code,
            if result.terminated { " | ended" } else { "" },
        );
    }

    Ok(())
}
