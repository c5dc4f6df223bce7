//! `POST /chat`: the transport-neutral turn contract.

use axum::extract::State;
use axum::response::{IntoResponse, Json};
use serde::{Deserialize, Serialize};

use crate::conversation::TurnResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatBody {
    /// Session key. Absent or blank selects the default session.
    #[serde(default)]
    pub user_id: Option<String>,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub reply_text: String,
    pub emotion_score: u8,
    pub state_code: u8,
    pub end: bool,
}

impl From<TurnResult> for ChatReply {
    fn from(r: TurnResult) -> Self {
        Self {
            reply_text: r.reply_text,
            emotion_score: r.emotion_score,
            state_code: r.state_code,
            end: r.terminated,
        }
    }
}

pub async fn chat(State(state): State<AppState>, Json(body): Json<ChatBody>) -> impl IntoResponse {
    let session_key = state.orchestrator.resolve_key(body.user_id.as_deref());
    let result = state
        .orchestrator
        .send_turn(&session_key, &body.message)
        .await;
    Json(ChatReply::from(result))
}
