//! Game-client endpoints.
//!
//! - `POST /send_message`: one turn, reply projected to a face + gauge
//! - `POST /reset`:        clear the caller's session
//!
//! Both bodies are lenient: missing fields take defaults and unknown
//! fields are ignored, matching what the client serializes.

use axum::extract::State;
use axum::response::{IntoResponse, Json};
use serde::{Deserialize, Serialize};

use crate::conversation::DisplayProjection;
use crate::state::AppState;

fn d_user_id() -> String {
    "default".into()
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// POST /send_message
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Deserialize)]
pub struct SendMessageBody {
    #[serde(default)]
    pub message: String,
    #[serde(default = "d_user_id")]
    pub user_id: String,
}

#[derive(Debug, Serialize)]
pub struct SendMessageReply {
    pub message: String,
    pub face_type: u8,
    pub score: u8,
    pub end: bool,
}

pub async fn send_message(
    State(state): State<AppState>,
    Json(body): Json<SendMessageBody>,
) -> impl IntoResponse {
    let session_key = state.orchestrator.resolve_key(Some(&body.user_id));
    let result = state
        .orchestrator
        .send_turn(&session_key, &body.message)
        .await;
    let view = DisplayProjection::from_emotion(result.emotion_score);

    Json(SendMessageReply {
        message: result.reply_text,
        face_type: view.face_type,
        score: view.display_score,
        end: result.terminated,
    })
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// POST /reset
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Deserialize)]
pub struct ResetBody {
    #[serde(default = "d_user_id")]
    pub user_id: String,
}

#[derive(Debug, Serialize)]
pub struct ResetReply {
    pub result: bool,
    pub first_message: String,
    pub face_type: u8,
}

/// A missing or unparseable body resets the default session.
pub async fn reset(
    State(state): State<AppState>,
    body: Option<Json<ResetBody>>,
) -> impl IntoResponse {
    let user_id = body.map(|Json(b)| b.user_id);
    let session_key = state.orchestrator.resolve_key(user_id.as_deref());
    let result = state.orchestrator.reset_session(&session_key).await;

    Json(ResetReply {
        result,
        first_message: state.config.conversation.reset_first_message.clone(),
        face_type: 0,
    })
}
