//! HTTP surface exercised in-process via `tower::ServiceExt::oneshot`.

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use ct_domain::config::Config;
use ct_gateway::bootstrap::app_state_with_provider;
use ct_gateway::server::build_app;

use common::{test_config, Script, ScriptedProvider};

fn app_with(config: Config, provider: &Arc<ScriptedProvider>) -> Router {
    let state = app_state_with_provider(Arc::new(config), provider.clone());
    build_app(state).unwrap()
}

fn app(provider: &Arc<ScriptedProvider>) -> Router {
    let mut config = test_config();
    // Point at a variable no test sets so auth stays in dev mode.
    config.server.api_token_env = "CT_TEST_TOKEN_UNSET".into();
    app_with(config, provider)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn call(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

#[tokio::test]
async fn health_is_public() {
    let app = app(&ScriptedProvider::new());
    let (status, body) = call(&app, Request::get("/health").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

// ── /chat ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn chat_returns_turn_result() {
    let app = app(&ScriptedProvider::new());
    let (status, body) = call(&app, post_json("/chat", json!({"user_id": "u1", "message": "hi?"}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reply_text"], "re: hi?");
    assert_eq!(body["emotion_score"], 8);
    assert_eq!(body["state_code"], 2);
    assert_eq!(body["end"], false);
}

#[tokio::test]
async fn chat_without_user_id_uses_default_session() {
    let provider = ScriptedProvider::new();
    let app = app(&provider);
    call(&app, post_json("/chat", json!({"message": "hello"}))).await;

    let (status, body) = call(&app, Request::get("/v1/sessions/default").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["turn_count"], 1);
}

#[tokio::test]
async fn chat_requires_message() {
    let app = app(&ScriptedProvider::new());
    let (status, _) = call(&app, post_json("/chat", json!({"user_id": "u1"}))).await;
    assert!(status.is_client_error());
}

// ── Game client ───────────────────────────────────────────────────────

#[tokio::test]
async fn send_message_projects_emotion() {
    let provider = ScriptedProvider::new();
    provider.set_scoring(Script::text("15"));
    let app = app(&provider);

    let (status, body) = call(
        &app,
        post_json("/send_message", json!({"message": "hello", "user_id": "p1", "extra": 1})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "re: hello");
    assert_eq!(body["face_type"], 3);
    assert_eq!(body["score"], 100);
    assert_eq!(body["end"], false);
}

#[tokio::test]
async fn send_message_defaults_missing_fields() {
    let provider = ScriptedProvider::new();
    provider.set_scoring(Script::text("0"));
    let app = app(&provider);

    let (status, body) = call(&app, post_json("/send_message", json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "re: ");
    assert_eq!(body["face_type"], 0);
    assert_eq!(body["score"], 0);

    let (_, session) = call(&app, Request::get("/v1/sessions/default").body(Body::empty()).unwrap()).await;
    assert_eq!(session["turn_count"], 1);
}

#[tokio::test]
async fn send_message_rejection_shape() {
    let provider = ScriptedProvider::new();
    provider.set_moderation(Script::text("INVALID"));
    let app = app(&provider);

    let (_, body) = call(&app, post_json("/send_message", json!({"message": "!!!", "user_id": "p1"}))).await;
    assert_eq!(body["message"], "rejected");
    // Emotion 2 → bottom bucket, 13/100.
    assert_eq!(body["face_type"], 0);
    assert_eq!(body["score"], 13);
    assert_eq!(body["end"], false);
}

#[tokio::test]
async fn reset_clears_and_returns_first_message() {
    let provider = ScriptedProvider::new();
    let app = app(&provider);
    call(&app, post_json("/send_message", json!({"message": "bye", "user_id": "p1"}))).await;

    let (status, body) = call(&app, post_json("/reset", json!({"user_id": "p1"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], true);
    assert_eq!(body["face_type"], 0);
    assert_eq!(body["first_message"], "let's start");

    let (_, session) = call(&app, Request::get("/v1/sessions/p1").body(Body::empty()).unwrap()).await;
    assert_eq!(session["turn_count"], 0);
    assert_eq!(session["terminated"], false);
}

#[tokio::test]
async fn reset_without_body_targets_default() {
    let provider = ScriptedProvider::new();
    let app = app(&provider);
    call(&app, post_json("/chat", json!({"message": "hello"}))).await;

    let (status, body) = call(&app, Request::post("/reset").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], true);

    let (_, session) = call(&app, Request::get("/v1/sessions/default").body(Body::empty()).unwrap()).await;
    assert_eq!(session["turn_count"], 0);
}

// ── Sessions ──────────────────────────────────────────────────────────

#[tokio::test]
async fn sessions_list_and_lookup() {
    let app = app(&ScriptedProvider::new());
    call(&app, post_json("/chat", json!({"user_id": "b", "message": "hi"}))).await;
    call(&app, post_json("/chat", json!({"user_id": "a", "message": "hi"}))).await;

    let (status, body) = call(&app, Request::get("/v1/sessions").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert_eq!(body["sessions"][0]["session_key"], "a");

    let (status, _) = call(&app, Request::get("/v1/sessions/nobody").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn session_reset_by_path() {
    let app = app(&ScriptedProvider::new());
    call(&app, post_json("/chat", json!({"user_id": "k1", "message": "hi"}))).await;

    let (status, body) = call(&app, Request::post("/v1/sessions/k1/reset").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], true);
    assert_eq!(body["session_key"], "k1");
}

// ── Auth ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn bearer_token_enforced_when_configured() {
    std::env::set_var("CT_TEST_TOKEN_AUTH", "s3cret");
    let mut config = test_config();
    config.server.api_token_env = "CT_TEST_TOKEN_AUTH".into();
    let app = app_with(config, &ScriptedProvider::new());

    let (status, _) = call(&app, post_json("/chat", json!({"message": "hi"}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let mut req = post_json("/chat", json!({"message": "hi"}));
    req.headers_mut()
        .insert(header::AUTHORIZATION, "Bearer wrong".parse().unwrap());
    let (status, _) = call(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let mut req = post_json("/chat", json!({"message": "hi"}));
    req.headers_mut()
        .insert(header::AUTHORIZATION, "Bearer s3cret".parse().unwrap());
    let (status, body) = call(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reply_text"], "re: hi");

    // Health stays open.
    let (status, _) = call(&app, Request::get("/health").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
}
