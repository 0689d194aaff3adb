//! Integration tests for emoviz-es API endpoints
//!
//! Tests cover:
//! - /classify with and without a remote model, fallback on remote failure
//! - /respond session creation and canned fallback replies
//! - /chat history handling and chat_id validation
//! - /health, /ping, UI routes and unknown routes

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use emoviz_es::services::{ChatBackend, ChatRequest, ChatRole, LlmError};
use emoviz_es::{build_router, AppState};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tower::util::ServiceExt; // for `oneshot` method

/// Test backend: replays scripted answers and records every request
#[derive(Default)]
struct ScriptedBackend {
    answers: Mutex<VecDeque<Result<String, u16>>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedBackend {
    fn with_answers(answers: Vec<Result<&str, u16>>) -> Arc<Self> {
        Arc::new(Self {
            answers: Mutex::new(
                answers
                    .into_iter()
                    .map(|a| a.map(str::to_string))
                    .collect(),
            ),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatBackend for ScriptedBackend {
    fn backend_id(&self) -> &'static str {
        "scripted"
    }

    async fn complete(&self, request: ChatRequest) -> Result<String, LlmError> {
        self.requests.lock().unwrap().push(request);
        match self.answers.lock().unwrap().pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(status)) => Err(LlmError::Api(status, "scripted failure".to_string())),
            None => Err(LlmError::EmptyResponse),
        }
    }
}

/// Test helper: app without a remote model
fn offline_app() -> axum::Router {
    build_router(AppState::new(None, "gpt-4", "gpt-3.5-turbo"))
}

/// Test helper: app backed by a scripted remote model
fn scripted_app(backend: Arc<ScriptedBackend>) -> (axum::Router, AppState) {
    let state = AppState::new(
        Some(backend as Arc<dyn ChatBackend>),
        "gpt-4",
        "gpt-3.5-turbo",
    );
    (build_router(state.clone()), state)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Test helper: Extract JSON body from response
async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

async fn extract_text(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    String::from_utf8(bytes.to_vec()).expect("Should be UTF-8")
}

// =============================================================================
// Classification
// =============================================================================

#[tokio::test]
async fn test_classify_offline_uses_inferential() {
    let response = offline_app()
        .oneshot(post_json(
            "/classify",
            json!({"text": "I had a really long day and I'm so tired"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["emotion"], "Tired");
    assert_eq!(body["intensity"], -36);
    assert_eq!(body["source"], "inferential");

    let confidences = body["confidences"].as_object().unwrap();
    assert_eq!(confidences.len(), 7);
    for (axis, value) in confidences {
        let value = value.as_f64().unwrap();
        assert!((0.0..=1.0).contains(&value), "{} = {}", axis, value);
    }
}

#[tokio::test]
async fn test_classify_trims_text() {
    let response = offline_app()
        .oneshot(post_json("/classify", json!({"text": "   xyz qqq zzz \n"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["emotion"], "Neutral");
    assert_eq!(body["intensity"], 0);
}

#[tokio::test]
async fn test_classify_rejects_empty_text() {
    for body in [json!({"text": ""}), json!({"text": "   "}), json!({})] {
        let response = offline_app()
            .oneshot(post_json("/classify", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = extract_json(response.into_body()).await;
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
        assert_eq!(body["error"]["message"], "No text to classify");
    }
}

#[tokio::test]
async fn test_classify_uses_remote_answer() {
    let backend = ScriptedBackend::with_answers(vec![Ok(r#"{"emotion":"Sad","intensity":-50}"#)]);
    let (app, _) = scripted_app(backend.clone());

    let response = app
        .oneshot(post_json("/classify", json!({"text": "I lost my keys"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["emotion"], "Sad");
    assert_eq!(body["intensity"], -50);
    assert_eq!(body["source"], "remote");
    assert_eq!(body["confidences"]["sad"], 0.35);

    let requests = backend.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].model, "gpt-4");
    assert_eq!(requests[0].messages[0].role, ChatRole::System);
    assert_eq!(requests[0].messages[1].content, "Text: \"I lost my keys\"");
}

#[tokio::test]
async fn test_classify_falls_back_on_remote_error() {
    let backend = ScriptedBackend::with_answers(vec![Err(500)]);
    let (app, _) = scripted_app(backend);

    let response = app
        .oneshot(post_json("/classify", json!({"text": "I am so hungry"})))
        .await
        .unwrap();

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["emotion"], "Hungry");
    assert_eq!(body["intensity"], -24);
    assert_eq!(body["source"], "inferential");
}

#[tokio::test]
async fn test_classify_falls_back_on_malformed_answer() {
    let backend = ScriptedBackend::with_answers(vec![Ok("Sad, probably.")]);
    let (app, _) = scripted_app(backend);

    let response = app
        .oneshot(post_json("/classify", json!({"text": "I got the job!"})))
        .await
        .unwrap();

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["emotion"], "Happy");
    assert_eq!(body["intensity"], 72);
    assert_eq!(body["source"], "inferential");
}

// =============================================================================
// Conversation
// =============================================================================

#[tokio::test]
async fn test_respond_offline_uses_canned_reply() {
    let state = AppState::new(None, "gpt-4", "gpt-3.5-turbo");
    let app = build_router(state.clone());

    let response = app
        .oneshot(post_json(
            "/respond",
            json!({"emotion": "Tired", "text": "long day"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(
        body["message"],
        "I understand you're feeling tired. How can I help you today?"
    );

    let chat_id = body["chat_id"].as_str().unwrap();
    assert_eq!(chat_id.len(), 32);

    let history = state.conversations.history(chat_id).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].role, ChatRole::System);
    assert_eq!(history[0].content, "You are a compassionate assistant.");
    assert_eq!(history[1].role, ChatRole::Assistant);
}

#[tokio::test]
async fn test_respond_defaults_emotion_to_neutral() {
    let response = offline_app()
        .oneshot(post_json("/respond", json!({"text": "hello"})))
        .await
        .unwrap();

    let body = extract_json(response.into_body()).await;
    assert_eq!(
        body["message"],
        "I understand you're feeling neutral. How can I help you today?"
    );
}

#[tokio::test]
async fn test_respond_and_chat_with_remote_model() {
    let backend = ScriptedBackend::with_answers(vec![
        Ok("That sounds exhausting. Be gentle with yourself."),
        Ok("A warm bath might help."),
    ]);
    let (app, state) = scripted_app(backend.clone());

    let response = app
        .clone()
        .oneshot(post_json(
            "/respond",
            json!({"emotion": "Tired", "text": "I had a long day"}),
        ))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["message"], "That sounds exhausting. Be gentle with yourself.");
    let chat_id = body["chat_id"].as_str().unwrap().to_string();

    let response = app
        .oneshot(post_json(
            "/chat",
            json!({"chat_id": chat_id, "message": "  What should I do?  "}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["reply"], "A warm bath might help.");

    let requests = backend.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].model, "gpt-3.5-turbo");
    assert!(requests[0].messages[0].content.contains("feeling Tired"));
    // Follow-up sends the session history once, ending with the new user turn
    let sent = &requests[1].messages;
    assert_eq!(sent.len(), 3);
    assert_eq!(sent[2].role, ChatRole::User);
    assert_eq!(sent[2].content, "What should I do?");

    let history = state.conversations.history(&chat_id).await.unwrap();
    assert_eq!(history.len(), 4);
    assert_eq!(history[3].content, "A warm bath might help.");
}

#[tokio::test]
async fn test_chat_fallback_reply_is_recorded() {
    let backend = ScriptedBackend::with_answers(vec![Ok("Hello there."), Err(429)]);
    let (app, state) = scripted_app(backend);

    let response = app
        .clone()
        .oneshot(post_json("/respond", json!({"emotion": "Sad", "text": "meh"})))
        .await
        .unwrap();
    let chat_id = extract_json(response.into_body()).await["chat_id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .oneshot(post_json(
            "/chat",
            json!({"chat_id": chat_id, "message": "are you there?"}),
        ))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(
        body["reply"],
        "I'm having trouble connecting right now. Can we try again in a moment?"
    );

    let history = state.conversations.history(&chat_id).await.unwrap();
    assert_eq!(history.len(), 4);
}

#[tokio::test]
async fn test_chat_rejects_unknown_session() {
    for body in [
        json!({"chat_id": "does-not-exist", "message": "hi"}),
        json!({"message": "hi"}),
    ] {
        let response = offline_app().oneshot(post_json("/chat", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = extract_json(response.into_body()).await;
        assert_eq!(body["error"]["message"], "Invalid chat_id");
    }
}

#[tokio::test]
async fn test_chat_rejects_empty_message() {
    let state = AppState::new(None, "gpt-4", "gpt-3.5-turbo");
    let app = build_router(state.clone());

    let response = app
        .clone()
        .oneshot(post_json("/respond", json!({"emotion": "Happy", "text": "yay"})))
        .await
        .unwrap();
    let chat_id = extract_json(response.into_body()).await["chat_id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .oneshot(post_json("/chat", json!({"chat_id": chat_id, "message": "  "})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Rejected turn leaves the history untouched
    let history = state.conversations.history(&chat_id).await.unwrap();
    assert_eq!(history.len(), 2);
}

// =============================================================================
// Health, ping, UI
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let response = offline_app().oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "emoviz-es");
    assert!(body["version"].is_string());
    assert!(body["uptime_seconds"].is_number());
    assert_eq!(body["remote_model_configured"], false);
}

#[tokio::test]
async fn test_health_reports_remote_model() {
    let (app, _) = scripted_app(ScriptedBackend::with_answers(Vec::new()));
    let response = app.oneshot(get("/health")).await.unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["remote_model_configured"], true);
}

#[tokio::test]
async fn test_ping() {
    let response = offline_app().oneshot(get("/ping")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(extract_text(response.into_body()).await, "pong");
}

#[tokio::test]
async fn test_ui_routes() {
    let response = offline_app().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = extract_text(response.into_body()).await;
    assert!(html.contains("/static/app.js"));
    assert!(html.contains("id=\"speak\""));

    let response = offline_app().oneshot(get("/static/app.js")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"],
        "application/javascript"
    );
    let script = extract_text(response.into_body()).await;
    // Speech input with a typed fallback
    assert!(script.contains("webkitSpeechRecognition"));
    assert!(script.contains("Please type"));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let response = offline_app().oneshot(get("/nope")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}
