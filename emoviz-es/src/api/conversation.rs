//! Empathetic reply and chat endpoints

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::services::responder::ASSISTANT_PERSONA;
use crate::services::ChatMessage;
use crate::{ApiError, ApiResult, AppState};

fn default_emotion() -> String {
    "Neutral".to_string()
}

/// POST /respond request body
#[derive(Debug, Deserialize)]
pub struct RespondRequest {
    /// Emotion label as shown to the user (free text, defaults to Neutral)
    #[serde(default = "default_emotion")]
    pub emotion: String,
    #[serde(default)]
    pub text: String,
}

/// POST /respond response body
#[derive(Debug, Serialize)]
pub struct RespondResponse {
    pub message: String,
    pub chat_id: String,
}

/// POST /chat request body
#[derive(Debug, Deserialize)]
pub struct ChatTurnRequest {
    #[serde(default)]
    pub chat_id: Option<String>,
    #[serde(default)]
    pub message: String,
}

/// POST /chat response body
#[derive(Debug, Serialize)]
pub struct ChatTurnResponse {
    pub reply: String,
}

/// POST /respond
///
/// Generates an empathetic opening reply and starts a new chat session
/// seeded with the assistant persona and that reply.
pub async fn respond(
    State(state): State<AppState>,
    Json(request): Json<RespondRequest>,
) -> Json<RespondResponse> {
    let emotion = match request.emotion.trim() {
        "" => "Neutral",
        emotion => emotion,
    };

    let message = state
        .responder
        .opening_reply(emotion, request.text.trim())
        .await;

    let chat_id = state
        .conversations
        .open(vec![
            ChatMessage::system(ASSISTANT_PERSONA),
            ChatMessage::assistant(message.clone()),
        ])
        .await;

    info!(chat_id = %chat_id, emotion = %emotion, "Chat session started");

    Json(RespondResponse { message, chat_id })
}

/// POST /chat
///
/// Appends the user message to the session, asks for the next assistant
/// turn and appends that too. Turns on one session are serialized.
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatTurnRequest>,
) -> ApiResult<Json<ChatTurnResponse>> {
    let session = match request.chat_id.as_deref() {
        Some(chat_id) => state.conversations.session(chat_id).await,
        None => None,
    }
    .ok_or_else(|| ApiError::BadRequest("Invalid chat_id".to_string()))?;

    let message = request.message.trim();
    if message.is_empty() {
        return Err(ApiError::BadRequest("No message provided".to_string()));
    }

    let mut history = session.lock().await;
    history.push(ChatMessage::user(message));

    let reply = state.responder.continue_conversation(&history).await;
    history.push(ChatMessage::assistant(reply.clone()));

    Ok(Json(ChatTurnResponse { reply }))
}

/// Build conversation routes
pub fn conversation_routes() -> Router<AppState> {
    Router::new()
        .route("/respond", post(respond))
        .route("/chat", post(chat))
}
