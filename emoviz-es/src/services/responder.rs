//! Empathetic reply generation
//!
//! Wraps the remote model for conversational replies. When the model is not
//! configured or fails, a canned reply is returned instead, so callers always
//! get text back.

use super::llm_client::{ChatBackend, ChatMessage, ChatRequest, LlmError};
use std::sync::Arc;
use tracing::warn;

/// System message seeding every conversation
pub const ASSISTANT_PERSONA: &str = "You are a compassionate assistant.";

/// Reply used when a follow-up chat turn cannot be generated
pub const CHAT_FALLBACK_REPLY: &str =
    "I'm having trouble connecting right now. Can we try again in a moment?";

const REPLY_TEMPERATURE: f32 = 0.7;
const REPLY_MAX_TOKENS: u32 = 60;

/// Reply used when the opening empathetic reply cannot be generated
pub fn opening_fallback_reply(emotion: &str) -> String {
    format!(
        "I understand you're feeling {}. How can I help you today?",
        emotion.to_lowercase()
    )
}

/// Single-turn prompt for the opening reply
pub fn opening_prompt(emotion: &str, text: &str) -> String {
    format!(
        "{} The user is feeling {}. They said: \"{}\". Reply in one or two sentences showing empathy.",
        ASSISTANT_PERSONA, emotion, text
    )
}

pub struct EmpathyResponder {
    backend: Option<Arc<dyn ChatBackend>>,
    model: String,
}

impl EmpathyResponder {
    pub fn new(backend: Option<Arc<dyn ChatBackend>>, model: impl Into<String>) -> Self {
        Self {
            backend,
            model: model.into(),
        }
    }

    /// First reply to a classified utterance
    pub async fn opening_reply(&self, emotion: &str, text: &str) -> String {
        let messages = vec![ChatMessage::user(opening_prompt(emotion, text))];
        match self.complete(messages).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "Opening reply failed, using fallback");
                opening_fallback_reply(emotion)
            }
        }
    }

    /// Next assistant turn for an existing conversation history
    pub async fn continue_conversation(&self, history: &[ChatMessage]) -> String {
        match self.complete(history.to_vec()).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "Chat reply failed, using fallback");
                CHAT_FALLBACK_REPLY.to_string()
            }
        }
    }

    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String, LlmError> {
        let backend = self
            .backend
            .as_ref()
            .ok_or(LlmError::NotConfigured)?;

        backend
            .complete(ChatRequest {
                model: self.model.clone(),
                messages,
                temperature: REPLY_TEMPERATURE,
                max_tokens: REPLY_MAX_TOKENS,
            })
            .await
    }
}
