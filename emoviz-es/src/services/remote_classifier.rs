//! Remote emotion classification
//!
//! Builds the classification prompt for the remote model and turns its
//! answer into a [`ClassificationResult`]. Any answer that cannot be read as
//! `{"emotion": "...", "intensity": n}` is reported as [`LlmError::Malformed`]
//! so the orchestrator can fall back to the inferential classifier.

use super::llm_client::{ChatBackend, ChatMessage, ChatRequest, LlmError};
use emoviz_common::confidence::map_named_emotion;
use emoviz_common::{clamp_intensity, ClassificationResult};
use serde_json::Value;

/// System prompt asking for a single JSON judgment
pub const CLASSIFY_SYSTEM_PROMPT: &str = r#"
You are an expert emotion classifier that can detect subtle emotional cues in speech.
Analyze the text and infer the speaker's emotional state, even when emotions aren't
explicitly stated. Look for:

1. Content and context clues (what they're describing)
2. Word choice and intensity markers
3. Sentence structure and phrasing patterns
4. Implied emotional undercurrents

Classify into one of these categories: Happy, Sad, Angry, Fearful, Anxious, Excited,
Neutral, Surprised, Disgusted, Confused, Tired, or Hungry.

Also assign an intensity value from -100 (extremely negative) to +100 (extremely positive).

Respond ONLY with a JSON object in this format:
{"emotion":"Category","intensity":value}
"#;

const CLASSIFY_TEMPERATURE: f32 = 0.0;
const CLASSIFY_MAX_TOKENS: u32 = 50;

/// Build the chat request used for remote classification
pub fn classification_request(model: &str, text: &str) -> ChatRequest {
    ChatRequest {
        model: model.to_string(),
        messages: vec![
            ChatMessage::system(CLASSIFY_SYSTEM_PROMPT),
            ChatMessage::user(format!("Text: \"{}\"", text)),
        ],
        temperature: CLASSIFY_TEMPERATURE,
        max_tokens: CLASSIFY_MAX_TOKENS,
    }
}

/// Ask the remote model for a judgment and map it to confidences
pub async fn classify_remotely(
    backend: &dyn ChatBackend,
    model: &str,
    text: &str,
) -> Result<ClassificationResult, LlmError> {
    let raw = backend.complete(classification_request(model, text)).await?;
    tracing::debug!(raw = %raw, "Remote classification answer");
    parse_remote_judgment(&raw)
}

/// Parse `{"emotion": "...", "intensity": n}` from model output
///
/// - missing `emotion` defaults to Neutral, missing `intensity` to 0
/// - intensity may be an integer, a float (truncated) or an integer string
/// - intensity is clamped to -100..=100
/// - unknown emotion names map to Neutral
pub fn parse_remote_judgment(raw: &str) -> Result<ClassificationResult, LlmError> {
    let value: Value = serde_json::from_str(raw.trim())
        .map_err(|e| LlmError::Malformed(format!("not JSON ({}): {}", e, raw)))?;

    let object = value
        .as_object()
        .ok_or_else(|| LlmError::Malformed(format!("expected JSON object: {}", raw)))?;

    let emotion = match object.get("emotion") {
        None | Some(Value::Null) => "Neutral",
        Some(Value::String(name)) => name.as_str(),
        Some(other) => {
            return Err(LlmError::Malformed(format!("emotion is not a string: {}", other)))
        }
    };

    let intensity = match object.get("intensity") {
        None | Some(Value::Null) => 0,
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .ok_or_else(|| LlmError::Malformed(format!("intensity out of range: {}", n)))?,
        Some(Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| LlmError::Malformed(format!("intensity is not an integer: {:?}", s)))?,
        Some(other) => {
            return Err(LlmError::Malformed(format!("intensity is not numeric: {}", other)))
        }
    };

    Ok(map_named_emotion(emotion, clamp_intensity(intensity)))
}
