//! In-memory conversation store
//!
//! Maps chat ids to ordered message histories. Nothing is persisted or
//! evicted. Each session sits behind its own mutex so turns on one session
//! are serialized while different sessions proceed independently.

use super::llm_client::ChatMessage;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

/// Message history of one chat session
pub type SessionHistory = Arc<Mutex<Vec<ChatMessage>>>;

#[derive(Clone, Default)]
pub struct ConversationStore {
    sessions: Arc<RwLock<HashMap<String, SessionHistory>>>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session seeded with `messages`; returns the new chat id
    pub async fn open(&self, messages: Vec<ChatMessage>) -> String {
        let chat_id = Uuid::new_v4().simple().to_string();
        self.sessions
            .write()
            .await
            .insert(chat_id.clone(), Arc::new(Mutex::new(messages)));
        tracing::debug!(chat_id = %chat_id, "Conversation opened");
        chat_id
    }

    /// Handle to a session's history, if the id is known
    pub async fn session(&self, chat_id: &str) -> Option<SessionHistory> {
        self.sessions.read().await.get(chat_id).cloned()
    }

    /// Snapshot of a session's messages
    pub async fn history(&self, chat_id: &str) -> Option<Vec<ChatMessage>> {
        let session = self.session(chat_id).await?;
        let messages = session.lock().await.clone();
        Some(messages)
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    #[cfg(test)]
    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
