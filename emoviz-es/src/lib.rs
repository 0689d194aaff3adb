//! emoviz-es library - Emotion Service
//!
//! Classifies short text snippets into one of twelve emotions, maps the
//! result to a confidence vector for visualization and holds empathetic
//! follow-up conversations. Exposed for the binary and integration tests.

use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;
pub mod services;

pub use crate::error::{ApiError, ApiResult};

use services::{ChatBackend, ClassificationOrchestrator, ConversationStore, EmpathyResponder};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Remote-first classifier with inferential fallback
    pub orchestrator: Arc<ClassificationOrchestrator>,
    /// Empathetic reply generator
    pub responder: Arc<EmpathyResponder>,
    /// chat_id → message history
    pub conversations: ConversationStore,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    /// Create application state
    ///
    /// `backend = None` disables the remote model: classification uses the
    /// inferential classifier and replies use canned text.
    pub fn new(
        backend: Option<Arc<dyn ChatBackend>>,
        classify_model: impl Into<String>,
        reply_model: impl Into<String>,
    ) -> Self {
        Self {
            orchestrator: Arc::new(ClassificationOrchestrator::new(
                backend.clone(),
                classify_model,
            )),
            responder: Arc::new(EmpathyResponder::new(backend, reply_model)),
            conversations: ConversationStore::new(),
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::ui_routes())
        .merge(api::classify_routes())
        .merge(api::conversation_routes())
        .merge(api::health_routes())
        .fallback(api::not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // Browser UI may be served from elsewhere during development
        .layer(CorsLayer::permissive())
}
