//! HTTP API handlers for emoviz-es

pub mod classify;
pub mod conversation;
pub mod health;
pub mod ui;

pub use classify::classify_routes;
pub use conversation::conversation_routes;
pub use health::health_routes;
pub use ui::ui_routes;

use crate::ApiError;
use axum::http::Uri;

/// Fallback for unknown routes
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}
