//! Classification orchestrator
//!
//! Chooses between the remote model and the inferential classifier. The
//! remote model is consulted first when configured; any failure (network,
//! API status, unreadable answer) falls back to the inferential path, so
//! classification itself never fails.

use super::llm_client::ChatBackend;
use super::remote_classifier::classify_remotely;
use emoviz_common::{classify_inferentially, ClassificationResult};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Which path produced a classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassificationSource {
    Remote,
    Inferential,
}

/// Classification plus provenance, as returned by `POST /classify`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classified {
    #[serde(flatten)]
    pub result: ClassificationResult,
    pub source: ClassificationSource,
}

pub struct ClassificationOrchestrator {
    backend: Option<Arc<dyn ChatBackend>>,
    model: String,
}

impl ClassificationOrchestrator {
    /// `backend = None` means no remote model is configured
    pub fn new(backend: Option<Arc<dyn ChatBackend>>, model: impl Into<String>) -> Self {
        Self {
            backend,
            model: model.into(),
        }
    }

    pub fn remote_configured(&self) -> bool {
        self.backend.is_some()
    }

    /// Classify trimmed, non-empty text
    pub async fn classify(&self, text: &str) -> Classified {
        if let Some(backend) = &self.backend {
            match classify_remotely(backend.as_ref(), &self.model, text).await {
                Ok(result) => {
                    info!(
                        backend = backend.backend_id(),
                        emotion = %result.emotion,
                        intensity = result.intensity,
                        "Remote classification succeeded"
                    );
                    return Classified {
                        result,
                        source: ClassificationSource::Remote,
                    };
                }
                Err(e) => {
                    warn!(
                        backend = backend.backend_id(),
                        error = %e,
                        "Remote classification failed, using inferential classifier"
                    );
                }
            }
        }

        let result = classify_inferentially(text);
        info!(
            emotion = %result.emotion,
            intensity = result.intensity,
            "Inferential classification"
        );
        Classified {
            result,
            source: ClassificationSource::Inferential,
        }
    }
}
