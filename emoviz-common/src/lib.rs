//! # emoviz Common Library
//!
//! Shared code for the emoviz services including:
//! - Emotion label set and intensity bounds
//! - Inferential (rule-based, offline) emotion classifier
//! - Emotion-to-confidence mapping for visualization
//! - Configuration loading
//! - Common error types
//!
//! Nothing in here performs network I/O; the classifier and mapper are pure
//! functions and can be called from any thread or task.

pub mod classifier;
pub mod confidence;
pub mod config;
pub mod emotion;
pub mod error;

pub use classifier::{classify_inferentially, score_text, ScoreBoard};
pub use confidence::{
    confidence_template, map_emotion_to_confidences, map_named_emotion, ClassificationResult,
    ConfidenceVector,
};
pub use emotion::{clamp_intensity, EmotionLabel, Intensity, MAX_INTENSITY, MIN_INTENSITY};
pub use error::{Error, Result};
