//! Emotion-to-confidence mapping
//!
//! Converts a categorical label plus signed intensity into the 7-axis
//! confidence profile consumed by the visualization. Axes are independent
//! (not a probability simplex) and each stays within `0.0..=1.0`.
//!
//! Only the axes matching the intensity's sign are scaled: joy/excitement for
//! positive intensities, sad/fear/anger/anxiety otherwise. The remaining axes
//! keep their raw template value whatever the magnitude.

use crate::emotion::{EmotionLabel, Intensity};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Per-axis confidence profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceVector {
    pub sad: f64,
    pub fear: f64,
    pub anger: f64,
    pub anxiety: f64,
    pub neutral: f64,
    pub excitement: f64,
    pub joy: f64,
}

impl ConfidenceVector {
    /// Axis names in serialization order
    pub const AXES: [&'static str; 7] =
        ["sad", "fear", "anger", "anxiety", "neutral", "excitement", "joy"];

    const fn new(
        sad: f64,
        fear: f64,
        anger: f64,
        anxiety: f64,
        neutral: f64,
        excitement: f64,
        joy: f64,
    ) -> Self {
        Self {
            sad,
            fear,
            anger,
            anxiety,
            neutral,
            excitement,
            joy,
        }
    }

    /// Values in [`Self::AXES`] order
    fn values(&self) -> [f64; 7] {
        [
            self.sad,
            self.fear,
            self.anger,
            self.anxiety,
            self.neutral,
            self.excitement,
            self.joy,
        ]
    }

    /// (axis name, value) pairs in serialization order
    pub fn axes(&self) -> [(&'static str, f64); 7] {
        let values = self.values();
        std::array::from_fn(|i| (Self::AXES[i], values[i]))
    }
}

/// Canonical output of every classification path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub emotion: EmotionLabel,
    pub intensity: Intensity,
    pub confidences: ConfidenceVector,
}

//                                        sad   fear  anger anx   neut  exc   joy
const HAPPY: ConfidenceVector = ConfidenceVector::new(0.0, 0.0, 0.0, 0.0, 0.2, 0.3, 0.5);
const SAD: ConfidenceVector = ConfidenceVector::new(0.7, 0.1, 0.0, 0.2, 0.0, 0.0, 0.0);
const ANGRY: ConfidenceVector = ConfidenceVector::new(0.0, 0.0, 0.8, 0.2, 0.0, 0.0, 0.0);
const FEARFUL: ConfidenceVector = ConfidenceVector::new(0.1, 0.7, 0.0, 0.2, 0.0, 0.0, 0.0);
const ANXIOUS: ConfidenceVector = ConfidenceVector::new(0.1, 0.3, 0.0, 0.6, 0.0, 0.0, 0.0);
const EXCITED: ConfidenceVector = ConfidenceVector::new(0.0, 0.0, 0.0, 0.0, 0.1, 0.8, 0.1);
const NEUTRAL: ConfidenceVector = ConfidenceVector::new(0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0);
const SURPRISED: ConfidenceVector = ConfidenceVector::new(0.0, 0.2, 0.0, 0.1, 0.1, 0.6, 0.0);
const DISGUSTED: ConfidenceVector = ConfidenceVector::new(0.1, 0.1, 0.6, 0.2, 0.0, 0.0, 0.0);
const CONFUSED: ConfidenceVector = ConfidenceVector::new(0.1, 0.2, 0.1, 0.4, 0.2, 0.0, 0.0);
const TIRED: ConfidenceVector = ConfidenceVector::new(0.3, 0.0, 0.1, 0.2, 0.4, 0.0, 0.0);
const HUNGRY: ConfidenceVector = ConfidenceVector::new(0.1, 0.0, 0.2, 0.3, 0.4, 0.0, 0.0);

/// Unscaled confidence template for a label
pub fn confidence_template(emotion: EmotionLabel) -> ConfidenceVector {
    match emotion {
        EmotionLabel::Happy => HAPPY,
        EmotionLabel::Sad => SAD,
        EmotionLabel::Angry => ANGRY,
        EmotionLabel::Fearful => FEARFUL,
        EmotionLabel::Anxious => ANXIOUS,
        EmotionLabel::Excited => EXCITED,
        EmotionLabel::Neutral => NEUTRAL,
        EmotionLabel::Surprised => SURPRISED,
        EmotionLabel::Disgusted => DISGUSTED,
        EmotionLabel::Confused => CONFUSED,
        EmotionLabel::Tired => TIRED,
        EmotionLabel::Hungry => HUNGRY,
    }
}

/// Map a label and signed intensity to a confidence profile
///
/// `intensity` is expected in `-100..=100`; values outside that range would
/// push scaled axes above 1.0, so callers clamp first (see
/// [`crate::clamp_intensity`]).
pub fn map_emotion_to_confidences(
    emotion: EmotionLabel,
    intensity: Intensity,
) -> ClassificationResult {
    let mut confidences = confidence_template(emotion);
    let factor = f64::from(intensity.unsigned_abs()) / 100.0;

    if intensity > 0 {
        confidences.joy *= factor;
        confidences.excitement *= factor;
    } else {
        confidences.sad *= factor;
        confidences.fear *= factor;
        confidences.anger *= factor;
        confidences.anxiety *= factor;
    }

    ClassificationResult {
        emotion,
        intensity,
        confidences,
    }
}

/// Map a free-form label name (e.g. from a remote model) to a confidence profile
///
/// Names outside the closed label set fall back to Neutral.
pub fn map_named_emotion(name: &str, intensity: Intensity) -> ClassificationResult {
    let emotion = name.parse::<EmotionLabel>().unwrap_or_else(|_| {
        debug!(label = %name, "Unknown emotion label, using Neutral template");
        EmotionLabel::Neutral
    });
    map_emotion_to_confidences(emotion, intensity)
}
