//! Emotion label set and intensity bounds
//!
//! The label set is closed: every classifier path (remote or inferential)
//! must land on one of these twelve values before a result leaves the crate.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Signed emotion strength. Negative = unpleasant / low energy,
/// positive = pleasant / high energy.
pub type Intensity = i32;

/// Lowest valid intensity
pub const MIN_INTENSITY: Intensity = -100;

/// Highest valid intensity
pub const MAX_INTENSITY: Intensity = 100;

/// Clamp any integer into the valid intensity range
pub fn clamp_intensity(value: i64) -> Intensity {
    value.clamp(MIN_INTENSITY as i64, MAX_INTENSITY as i64) as Intensity
}

/// Predominant emotion detected in a text snippet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmotionLabel {
    Happy,
    Sad,
    Angry,
    Anxious,
    Tired,
    Hungry,
    Fearful,
    Excited,
    Surprised,
    Disgusted,
    Confused,
    Neutral,
}

impl EmotionLabel {
    /// Tie-break order for label selection.
    ///
    /// When two labels share the maximum score, the one appearing first in
    /// this sequence wins. The same order is used when picking the two
    /// top-scoring labels for the intensifier boost. The discriminant of each
    /// variant equals its position here, so the ScoreBoard indexes by `as usize`.
    pub const CANONICAL_ORDER: [EmotionLabel; 12] = [
        EmotionLabel::Happy,
        EmotionLabel::Sad,
        EmotionLabel::Angry,
        EmotionLabel::Anxious,
        EmotionLabel::Tired,
        EmotionLabel::Hungry,
        EmotionLabel::Fearful,
        EmotionLabel::Excited,
        EmotionLabel::Surprised,
        EmotionLabel::Disgusted,
        EmotionLabel::Confused,
        EmotionLabel::Neutral,
    ];

    /// Number of labels in the closed set
    pub const COUNT: usize = 12;

    /// Capitalized label name, as used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionLabel::Happy => "Happy",
            EmotionLabel::Sad => "Sad",
            EmotionLabel::Angry => "Angry",
            EmotionLabel::Anxious => "Anxious",
            EmotionLabel::Tired => "Tired",
            EmotionLabel::Hungry => "Hungry",
            EmotionLabel::Fearful => "Fearful",
            EmotionLabel::Excited => "Excited",
            EmotionLabel::Surprised => "Surprised",
            EmotionLabel::Disgusted => "Disgusted",
            EmotionLabel::Confused => "Confused",
            EmotionLabel::Neutral => "Neutral",
        }
    }

    /// Intensity assigned when this label wins with a full-strength score
    /// (before the 1.2 scale-up applied by the classifier).
    pub fn base_intensity(&self) -> Intensity {
        match self {
            EmotionLabel::Happy => 60,
            EmotionLabel::Excited => 70,
            EmotionLabel::Surprised => 40,
            EmotionLabel::Neutral => 0,
            EmotionLabel::Sad => -60,
            EmotionLabel::Angry => -70,
            EmotionLabel::Anxious => -40,
            EmotionLabel::Tired => -30,
            EmotionLabel::Hungry => -20,
            EmotionLabel::Fearful => -50,
            EmotionLabel::Disgusted => -60,
            EmotionLabel::Confused => -20,
        }
    }

    /// Label whose score receives the +0.5 bonus when this label is negated.
    ///
    /// Only Happy/Sad and Tired/Excited are paired.
    pub fn negation_opposite(&self) -> Option<EmotionLabel> {
        match self {
            EmotionLabel::Happy => Some(EmotionLabel::Sad),
            EmotionLabel::Sad => Some(EmotionLabel::Happy),
            EmotionLabel::Tired => Some(EmotionLabel::Excited),
            EmotionLabel::Excited => Some(EmotionLabel::Tired),
            _ => None,
        }
    }
}

impl fmt::Display for EmotionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmotionLabel {
    type Err = Error;

    /// Case-insensitive parse; surrounding whitespace is ignored
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        EmotionLabel::CANONICAL_ORDER
            .iter()
            .copied()
            .find(|label| label.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::InvalidInput(format!("Unknown emotion label: {}", s)))
    }
}
