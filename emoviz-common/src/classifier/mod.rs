//! Inferential emotion classifier
//!
//! Offline, deterministic fallback used when no remote model answers. Scores
//! every label from keyword, phrase, context, punctuation and intensifier
//! cues, picks the predominant label and derives a signed intensity from its
//! base constant.
//!
//! Passes run in a fixed order over a per-call [`ScoreBoard`]:
//! 1. keywords (+1 per keyword contained in the text)
//! 2. negations (first occurrence of each trigger negates the rest of the text)
//! 3. phrase bonuses
//! 4. contextual cue groups
//! 5. punctuation ('!' and '?' counts on the raw input)
//! 6. intensifiers (boost added to each of the two leading labels, ties
//!    broken by [`rules::BOOST_PRIORITY`] rather than canonical order)
//! 7. neutral floor
//!
//! The classifier never fails. Empty input is rejected by callers before it
//! gets here; if it does arrive it simply classifies as Neutral.

pub mod rules;

use crate::confidence::{map_emotion_to_confidences, ClassificationResult};
use crate::emotion::{clamp_intensity, EmotionLabel, Intensity};
use rules::{
    BOOST_PRIORITY, CONTEXT_CUES, EXCLAMATION_TIERS, INTENSIFIERS, INTENSIFIER_BOOST,
    INTENSITY_SCALE, KEYWORDS, NEGATION_OPPOSITE_BONUS, NEGATION_PENALTY, NEGATION_TRIGGERS,
    NEUTRAL_BIAS, NEUTRAL_FLOOR_SCORE, PHRASE_BONUSES, QUESTION_TIERS, SCORE_SATURATION,
    SIGNAL_THRESHOLD,
};
use tracing::{debug, trace};

/// Per-call score accumulator indexed by [`EmotionLabel`]
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBoard {
    scores: [f64; EmotionLabel::COUNT],
}

impl ScoreBoard {
    /// All zero except Neutral, which starts at the neutral bias
    pub fn new() -> Self {
        let mut scores = [0.0; EmotionLabel::COUNT];
        scores[EmotionLabel::Neutral as usize] = NEUTRAL_BIAS;
        Self { scores }
    }

    pub fn get(&self, label: EmotionLabel) -> f64 {
        self.scores[label as usize]
    }

    pub fn add(&mut self, label: EmotionLabel, amount: f64) {
        self.scores[label as usize] += amount;
    }

    pub fn set(&mut self, label: EmotionLabel, value: f64) {
        self.scores[label as usize] = value;
    }

    /// (label, score) pairs in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (EmotionLabel, f64)> + '_ {
        EmotionLabel::CANONICAL_ORDER
            .iter()
            .map(move |label| (*label, self.get(*label)))
    }

    pub fn max_score(&self) -> f64 {
        self.scores.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Highest-scoring label; ties go to the earliest label in canonical order
    pub fn leader(&self) -> (EmotionLabel, f64) {
        let first = EmotionLabel::CANONICAL_ORDER[0];
        let mut best = (first, self.get(first));
        for (label, score) in self.iter().skip(1) {
            if score > best.1 {
                best = (label, score);
            }
        }
        best
    }

    /// The two highest-scoring labels, ties broken by [`BOOST_PRIORITY`]
    pub fn top_two(&self) -> [EmotionLabel; 2] {
        let mut ranked = BOOST_PRIORITY;
        // Stable, so equal scores keep their priority order
        ranked.sort_by(|a, b| self.get(*b).total_cmp(&self.get(*a)));
        [ranked[0], ranked[1]]
    }
}

impl Default for ScoreBoard {
    fn default() -> Self {
        Self::new()
    }
}

/// Classify a text snippet without any remote help
///
/// Returns the predominant label, its signed intensity and the mapped
/// confidence profile. Identical input always yields an identical result.
pub fn classify_inferentially(text: &str) -> ClassificationResult {
    let board = score_text(text);
    let (emotion, score) = board.leader();
    let intensity = derive_intensity(emotion, score);

    debug!(
        emotion = %emotion,
        intensity,
        scores = ?board.iter().filter(|(_, s)| *s != 0.0).collect::<Vec<_>>(),
        "Inferential classification"
    );

    map_emotion_to_confidences(emotion, intensity)
}

/// Run every scoring pass over `text` and return the final scoreboard
pub fn score_text(text: &str) -> ScoreBoard {
    let lowered = text.to_lowercase();
    let mut board = ScoreBoard::new();

    apply_keywords(&lowered, &mut board);
    apply_negations(&lowered, &mut board);
    apply_phrase_bonuses(&lowered, &mut board);
    apply_context_cues(&lowered, &mut board);
    apply_punctuation(text, &mut board);
    apply_intensifiers(&lowered, &mut board);
    apply_neutral_floor(&mut board);

    board
}

fn keyword_hits(haystack: &str, keywords: &[&str]) -> usize {
    keywords.iter().filter(|k| haystack.contains(**k)).count()
}

fn apply_keywords(lowered: &str, board: &mut ScoreBoard) {
    for (label, keywords) in KEYWORDS {
        board.add(*label, keyword_hits(lowered, keywords) as f64);
    }
}

fn apply_negations(lowered: &str, board: &mut ScoreBoard) {
    for trigger in NEGATION_TRIGGERS {
        let Some(start) = lowered.find(trigger) else {
            continue;
        };
        let negated = &lowered[start..];

        for (label, keywords) in KEYWORDS {
            let hits = keyword_hits(negated, keywords) as f64;
            if hits == 0.0 {
                continue;
            }
            board.add(*label, -NEGATION_PENALTY * hits);
            if let Some(opposite) = label.negation_opposite() {
                board.add(opposite, NEGATION_OPPOSITE_BONUS * hits);
            }
        }
    }
}

fn apply_phrase_bonuses(lowered: &str, board: &mut ScoreBoard) {
    for (phrase, bonuses) in PHRASE_BONUSES {
        if lowered.contains(phrase) {
            for (label, weight) in *bonuses {
                board.add(*label, *weight);
            }
        }
    }
}

fn apply_context_cues(lowered: &str, board: &mut ScoreBoard) {
    for cue in CONTEXT_CUES {
        if cue.phrases.iter().any(|p| lowered.contains(p)) {
            trace!(cue = cue.name, "Context cue matched");
            for (label, weight) in cue.bonuses {
                board.add(*label, *weight);
            }
        }
    }
}

fn apply_tier(count: usize, tiers: &[(usize, &[(EmotionLabel, f64)])], board: &mut ScoreBoard) {
    if let Some((_, bonuses)) = tiers.iter().find(|(minimum, _)| count >= *minimum) {
        for (label, weight) in *bonuses {
            board.add(*label, *weight);
        }
    }
}

fn apply_punctuation(raw: &str, board: &mut ScoreBoard) {
    apply_tier(raw.matches('!').count(), EXCLAMATION_TIERS, board);
    apply_tier(raw.matches('?').count(), QUESTION_TIERS, board);
}

fn apply_intensifiers(lowered: &str, board: &mut ScoreBoard) {
    let boost = keyword_hits(lowered, INTENSIFIERS) as f64 * INTENSIFIER_BOOST;
    if boost > 0.0 {
        // Both leaders get the full boost
        for label in board.top_two() {
            board.add(label, boost);
        }
    }
}

fn apply_neutral_floor(board: &mut ScoreBoard) {
    if board.max_score() < SIGNAL_THRESHOLD {
        board.set(EmotionLabel::Neutral, NEUTRAL_FLOOR_SCORE);
    }
}

fn derive_intensity(emotion: EmotionLabel, winning_score: f64) -> Intensity {
    let score_factor = winning_score.min(SCORE_SATURATION) / SCORE_SATURATION;
    let raw = f64::from(emotion.base_intensity()) * score_factor * INTENSITY_SCALE;
    clamp_intensity(raw.round() as i64)
}
