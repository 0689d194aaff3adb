//! Static rule tables for the inferential classifier
//!
//! All matching is plain substring containment against the lowercased text.
//! Short entries ("win", "run", "how") therefore also fire inside longer
//! words; classification outcomes depend on that, so do not switch these to
//! word-boundary matching.

use crate::emotion::EmotionLabel;
use crate::emotion::EmotionLabel::*;

/// Keywords and short phrases associated with each label (+1 per hit)
pub const KEYWORDS: &[(EmotionLabel, &[&str])] = &[
    (
        Happy,
        &[
            "great", "wonderful", "fantastic", "amazing", "good", "love", "awesome",
            "enjoy", "pleased", "delighted", "win", "success", "accomplished",
            "birthday", "celebrate", "proud", "perfect", "beautiful", "sunshine",
            "excited about", "looking forward", "can't wait", "fun",
        ],
    ),
    (
        Sad,
        &[
            "sad", "down", "unhappy", "depressed", "miserable", "hurt", "pain",
            "lonely", "alone", "miss", "lost", "sorry", "regret", "cry", "tear",
            "heartbroken", "disappointed", "grief", "upset", "funeral", "died",
            "miss home", "homesick", "exhausted", "worn out",
        ],
    ),
    (
        Angry,
        &[
            "angry", "mad", "furious", "upset", "irritated", "annoyed", "frustrated",
            "hate", "unfair", "ridiculous", "blame", "fault", "stupid", "idiot",
            "terrible", "worst", "ruined", "horrible", "hell", "damn", "fed up",
            "sick of", "tired of", "had enough",
        ],
    ),
    (
        Anxious,
        &[
            "anxious", "nervous", "worried", "stress", "pressure", "overwhelmed",
            "afraid", "fear", "panic", "uncertain", "doubt", "risk", "concern",
            "interview", "test", "exam", "deadline", "meeting", "presentation",
            "want to go home", "need to leave", "can't stay", "have to go",
        ],
    ),
    (
        Tired,
        &[
            "tired", "exhausted", "sleepy", "fatigue", "drained", "no energy",
            "worn out", "need sleep", "need rest", "need a break", "can't keep going",
            "so tired", "want to sleep", "want to rest", "want to go home",
            "need to lie down", "long day", "hard day", "ready for bed", "eyes heavy",
        ],
    ),
    (
        Hungry,
        &[
            "hungry", "starving", "need food", "want to eat", "need to eat", "food",
            "haven't eaten", "stomach growling", "stomach rumbling", "need a meal",
            "want a snack", "dinner", "lunch", "breakfast", "craving", "appetite",
        ],
    ),
    (
        Fearful,
        &[
            "scared", "terrified", "horrified", "danger", "threat", "attack",
            "nightmare", "monster", "dark", "alone", "unknown", "help", "run", "hide",
            "scream", "horror", "killer", "death", "dying", "terror", "emergency",
        ],
    ),
    (
        Excited,
        &[
            "excited", "thrilled", "eager", "looking forward", "cant wait", "anticipate",
            "adventure", "fun", "party", "vacation", "holiday", "weekend", "opportunity",
            "chance", "new", "start", "beginning", "future", "potential", "possibility",
        ],
    ),
    (
        Surprised,
        &[
            "surprised", "shocked", "unexpected", "wow", "whoa", "amazing", "unbelievable",
            "incredible", "what", "how", "suddenly", "no way", "impossible", "cant believe",
            "believe it", "really", "serious", "never thought", "never expected",
        ],
    ),
    (
        Disgusted,
        &[
            "disgusting", "gross", "sick", "nasty", "eww", "vomit", "rotten", "filthy",
            "dirty", "ugly", "horrible", "worst", "unacceptable", "terrible", "creepy",
        ],
    ),
    (
        Confused,
        &[
            "confused", "unsure", "dont understand", "lost", "complicated", "complex",
            "what do you mean", "unclear", "not sure", "dont get it", "strange",
            "weird", "bizarre", "odd", "wonder", "question", "how", "why", "when",
            "don't know why", "don't even know",
        ],
    ),
    (
        Neutral,
        &["okay", "fine", "alright", "normal", "regular", "usual", "so-so", "meh"],
    ),
];

/// Negation triggers. Only the first occurrence of each trigger is used, and
/// everything from that point to the end of the text counts as negated.
pub const NEGATION_TRIGGERS: &[&str] = &[
    "not", "no", "never", "don't", "doesn't", "didn't", "isn't", "aren't", "wasn't", "weren't",
];

/// Score removed from a label for each keyword found in a negated suffix
pub const NEGATION_PENALTY: f64 = 1.0;

/// Score added to the paired opposite label for each negated keyword
pub const NEGATION_OPPOSITE_BONUS: f64 = 0.5;

/// Multi-word phrases with additive (label, weight) bonuses
pub const PHRASE_BONUSES: &[(&str, &[(EmotionLabel, f64)])] = &[
    ("want to go home", &[(Tired, 2.0), (Anxious, 1.0)]),
    ("need to go home", &[(Tired, 2.0), (Anxious, 1.0)]),
    ("long day", &[(Tired, 2.0)]),
    ("so hungry", &[(Hungry, 3.0)]),
    ("so tired", &[(Tired, 3.0)]),
    ("don't know why", &[(Confused, 2.0)]),
    ("don't even know", &[(Confused, 2.0)]),
    ("just like really want", &[(Anxious, 1.5), (Tired, 1.0)]),
    ("been a long day", &[(Tired, 2.5)]),
    ("had a really long day", &[(Tired, 3.0)]),
    ("feeling happy", &[(Happy, 3.0)]),
    ("feeling sad", &[(Sad, 3.0)]),
    ("feeling angry", &[(Angry, 3.0)]),
    ("feeling tired", &[(Tired, 3.0)]),
    ("feeling hungry", &[(Hungry, 3.0)]),
    ("feeling anxious", &[(Anxious, 3.0)]),
    ("feeling confused", &[(Confused, 3.0)]),
    ("don't even know why", &[(Confused, 3.0)]),
];

/// Topical phrase group. The bonuses apply once if any phrase is present.
#[derive(Debug)]
pub struct ContextCue {
    pub name: &'static str,
    pub phrases: &'static [&'static str],
    pub bonuses: &'static [(EmotionLabel, f64)],
}

pub const CONTEXT_CUES: &[ContextCue] = &[
    ContextCue {
        name: "life-event-success",
        phrases: &["got a promotion", "graduated", "passed my test", "got the job", "won", "won the"],
        bonuses: &[(Happy, 2.0), (Excited, 1.0)],
    },
    ContextCue {
        name: "life-event-loss",
        phrases: &["lost my", "broke up", "failed", "missed", "too late", "never get to"],
        bonuses: &[(Sad, 2.0)],
    },
    ContextCue {
        name: "time-pressure",
        phrases: &["deadline", "running late", "not enough time", "have to finish", "due tomorrow"],
        bonuses: &[(Anxious, 2.0)],
    },
    ContextCue {
        name: "physiological-stress",
        phrases: &["cant sleep", "heart racing", "shaking", "trembling", "sweat", "sweating"],
        bonuses: &[(Anxious, 2.0), (Fearful, 1.0)],
    },
    ContextCue {
        name: "aggression",
        phrases: &["yelled", "screamed", "threw", "broke", "hit", "slammed", "cursed"],
        bonuses: &[(Angry, 2.0)],
    },
    ContextCue {
        name: "sleepiness",
        phrases: &["need a nap", "could sleep for days", "barely keeping eyes open", "so sleepy"],
        bonuses: &[(Tired, 3.0)],
    },
    ContextCue {
        name: "hunger",
        phrases: &["stomach growling", "haven't eaten all day", "need to eat soon", "starving"],
        bonuses: &[(Hungry, 3.0)],
    },
    ContextCue {
        name: "pleasant-weather",
        phrases: &["beautiful day", "sunny", "perfect weather", "lovely outside"],
        bonuses: &[(Happy, 1.0)],
    },
    ContextCue {
        name: "gloomy-situation",
        phrases: &["rainy", "dark", "gloomy", "alone in"],
        bonuses: &[(Sad, 1.0)],
    },
];

/// Exclamation marks: (minimum count, bonuses). First matching tier wins.
pub const EXCLAMATION_TIERS: &[(usize, &[(EmotionLabel, f64)])] = &[
    (3, &[(Excited, 2.0), (Happy, 1.0), (Surprised, 1.0)]),
    (1, &[(Excited, 1.0), (Happy, 0.5)]),
];

/// Question marks: (minimum count, bonuses). First matching tier wins.
pub const QUESTION_TIERS: &[(usize, &[(EmotionLabel, f64)])] = &[
    (3, &[(Confused, 2.0), (Anxious, 1.0)]),
    (1, &[(Confused, 0.5)]),
];

/// Intensifier words; each one present adds [`INTENSIFIER_BOOST`]
pub const INTENSIFIERS: &[&str] = &[
    "very", "really", "extremely", "so", "totally", "absolutely", "completely", "utterly", "super",
];

pub const INTENSIFIER_BOOST: f64 = 0.2;

/// Tie-break order when choosing the two labels that receive the intensifier
/// boost. Differs from [`EmotionLabel::CANONICAL_ORDER`], which only governs
/// final label selection.
pub const BOOST_PRIORITY: [EmotionLabel; EmotionLabel::COUNT] = [
    Happy, Sad, Angry, Anxious, Fearful, Excited, Neutral, Surprised, Disgusted, Confused, Tired,
    Hungry,
];

/// Starting score for Neutral, tipping quiet inputs toward neutrality
pub const NEUTRAL_BIAS: f64 = 0.5;

/// When no label reaches this score, Neutral is forced to [`NEUTRAL_FLOOR_SCORE`]
pub const SIGNAL_THRESHOLD: f64 = 1.0;

pub const NEUTRAL_FLOOR_SCORE: f64 = 2.0;

/// Winning score at which intensity saturates at the label's base value
pub const SCORE_SATURATION: f64 = 2.0;

/// Final scale-up applied to the derived intensity
pub const INTENSITY_SCALE: f64 = 1.2;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_label_has_keywords() {
        for label in EmotionLabel::CANONICAL_ORDER {
            let entry = KEYWORDS.iter().find(|(l, _)| *l == label);
            assert!(entry.is_some_and(|(_, words)| !words.is_empty()), "{} has no keywords", label);
        }
    }

    #[test]
    fn test_tables_are_lowercase() {
        let all_keywords = KEYWORDS.iter().flat_map(|(_, words)| words.iter());
        let phrases = PHRASE_BONUSES.iter().map(|(p, _)| p);
        let cues = CONTEXT_CUES.iter().flat_map(|c| c.phrases.iter());
        for entry in all_keywords.chain(phrases).chain(cues).chain(INTENSIFIERS) {
            assert_eq!(*entry, entry.to_lowercase(), "{:?} would never match", entry);
        }
    }

    #[test]
    fn test_phrase_weights_in_range() {
        for (phrase, bonuses) in PHRASE_BONUSES {
            for (_, weight) in *bonuses {
                assert!((1.0..=3.0).contains(weight), "{} weight {}", phrase, weight);
            }
        }
    }

    #[test]
    fn test_boost_priority_covers_every_label_once() {
        for label in EmotionLabel::CANONICAL_ORDER {
            let count = BOOST_PRIORITY.iter().filter(|l| **l == label).count();
            assert_eq!(count, 1, "{} appears {} times", label, count);
        }
    }

    #[test]
    fn test_nine_intensifiers() {
        assert_eq!(INTENSIFIERS.len(), 9);
    }
}
