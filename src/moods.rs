//! Mood catalog.
//!
//! A fixed set of moods a moment can be tagged with. Each mood carries a
//! display emoji and label plus a valence used by the balance and
//! positive-streak achievements. The catalog is immutable.

use serde::Serialize;
use std::fmt;

/// Positive, neutral or negative classification of a mood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodValence {
    Positive,
    Neutral,
    Negative,
}

impl fmt::Display for MoodValence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MoodValence::Positive => "positive",
            MoodValence::Neutral => "neutral",
            MoodValence::Negative => "negative",
        };
        f.pad(label)
    }
}

/// A single catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Mood {
    pub emoji: &'static str,
    /// Unique key stored on moments.
    pub value: &'static str,
    pub label: &'static str,
    pub valence: MoodValence,
}

const fn mood(
    emoji: &'static str,
    value: &'static str,
    label: &'static str,
    valence: MoodValence,
) -> Mood {
    Mood {
        emoji,
        value,
        label,
        valence,
    }
}

/// Every mood, grouped by valence.
pub const MOODS: &[Mood] = &[
    mood("😊", "happy", "Happy", MoodValence::Positive),
    mood("🥰", "loved", "Loved", MoodValence::Positive),
    mood("✨", "grateful", "Grateful", MoodValence::Positive),
    mood("😌", "peaceful", "Peaceful", MoodValence::Positive),
    mood("🤗", "warm", "Warm", MoodValence::Positive),
    mood("🌙", "content", "Content", MoodValence::Positive),
    mood("💫", "inspired", "Inspired", MoodValence::Positive),
    mood("🤔", "thoughtful", "Thoughtful", MoodValence::Neutral),
    mood("🧘", "calm", "Calm", MoodValence::Neutral),
    mood("☕", "cozy", "Cozy", MoodValence::Neutral),
    mood("📖", "reflective", "Reflective", MoodValence::Neutral),
    mood("🌿", "grounded", "Grounded", MoodValence::Neutral),
    mood("🌅", "hopeful", "Hopeful", MoodValence::Neutral),
    mood("😔", "sad", "Sad", MoodValence::Negative),
    mood("😴", "tired", "Tired", MoodValence::Negative),
    mood("😟", "worried", "Worried", MoodValence::Negative),
    mood("😤", "frustrated", "Frustrated", MoodValence::Negative),
    mood("🌧️", "melancholy", "Melancholy", MoodValence::Negative),
];

/// Looks up a mood by its stored value.
pub fn mood_by_value(value: &str) -> Option<&'static Mood> {
    MOODS.iter().find(|mood| mood.value == value)
}

/// Valence of a mood value, `None` for values outside the catalog.
pub fn valence_of(value: &str) -> Option<MoodValence> {
    mood_by_value(value).map(|mood| mood.valence)
}
