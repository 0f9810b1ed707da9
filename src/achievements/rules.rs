//! Achievement rules as data.
//!
//! Each catalog entry is decoded once into an `AchievementRule` from its id
//! (and, for content counters, the number in its description). Evaluation
//! then matches on the rule instead of re-parsing strings.

use super::catalog::AchievementDefinition;
use crate::aggregate::{Holiday, MomentData, TimeSlot};
use crate::constants::{CALM_MOOD_TARGET, MOOD_EXPLORER_TARGET, POSITIVE_STREAK_TARGET};
use crate::moods::MOODS;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Aggregate counters a content achievement can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentCounter {
    WithPhotos,
    Favorites,
    WithNotes,
    PerfectMoments,
}

impl ContentCounter {
    fn from_key(key: &str) -> Option<ContentCounter> {
        match key {
            "withPhotos" => Some(ContentCounter::WithPhotos),
            "favorites" => Some(ContentCounter::Favorites),
            "withNotes" => Some(ContentCounter::WithNotes),
            "perfectMoments" => Some(ContentCounter::PerfectMoments),
            _ => None,
        }
    }

    fn read(self, data: &MomentData<'_>) -> usize {
        match self {
            ContentCounter::WithPhotos => data.with_photos,
            ContentCounter::Favorites => data.favorites,
            ContentCounter::WithNotes => data.with_notes,
            ContentCounter::PerfectMoments => data.perfect_moments,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AchievementRule {
    /// Longest streak ever reaches the target.
    Streak { target: usize },
    /// Total moments reach the target; unlocked when the Nth was captured.
    Milestone { target: usize },
    Holiday(Holiday),
    Time(TimeSlot),
    FirstMoment,
    Content {
        counter: ContentCounter,
        target: usize,
    },
    MoodExplorer { target: usize },
    /// Every catalog mood used.
    MoodMaster,
    MoodBalance,
    PositiveStreak { target: usize },
    CalmCount { target: usize },
    /// Not recognised; always locked.
    Unknown,
}

/// First standalone integer in a description, e.g. 25 in
/// "Capture 25 moments with photos".
pub fn extract_target(description: &str) -> Option<usize> {
    description
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .find(|word| !word.is_empty() && word.chars().all(|c| c.is_ascii_digit()))
        .and_then(|word| word.parse().ok())
}

impl AchievementRule {
    pub fn from_definition(definition: &AchievementDefinition) -> AchievementRule {
        let Some((kind, key)) = definition.id.split_once('-') else {
            return AchievementRule::Unknown;
        };

        let rule = match kind {
            "streak" => key
                .parse()
                .ok()
                .map(|target| AchievementRule::Streak { target }),
            "milestone" => key
                .parse()
                .ok()
                .map(|target| AchievementRule::Milestone { target }),
            "holiday" => Holiday::from_key(key).map(AchievementRule::Holiday),
            "time" => TimeSlot::from_key(key).map(AchievementRule::Time),
            "content" if key == "first" => Some(AchievementRule::FirstMoment),
            "content" => ContentCounter::from_key(key).and_then(|counter| {
                extract_target(definition.description)
                    .map(|target| AchievementRule::Content { counter, target })
            }),
            "mood" => match key {
                "explorer" => Some(AchievementRule::MoodExplorer {
                    target: MOOD_EXPLORER_TARGET,
                }),
                "master" => Some(AchievementRule::MoodMaster),
                "balance" => Some(AchievementRule::MoodBalance),
                "positive" => Some(AchievementRule::PositiveStreak {
                    target: POSITIVE_STREAK_TARGET,
                }),
                "calm" => Some(AchievementRule::CalmCount {
                    target: CALM_MOOD_TARGET,
                }),
                _ => None,
            },
            _ => None,
        };

        rule.unwrap_or(AchievementRule::Unknown)
    }

    /// Runs the rule against an aggregate.
    pub fn evaluate(&self, data: &MomentData<'_>) -> RuleOutcome {
        match *self {
            AchievementRule::Streak { target } => RuleOutcome::progress(data.longest_streak(), target),
            AchievementRule::Milestone { target } => RuleOutcome {
                unlocked_at: data.nth_oldest(target).map(|m| m.created_at),
                ..RuleOutcome::progress(data.total, target)
            },
            AchievementRule::Holiday(holiday) => {
                RuleOutcome::first_match(data.holiday_moments.get(&holiday).map(|m| m.created_at))
            }
            AchievementRule::Time(slot) => {
                RuleOutcome::first_match(data.time_moments.get(&slot).map(|m| m.created_at))
            }
            AchievementRule::FirstMoment => RuleOutcome {
                unlocked: data.total >= 1,
                unlocked_at: data.nth_oldest(1).map(|m| m.created_at),
                progress: None,
            },
            AchievementRule::Content { counter, target } => {
                RuleOutcome::progress(counter.read(data), target)
            }
            AchievementRule::MoodExplorer { target } => {
                RuleOutcome::progress(data.unique_mood_count(), target)
            }
            AchievementRule::MoodMaster => RuleOutcome::progress(data.unique_mood_count(), MOODS.len()),
            AchievementRule::MoodBalance => RuleOutcome {
                unlocked: data.mood_balance(),
                ..RuleOutcome::locked()
            },
            AchievementRule::PositiveStreak { target } => {
                RuleOutcome::progress(data.positive_streak, target)
            }
            AchievementRule::CalmCount { target } => RuleOutcome::progress(data.calm_count, target),
            AchievementRule::Unknown => RuleOutcome::locked(),
        }
    }
}

/// Progress toward a locked, count-based achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub current: usize,
    pub target: usize,
}

/// Result of running one rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleOutcome {
    pub unlocked: bool,
    pub unlocked_at: Option<DateTime<Utc>>,
    pub progress: Option<Progress>,
}

impl RuleOutcome {
    fn locked() -> Self {
        RuleOutcome {
            unlocked: false,
            unlocked_at: None,
            progress: None,
        }
    }

    fn progress(current: usize, target: usize) -> Self {
        let unlocked = current >= target;
        RuleOutcome {
            unlocked,
            unlocked_at: None,
            progress: (!unlocked).then_some(Progress { current, target }),
        }
    }

    fn first_match(at: Option<DateTime<Utc>>) -> Self {
        RuleOutcome {
            unlocked: at.is_some(),
            unlocked_at: at,
            progress: None,
        }
    }
}
