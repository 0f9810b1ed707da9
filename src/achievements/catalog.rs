//! The fixed achievement catalog.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementCategory {
    Streak,
    Holiday,
    Milestone,
    Time,
    Content,
    Mood,
}

impl AchievementCategory {
    /// Display priority, lowest first.
    pub fn order(self) -> u8 {
        match self {
            AchievementCategory::Milestone => 1,
            AchievementCategory::Streak => 2,
            AchievementCategory::Content => 3,
            AchievementCategory::Mood => 4,
            AchievementCategory::Time => 5,
            AchievementCategory::Holiday => 6,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AchievementCategory::Milestone => "Milestones",
            AchievementCategory::Streak => "Streaks",
            AchievementCategory::Content => "Content",
            AchievementCategory::Mood => "Moods",
            AchievementCategory::Time => "Time-Based",
            AchievementCategory::Holiday => "Holidays",
        }
    }
}

impl fmt::Display for AchievementCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AchievementDefinition {
    pub id: &'static str,
    pub title: &'static str,
    /// May carry the numeric target, e.g. "Capture 25 moments with photos".
    pub description: &'static str,
    pub emoji: &'static str,
    pub category: AchievementCategory,
}

const fn def(
    id: &'static str,
    title: &'static str,
    description: &'static str,
    emoji: &'static str,
    category: AchievementCategory,
) -> AchievementDefinition {
    AchievementDefinition {
        id,
        title,
        description,
        emoji,
        category,
    }
}

use AchievementCategory::{Content, Holiday, Milestone, Mood, Streak, Time};

/// Every achievement, in catalog order.
pub const ACHIEVEMENT_DEFINITIONS: &[AchievementDefinition] = &[
    def("streak-3", "Getting Started", "3 day streak", "🔥", Streak),
    def("streak-7", "Week Warrior", "7 day streak", "💪", Streak),
    def("streak-14", "Two Weeks", "14 day streak", "🎯", Streak),
    def("streak-30", "Monthly Master", "30 day streak", "⭐", Streak),
    def("streak-60", "Two Month Legend", "60 day streak", "🌟", Streak),
    def("milestone-5", "Getting Started", "Capture 5 moments", "🌱", Milestone),
    def("milestone-10", "First Ten", "Capture 10 moments", "✨", Milestone),
    def("milestone-25", "Quarter Century", "Capture 25 moments", "🎊", Milestone),
    def("milestone-50", "Half Century", "Capture 50 moments", "🌟", Milestone),
    def("milestone-100", "Centurion", "Capture 100 moments", "💯", Milestone),
    def(
        "holiday-newyear",
        "New Year's Day",
        "Capture a moment on New Year's Day",
        "🎉",
        Holiday,
    ),
    def(
        "holiday-valentine",
        "Valentine's Day",
        "Capture a moment on Valentine's Day",
        "💝",
        Holiday,
    ),
    def(
        "holiday-stpatrick",
        "St. Patrick's Day",
        "Capture a moment on St. Patrick's Day",
        "🍀",
        Holiday,
    ),
    def(
        "holiday-halloween",
        "Halloween",
        "Capture a moment on Halloween",
        "🎃",
        Holiday,
    ),
    def(
        "holiday-christmas",
        "Christmas",
        "Capture a moment on Christmas",
        "🎄",
        Holiday,
    ),
    def(
        "time-earlyBird",
        "Early Bird",
        "Capture a moment between 5-9 AM",
        "🌅",
        Time,
    ),
    def(
        "time-nightOwl",
        "Night Owl",
        "Capture a moment between 10 PM-2 AM",
        "🦉",
        Time,
    ),
    def(
        "time-weekend",
        "Weekend Warrior",
        "Capture a moment on the weekend",
        "🎉",
        Time,
    ),
    def(
        "time-midnight",
        "Midnight Magic",
        "Capture a moment at midnight",
        "🕛",
        Time,
    ),
    def("time-noon", "High Noon", "Capture a moment at noon", "☀️", Time),
    def(
        "content-first",
        "First Memory",
        "Capture your first moment",
        "🎬",
        Content,
    ),
    def(
        "content-withPhotos",
        "Photo Lover",
        "Capture 25 moments with photos",
        "📸",
        Content,
    ),
    def(
        "content-favorites",
        "Selective",
        "Mark 10 moments as favorites",
        "⭐",
        Content,
    ),
    def(
        "content-withNotes",
        "Storyteller",
        "Add notes to 15 moments",
        "📝",
        Content,
    ),
    def(
        "content-perfectMoments",
        "Perfect Moment",
        "Create 5 perfect moments (photo + note + mood)",
        "💎",
        Content,
    ),
    def("mood-explorer", "Mood Explorer", "Use 5 different moods", "🌈", Mood),
    def("mood-master", "Mood Master", "Use all moods", "🎭", Mood),
    def(
        "mood-balance",
        "Mood Balance",
        "Use positive, neutral, and negative moods",
        "⚖️",
        Mood,
    ),
    def(
        "mood-positive",
        "Positive Streak",
        "Use positive moods for 5 days in a row",
        "☀️",
        Mood,
    ),
    def("mood-calm", "Zen Master", "Use 'calm' mood 5 times", "🧘", Mood),
];

pub fn definition_by_id(id: &str) -> Option<&'static AchievementDefinition> {
    ACHIEVEMENT_DEFINITIONS.iter().find(|d| d.id == id)
}
