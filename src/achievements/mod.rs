//! Achievement catalog, rule decoding and evaluation.

pub mod catalog;
pub mod evaluate;
pub mod group;
pub mod rules;

pub use catalog::{definition_by_id, AchievementCategory, AchievementDefinition, ACHIEVEMENT_DEFINITIONS};
pub use evaluate::{
    calculate_achievements, unlocked_count, Achievement, AchievementEvaluator, AchievementReport,
    NewlyUnlocked, UnlockedAchievements,
};
pub use group::{group_achievements_by_category, AchievementFilter, AchievementGroup};
pub use rules::{AchievementRule, Progress};
