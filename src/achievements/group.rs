//! Grouping and filtering evaluated achievements for display.

use super::catalog::AchievementCategory;
use super::evaluate::Achievement;
use clap::ValueEnum;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum AchievementFilter {
    #[default]
    All,
    Unlocked,
    Locked,
}

impl AchievementFilter {
    pub fn accepts(self, achievement: &Achievement) -> bool {
        match self {
            AchievementFilter::All => true,
            AchievementFilter::Unlocked => achievement.unlocked,
            AchievementFilter::Locked => !achievement.unlocked,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AchievementGroup<'a> {
    pub category: AchievementCategory,
    pub achievements: Vec<&'a Achievement>,
}

impl AchievementGroup<'_> {
    pub fn unlocked_count(&self) -> usize {
        self.achievements.iter().filter(|a| a.unlocked).count()
    }
}

/// Groups achievements by category in display order. Within a group unlocked
/// achievements come first; catalog order is otherwise kept. Empty groups
/// are omitted.
pub fn group_achievements_by_category(
    achievements: &[Achievement],
    filter: AchievementFilter,
) -> Vec<AchievementGroup<'_>> {
    let mut by_order: BTreeMap<u8, AchievementGroup<'_>> = BTreeMap::new();

    for achievement in achievements.iter().filter(|a| filter.accepts(a)) {
        let category = achievement.definition.category;
        by_order
            .entry(category.order())
            .or_insert_with(|| AchievementGroup {
                category,
                achievements: Vec::new(),
            })
            .achievements
            .push(achievement);
    }

    by_order
        .into_values()
        .map(|mut group| {
            group.achievements.sort_by_key(|a| !a.unlocked);
            group
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::achievements::catalog::ACHIEVEMENT_DEFINITIONS;

    fn achievements(unlocked_ids: &[&str]) -> Vec<Achievement> {
        ACHIEVEMENT_DEFINITIONS
            .iter()
            .map(|definition| Achievement {
                definition,
                unlocked: unlocked_ids.contains(&definition.id),
                unlocked_at: None,
                progress: None,
            })
            .collect()
    }

    #[test]
    fn test_groups_in_category_order() {
        let all = achievements(&[]);
        let groups = group_achievements_by_category(&all, AchievementFilter::All);
        let categories: Vec<_> = groups.iter().map(|g| g.category).collect();
        assert_eq!(
            categories,
            vec![
                AchievementCategory::Milestone,
                AchievementCategory::Streak,
                AchievementCategory::Content,
                AchievementCategory::Mood,
                AchievementCategory::Time,
                AchievementCategory::Holiday,
            ]
        );
        assert!(groups.iter().all(|g| g.achievements.len() == 5));
    }

    #[test]
    fn test_unlocked_first_within_group() {
        let all = achievements(&["streak-30", "streak-7"]);
        let groups = group_achievements_by_category(&all, AchievementFilter::All);
        let streaks = groups
            .iter()
            .find(|g| g.category == AchievementCategory::Streak)
            .unwrap();
        let ids: Vec<_> = streaks.achievements.iter().map(|a| a.id()).collect();
        assert_eq!(
            ids,
            vec!["streak-7", "streak-30", "streak-3", "streak-14", "streak-60"]
        );
        assert_eq!(streaks.unlocked_count(), 2);
    }

    #[test]
    fn test_filters() {
        let all = achievements(&["mood-calm", "time-noon"]);

        let unlocked = group_achievements_by_category(&all, AchievementFilter::Unlocked);
        assert_eq!(unlocked.len(), 2);
        assert_eq!(unlocked[0].category, AchievementCategory::Mood);
        assert_eq!(unlocked[1].category, AchievementCategory::Time);

        let locked = group_achievements_by_category(&all, AchievementFilter::Locked);
        let count: usize = locked.iter().map(|g| g.achievements.len()).sum();
        assert_eq!(count, 28);
    }
}
