//! User-facing summary statistics derived from a `MomentData` aggregate.

use crate::aggregate::MomentData;
use crate::constants::TOP_MOOD_COUNT;
use crate::moods::mood_by_value;
use serde::Serialize;
use tracing::debug;

/// One row of the mood distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoodDistributionItem {
    pub emoji: &'static str,
    pub label: &'static str,
    pub value: &'static str,
    pub count: usize,
    /// Share of all moments, rounded to a whole percent.
    pub percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MomentStats {
    pub total: usize,
    pub this_month: usize,
    pub with_photos: usize,
    pub with_notes: usize,
    pub favorites: usize,
    /// Current streak in days.
    pub streak: usize,
    /// Most used moods, highest count first, at most five.
    pub mood_distribution: Vec<MoodDistributionItem>,
}

fn percentage(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (count as f64 / total as f64 * 100.0).round() as u32
}

/// Projects the aggregate into display statistics.
///
/// Mood values missing from the catalog are skipped. Ties keep the order in
/// which the moods were first seen.
pub fn calculate_stats(data: &MomentData<'_>) -> MomentStats {
    let mut mood_distribution: Vec<MoodDistributionItem> = data
        .mood_counts
        .iter()
        .filter(|(_, count)| *count > 0)
        .filter_map(|&(value, count)| {
            let Some(mood) = mood_by_value(value) else {
                debug!("Skipping unknown mood in distribution: {}", value);
                return None;
            };
            Some(MoodDistributionItem {
                emoji: mood.emoji,
                label: mood.label,
                value: mood.value,
                count,
                percentage: percentage(count, data.total),
            })
        })
        .collect();

    mood_distribution.sort_by(|a, b| b.count.cmp(&a.count));
    mood_distribution.truncate(TOP_MOOD_COUNT);

    MomentStats {
        total: data.total,
        this_month: data.this_month,
        with_photos: data.with_photos,
        with_notes: data.with_notes,
        favorites: data.favorites,
        streak: data.current_streak(),
        mood_distribution,
    }
}
