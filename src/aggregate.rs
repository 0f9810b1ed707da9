//! Single-pass aggregation over a user's moments.
//!
//! `MomentData` is computed from scratch whenever the moment list changes and
//! is shared by the stats projection and the achievement evaluator, so neither
//! has to walk the raw list again. It borrows the moments it was built from
//! and is never persisted.

use crate::constants::CALM_MOOD_VALUE;
use crate::moments::Moment;
use crate::moods::{valence_of, MoodValence};
use crate::streak::{calculate_streaks, longest_streak, unique_days, Streaks};
use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Timelike, Weekday};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;

/// Calendar holidays tracked for achievements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Holiday {
    NewYear,
    Valentine,
    StPatrick,
    Halloween,
    Christmas,
}

impl Holiday {
    pub const ALL: [Holiday; 5] = [
        Holiday::NewYear,
        Holiday::Valentine,
        Holiday::StPatrick,
        Holiday::Halloween,
        Holiday::Christmas,
    ];

    /// Holiday falling on `date` (any year), matched by month and day.
    pub fn on(date: NaiveDate) -> Option<Holiday> {
        match (date.month(), date.day()) {
            (1, 1) => Some(Holiday::NewYear),
            (2, 14) => Some(Holiday::Valentine),
            (3, 17) => Some(Holiday::StPatrick),
            (10, 31) => Some(Holiday::Halloween),
            (12, 25) => Some(Holiday::Christmas),
            _ => None,
        }
    }

    /// Key used in achievement ids, e.g. `holiday-christmas`.
    pub fn key(self) -> &'static str {
        match self {
            Holiday::NewYear => "newyear",
            Holiday::Valentine => "valentine",
            Holiday::StPatrick => "stpatrick",
            Holiday::Halloween => "halloween",
            Holiday::Christmas => "christmas",
        }
    }

    pub fn from_key(key: &str) -> Option<Holiday> {
        Holiday::ALL.into_iter().find(|h| h.key() == key)
    }
}

/// Time-of-day and day-of-week conditions tracked for achievements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TimeSlot {
    /// 05:00 to 08:59
    EarlyBird,
    /// 22:00 to 01:59
    NightOwl,
    /// Saturday or Sunday
    Weekend,
    /// exactly 00:00
    Midnight,
    /// exactly 12:00
    Noon,
}

impl TimeSlot {
    pub const ALL: [TimeSlot; 5] = [
        TimeSlot::EarlyBird,
        TimeSlot::NightOwl,
        TimeSlot::Weekend,
        TimeSlot::Midnight,
        TimeSlot::Noon,
    ];

    /// Whether a local wall-clock time falls in this slot.
    pub fn matches(self, hour: u32, minute: u32, weekday: Weekday) -> bool {
        match self {
            TimeSlot::EarlyBird => (5..9).contains(&hour),
            TimeSlot::NightOwl => hour >= 22 || hour < 2,
            TimeSlot::Weekend => matches!(weekday, Weekday::Sat | Weekday::Sun),
            TimeSlot::Midnight => hour == 0 && minute == 0,
            TimeSlot::Noon => hour == 12 && minute == 0,
        }
    }

    /// Key used in achievement ids, e.g. `time-earlyBird`.
    pub fn key(self) -> &'static str {
        match self {
            TimeSlot::EarlyBird => "earlyBird",
            TimeSlot::NightOwl => "nightOwl",
            TimeSlot::Weekend => "weekend",
            TimeSlot::Midnight => "midnight",
            TimeSlot::Noon => "noon",
        }
    }

    pub fn from_key(key: &str) -> Option<TimeSlot> {
        TimeSlot::ALL.into_iter().find(|slot| slot.key() == key)
    }
}

/// Derived counters over one snapshot of moments.
#[derive(Debug, Clone, PartialEq)]
pub struct MomentData<'a> {
    pub total: usize,
    /// Moments created in the same local month and year as `now`.
    pub this_month: usize,
    pub with_photos: usize,
    pub favorites: usize,
    pub with_notes: usize,
    /// Photo, non-blank note and mood all present.
    pub perfect_moments: usize,
    pub calm_count: usize,
    /// Mood value to count, in first-seen order.
    pub mood_counts: Vec<(&'a str, usize)>,
    pub unique_moods: BTreeSet<&'a str>,
    pub valences_seen: BTreeSet<MoodValence>,
    pub streaks: Streaks,
    /// Longest run of days with at least one positive-mood moment.
    pub positive_streak: usize,
    /// First moment (in iteration order) per holiday.
    pub holiday_moments: BTreeMap<Holiday, &'a Moment>,
    /// First moment (in iteration order) per time slot.
    pub time_moments: BTreeMap<TimeSlot, &'a Moment>,
    /// All moments, oldest first.
    pub sorted: Vec<&'a Moment>,
}

impl<'a> MomentData<'a> {
    /// Aggregates `moments` relative to `now`; `now`'s timezone decides which
    /// calendar day, month and hour each moment belongs to.
    pub fn calculate<Tz: TimeZone>(moments: &'a [Moment], now: &DateTime<Tz>) -> Self {
        let tz = now.timezone();
        let today = now.date_naive();

        let mut this_month = 0;
        let mut with_photos = 0;
        let mut favorites = 0;
        let mut with_notes = 0;
        let mut perfect_moments = 0;
        let mut calm_count = 0;
        let mut mood_counts: Vec<(&'a str, usize)> = Vec::new();
        let mut mood_index: HashMap<&'a str, usize> = HashMap::new();
        let mut unique_moods = BTreeSet::new();
        let mut valences_seen = BTreeSet::new();
        let mut positive_moments: Vec<&'a Moment> = Vec::new();
        let mut holiday_moments = BTreeMap::new();
        let mut time_moments = BTreeMap::new();

        for moment in moments {
            let local = moment.created_at.with_timezone(&tz);

            if local.month() == today.month() && local.year() == today.year() {
                this_month += 1;
            }

            if moment.has_photo() {
                with_photos += 1;
            }
            if moment.is_favorite {
                favorites += 1;
            }
            if moment.has_notes() {
                with_notes += 1;
            }
            if moment.is_perfect() {
                perfect_moments += 1;
            }

            if let Some(mood) = moment.mood.as_deref() {
                unique_moods.insert(mood);
                match mood_index.get(mood) {
                    Some(&index) => mood_counts[index].1 += 1,
                    None => {
                        mood_index.insert(mood, mood_counts.len());
                        mood_counts.push((mood, 1));
                    }
                }
                if mood == CALM_MOOD_VALUE {
                    calm_count += 1;
                }
                if let Some(valence) = valence_of(mood) {
                    valences_seen.insert(valence);
                    if valence == MoodValence::Positive {
                        positive_moments.push(moment);
                    }
                }
            }

            if let Some(holiday) = Holiday::on(local.date_naive()) {
                holiday_moments.entry(holiday).or_insert(moment);
            }

            let (hour, minute, weekday) = (local.hour(), local.minute(), local.weekday());
            for slot in TimeSlot::ALL {
                if slot.matches(hour, minute, weekday) {
                    time_moments.entry(slot).or_insert(moment);
                }
            }
        }

        let all_days = unique_days(moments.iter().map(|m| &m.created_at), &tz);
        let streaks = calculate_streaks(&all_days, today);
        let positive_streak = if positive_moments.is_empty() {
            0
        } else {
            longest_streak(&unique_days(
                positive_moments.iter().map(|m| &m.created_at),
                &tz,
            ))
        };

        let mut sorted: Vec<&'a Moment> = moments.iter().collect();
        sorted.sort_by_key(|m| m.created_at);

        debug!(
            "Aggregated {} moments: {} days, longest streak {}",
            moments.len(),
            all_days.len(),
            streaks.longest
        );

        MomentData {
            total: moments.len(),
            this_month,
            with_photos,
            favorites,
            with_notes,
            perfect_moments,
            calm_count,
            mood_counts,
            unique_moods,
            valences_seen,
            streaks,
            positive_streak,
            holiday_moments,
            time_moments,
            sorted,
        }
    }

    /// Positive, neutral and negative moods have all been used.
    pub fn mood_balance(&self) -> bool {
        self.valences_seen.len() == 3
    }

    pub fn longest_streak(&self) -> usize {
        self.streaks.longest
    }

    pub fn current_streak(&self) -> usize {
        self.streaks.current
    }

    pub fn unique_mood_count(&self) -> usize {
        self.unique_moods.len()
    }

    /// The `n`th moment ever created (1-based).
    pub fn nth_oldest(&self, n: usize) -> Option<&'a Moment> {
        n.checked_sub(1).and_then(|index| self.sorted.get(index).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, FixedOffset, Utc};

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    fn moment(id: &str, created_at: DateTime<Utc>) -> Moment {
        Moment {
            id: id.to_string(),
            title: id.to_string(),
            notes: None,
            image_uri: None,
            mood: None,
            is_favorite: false,
            created_at,
            updated_at: None,
        }
    }

    fn with_mood(id: &str, created_at: DateTime<Utc>, mood: &str) -> Moment {
        Moment {
            mood: Some(mood.to_string()),
            ..moment(id, created_at)
        }
    }

    #[test]
    fn test_empty_input_is_all_zero() {
        let now = at(2024, 6, 15, 12, 0);
        let data = MomentData::calculate(&[], &now);

        assert_eq!(data.total, 0);
        assert_eq!(data.this_month, 0);
        assert_eq!(data.with_photos, 0);
        assert_eq!(data.perfect_moments, 0);
        assert!(data.mood_counts.is_empty());
        assert!(!data.mood_balance());
        assert_eq!(data.streaks, Streaks::default());
        assert_eq!(data.positive_streak, 0);
        assert!(data.holiday_moments.is_empty());
        assert!(data.time_moments.is_empty());
        assert!(data.nth_oldest(1).is_none());
        assert!(data.nth_oldest(0).is_none());
    }

    #[test]
    fn test_counters() {
        let now = at(2024, 6, 15, 12, 0);
        let moments = vec![
            Moment {
                image_uri: Some("/p/1.jpg".to_string()),
                notes: Some("note".to_string()),
                mood: Some("happy".to_string()),
                is_favorite: true,
                ..moment("perfect", at(2024, 6, 1, 10, 0))
            },
            Moment {
                image_uri: Some("/p/2.jpg".to_string()),
                notes: Some("   ".to_string()),
                ..moment("photo", at(2024, 5, 31, 10, 0))
            },
            Moment {
                notes: Some("only a note".to_string()),
                ..moment("note", at(2023, 6, 10, 10, 0))
            },
        ];

        let data = MomentData::calculate(&moments, &now);
        assert_eq!(data.total, 3);
        assert_eq!(data.this_month, 1);
        assert_eq!(data.with_photos, 2);
        assert_eq!(data.with_notes, 2);
        assert_eq!(data.favorites, 1);
        assert_eq!(data.perfect_moments, 1);
    }

    #[test]
    fn test_mood_tracking() {
        let now = at(2024, 6, 15, 12, 0);
        let moments = vec![
            with_mood("a", at(2024, 6, 1, 10, 0), "calm"),
            with_mood("b", at(2024, 6, 2, 10, 0), "happy"),
            with_mood("c", at(2024, 6, 3, 10, 0), "calm"),
            with_mood("d", at(2024, 6, 4, 10, 0), "sad"),
        ];

        let data = MomentData::calculate(&moments, &now);
        assert_eq!(data.mood_counts, vec![("calm", 2), ("happy", 1), ("sad", 1)]);
        assert_eq!(data.calm_count, 2);
        assert_eq!(data.unique_mood_count(), 3);
        assert!(data.mood_balance());
    }

    #[test]
    fn test_mood_balance_requires_all_three() {
        let now = at(2024, 6, 15, 12, 0);
        let moments = vec![
            with_mood("a", at(2024, 6, 1, 10, 0), "happy"),
            with_mood("b", at(2024, 6, 2, 10, 0), "sad"),
        ];
        assert!(!MomentData::calculate(&moments, &now).mood_balance());
    }

    #[test]
    fn test_positive_streak_counts_mixed_days() {
        let now = at(2024, 6, 15, 12, 0);
        let moments = vec![
            with_mood("a", at(2024, 6, 1, 9, 0), "happy"),
            with_mood("b", at(2024, 6, 1, 20, 0), "sad"),
            with_mood("c", at(2024, 6, 2, 9, 0), "grateful"),
            with_mood("d", at(2024, 6, 3, 9, 0), "calm"),
            with_mood("e", at(2024, 6, 4, 9, 0), "loved"),
        ];
        let data = MomentData::calculate(&moments, &now);
        assert_eq!(data.positive_streak, 2);
        assert_eq!(data.streaks.longest, 4);
    }

    #[test]
    fn test_holiday_first_match_only() {
        let now = at(2024, 12, 30, 12, 0);
        let moments = vec![
            moment("first", at(2023, 12, 25, 18, 0)),
            moment("second", at(2024, 12, 25, 9, 0)),
            moment("plain", at(2024, 12, 24, 9, 0)),
        ];
        let data = MomentData::calculate(&moments, &now);
        assert_eq!(data.holiday_moments.len(), 1);
        assert_eq!(data.holiday_moments[&Holiday::Christmas].id, "first");
    }

    #[test]
    fn test_time_slots() {
        // 2024-06-15 is a Saturday
        let now = at(2024, 6, 20, 12, 0);
        let moments = vec![
            moment("early", at(2024, 6, 11, 5, 30)),
            moment("owl", at(2024, 6, 11, 1, 59)),
            moment("weekend", at(2024, 6, 15, 15, 0)),
            moment("midnight", at(2024, 6, 12, 0, 0)),
            moment("noon", at(2024, 6, 12, 12, 0)),
            moment("late-morning", at(2024, 6, 12, 9, 0)),
        ];
        let data = MomentData::calculate(&moments, &now);
        assert_eq!(data.time_moments[&TimeSlot::EarlyBird].id, "early");
        assert_eq!(data.time_moments[&TimeSlot::NightOwl].id, "owl");
        assert_eq!(data.time_moments[&TimeSlot::Weekend].id, "weekend");
        assert_eq!(data.time_moments[&TimeSlot::Midnight].id, "midnight");
        assert_eq!(data.time_moments[&TimeSlot::Noon].id, "noon");
    }

    #[test]
    fn test_time_slot_boundaries() {
        assert!(TimeSlot::EarlyBird.matches(5, 0, Weekday::Mon));
        assert!(TimeSlot::EarlyBird.matches(8, 59, Weekday::Mon));
        assert!(!TimeSlot::EarlyBird.matches(9, 0, Weekday::Mon));
        assert!(TimeSlot::NightOwl.matches(22, 0, Weekday::Mon));
        assert!(TimeSlot::NightOwl.matches(0, 30, Weekday::Mon));
        assert!(!TimeSlot::NightOwl.matches(2, 0, Weekday::Mon));
        assert!(!TimeSlot::Noon.matches(12, 1, Weekday::Mon));
        assert!(TimeSlot::Weekend.matches(10, 0, Weekday::Sun));
        assert!(!TimeSlot::Weekend.matches(10, 0, Weekday::Fri));
    }

    #[test]
    fn test_local_timezone_drives_buckets() {
        // 03:30 UTC is 22:30 the previous evening in UTC-5
        let minus_five = FixedOffset::west_opt(5 * 3600).unwrap();
        let now = at(2024, 6, 20, 12, 0).with_timezone(&minus_five);
        let moments = vec![moment("late", at(2024, 6, 11, 3, 30))];
        let data = MomentData::calculate(&moments, &now);
        assert!(data.time_moments.contains_key(&TimeSlot::NightOwl));
        assert!(!data.time_moments.contains_key(&TimeSlot::EarlyBird));
    }

    #[test]
    fn test_sorted_view_is_oldest_first() {
        let now = at(2024, 6, 20, 12, 0);
        let base = at(2024, 6, 1, 12, 0);
        let moments = vec![
            moment("c", base + Duration::days(2)),
            moment("a", base),
            moment("b", base + Duration::days(1)),
        ];
        let data = MomentData::calculate(&moments, &now);
        let ids: Vec<_> = data.sorted.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(data.nth_oldest(1).unwrap().id, "a");
        assert_eq!(data.nth_oldest(3).unwrap().id, "c");
        assert!(data.nth_oldest(4).is_none());
    }

    #[test]
    fn test_idempotent() {
        let now = at(2024, 6, 20, 12, 0);
        let moments = vec![
            with_mood("a", at(2024, 6, 19, 7, 0), "happy"),
            with_mood("b", at(2024, 6, 20, 22, 0), "tired"),
        ];
        let first = MomentData::calculate(&moments, &now);
        let second = MomentData::calculate(&moments, &now);
        assert_eq!(first, second);
    }

    #[test]
    fn test_holiday_keys_round_trip() {
        for holiday in Holiday::ALL {
            assert_eq!(Holiday::from_key(holiday.key()), Some(holiday));
        }
        for slot in TimeSlot::ALL {
            assert_eq!(TimeSlot::from_key(slot.key()), Some(slot));
        }
        assert!(Holiday::from_key("easter").is_none());
    }
}
