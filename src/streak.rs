//! Consecutive-day streak calculation.
//!
//! Timestamps are bucketed into calendar days in a caller-supplied timezone,
//! deduplicated and sorted. Two days are consecutive when their calendar
//! dates differ by exactly one, so daylight-saving shifts never split a run.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

/// Current and longest run lengths, in days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Streaks {
    /// Run ending today or yesterday, 0 if the latest day is older.
    pub current: usize,
    /// Longest run ever.
    pub longest: usize,
}

/// Calendar days (in `tz`) that contain at least one timestamp, oldest first.
pub fn unique_days<'a, I, Tz>(timestamps: I, tz: &Tz) -> Vec<NaiveDate>
where
    I: IntoIterator<Item = &'a DateTime<Utc>>,
    Tz: TimeZone,
{
    let mut days: Vec<NaiveDate> = timestamps
        .into_iter()
        .map(|ts| ts.with_timezone(tz).date_naive())
        .collect();
    days.sort_unstable();
    days.dedup();
    days
}

fn is_next_day(previous: NaiveDate, day: NaiveDate) -> bool {
    previous.succ_opt() == Some(day)
}

/// Longest run of consecutive days in a sorted, deduplicated day list.
pub fn longest_streak(days: &[NaiveDate]) -> usize {
    if days.is_empty() {
        return 0;
    }

    let mut longest = 1;
    let mut run = 1;
    for pair in days.windows(2) {
        if is_next_day(pair[0], pair[1]) {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 1;
        }
    }
    longest
}

/// Run of consecutive days ending at the most recent day, provided that day
/// is `today` or the day before. A streak that ended yesterday is still
/// active until today passes without an entry.
pub fn current_streak(days: &[NaiveDate], today: NaiveDate) -> usize {
    let Some(&most_recent) = days.last() else {
        return 0;
    };

    let yesterday = today.pred_opt();
    if most_recent != today && Some(most_recent) != yesterday {
        return 0;
    }

    let mut streak = 1;
    let mut expected = most_recent;
    for &day in days.iter().rev().skip(1) {
        match expected.pred_opt() {
            Some(previous) if previous == day => {
                streak += 1;
                expected = day;
            }
            _ => break,
        }
    }
    streak
}

/// Both streaks from one day list.
pub fn calculate_streaks(days: &[NaiveDate], today: NaiveDate) -> Streaks {
    Streaks {
        current: current_streak(days, today),
        longest: longest_streak(days),
    }
}
