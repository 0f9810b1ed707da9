//! Date formatting helpers for moment listings.
//!
//! All functions format in whatever timezone the given `DateTime` carries;
//! callers convert to local time first.

use chrono::{DateTime, Datelike, TimeZone, Weekday};
use std::fmt::Display;

/// Short date, e.g. "Jan 15, 2024".
pub fn format_short_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    date.format("%b %-d, %Y").to_string()
}

/// Month and year, e.g. "January 2024". Used as the gallery group label.
pub fn format_month_year<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    date.format("%B %Y").to_string()
}

/// Date with time, e.g. "Jan 15, 2024 at 3:45 PM".
pub fn format_date_time<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    format!(
        "{} at {}",
        format_short_date(date),
        date.format("%-I:%M %p")
    )
}

/// Compact "last capture" format, e.g. "Mon 15th Jan".
pub fn format_last_capture_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    let day_name = match date.weekday() {
        Weekday::Sun => "Sun",
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tues",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thurs",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
    };

    format!(
        "{} {} {}",
        day_name,
        ordinal(date.day()),
        date.format("%b")
    )
}

/// English ordinal suffix: 1st, 2nd, 3rd, 4th, 11th, 12th, 13th, 21st...
pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}
