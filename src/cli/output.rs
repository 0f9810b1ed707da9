//! Plain-text rendering of command results.
//!
//! Everything returns a `String`; `main` decides where it goes.

use crate::achievements::{definition_by_id, AchievementGroup, NewlyUnlocked};
use crate::dates::{format_date_time, format_last_capture_date, format_short_date};
use crate::moments::{Moment, MonthGroup};
use crate::moods::{mood_by_value, MOODS};
use crate::stats::MomentStats;
use chrono::TimeZone;
use std::fmt::{Display, Write};

fn mood_badge(moment: &Moment) -> String {
    match moment.mood.as_deref().and_then(mood_by_value) {
        Some(mood) => format!(" {}", mood.emoji),
        None => String::new(),
    }
}

/// One line per moment: id, date, title, mood and markers.
pub fn render_moment_line<Tz: TimeZone>(moment: &Moment, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    let mut line = format!(
        "{}  {}  {}{}",
        moment.id,
        format_short_date(&moment.created_at.with_timezone(tz)),
        moment.title,
        mood_badge(moment)
    );
    if moment.is_favorite {
        line.push_str(" ★");
    }
    if moment.has_photo() {
        line.push_str(" [photo]");
    }
    line
}

pub fn render_moment_list<Tz: TimeZone>(moments: &[Moment], tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    if moments.is_empty() {
        return "No moments yet. Capture one with `momento add --title ...`".to_string();
    }
    moments
        .iter()
        .map(|m| render_moment_line(m, tz))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_moment_detail<Tz: TimeZone>(moment: &Moment, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    let mut out = String::new();
    let _ = writeln!(out, "{}{}", moment.title, mood_badge(moment));
    let _ = writeln!(
        out,
        "Captured {}",
        format_date_time(&moment.created_at.with_timezone(tz))
    );
    if let Some(updated_at) = &moment.updated_at {
        let _ = writeln!(
            out,
            "Edited {}",
            format_date_time(&updated_at.with_timezone(tz))
        );
    }
    if let Some(mood) = moment.mood.as_deref().and_then(mood_by_value) {
        let _ = writeln!(out, "Mood: {} ({})", mood.label, mood.valence);
    }
    if moment.is_favorite {
        let _ = writeln!(out, "Favorite");
    }
    if let Some(image) = moment.image_uri.as_deref().filter(|uri| !uri.is_empty()) {
        let _ = writeln!(out, "Photo: {}", image);
    }
    if let Some(notes) = moment.notes.as_deref().filter(|_| moment.has_notes()) {
        let _ = writeln!(out, "\n{}", notes);
    }
    let _ = write!(out, "id: {}", moment.id);
    out
}

pub fn render_gallery<Tz: TimeZone>(groups: &[MonthGroup<'_>], tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    if groups.is_empty() {
        return "No moments yet.".to_string();
    }
    let mut out = String::new();
    for (i, group) in groups.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "{} ({})", group.month_name, group.moments.len());
        for moment in &group.moments {
            let _ = writeln!(out, "  {}", render_moment_line(moment, tz));
        }
    }
    out.trim_end().to_string()
}

/// Stats summary. `last_capture` is the newest moment, if any.
pub fn render_stats<Tz: TimeZone>(
    stats: &MomentStats,
    last_capture: Option<&Moment>,
    tz: &Tz,
) -> String
where
    Tz::Offset: Display,
{
    let mut out = String::new();
    let _ = writeln!(out, "Moments:       {}", stats.total);
    let _ = writeln!(out, "This month:    {}", stats.this_month);
    let _ = writeln!(out, "With photos:   {}", stats.with_photos);
    let _ = writeln!(out, "With notes:    {}", stats.with_notes);
    let _ = writeln!(out, "Favorites:     {}", stats.favorites);
    let _ = writeln!(
        out,
        "Streak:        {} day{}",
        stats.streak,
        if stats.streak == 1 { "" } else { "s" }
    );
    if let Some(moment) = last_capture {
        let _ = writeln!(
            out,
            "Last capture:  {}",
            format_last_capture_date(&moment.created_at.with_timezone(tz))
        );
    }
    if !stats.mood_distribution.is_empty() {
        let _ = writeln!(out, "\nTop moods:");
        for item in &stats.mood_distribution {
            let _ = writeln!(
                out,
                "  {} {:<12} {:>3} ({}%)",
                item.emoji, item.label, item.count, item.percentage
            );
        }
    }
    out.trim_end().to_string()
}

pub fn render_achievements(
    groups: &[AchievementGroup<'_>],
    unlocked: usize,
    total: usize,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}/{} achievements unlocked", unlocked, total);
    for group in groups {
        let _ = writeln!(
            out,
            "\n{} ({}/{})",
            group.category,
            group.unlocked_count(),
            group.achievements.len()
        );
        for achievement in &group.achievements {
            let definition = achievement.definition;
            let marker = if achievement.unlocked { "✔" } else { " " };
            let mut line = format!(
                "  [{}] {} {}: {}",
                marker, definition.emoji, definition.title, definition.description
            );
            if let Some(progress) = &achievement.progress {
                let _ = write!(line, " ({}/{})", progress.current, progress.target);
            }
            let _ = writeln!(out, "{}", line);
        }
    }
    out.trim_end().to_string()
}

/// Celebration lines for achievements unlocked by the last command.
pub fn render_newly_unlocked(newly: &[NewlyUnlocked]) -> Option<String> {
    if newly.is_empty() {
        return None;
    }
    let lines: Vec<String> = newly
        .iter()
        .filter_map(|n| definition_by_id(n.id))
        .map(|d| format!("Achievement unlocked: {} {}", d.emoji, d.title))
        .collect();
    Some(lines.join("\n"))
}

pub fn render_moods() -> String {
    MOODS
        .iter()
        .map(|m| format!("{} {:<12} {:<10} {}", m.emoji, m.value, m.valence, m.label))
        .collect::<Vec<_>>()
        .join("\n")
}
