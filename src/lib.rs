/*!
# Momento

Momento is a small journaling engine: users capture moments (a title with an
optional note, photo and mood) and the engine derives streaks, statistics and
achievements from them.

## Architecture

- `moments`, `moods`: the data model and mood catalog
- `streak`, `aggregate`: one pass over the moments producing `MomentData`
- `stats`, `achievements`: pure projections of `MomentData`
- `db`, `store`, `photos`, `lock`: persistence collaborators
- `app`: loads state, applies commands, recomputes and persists
- `cli`, `config`, `errors`, `constants`, `dates`: ambient plumbing

The core is pure: every time-dependent calculation takes `now` (with its
timezone) as an argument.

## Usage Example

```rust
use chrono::{TimeZone, Utc};
use momento::achievements::{calculate_achievements, UnlockedAchievements};
use momento::aggregate::MomentData;
use momento::moments::{MomentCollection, NewMoment};
use momento::stats::calculate_stats;

let now = Utc.with_ymd_and_hms(2024, 12, 25, 9, 30, 0).unwrap();
let mut moments = MomentCollection::default();
moments.add(
    NewMoment {
        title: "Opening presents".to_string(),
        mood: Some("happy".to_string()),
        ..NewMoment::default()
    },
    now,
)?;

let data = MomentData::calculate(moments.as_slice(), &now);
let stats = calculate_stats(&data);
let report = calculate_achievements(&data, &UnlockedAchievements::new());

assert_eq!(stats.total, 1);
assert!(report.newly_unlocked.iter().any(|n| n.id == "holiday-christmas"));
# Ok::<(), momento::AppError>(())
```
*/

/// Achievement catalog, rules and evaluation
pub mod achievements;
/// Single-pass aggregation of moments
pub mod aggregate;
/// Application orchestrator
pub mod app;
/// Command-line interface
pub mod cli;
/// Configuration loading and management
pub mod config;
/// Application-wide constants
pub mod constants;
/// Date formatting helpers
pub mod dates;
/// SQLite key-value storage
pub mod db;
/// Error types and utilities for error handling
pub mod errors;
/// Advisory session lock
pub mod lock;
/// Moment model and collection operations
pub mod moments;
/// Mood catalog
pub mod moods;
/// Local photo storage
pub mod photos;
/// Summary statistics
pub mod stats;
/// JSON persistence of moments and unlock state
pub mod store;
/// Day streak calculation
pub mod streak;

// Re-export important types for convenience
pub use app::Momento;
pub use cli::CliArgs;
pub use config::Config;
pub use errors::{AppError, AppResult};
