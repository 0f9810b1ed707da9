//! Constants used throughout the application.
//!
//! This module contains all constants used in the Momento application, organized
//! into logical groups. Having constants centralized makes them easier to find,
//! modify, and reference consistently.

// Application Metadata
/// The name of the application.
pub const APP_NAME: &str = "momento";
/// The description of the application used in CLI help text.
pub const APP_DESCRIPTION: &str = "Capture little moments and watch your journal grow";

// CLI Arguments & Defaults
/// Log format identifier for plain text.
pub const LOG_FORMAT_TEXT: &str = "text";
/// Log format identifier for JSON.
pub const LOG_FORMAT_JSON: &str = "json";
/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// Configuration Keys & Environment Variables
/// Environment variable for specifying the Momento data directory.
pub const ENV_VAR_MOMENTO_DIR: &str = "MOMENTO_DIR";
/// Standard environment variable for the user's home directory.
pub const ENV_VAR_HOME: &str = "HOME";
/// Default sub-directory name for app data within the user's home directory.
pub const DEFAULT_DATA_SUBDIR: &str = ".momento";
/// File name of the key-value database inside the data directory.
pub const DB_FILE_NAME: &str = "momento.db";
/// Sub-directory holding stored photos.
pub const PHOTOS_SUBDIR: &str = "photos";
/// Lock file guarding read-modify-write sessions.
pub const LOCK_FILE_NAME: &str = "momento.lock";
/// Placeholder string for redacted information in debug output.
pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";

// Storage Keys
/// Key under which the serialized moment list is stored.
pub const STORAGE_KEY_MOMENTS: &str = "@momento_moments";
/// Key under which the unlocked achievement state is stored.
pub const STORAGE_KEY_ACHIEVEMENTS: &str = "@momento_achievements";
/// Key holding an unparseable achievements blob set aside before it is replaced.
pub const STORAGE_KEY_ACHIEVEMENTS_CORRUPT: &str = "@momento_achievements_corrupt";

// File System Parameters
/// Default POSIX permissions for newly created directories (owner read/write/execute).
#[cfg(unix)]
pub const DEFAULT_DIR_PERMISSIONS: u32 = 0o700;
/// Extension used for stored photos when the source has none.
pub const DEFAULT_PHOTO_EXTENSION: &str = "jpg";

// Achievement Rules
/// Distinct moods needed for the explorer badge.
pub const MOOD_EXPLORER_TARGET: usize = 5;
/// Consecutive positive-mood days needed for the positive streak badge.
pub const POSITIVE_STREAK_TARGET: usize = 5;
/// Calm-mood entries needed for the zen badge.
pub const CALM_MOOD_TARGET: usize = 5;
/// Mood value counted by the zen badge.
pub const CALM_MOOD_VALUE: &str = "calm";

// Stats
/// Number of moods kept in the distribution.
pub const TOP_MOOD_COUNT: usize = 5;

// Logging Configuration
/// Service name used in tracing spans and structured logs.
pub const TRACING_SERVICE_NAME: &str = "momento";
/// Name for the root tracing span covering an application invocation.
pub const TRACING_ROOT_SPAN_NAME: &str = "app_invocation";
