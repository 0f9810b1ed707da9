//! Configuration management for the momento application.
//!
//! This module handles loading and validating configuration settings from environment
//! variables, with sensible defaults. Everything momento persists lives under one
//! data directory: the key-value database, the stored photos and the lock file.
//!
//! # Environment Variables
//!
//! - `MOMENTO_DIR`: Path to the data directory (defaults to ~/.momento)
//! - `HOME`: Used for expanding the default data directory path

use crate::constants;
use crate::errors::{AppError, AppResult};
use std::env;
use std::fmt;
use std::fs::{self, Permissions};
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration for the momento application.
///
/// # Examples
///
/// ```
/// use momento::Config;
/// use std::path::PathBuf;
///
/// let config = Config::from_data_dir(PathBuf::from("/path/to/momento"));
/// assert_eq!(config.db_path, PathBuf::from("/path/to/momento/momento.db"));
/// assert_eq!(config.photos_dir, PathBuf::from("/path/to/momento/photos"));
/// ```
#[derive(Clone)]
pub struct Config {
    /// Root directory for all persisted state.
    pub data_dir: PathBuf,

    /// SQLite key-value database file.
    pub db_path: PathBuf,

    /// Directory owned by the photo store.
    pub photos_dir: PathBuf,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("data_dir", &constants::REDACTED_PLACEHOLDER)
            .field("db_path", &constants::REDACTED_PLACEHOLDER)
            .field("photos_dir", &constants::REDACTED_PLACEHOLDER)
            .finish()
    }
}

impl Config {
    /// Derives every path from a single data directory.
    pub fn from_data_dir(data_dir: PathBuf) -> Self {
        Config {
            db_path: data_dir.join(constants::DB_FILE_NAME),
            photos_dir: data_dir.join(constants::PHOTOS_SUBDIR),
            data_dir,
        }
    }

    /// Path of the advisory lock file.
    pub fn lock_path(&self) -> PathBuf {
        self.data_dir.join(constants::LOCK_FILE_NAME)
    }

    /// Loads configuration from environment variables with sensible defaults.
    ///
    /// The data directory path is expanded using `shellexpand` to handle `~`
    /// and environment variable references.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if:
    /// - The data directory path expansion fails
    /// - The resulting path is empty
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use momento::Config;
    ///
    /// match Config::load() {
    ///     Ok(config) => println!("Loaded config: {:?}", config),
    ///     Err(err) => eprintln!("Failed to load config: {}", err),
    /// }
    /// ```
    pub fn load() -> AppResult<Self> {
        let data_dir_str = env::var(constants::ENV_VAR_MOMENTO_DIR).unwrap_or_else(|_| {
            let home = env::var(constants::ENV_VAR_HOME).unwrap_or_default();
            format!("{}/{}", home, constants::DEFAULT_DATA_SUBDIR)
        });

        let expanded_path = shellexpand::full(&data_dir_str)
            .map_err(|e| AppError::Config(format!("Failed to expand path: {}", e)))?;

        let data_dir = PathBuf::from(expanded_path.into_owned());

        if data_dir.as_os_str().is_empty() {
            return Err(AppError::Config("Data directory path is empty".to_string()));
        }

        Ok(Config::from_data_dir(data_dir))
    }

    /// Validates that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` with one of the following messages:
    /// - "Data directory path is empty" if the data directory path is empty
    /// - "Data directory must be an absolute path" if the path is relative
    ///
    /// # Examples
    ///
    /// ```
    /// use momento::Config;
    /// use std::path::PathBuf;
    ///
    /// let valid = Config::from_data_dir(PathBuf::from("/absolute/path"));
    /// assert!(valid.validate().is_ok());
    ///
    /// let invalid = Config::from_data_dir(PathBuf::from("relative/path"));
    /// assert!(invalid.validate().is_err());
    /// ```
    pub fn validate(&self) -> AppResult<()> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(AppError::Config("Data directory path is empty".to_string()));
        }

        if !self.data_dir.is_absolute() {
            return Err(AppError::Config(
                "Data directory must be an absolute path".to_string(),
            ));
        }

        Ok(())
    }
}

/// Ensures a directory exists, creating it with owner-only permissions.
///
/// # Errors
///
/// Returns:
/// - `AppError::Config` if the provided path is not an absolute path
/// - `AppError::Io` if the directory creation fails
pub fn ensure_directory_exists(dir: &Path) -> AppResult<()> {
    if !dir.is_absolute() {
        return Err(AppError::Config(format!(
            "Directory path must be absolute: {}",
            dir.display()
        )));
    }

    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| {
            AppError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to create directory: {}", e),
            ))
        })?;

        #[cfg(unix)]
        {
            let permissions = Permissions::from_mode(constants::DEFAULT_DIR_PERMISSIONS);
            fs::set_permissions(dir, permissions).map_err(|e| {
                AppError::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to set secure permissions on directory: {}", e),
                ))
            })?;
            debug!("Set 0o700 permissions on {}", dir.display());
        }
    }
    Ok(())
}
