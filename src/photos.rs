//! Local photo storage.
//!
//! Photos are copied into a directory owned by the app, leaving the source
//! file alone. `delete_local_photo` only touches files inside that directory.

use crate::config::ensure_directory_exists;
use crate::constants::DEFAULT_PHOTO_EXTENSION;
use crate::errors::{AppResult, PhotoError};
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct PhotoStore {
    dir: PathBuf,
}

impl PhotoStore {
    pub fn new(dir: PathBuf) -> Self {
        PhotoStore { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Copies `source` into the photo directory and returns the stored path.
    ///
    /// # Errors
    ///
    /// `PhotoError::SourceMissing` if `source` is not a file,
    /// `PhotoError::CopyFailed` if the copy fails.
    pub fn save_photo(&self, source: &Path) -> AppResult<PathBuf> {
        if !source.is_file() {
            return Err(PhotoError::SourceMissing {
                path: source.to_path_buf(),
            }
            .into());
        }

        ensure_directory_exists(&self.dir)?;

        let extension = source
            .extension()
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty())
            .unwrap_or(DEFAULT_PHOTO_EXTENSION);
        let file_name = format!(
            "photo_{}_{}.{}",
            Utc::now().timestamp_millis(),
            Uuid::new_v4().simple(),
            extension
        );
        let destination = self.dir.join(file_name);

        fs::copy(source, &destination).map_err(|source_err| PhotoError::CopyFailed {
            path: source.to_path_buf(),
            source: source_err,
        })?;

        info!("Stored photo at {:?}", destination);
        Ok(destination)
    }

    fn is_inside(&self, path: &Path) -> bool {
        match (self.dir.canonicalize(), path.canonicalize()) {
            (Ok(dir), Ok(path)) => path.starts_with(dir),
            _ => path.starts_with(&self.dir),
        }
    }

    /// Deletes a photo previously stored by this store. Paths outside the
    /// photo directory are ignored. Failures are logged.
    pub fn delete_local_photo(&self, path: &Path) {
        if path.as_os_str().is_empty() || !self.is_inside(path) {
            debug!("Not deleting {:?}: outside photo directory", path);
            return;
        }
        match fs::remove_file(path) {
            Ok(()) => debug!("Deleted photo {:?}", path),
            Err(e) => warn!("Failed to delete photo {:?}: {}", path, e),
        }
    }
}

/// Whether an image path points at an existing file. False for empty paths
/// and on any error.
pub fn image_file_exists(path: &str) -> bool {
    if path.is_empty() {
        return false;
    }
    fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use tempfile::tempdir;

    fn store_in(root: &Path) -> PhotoStore {
        PhotoStore::new(root.join("photos"))
    }

    #[test]
    fn test_save_photo_copies_with_generated_name() {
        let root = tempdir().unwrap();
        let source = root.path().join("IMG_0001.png");
        fs::write(&source, b"png bytes").unwrap();

        let store = store_in(root.path());
        let stored = store.save_photo(&source).unwrap();

        assert!(stored.starts_with(store.dir()));
        let name = stored.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("photo_"));
        assert!(name.ends_with(".png"));
        assert_eq!(fs::read(&stored).unwrap(), b"png bytes");
        assert!(source.exists());
    }

    #[test]
    fn test_save_photo_default_extension() {
        let root = tempdir().unwrap();
        let source = root.path().join("capture");
        fs::write(&source, b"x").unwrap();

        let stored = store_in(root.path()).save_photo(&source).unwrap();
        assert_eq!(stored.extension().unwrap(), "jpg");
    }

    #[test]
    fn test_save_photo_missing_source() {
        let root = tempdir().unwrap();
        let result = store_in(root.path()).save_photo(&root.path().join("nope.jpg"));
        assert!(matches!(
            result,
            Err(AppError::Photo(PhotoError::SourceMissing { .. }))
        ));
    }

    #[test]
    fn test_delete_local_photo_scoped_to_store() {
        let root = tempdir().unwrap();
        let store = store_in(root.path());
        let outside = root.path().join("keep.jpg");
        fs::write(&outside, b"x").unwrap();

        store.delete_local_photo(&outside);
        assert!(outside.exists());

        let stored = store.save_photo(&outside).unwrap();
        store.delete_local_photo(&stored);
        assert!(!stored.exists());

        // already gone: logged, not an error
        store.delete_local_photo(&stored);
    }

    #[test]
    fn test_image_file_exists() {
        let root = tempdir().unwrap();
        let file = root.path().join("a.jpg");
        fs::write(&file, b"x").unwrap();

        assert!(image_file_exists(file.to_str().unwrap()));
        assert!(!image_file_exists(""));
        assert!(!image_file_exists(root.path().join("b.jpg").to_str().unwrap()));
        assert!(!image_file_exists(root.path().to_str().unwrap()));
    }
}
