//! Advisory exclusive lock on the data directory.
//!
//! Every command that reads, merges and writes stored state holds this lock
//! for the whole session, so two concurrent invocations cannot interleave
//! their read-evaluate-write cycles.

use crate::errors::{AppResult, LockError};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Held lock. Released on drop.
#[derive(Debug)]
pub struct SessionLock {
    file: File,
    path: PathBuf,
}

impl SessionLock {
    /// Takes the lock without waiting.
    ///
    /// # Errors
    ///
    /// `LockError::FileBusy` when another process holds it,
    /// `LockError::AcquisitionFailed` when the lock file cannot be opened or
    /// locked for any other reason.
    pub fn acquire(path: &Path) -> AppResult<Self> {
        debug!("Acquiring lock {:?}", path);

        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(path)
            .map_err(|source| LockError::AcquisitionFailed {
                path: path.to_path_buf(),
                source,
            })?;

        if let Err(e) = file.try_lock_exclusive() {
            let error = if e.kind() == io::ErrorKind::WouldBlock
                || e.raw_os_error() == fs2::lock_contended_error().raw_os_error()
            {
                LockError::FileBusy {
                    path: path.to_path_buf(),
                }
            } else {
                LockError::AcquisitionFailed {
                    path: path.to_path_buf(),
                    source: e,
                }
            };
            return Err(error.into());
        }

        Ok(SessionLock {
            file,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for SessionLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            warn!("Failed to release lock {:?}: {}", self.path, e);
        } else {
            debug!("Released lock {:?}", self.path);
        }
    }
}
