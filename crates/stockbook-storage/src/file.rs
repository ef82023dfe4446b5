//! JSON file implementation of [`SnapshotStore`].
//!
//! [`JsonFileStore`] keeps one file per collection under a data directory.
//! Writes go to a temp file in the same directory which is fsynced and then
//! renamed over the target, so a reader never observes a torn snapshot.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::StorageError;
use crate::traits::SnapshotStore;
use crate::types::Collection;

/// File-backed implementation of [`SnapshotStore`].
///
/// Holds only the directory path, so clones are cheap and every handle sees
/// the files as they are on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    data_dir: PathBuf,
}

impl JsonFileStore {
    /// Opens a store rooted at `data_dir`, creating the directory if needed.
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir).map_err(|source| StorageError::Io {
            path: data_dir.clone(),
            source,
        })?;
        Ok(JsonFileStore { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Full path of the file backing `collection`.
    pub fn path(&self, collection: Collection) -> PathBuf {
        self.data_dir.join(collection.file_name())
    }
}

impl SnapshotStore for JsonFileStore {
    fn read_snapshot(&self, collection: Collection) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.path(collection);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }

    fn write_snapshot(&mut self, collection: Collection, bytes: &[u8]) -> Result<(), StorageError> {
        let path = self.path(collection);
        let io_err = |source: io::Error| StorageError::Io {
            path: path.clone(),
            source,
        };

        let mut temp = NamedTempFile::new_in(&self.data_dir).map_err(io_err)?;
        temp.write_all(bytes).map_err(io_err)?;
        temp.as_file().sync_all().map_err(io_err)?;
        temp.persist(&path).map_err(|err| StorageError::Persist {
            path: path.clone(),
            source: err.error,
        })?;
        sync_dir(&self.data_dir).map_err(io_err)?;
        Ok(())
    }
}

/// Flushes the directory entry so the rename survives a crash.
#[cfg(unix)]
fn sync_dir(dir: &Path) -> io::Result<()> {
    fs::File::open(dir)?.sync_all()
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}
