//! Embedding cache store.
//!
//! Maps an arbitrary string key to an array persisted under the cache
//! directory. Writes go to a temporary file that is renamed over the final
//! path, so a reader never sees a half-written entry. Concurrent writers of
//! the same key are not coordinated: the last rename wins.

use std::fs;
use std::path::{Path, PathBuf};

use candle_core::Tensor;
use tracing::{debug, info};

use crate::error::StoreError;
use crate::key::{entry_file_name, key_digest};

/// Ensure `dir` and any missing parents exist, then return it.
///
/// Succeeds when the directory already exists.
pub fn resolve_directory(dir: impl AsRef<Path>) -> Result<PathBuf, StoreError> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|source| StoreError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;
    Ok(dir.to_path_buf())
}

/// On-disk embedding cache rooted at one directory.
#[derive(Debug, Clone)]
pub struct EmbedStore {
    dir: PathBuf,
}

impl EmbedStore {
    /// Open the store, creating the cache directory if needed.
    ///
    /// This is the only operation with directory side effects.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = resolve_directory(dir)?;
        info!(path = %dir.display(), "Opened embedding cache");
        Ok(Self { dir })
    }

    /// The cache directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the entry for `key`. Pure: no filesystem access.
    pub fn key_to_path(&self, key: &str) -> PathBuf {
        self.dir.join(entry_file_name(key))
    }

    /// Check if an entry exists for `key`
    pub fn contains(&self, key: &str) -> bool {
        self.key_to_path(key).is_file()
    }

    /// Load the array stored for `key`.
    ///
    /// Returns `Ok(None)` if nothing was saved under `key`. A file that
    /// exists but cannot be decoded is an error.
    pub fn load(&self, key: &str) -> Result<Option<Tensor>, StoreError> {
        let path = self.key_to_path(key);
        if !path.is_file() {
            debug!(path = %path.display(), "Cache miss");
            return Ok(None);
        }

        let tensor = Tensor::read_npy(&path).map_err(|source| StoreError::Decode {
            path: path.clone(),
            source,
        })?;

        debug!(
            path = %path.display(),
            shape = ?tensor.dims(),
            dtype = ?tensor.dtype(),
            "Cache hit"
        );
        Ok(Some(tensor))
    }

    /// Store `data` under `key`, replacing any existing entry.
    pub fn save(&self, key: &str, data: &Tensor) -> Result<(), StoreError> {
        let path = self.key_to_path(key);

        // Unique per call, so concurrent saves of one key never share a temp file.
        // Dropping the TempPath on an error path removes the file.
        let tmp_path = tempfile::Builder::new()
            .prefix(&format!(".{}.", key_digest(key)))
            .suffix(".tmp")
            .tempfile_in(&self.dir)
            .map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?
            .into_temp_path();

        data.write_npy(&tmp_path)
            .map_err(|source| StoreError::Encode {
                path: path.clone(),
                source,
            })?;

        tmp_path.persist(&path).map_err(|e| StoreError::Io {
            path: path.clone(),
            source: e.error,
        })?;

        debug!(
            path = %path.display(),
            shape = ?data.dims(),
            "Saved cache entry"
        );
        Ok(())
    }
}
