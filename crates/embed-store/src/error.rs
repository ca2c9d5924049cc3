//! Cache store error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing cache entries.
///
/// A missing entry is not an error; `load` returns `Ok(None)` for it.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Cache directory could not be created
    #[error("Failed to create cache directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Filesystem error on an entry file
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Entry file exists but is not a readable array
    #[error("Failed to decode cache entry {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        source: candle_core::Error,
    },

    /// Array could not be serialized
    #[error("Failed to encode cache entry {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        source: candle_core::Error,
    },
}
