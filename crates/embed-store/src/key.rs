//! Cache key derivation.

use sha2::{Digest, Sha256};

/// File extension of cache entries (NumPy array format)
pub const ENTRY_EXTENSION: &str = "npy";

/// SHA-256 of the key's UTF-8 bytes as 64 lowercase hex characters.
pub fn key_digest(key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    hex::encode(hasher.finalize())
}

/// File name of the entry for `key`: `<digest>.npy`
pub fn entry_file_name(key: &str) -> String {
    format!("{}.{}", key_digest(key), ENTRY_EXTENSION)
}
