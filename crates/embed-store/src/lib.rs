//! # embed-store
//!
//! Content-addressed on-disk cache for embedding arrays.
//!
//! Each entry is one `.npy` file named after the SHA-256 digest of its key,
//! so the key itself is never written to disk. Entries are created or
//! replaced whole, never edited in place, and never evicted.
//!
//! ```no_run
//! use candle_core::{Device, Tensor};
//! use embed_store::EmbedStore;
//!
//! let store = EmbedStore::open("/tmp/embeddings")?;
//! if store.load("hello")?.is_none() {
//!     let data = Tensor::new(&[[0.1f32, 0.2, 0.3]], &Device::Cpu)?;
//!     store.save("hello", &data)?;
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod key;
pub mod store;

pub use error::StoreError;
pub use key::{entry_file_name, key_digest, ENTRY_EXTENSION};
pub use store::{resolve_directory, EmbedStore};
