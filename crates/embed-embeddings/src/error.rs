//! Embedding error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while fetching, loading or running the embedding model.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// Tensor or model operation failed
    #[error("Candle error: {0}")]
    Candle(#[from] candle_core::Error),

    #[error("Tokenizer error: {0}")]
    Tokenizer(String),

    /// `config.json` is not a usable BERT config
    #[error("Invalid model config {}: {reason}", .path.display())]
    InvalidConfig { path: PathBuf, reason: String },

    /// HuggingFace Hub client could not be created
    #[error("HuggingFace Hub unavailable: {0}")]
    Hub(String),

    /// A model file could not be fetched
    #[error("Failed to download {file} from {repo}: {reason}")]
    Download {
        repo: String,
        file: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Model produced no vector for a non-empty input
    #[error("Model returned no embedding")]
    EmptyOutput,

    /// Embedding width differs from the model's or the batch's
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}
