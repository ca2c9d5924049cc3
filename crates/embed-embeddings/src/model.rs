//! Embedding model trait and types.
//!
//! Defines the interface for generating vector embeddings from text.

use candle_core::{Device, Tensor};

use crate::error::EmbeddingError;

/// Vector embedding - a normalized float array.
#[derive(Debug, Clone)]
pub struct Embedding {
    /// The embedding vector (normalized to unit length)
    pub values: Vec<f32>,
}

impl Embedding {
    /// Create a new embedding from a vector.
    /// Normalizes the vector to unit length.
    pub fn new(values: Vec<f32>) -> Self {
        let norm: f32 = values.iter().map(|x| x * x).sum::<f32>().sqrt();
        let normalized = if norm > 0.0 {
            values.iter().map(|x| x / norm).collect()
        } else {
            values
        };
        Self { values: normalized }
    }

    pub fn dimension(&self) -> usize {
        self.values.len()
    }
}

/// Stack embeddings into a `[batch, dim]` f32 tensor.
///
/// All embeddings must share one dimension. An empty batch gives `[0, 0]`.
pub fn embeddings_to_tensor(embeddings: &[Embedding]) -> Result<Tensor, EmbeddingError> {
    let dim = embeddings.first().map(Embedding::dimension).unwrap_or(0);

    let mut flat = Vec::with_capacity(embeddings.len() * dim);
    for embedding in embeddings {
        if embedding.dimension() != dim {
            return Err(EmbeddingError::DimensionMismatch {
                expected: dim,
                actual: embedding.dimension(),
            });
        }
        flat.extend_from_slice(&embedding.values);
    }

    Ok(Tensor::from_vec(flat, (embeddings.len(), dim), &Device::Cpu)?)
}

/// Model information
#[derive(Debug, Clone)]
pub struct ModelInfo {
    /// Model name (e.g., "all-MiniLM-L6-v2")
    pub name: String,
    /// Embedding dimension
    pub dimension: usize,
    /// Maximum sequence length in tokens
    pub max_sequence_length: usize,
}

/// Trait for embedding models.
///
/// Implementations must be thread-safe (Send + Sync) for concurrent use.
pub trait EmbeddingModel: Send + Sync {
    fn info(&self) -> &ModelInfo;

    /// Generate embedding for a single text.
    fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError>;

    /// Generate embeddings for multiple texts (batch).
    /// Default implementation calls embed() for each text.
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbeddingError> {
        texts.iter().map(|text| self.embed(text)).collect()
    }
}
