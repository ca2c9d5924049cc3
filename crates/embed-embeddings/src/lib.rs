//! # embed-embeddings
//!
//! Local sentence embeddings for embed-text using Candle.
//!
//! ## Features
//! - Local inference via Candle (no Python, no API)
//! - all-MiniLM-L6-v2 by default (384 dimensions)
//! - Model files fetched once from the HuggingFace Hub, then used offline
//! - Batch output as a `[batch, dim]` tensor ready for the embedding cache

pub mod candle;
pub mod error;
pub mod files;
pub mod model;

pub use crate::candle::CandleEmbedder;
pub use error::EmbeddingError;
pub use files::{get_or_download_model, ModelFiles, ModelPaths, MODEL_FILES};
pub use model::{embeddings_to_tensor, Embedding, EmbeddingModel, ModelInfo};
