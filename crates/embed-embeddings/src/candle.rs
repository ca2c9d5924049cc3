//! Candle-based embedding implementation.
//!
//! Runs a BERT sentence-transformer (all-MiniLM-L6-v2 by default) on the CPU
//! with mean pooling and L2 normalization, matching the output of
//! `SentenceTransformer.encode` for that model.

use std::path::Path;

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config as BertConfig};
use serde::Deserialize;
use tokenizers::Tokenizer;
use tracing::{debug, info};

use crate::error::EmbeddingError;
use crate::files::{get_or_download_model, ModelFiles};
use crate::model::{Embedding, EmbeddingModel, ModelInfo};

/// Maximum sequence length
pub const MAX_SEQ_LENGTH: usize = 256;

/// Name reported when loading from bare paths
const DEFAULT_MODEL_NAME: &str = "all-MiniLM-L6-v2";

/// The part of `config.json` needed for `ModelInfo`.
#[derive(Debug, Deserialize)]
struct ModelShape {
    hidden_size: usize,
}

/// Candle-based sentence embedder.
pub struct CandleEmbedder {
    model: BertModel,
    tokenizer: Tokenizer,
    device: Device,
    info: ModelInfo,
}

impl CandleEmbedder {
    /// Load the model from local files, downloading any that are missing.
    pub fn load(files: &ModelFiles) -> Result<Self, EmbeddingError> {
        let paths = get_or_download_model(files)?;
        let mut embedder = Self::load_from_paths(&paths.config, &paths.tokenizer, &paths.weights)?;
        embedder.info.name = files.model_name().to_string();
        Ok(embedder)
    }

    /// Load from explicit file paths
    pub fn load_from_paths(
        config_path: &Path,
        tokenizer_path: &Path,
        weights_path: &Path,
    ) -> Result<Self, EmbeddingError> {
        info!("Loading embedding model...");

        // CPU only
        let device = Device::Cpu;

        let config_str = std::fs::read_to_string(config_path)?;
        let invalid = |e: serde_json::Error| EmbeddingError::InvalidConfig {
            path: config_path.to_path_buf(),
            reason: e.to_string(),
        };
        let config: BertConfig = serde_json::from_str(&config_str).map_err(invalid)?;
        let shape: ModelShape = serde_json::from_str(&config_str).map_err(invalid)?;

        let tokenizer = Tokenizer::from_file(tokenizer_path)
            .map_err(|e| EmbeddingError::Tokenizer(e.to_string()))?;

        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path.to_path_buf()], DType::F32, &device)?
        };

        let model = BertModel::load(vb, &config)?;

        info!(
            dim = shape.hidden_size,
            max_seq = MAX_SEQ_LENGTH,
            "Model loaded successfully"
        );

        Ok(Self {
            model,
            tokenizer,
            device,
            info: ModelInfo {
                name: DEFAULT_MODEL_NAME.to_string(),
                dimension: shape.hidden_size,
                max_sequence_length: MAX_SEQ_LENGTH,
            },
        })
    }

    /// Mean pooling over token embeddings (excluding padding)
    fn mean_pooling(
        &self,
        embeddings: &Tensor,
        attention_mask: &Tensor,
    ) -> Result<Tensor, EmbeddingError> {
        let mask = attention_mask
            .unsqueeze(2)?
            .broadcast_as(embeddings.shape())?;
        let mask_f32 = mask.to_dtype(DType::F32)?;

        let masked = embeddings.broadcast_mul(&mask_f32)?;
        let sum = masked.sum(1)?;

        let mask_sum = mask_f32.sum(1)?;
        let mask_sum = mask_sum.clamp(1e-9, f64::MAX)?;

        Ok(sum.broadcast_div(&mask_sum)?)
    }
}

impl EmbeddingModel for CandleEmbedder {
    fn info(&self) -> &ModelInfo {
        &self.info
    }

    fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError> {
        self.embed_batch(&[text])?
            .into_iter()
            .next()
            .ok_or(EmbeddingError::EmptyOutput)
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        debug!(count = texts.len(), "Embedding batch");

        let encodings = self
            .tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(|e| EmbeddingError::Tokenizer(e.to_string()))?;

        let max_len = encodings
            .iter()
            .map(|e| e.get_ids().len())
            .max()
            .unwrap_or(0)
            .min(MAX_SEQ_LENGTH);

        let mut input_ids: Vec<u32> = Vec::with_capacity(texts.len() * max_len);
        let mut attention_mask: Vec<u32> = Vec::with_capacity(texts.len() * max_len);

        for encoding in &encodings {
            let ids = encoding.get_ids();
            let mask = encoding.get_attention_mask();
            let len = ids.len().min(max_len);

            input_ids.extend_from_slice(&ids[..len]);
            input_ids.extend(std::iter::repeat(0).take(max_len - len));
            attention_mask.extend_from_slice(&mask[..len]);
            attention_mask.extend(std::iter::repeat(0).take(max_len - len));
        }

        let batch_size = texts.len();
        let input_ids = Tensor::from_vec(input_ids, (batch_size, max_len), &self.device)?;
        let attention_mask = Tensor::from_vec(attention_mask, (batch_size, max_len), &self.device)?;
        let token_type_ids = Tensor::zeros_like(&input_ids)?;

        let output = self
            .model
            .forward(&input_ids, &token_type_ids, Some(&attention_mask))?;

        let pooled = self.mean_pooling(&output, &attention_mask)?;
        let pooled_vec: Vec<Vec<f32>> = pooled.to_vec2()?;

        let embeddings: Vec<Embedding> = pooled_vec.into_iter().map(Embedding::new).collect();

        if let Some(actual) = embeddings.first().map(Embedding::dimension) {
            if actual != self.info.dimension {
                return Err(EmbeddingError::DimensionMismatch {
                    expected: self.info.dimension,
                    actual,
                });
            }
        }

        debug!(
            count = embeddings.len(),
            dim = self.info.dimension,
            "Batch complete"
        );

        Ok(embeddings)
    }
}
