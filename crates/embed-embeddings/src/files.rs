//! Local model files.
//!
//! Model weights live under `<model_dir>/<repo id with '/' as '_'>` and are
//! copied there from the HuggingFace Hub the first time they are needed.

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::EmbeddingError;

/// Files a BERT sentence-transformer needs
pub const MODEL_FILES: &[&str] = &["config.json", "tokenizer.json", "model.safetensors"];

/// Where a model's files are kept locally
#[derive(Debug, Clone)]
pub struct ModelFiles {
    /// Root directory for all downloaded models
    pub model_dir: PathBuf,
    /// HuggingFace repository ID
    pub repo_id: String,
}

impl ModelFiles {
    pub fn new(model_dir: impl Into<PathBuf>, repo_id: impl Into<String>) -> Self {
        Self {
            model_dir: model_dir.into(),
            repo_id: repo_id.into(),
        }
    }

    /// Directory holding this repository's files
    pub fn local_dir(&self) -> PathBuf {
        self.model_dir.join(self.repo_id.replace('/', "_"))
    }

    /// Short model name, e.g. `all-MiniLM-L6-v2`
    pub fn model_name(&self) -> &str {
        self.repo_id.rsplit('/').next().unwrap_or(&self.repo_id)
    }

    pub fn file_path(&self, filename: &str) -> PathBuf {
        self.local_dir().join(filename)
    }

    /// Required files not yet present locally
    pub fn missing_files(&self) -> Vec<&'static str> {
        MODEL_FILES
            .iter()
            .copied()
            .filter(|f| !self.file_path(f).is_file())
            .collect()
    }

    fn paths(&self) -> ModelPaths {
        ModelPaths {
            config: self.file_path("config.json"),
            tokenizer: self.file_path("tokenizer.json"),
            weights: self.file_path("model.safetensors"),
        }
    }
}

/// Paths to model files
#[derive(Debug, Clone)]
pub struct ModelPaths {
    pub config: PathBuf,
    pub tokenizer: PathBuf,
    pub weights: PathBuf,
}

/// Get or download model files.
///
/// Only files missing from the local directory are fetched.
pub fn get_or_download_model(files: &ModelFiles) -> Result<ModelPaths, EmbeddingError> {
    let missing = files.missing_files();

    if missing.is_empty() {
        debug!(path = %files.local_dir().display(), "Using cached model");
    } else {
        info!(repo = %files.repo_id, count = missing.len(), "Downloading model files...");
        download_files(files, &missing)?;
    }

    Ok(files.paths())
}

fn download_files(files: &ModelFiles, names: &[&str]) -> Result<(), EmbeddingError> {
    use hf_hub::api::sync::Api;

    let api = Api::new().map_err(|e| EmbeddingError::Hub(e.to_string()))?;
    let repo = api.model(files.repo_id.clone());

    std::fs::create_dir_all(files.local_dir())?;

    for filename in names {
        info!(file = filename, "Downloading...");
        let source_path = repo
            .get(filename)
            .map_err(|e| EmbeddingError::Download {
                repo: files.repo_id.clone(),
                file: filename.to_string(),
                reason: e.to_string(),
            })?;

        copy_into_place(&source_path, &files.file_path(filename))?;
    }

    Ok(())
}

// Copy next to the destination first so an interrupted download never
// leaves a truncated file that `missing_files` would accept.
fn copy_into_place(source: &Path, dest: &Path) -> Result<(), EmbeddingError> {
    let partial = dest.with_extension("partial");
    std::fs::copy(source, &partial)?;
    std::fs::rename(&partial, dest)?;
    debug!(file = %dest.display(), "Model file ready");
    Ok(())
}
