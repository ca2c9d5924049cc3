//! Command implementation for embed-text.
//!
//! 1. Load configuration (defaults -> config file -> EMBED_* env)
//! 2. Open the embedding cache
//! 3. Return the cached array, or embed the text and cache the result
//! 4. Print the array

use anyhow::{Context, Result};
use candle_core::Tensor;
use tracing::{debug, info};

use embed_embeddings::{
    embeddings_to_tensor, CandleEmbedder, EmbeddingError, EmbeddingModel, ModelFiles,
};
use embed_store::EmbedStore;
use embed_types::Settings;

use crate::cli::Cli;

/// Where an embedding came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedSource {
    /// Read from the on-disk cache
    Cache,
    /// Produced by the model and written to the cache
    Computed,
}

/// Result of a lookup-or-compute
#[derive(Debug)]
pub struct EmbedOutcome {
    /// `[1, dim]` embedding of the text
    pub tensor: Tensor,
    pub source: EmbedSource,
}

/// Return the cached embedding for `text`, or compute and cache it.
///
/// `load_model` is only called on a cache miss, so a warm cache never
/// touches the model files.
pub fn embed_or_load<M, F>(store: &EmbedStore, text: &str, load_model: F) -> Result<EmbedOutcome>
where
    M: EmbeddingModel,
    F: FnOnce() -> Result<M, EmbeddingError>,
{
    if let Some(tensor) = store
        .load(text)
        .context("Failed to read embedding cache")?
    {
        info!(shape = ?tensor.dims(), "Using cached embedding");
        return Ok(EmbedOutcome {
            tensor,
            source: EmbedSource::Cache,
        });
    }

    let model = load_model().context("Failed to load embedding model")?;
    debug!(model = %model.info().name, "Embedding text");

    let embeddings = model
        .embed_batch(&[text])
        .context("Failed to embed text")?;
    let tensor = embeddings_to_tensor(&embeddings).context("Failed to build embedding array")?;

    store
        .save(text, &tensor)
        .context("Failed to write embedding cache")?;
    info!(shape = ?tensor.dims(), "Cached new embedding");

    Ok(EmbedOutcome {
        tensor,
        source: EmbedSource::Computed,
    })
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `log_level`.
pub fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;
    Ok(())
}

/// Run embed-text with already-loaded settings and print the array.
pub fn run_with_settings(cli: &Cli, settings: &Settings) -> Result<EmbedOutcome> {
    let store =
        EmbedStore::open(settings.expanded_cache_dir()).context("Failed to open embedding cache")?;
    debug!(cache_dir = %store.dir().display(), "Looking up embedding");
    let files = ModelFiles::new(settings.expanded_model_dir(), settings.model_repo.as_str());

    let outcome = embed_or_load(&store, &cli.text, || CandleEmbedder::load(&files))?;
    println!("{}", outcome.tensor);
    Ok(outcome)
}

/// Entry point used by the binary.
pub fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load().context("Failed to load configuration")?;
    init_logging(&settings.log_level)?;

    debug!(
        cache_dir = %settings.cache_dir,
        model_repo = %settings.model_repo,
        "Configuration loaded"
    );

    run_with_settings(&cli, &settings)?;
    Ok(())
}
