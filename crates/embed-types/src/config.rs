//! Configuration loading for embed-text.
//!
//! Layered config, later sources override earlier ones:
//! 1. Built-in defaults
//! 2. Config file (~/.config/embed-text/config.{toml,json,yaml})
//! 3. Environment variables (EMBED_*)
//!
//! The environment is read once here; everything downstream takes the
//! resolved `Settings` explicitly.

use config::{Config, ConfigBuilder, Environment, File, Map};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Application name used for config and cache directories
pub const APP_NAME: &str = "embed-text";

/// Prefix for environment overrides (`EMBED_CACHE_DIR`, `EMBED_LOG_LEVEL`, ...)
pub const ENV_PREFIX: &str = "EMBED";

/// Default sentence-transformers model on HuggingFace
pub const DEFAULT_MODEL_REPO: &str = "sentence-transformers/all-MiniLM-L6-v2";

type Builder = ConfigBuilder<config::builder::DefaultState>;

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory holding cached embedding arrays (`EMBED_CACHE_DIR`)
    #[serde(default = "default_cache_dir")]
    pub cache_dir: String,

    /// HuggingFace repository of the embedding model
    #[serde(default = "default_model_repo")]
    pub model_repo: String,

    /// Directory holding downloaded model files
    #[serde(default = "default_model_dir")]
    pub model_dir: String,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn app_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from(".cache"))
        .join(APP_NAME)
}

fn default_cache_dir() -> String {
    app_cache_dir()
        .join("embeddings")
        .to_string_lossy()
        .to_string()
}

fn default_model_repo() -> String {
    DEFAULT_MODEL_REPO.to_string()
}

fn default_model_dir() -> String {
    app_cache_dir().join("models").to_string_lossy().to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cache_dir: default_cache_dir(),
            model_repo: default_model_repo(),
            model_dir: default_model_dir(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings from defaults, the user config file and the process
    /// environment.
    pub fn load() -> Result<Self, ConfigError> {
        let config_dir = ProjectDirs::from("", "", APP_NAME)
            .map(|p| p.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));
        let default_config_path = config_dir.join("config");

        let builder = defaults()?
            .add_source(File::with_name(&default_config_path.to_string_lossy()).required(false));

        build(builder, None, None)
    }

    /// Load settings from defaults, an optional config file and the given
    /// variables in place of the process environment.
    ///
    /// The user config file is not consulted.
    pub fn load_isolated(
        config_path: Option<&str>,
        env: Map<String, String>,
    ) -> Result<Self, ConfigError> {
        build(defaults()?, config_path, Some(env))
    }

    /// Check that the loaded values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache_dir.trim().is_empty() {
            return Err(ConfigError::Invalid("cache_dir must not be empty".to_string()));
        }
        if self.model_dir.trim().is_empty() {
            return Err(ConfigError::Invalid("model_dir must not be empty".to_string()));
        }
        if self.model_repo.trim().is_empty() {
            return Err(ConfigError::Invalid("model_repo must not be empty".to_string()));
        }
        Ok(())
    }

    /// Cache directory with a leading `~/` expanded
    pub fn expanded_cache_dir(&self) -> PathBuf {
        expand_home(&self.cache_dir)
    }

    /// Model directory with a leading `~/` expanded
    pub fn expanded_model_dir(&self) -> PathBuf {
        expand_home(&self.model_dir)
    }
}

fn defaults() -> Result<Builder, ConfigError> {
    Config::builder()
        .set_default("cache_dir", default_cache_dir())
        .map_err(|e| ConfigError::Load(e.to_string()))?
        .set_default("model_repo", default_model_repo())
        .map_err(|e| ConfigError::Load(e.to_string()))?
        .set_default("model_dir", default_model_dir())
        .map_err(|e| ConfigError::Load(e.to_string()))?
        .set_default("log_level", default_log_level())
        .map_err(|e| ConfigError::Load(e.to_string()))
}

fn build(
    mut builder: Builder,
    config_path: Option<&str>,
    env: Option<Map<String, String>>,
) -> Result<Settings, ConfigError> {
    if let Some(path) = config_path {
        builder = builder.add_source(File::with_name(path).required(true));
    }

    // No separator: EMBED_CACHE_DIR maps to `cache_dir`, not `cache.dir`.
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .ignore_empty(true)
            .source(env),
    );

    let settings: Settings = builder
        .build()
        .map_err(|e| ConfigError::Load(e.to_string()))?
        .try_deserialize()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    settings.validate()?;
    Ok(settings)
}

fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    Path::new(path).to_path_buf()
}
