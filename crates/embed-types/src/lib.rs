//! # embed-types
//!
//! Shared types for the embed-text workspace.
//!
//! ## Modules
//! - `config`: Layered settings (defaults, config file, `EMBED_*` environment)
//! - `error`: Configuration errors

pub mod config;
pub mod error;

pub use config::{Settings, APP_NAME, DEFAULT_MODEL_REPO, ENV_PREFIX};
pub use error::ConfigError;
