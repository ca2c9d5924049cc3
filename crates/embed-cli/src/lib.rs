//! embed-text library exports.
//!
//! # Modules
//!
//! - `cli`: Command-line argument parsing with clap
//! - `commands`: Lookup-or-compute and the binary's entry point

pub mod cli;
pub mod commands;

pub use cli::Cli;
pub use commands::{embed_or_load, init_logging, run, run_with_settings, EmbedOutcome, EmbedSource};
