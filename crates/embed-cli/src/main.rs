//! embed-text
//!
//! Print the sentence embedding of a piece of text, caching results on disk.
//!
//! # Usage
//!
//! ```bash
//! embed-text "The quick brown fox"
//! EMBED_CACHE_DIR=/tmp/embeddings embed-text "The quick brown fox"
//! ```
//!
//! # Configuration
//!
//! Configuration is loaded in order (later sources override earlier):
//! 1. Built-in defaults
//! 2. Config file (~/.config/embed-text/config.toml)
//! 3. Environment variables (EMBED_*)

use anyhow::Result;
use clap::Parser;

use embed_cli::{run, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}
