//! CLI argument parsing for embed-text.

use clap::Parser;

/// Generate a sentence embedding for TEXT, reusing a cached result when the
/// same text was embedded before.
///
/// The cache directory defaults to ~/.cache/embed-text/embeddings and can be
/// changed with EMBED_CACHE_DIR.
#[derive(Parser, Debug)]
#[command(name = "embed-text")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Text to embed
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_text() {
        let cli = Cli::try_parse_from(["embed-text", "hello world"]).unwrap();
        assert_eq!(cli.text, "hello world");
    }

    #[test]
    fn test_text_is_required() {
        assert!(Cli::try_parse_from(["embed-text"]).is_err());
    }

    #[test]
    fn test_extra_positional_rejected() {
        assert!(Cli::try_parse_from(["embed-text", "one", "two"]).is_err());
    }

    #[test]
    fn test_unknown_flag_rejected() {
        assert!(Cli::try_parse_from(["embed-text", "--model", "x", "hello"]).is_err());
    }

    #[test]
    fn test_dash_prefixed_text_after_separator() {
        let cli = Cli::try_parse_from(["embed-text", "--", "-leading dash"]).unwrap();
        assert_eq!(cli.text, "-leading dash");
    }

    #[test]
    fn test_command_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
