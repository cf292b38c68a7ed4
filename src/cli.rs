// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Three subcommands:
// - languages: list the language tabs
// - search:    one-shot search, print the result and exit
// - browse:    interactive session with debounced typing and "load more"
//
// Connection flags (API URL, timeout) are shared through a flattened struct.
// =============================================================================

use clap::{Args, Parser, Subcommand};

use crate::config::{DEFAULT_API_URL, DEFAULT_DEBOUNCE_MS, DEFAULT_TIMEOUT_SECS};
use crate::panel::PaginationMode;

#[derive(Parser, Debug)]
#[command(
    name = "gh-repo-search",
    version,
    about = "Search GitHub repositories by language from the terminal",
    long_about = "gh-repo-search looks up GitHub repositories written in a given language, \
                  sorted by stars. Use `search` for a single query or `browse` to search \
                  while you type and load more results page by page."
)]
pub struct Cli {
    /// Show debug logs on stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the languages you can search in
    Languages {
        /// Output the list as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search once and print the results
    ///
    /// Example: gh-repo-search search react -l javascript --pages 2
    Search {
        /// Repository name or keywords
        text: String,

        /// Language key or label (e.g. "javascript", "C++")
        #[arg(short, long, default_value = "javascript")]
        language: String,

        /// First page to fetch
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,

        /// How many consecutive pages to fetch and concatenate
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=10))]
        pages: u32,

        /// Results per page (1-100)
        #[arg(long, default_value_t = 100)]
        per_page: u32,

        /// Output results in JSON format instead of a list
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        connection: ConnectionArgs,
    },

    /// Search while you type; `:more` loads the next page
    ///
    /// Example: gh-repo-search browse -l python
    Browse {
        /// Language tab to start in
        #[arg(short, long, default_value = "javascript")]
        language: String,

        /// append = infinite scroll, replace = one page at a time
        #[arg(long, value_enum, default_value_t = PaginationMode::AppendOnScroll)]
        mode: PaginationMode,

        /// Results per page (default: 10 in append mode, 100 in replace mode)
        #[arg(long)]
        per_page: Option<u32>,

        /// Quiet time after typing before a search starts
        #[arg(long, default_value_t = DEFAULT_DEBOUNCE_MS)]
        debounce_ms: u64,

        #[command(flatten)]
        connection: ConnectionArgs,
    },
}

#[derive(Args, Debug)]
pub struct ConnectionArgs {
    /// Base URL of the GitHub REST API
    #[arg(long, default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Timeout for each HTTP request, in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_browse_defaults() {
        let cli = Cli::parse_from(["gh-repo-search", "browse"]);
        match cli.command {
            Commands::Browse { language, mode, per_page, debounce_ms, connection } => {
                assert_eq!(language, "javascript");
                assert_eq!(mode, PaginationMode::AppendOnScroll);
                assert_eq!(per_page, None);
                assert_eq!(debounce_ms, 300);
                assert_eq!(connection.api_url, "https://api.github.com");
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_search() {
        let cli = Cli::parse_from([
            "gh-repo-search", "-v", "search", "tokio", "-l", "C++", "--pages", "3", "--json",
        ]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Search { text, language, page, pages, json, .. } => {
                assert_eq!(text, "tokio");
                assert_eq!(language, "C++");
                assert_eq!(page, 1);
                assert_eq!(pages, 3);
                assert!(json);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_page_zero_is_rejected() {
        let result = Cli::try_parse_from(["gh-repo-search", "search", "x", "--page", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_replace_mode_flag() {
        let cli = Cli::parse_from(["gh-repo-search", "browse", "--mode", "replace"]);
        assert!(matches!(
            cli.command,
            Commands::Browse { mode: PaginationMode::ReplacePerPage, .. }
        ));
    }
}
