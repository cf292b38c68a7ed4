// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up logging (stderr, filtered by RUST_LOG or --verbose)
// 2. Parse command-line arguments using clap
// 3. Dispatch to the appropriate subcommand handler
// 4. Exit with proper code (0 = found repos, 1 = nothing found / search failed, 2 = error)
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;        // src/cli.rs - command-line parsing
mod config;     // src/config.rs - validated settings
mod github;     // src/github/ - the search API gateway
mod languages;  // src/languages.rs - the fixed list of language tabs
mod panel;      // src/panel/ - the search panel state machine and event loop
mod render;     // src/render.rs - terminal output

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, ConnectionArgs};
use config::Settings;
use github::{GithubSearchClient, SearchQuery};
use panel::{PaginationMode, PanelDriver, PanelView};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            // Print the whole context chain, e.g. "invalid settings: page size ..."
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr so they never mix with results on stdout
fn init_logging(verbose: bool) {
    let default_level = if verbose { "gh_repo_search=debug" } else { "gh_repo_search=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Languages { json } => handle_languages(json),
        Commands::Search { text, language, page, pages, per_page, json, connection } => {
            handle_search(&text, &language, page, pages, per_page, json, &connection).await
        }
        Commands::Browse { language, mode, per_page, debounce_ms, connection } => {
            handle_browse(&language, mode, per_page, debounce_ms, &connection).await
        }
    }
}

fn handle_languages(json: bool) -> Result<i32> {
    let mut out = io::stdout().lock();
    if json {
        let json_output = serde_json::to_string_pretty(&languages::LANGUAGES)?;
        writeln!(out, "{}", json_output)?;
    } else {
        render::render_language_table(&mut out)?;
    }
    Ok(0)
}

// Handles the 'search' subcommand
//
// Renders the same view the panel would show after the fetch completes:
// result list, "no repository found" message, or the error banner.
async fn handle_search(
    text: &str,
    language: &str,
    page: u32,
    pages: u32,
    per_page: u32,
    json: bool,
    connection: &ConnectionArgs,
) -> Result<i32> {
    let language = languages::find(language)?;
    let settings = Settings::new(
        &connection.api_url,
        PaginationMode::ReplacePerPage,
        Some(per_page),
        config::DEFAULT_DEBOUNCE_MS,
        connection.timeout_secs,
    )
    .context("invalid settings")?;

    let mut out = io::stdout().lock();

    // An empty query never reaches the network
    if text.trim().is_empty() {
        render::render_view(&mut out, &PanelView::Prompt)?;
        return Ok(1);
    }

    let client = GithubSearchClient::new(&settings).context("invalid settings")?;
    let query = SearchQuery::new(text.trim(), language.search_key);
    debug!(q = %query.expression(), page, pages, per_page, "one-shot search");

    let (results, failed) =
        match github::fetch_pages(&client, &query, page, pages, settings.per_page).await {
            Ok(results) => (results, false),
            Err(error) => {
                warn!(error = %error, "search failed");
                (Vec::new(), true)
            }
        };

    if json && !failed {
        let json_output = serde_json::to_string_pretty(&results)?;
        writeln!(out, "{}", json_output)?;
    } else {
        let view = PanelView::select(text, false, failed, &results, language.label);
        render::render_view(&mut out, &view)?;
    }

    if failed || results.is_empty() {
        Ok(1)
    } else {
        Ok(0)
    }
}

// Handles the 'browse' subcommand: an interactive session on stdin/stdout
async fn handle_browse(
    language: &str,
    mode: PaginationMode,
    per_page: Option<u32>,
    debounce_ms: u64,
    connection: &ConnectionArgs,
) -> Result<i32> {
    let language = languages::find(language)?;
    let settings = Settings::new(
        &connection.api_url,
        mode,
        per_page,
        debounce_ms,
        connection.timeout_secs,
    )
    .context("invalid settings")?;

    let gateway = GithubSearchClient::new(&settings)
        .context("invalid settings")?
        .into_shared();

    let driver = PanelDriver::new(gateway, language, &settings);
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = io::stdout();
    driver.run(stdin, &mut stdout).await?;

    Ok(0)
}
