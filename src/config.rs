// src/config.rs
// =============================================================================
// Runtime settings, built from command-line flags.
//
// There is no config file and nothing is persisted: clap hands us raw values,
// and Settings::new checks them once so the rest of the app can trust them.
// =============================================================================

use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::panel::PaginationMode;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

// GitHub refuses per_page values above 100
pub const MAX_PER_PAGE: u32 = 100;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid API URL '{url}': {source}")]
    InvalidApiUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("API URL must use http or https, got '{0}'")]
    UnsupportedScheme(String),

    #[error("page size must be between 1 and 100, got {0}")]
    PerPageOutOfRange(u32),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct Settings {
    /// Base URL of the GitHub REST API, always ending with '/'
    pub api_url: Url,
    /// Paging behavior of the browse session
    pub mode: PaginationMode,
    /// Results requested per page
    pub per_page: u32,
    /// Quiet window before a typed query is searched
    pub debounce: Duration,
    /// Timeout for each HTTP request
    pub timeout: Duration,
}

impl Settings {
    // Validates raw flag values
    //
    // per_page: None means "use the mode's default" (10 append, 100 replace)
    pub fn new(
        api_url: &str,
        mode: PaginationMode,
        per_page: Option<u32>,
        debounce_ms: u64,
        timeout_secs: u64,
    ) -> Result<Self, ConfigError> {
        let per_page = per_page.unwrap_or_else(|| mode.default_per_page());
        if per_page == 0 || per_page > MAX_PER_PAGE {
            return Err(ConfigError::PerPageOutOfRange(per_page));
        }

        Ok(Settings {
            api_url: parse_api_url(api_url)?,
            mode,
            per_page,
            debounce: Duration::from_millis(debounce_ms),
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    // Full URL of the repository search endpoint
    pub fn search_endpoint(&self) -> Url {
        // api_url ends with '/', so join appends instead of replacing the last segment
        self.api_url
            .join("search/repositories")
            .unwrap_or_else(|_| self.api_url.clone())
    }
}

fn parse_api_url(raw: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(raw.trim()).map_err(|source| ConfigError::InvalidApiUrl {
        url: raw.to_string(),
        source,
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::UnsupportedScheme(url.scheme().to_string()));
    }

    // GitHub Enterprise lives under a path prefix like /api/v3
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}
