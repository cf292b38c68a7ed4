// src/github/mod.rs
// =============================================================================
// GitHub-specific functionality: the repository search request and its types.
// =============================================================================

mod error;
mod models;
mod search;

pub use error::FetchError;
pub use models::{RepoSummary, ResultPage, SearchQuery};
pub use search::{fetch_pages, GithubSearchClient, SearchGateway};
