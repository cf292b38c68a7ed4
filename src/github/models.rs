// src/github/models.rs
// =============================================================================
// Data types for the GitHub repository search.
//
// Two layers:
// - Raw API shapes (SearchResponse, ApiRepo, ApiOwner) that serde decodes
// - Our own read-only projection (RepoSummary) that the rest of the app uses
//
// Only the fields we display are decoded; serde ignores everything else.
// =============================================================================

use serde::{Deserialize, Serialize};

// What the user asked for: free text plus the language tab it was typed in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub language_key: String,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>, language_key: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language_key: language_key.into(),
        }
    }

    // The `q` parameter sent to GitHub, e.g. "react language:javascript"
    pub fn expression(&self) -> String {
        format!("{} language:{}", self.text.trim(), self.language_key)
    }
}

/// A repository as shown in the result list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoSummary {
    pub id: u64,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub star_count: u64,
    pub fork_count: u64,
    pub url: String,
    pub owner_avatar_url: String,
    pub owner_login: String,
}

/// One page of results, in the order the API returned them (stars, descending).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultPage {
    pub page: u32,
    pub items: Vec<RepoSummary>,
}

// Top-level body of GET /search/repositories
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub items: Vec<ApiRepo>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiRepo {
    pub id: u64,
    pub full_name: String,
    pub description: Option<String>,
    pub stargazers_count: u64,
    pub forks_count: u64,
    pub html_url: String,
    pub owner: ApiOwner,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiOwner {
    pub login: String,
    pub avatar_url: String,
}

impl From<ApiRepo> for RepoSummary {
    fn from(repo: ApiRepo) -> Self {
        RepoSummary {
            id: repo.id,
            full_name: repo.full_name,
            description: repo.description,
            star_count: repo.stargazers_count,
            fork_count: repo.forks_count,
            url: repo.html_url,
            owner_avatar_url: repo.owner.avatar_url,
            owner_login: repo.owner.login,
        }
    }
}
