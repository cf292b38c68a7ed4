// src/github/search.rs
// =============================================================================
// The fetch gateway: one HTTP request per (query, page).
//
// Request shape:
//   GET {api}/search/repositories
//       ?q=<text> language:<key>&per_page=<n>&page=<p>&sort=stars&order=desc
//
// There is no retry and no cancellation here. A request either returns a
// ResultPage (possibly empty) or a FetchError, and the caller decides what
// that means for the screen.
//
// The gateway is a trait so the panel can be driven by a fake in tests.
// =============================================================================

use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::{self, StreamExt, TryStreamExt};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::Client;
use tracing::debug;
use url::Url;

use super::error::FetchError;
use super::models::{RepoSummary, ResultPage, SearchQuery, SearchResponse};
use crate::config::{ConfigError, Settings};

// How many pages the one-shot command requests at the same time
const PAGE_CONCURRENCY: usize = 4;

#[async_trait]
pub trait SearchGateway: Send + Sync {
    async fn fetch(
        &self,
        query: &SearchQuery,
        page: u32,
        per_page: u32,
    ) -> Result<ResultPage, FetchError>;
}

/// Talks to the real GitHub Search API.
pub struct GithubSearchClient {
    client: Client,
    endpoint: Url,
}

impl GithubSearchClient {
    pub fn new(settings: &Settings) -> Result<Self, ConfigError> {
        // GitHub rejects requests without a User-Agent
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("gh-repo-search/", env!("CARGO_PKG_VERSION"))),
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github.v3+json"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(settings.timeout)
            .build()?;

        Ok(GithubSearchClient {
            client,
            endpoint: settings.search_endpoint(),
        })
    }

    pub fn into_shared(self) -> Arc<dyn SearchGateway> {
        Arc::new(self)
    }
}

#[async_trait]
impl SearchGateway for GithubSearchClient {
    async fn fetch(
        &self,
        query: &SearchQuery,
        page: u32,
        per_page: u32,
    ) -> Result<ResultPage, FetchError> {
        let expression = query.expression();
        debug!(q = %expression, page, per_page, "searching repositories");

        // reqwest percent-encodes the values, so "c++" survives as a language key
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[
                ("q", expression),
                ("per_page", per_page.to_string()),
                ("page", page.to_string()),
                ("sort", "stars".to_string()),
                ("order", "desc".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::from_status(status, &body));
        }

        let body: SearchResponse = response.json().await?;
        let items: Vec<RepoSummary> = body.items.into_iter().map(RepoSummary::from).collect();
        debug!(page, count = items.len(), "search page received");

        Ok(ResultPage { page, items })
    }
}

// Fetches `count` consecutive pages starting at `first_page`
//
// Pages are requested concurrently but concatenated in request order, so the
// result is the same as fetching them one after another and appending.
// The first failing page fails the whole call.
pub async fn fetch_pages(
    gateway: &dyn SearchGateway,
    query: &SearchQuery,
    first_page: u32,
    count: u32,
    per_page: u32,
) -> Result<Vec<RepoSummary>, FetchError> {
    let pages: Vec<ResultPage> = stream::iter(first_page..first_page.saturating_add(count))
        .map(|page| gateway.fetch(query, page, per_page))
        .buffered(PAGE_CONCURRENCY)
        .try_collect()
        .await?;

    Ok(pages.into_iter().flat_map(|page| page.items).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::PaginationMode;
    use wiremock::matchers::{header_exists, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn repo_json(id: u64, name: &str, stars: u64) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "full_name": name,
            "description": format!("{} description", name),
            "stargazers_count": stars,
            "forks_count": stars / 10,
            "html_url": format!("https://github.com/{}", name),
            "owner": {
                "login": name.split('/').next().unwrap(),
                "avatar_url": format!("https://avatars.example.com/{}", id)
            }
        })
    }

    fn client_for(server: &MockServer) -> GithubSearchClient {
        let settings = Settings::new(&server.uri(), PaginationMode::AppendOnScroll, None, 300, 5).unwrap();
        GithubSearchClient::new(&settings).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_sends_expected_parameters() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search/repositories"))
            .and(query_param("q", "react language:javascript"))
            .and(query_param("per_page", "10"))
            .and(query_param("page", "1"))
            .and(query_param("sort", "stars"))
            .and(query_param("order", "desc"))
            .and(header_exists("user-agent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "total_count": 2,
                "items": [repo_json(1, "facebook/react", 200), repo_json(2, "preactjs/preact", 30)]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let page = client
            .fetch(&SearchQuery::new("react", "javascript"), 1, 10)
            .await
            .unwrap();

        assert_eq!(page.page, 1);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].full_name, "facebook/react");
        assert_eq!(page.items[1].fork_count, 3);
    }

    #[tokio::test]
    async fn test_language_key_with_symbols() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search/repositories"))
            .and(query_param("q", "json language:c++"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "items": [] })))
            .expect(1)
            .mount(&server)
            .await;

        let page = client_for(&server)
            .fetch(&SearchQuery::new("json", "c++"), 1, 10)
            .await
            .unwrap();
        assert!(page.items.is_empty());
    }

    #[tokio::test]
    async fn test_non_success_status_is_fetch_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(422).set_body_string("Validation Failed"))
            .mount(&server)
            .await;

        let error = client_for(&server)
            .fetch(&SearchQuery::new("react", "javascript"), 1, 10)
            .await
            .unwrap_err();
        assert!(error.reason().contains("422"));
        assert!(error.reason().contains("Validation Failed"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_fetch_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&server)
            .await;

        let result = client_for(&server)
            .fetch(&SearchQuery::new("react", "javascript"), 1, 10)
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_fetch_pages_keeps_request_order() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(query_param("page", "1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "items": [repo_json(1, "a/one", 9)] }))
                    // Page 1 answers last
                    .set_delay(std::time::Duration::from_millis(100)),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(query_param("page", "2"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "items": [repo_json(2, "b/two", 8)] })),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let repos = fetch_pages(&client, &SearchQuery::new("x", "go"), 1, 2, 1)
            .await
            .unwrap();

        let names: Vec<&str> = repos.iter().map(|r| r.full_name.as_str()).collect();
        assert_eq!(names, vec!["a/one", "b/two"]);
    }

    #[tokio::test]
    async fn test_fetch_pages_fails_if_any_page_fails() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "items": [] })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let result = fetch_pages(&client, &SearchQuery::new("x", "go"), 1, 2, 10).await;
        assert!(result.is_err());
    }
}
