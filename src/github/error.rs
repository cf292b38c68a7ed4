// src/github/error.rs
// =============================================================================
// The one error a search request can produce.
//
// Network failures, non-2xx statuses and undecodable bodies all end up here.
// The panel does not care which one happened: any FetchError flips it into
// the error state. The reason string is kept for logs.
// =============================================================================

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("repository search failed: {reason}")]
pub struct FetchError {
    reason: String,
}

impl FetchError {
    pub fn new(reason: impl Into<String>) -> Self {
        FetchError { reason: reason.into() }
    }

    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let body = body.trim();
        if body.is_empty() {
            FetchError::new(format!("HTTP {}", status))
        } else {
            FetchError::new(format!("HTTP {}: {}", status, body))
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            FetchError::new(format!("request timed out: {}", error))
        } else if error.is_decode() {
            FetchError::new(format!("unexpected response body: {}", error))
        } else {
            FetchError::new(error.to_string())
        }
    }
}
