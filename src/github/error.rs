// src/github/error.rs
// =============================================================================
// Errors that can happen while talking to the GitHub API.
//
// We use `thiserror` to derive Display and Error for our enum, so callers can
// match on what went wrong (bad status vs. network vs. endless paging) while
// still getting a readable message.
// =============================================================================

use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum GitHubError {
    /// The request could not be sent, or the body could not be decoded
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-2xx status code
    #[error("GitHub API returned HTTP {status} for {url}")]
    Status { status: StatusCode, url: String },

    /// A URL from the config or from an API response could not be parsed
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The API kept advertising a next page past our page cap
    #[error("gave up after {0} pages; the API still advertised a next page")]
    PageLimit(usize),
}
