// src/github/client.rs
// =============================================================================
// A small client for the three GitHub REST endpoints we use.
//
// Every request:
// - Sends a User-Agent (required by GitHub) and the v3 JSON Accept header
// - Holds a busy-indicator guard until the body has been decoded
// - Treats any non-2xx status as an error
//
// There is no authentication and no retry logic. A failed request is reported
// to the caller, who decides whether it is fatal (user lookup) or not
// (repository pages, languages).
//
// Rust concepts:
// - Generics with trait bounds: `get_json<T: DeserializeOwned>`
// - The ? operator with `#[from]` conversions into our error type
// =============================================================================

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, LINK};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

use super::error::GitHubError;
use super::link::has_next_page;
use super::models::{LanguageSet, Repository, User};
use crate::busy::BusyIndicator;
use crate::config::Config;

/// One page of the repository listing.
#[derive(Debug)]
pub struct RepositoryPage {
    pub repositories: Vec<Repository>,
    /// Whether the `Link` header advertised a next page
    pub has_next: bool,
}

#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    api_url: Url,
    busy: BusyIndicator,
}

impl GitHubClient {
    pub fn new(config: &Config, busy: BusyIndicator) -> Result<Self, GitHubError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github.v3+json"),
        );

        let http = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            api_url: parse_url(&config.api_url)?,
            busy,
        })
    }

    pub fn busy(&self) -> &BusyIndicator {
        &self.busy
    }

    /// GET /users/{username}
    pub async fn fetch_user(&self, username: &str) -> Result<User, GitHubError> {
        let url = self.user_url(username)?;
        let (user, _) = self.get_json::<User>(url).await?;
        Ok(user)
    }

    /// GET {repos_url}?per_page={per_page}&page={page}
    ///
    /// `repos_url` is the `repos_url` field of the user record.
    pub async fn fetch_repository_page(
        &self,
        repos_url: &str,
        page: usize,
        per_page: usize,
    ) -> Result<RepositoryPage, GitHubError> {
        let mut url = parse_url(repos_url)?;
        url.query_pairs_mut()
            .append_pair("per_page", &per_page.to_string())
            .append_pair("page", &page.to_string());

        let (repositories, headers) = self.get_json::<Vec<Repository>>(url).await?;

        let has_next = headers
            .get(LINK)
            .and_then(|value| value.to_str().ok())
            .map(has_next_page)
            .unwrap_or(false);

        Ok(RepositoryPage {
            repositories,
            has_next,
        })
    }

    /// GET {languages_url}
    pub async fn fetch_languages(&self, languages_url: &str) -> Result<LanguageSet, GitHubError> {
        let url = parse_url(languages_url)?;
        let (languages, _) = self.get_json::<LanguageSet>(url).await?;
        Ok(languages)
    }

    // {api_url}/users/{username}, with the username encoded as one path segment
    fn user_url(&self, username: &str) -> Result<Url, GitHubError> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| GitHubError::InvalidUrl {
                url: self.api_url.to_string(),
                reason: "URL cannot be used as a base".to_string(),
            })?
            .pop_if_empty()
            .push("users")
            .push(username);
        Ok(url)
    }

    // Sends one GET and decodes the JSON body
    //
    // Parameters:
    //   url: Full request URL, query included
    //
    // Returns: The decoded body and the response headers (the caller may
    // need `Link`), or an error for a failed request, a non-2xx status or a
    // body that doesn't decode as T
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<(T, HeaderMap), GitHubError> {
        let _busy = self.busy.enter();
        tracing::debug!(%url, "GET");

        let response = self.http.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GitHubError::Status {
                status,
                url: url.to_string(),
            });
        }

        let headers = response.headers().clone();
        let body = response.json::<T>().await?;
        Ok((body, headers))
    }
}

fn parse_url(raw: &str) -> Result<Url, GitHubError> {
    Url::parse(raw).map_err(|e| GitHubError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is DeserializeOwned?
//    - A serde bound meaning "can be built from JSON without borrowing it"
//    - Needed because the response body is dropped after decoding
//
// 2. Why path_segments_mut() instead of format!()?
//    - push() percent-encodes the segment, so "a/b" becomes "a%2Fb"
//    - format!() would let a username add extra path segments
//
// 3. What does `#[from] reqwest::Error` give us?
//    - A From impl, so `?` on a reqwest call turns into GitHubError::Request
// -----------------------------------------------------------------------------
