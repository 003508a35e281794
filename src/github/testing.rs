// src/github/testing.rs
// Fixtures shared by the tests that run against a mockito server.

use serde_json::{json, Value};

use super::client::GitHubClient;
use crate::busy::BusyIndicator;
use crate::config::Config;

/// A client pointed at `api_url` with a counting-only busy indicator.
pub fn client_for(api_url: &str) -> GitHubClient {
    let config = Config {
        api_url: api_url.to_string(),
        ..Config::default()
    };
    GitHubClient::new(&config, BusyIndicator::hidden()).unwrap()
}

pub fn user_json(server_url: &str, login: &str) -> Value {
    json!({
        "login": login,
        "id": 1,
        "name": "The Octocat",
        "avatar_url": format!("{server_url}/avatars/{login}"),
        "bio": null,
        "location": "San Francisco",
        "blog": "",
        "html_url": format!("https://github.com/{login}"),
        "repos_url": format!("{server_url}/users/{login}/repos"),
        "public_repos": 0
    })
}

pub fn repo_json(server_url: &str, owner: &str, name: &str) -> Value {
    json!({
        "id": 1,
        "name": name,
        "full_name": format!("{owner}/{name}"),
        "description": format!("The {name} repository"),
        "html_url": format!("https://github.com/{owner}/{name}"),
        "stargazers_count": 7,
        "forks_count": 2,
        "languages_url": format!("{server_url}/repos/{owner}/{name}/languages")
    })
}

/// A JSON array of `count` repositories named `{prefix}-{n}`.
pub fn repo_page_json(server_url: &str, owner: &str, prefix: &str, count: usize) -> String {
    let repos: Vec<Value> = (0..count)
        .map(|n| repo_json(server_url, owner, &format!("{prefix}-{n}")))
        .collect();
    Value::Array(repos).to_string()
}

/// `Link` header value advertising `page + 1` as the next page.
pub fn next_link(repos_url: &str, page: usize) -> String {
    format!(
        r#"<{repos_url}?per_page=10&page={next}>; rel="next", <{repos_url}?per_page=10&page=99>; rel="last""#,
        next = page + 1
    )
}
