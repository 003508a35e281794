// src/github/models.rs
// =============================================================================
// Data types for the three GitHub API resources we read:
//   - GET /users/{username}           -> User
//   - GET /users/{username}/repos     -> Vec<Repository>
//   - GET /repos/{owner}/{repo}/languages -> LanguageSet
//
// Each struct only lists the fields we actually display. serde ignores the
// rest of the JSON object.
// =============================================================================

use serde::{Deserialize, Deserializer, Serialize};

/// A GitHub user profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub login: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub name: Option<String>,
    pub avatar_url: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub bio: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub blog: Option<String>,
    pub html_url: String,
    pub repos_url: String,
}

impl User {
    /// Display name, falling back to the login when the user has none.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.login)
    }
}

/// One repository as listed by the repos endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub description: Option<String>,
    pub html_url: String,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    pub languages_url: String,
}

/// Language names for one repository, in the order the API listed them.
///
/// The API returns `{"Rust": 12345, "Shell": 678}`; we keep the keys and drop
/// the byte counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LanguageSet(Vec<String>);

impl LanguageSet {
    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for LanguageSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // serde_json is built with `preserve_order`, so the map keeps API order
        let breakdown = serde_json::Map::<String, serde_json::Value>::deserialize(deserializer)?;
        Ok(LanguageSet(breakdown.into_iter().map(|(name, _)| name).collect()))
    }
}

impl From<Vec<String>> for LanguageSet {
    fn from(names: Vec<String>) -> Self {
        LanguageSet(names)
    }
}

// GitHub sends "" (not null) for unset profile fields like `blog`.
// Both mean "absent" for display purposes.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
