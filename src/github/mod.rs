// src/github/mod.rs
// =============================================================================
// This module talks to the GitHub REST API.
//
// Submodules:
// - client: HTTP client and the three endpoints (user, repo pages, languages)
// - repos: Walks every page of a user's repositories
// - languages: Per-repository language tags, with bounded concurrency
// - link: Parsing of the `Link` pagination header
// - models: The API types we deserialize
// - error: What can go wrong
//
// Rust concepts:
// - Modules: Organizing related functionality
// - Public API: What other parts of the app can use
// =============================================================================

mod client;
mod error;
mod languages;
mod link;
mod models;
mod repos;

#[cfg(test)]
pub(crate) mod testing;

pub use client::GitHubClient;
pub use error::GitHubError;
pub use languages::resolve_all;
pub use models::{LanguageSet, Repository, User};
pub use repos::collect_repositories;
