// src/github/languages.rs
// =============================================================================
// Resolves the language tags shown on each repository card.
//
// Key functionality:
// - One request per repository to its `languages_url`
// - A failed lookup is logged and becomes an empty tag list, so one bad
//   repository never breaks the listing of the others
// - Many repositories are resolved with a bounded number of requests in
//   flight; results are matched back to repositories by index
//
// Rust concepts:
// - Streams: `buffer_unordered(n)` runs up to n futures at once
// - Tuples: Carrying the index alongside each result
// =============================================================================

use futures::stream::{self, StreamExt};

use super::client::GitHubClient;
use super::models::{LanguageSet, Repository};

/// Language names of one repository, or an empty set if the lookup failed.
pub async fn resolve_languages(client: &GitHubClient, languages_url: &str) -> LanguageSet {
    match client.fetch_languages(languages_url).await {
        Ok(languages) => languages,
        Err(e) => {
            tracing::warn!(url = languages_url, "Error fetching repository languages: {}", e);
            LanguageSet::default()
        }
    }
}

/// Resolves languages for every repository with at most `concurrency`
/// requests in flight. The result has one entry per repository, in the same
/// order as `repositories`.
///
/// With `concurrency == 1` the lookups run strictly one after another.
pub async fn resolve_all(
    client: &GitHubClient,
    repositories: &[&Repository],
    concurrency: usize,
) -> Vec<LanguageSet> {
    let lookups = repositories.iter().enumerate().map(|(index, repository)| async move {
        let languages = resolve_languages(client, &repository.languages_url).await;
        (index, languages)
    });

    let results: Vec<(usize, LanguageSet)> = stream::iter(lookups)
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await;

    // Results arrive in completion order; put each one back in its slot
    let mut resolved = vec![LanguageSet::default(); repositories.len()];
    for (index, languages) in results {
        resolved[index] = languages;
    }

    resolved
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is buffer_unordered?
//    - Takes a stream of futures and runs up to N of them at once
//    - Yields results as they finish, not in input order
//    - That's why each future returns its index along with the result
//
// 2. Why `async move` inside the closure?
//    - Each future needs its own copy of `index` and the references it uses
//    - `move` copies them into the future
// -----------------------------------------------------------------------------
