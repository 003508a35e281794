// src/github/repos.rs
// =============================================================================
// Collects every repository of a user by walking the paginated listing.
//
// How it works:
// 1. Request page 1 (`?per_page=10&page=1`)
// 2. If the page is empty, stop
// 3. Otherwise keep its items
// 4. If the `Link` header has no rel="next", stop; otherwise go to the next page
//
// Failure policy:
// - A failed page ends the walk, gets logged, and whatever was collected so
//   far is returned (marked incomplete). It never fails the whole search.
// - The walk stops after `max_pages` pages even if the API keeps saying there
//   is more. That is treated like any other collection error.
//
// Rust concepts:
// - loop with break: The page loop has several exits
// - Vec::extend: Appending one collection to another
// =============================================================================

use serde::Serialize;

use super::client::GitHubClient;
use super::error::GitHubError;
use super::models::Repository;

/// Result of walking all repository pages.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RepositoryCollection {
    pub repositories: Vec<Repository>,
    /// False if a page failed or the page cap was hit
    pub complete: bool,
}

pub async fn collect_repositories(
    client: &GitHubClient,
    repos_url: &str,
    per_page: usize,
    max_pages: usize,
) -> RepositoryCollection {
    let _busy = client.busy().enter();

    let mut repositories = Vec::new();
    let mut page = 1;

    loop {
        if page > max_pages {
            return partial(repositories, GitHubError::PageLimit(max_pages));
        }

        let result = match client.fetch_repository_page(repos_url, page, per_page).await {
            Ok(result) => result,
            Err(e) => return partial(repositories, e),
        };

        if result.repositories.is_empty() {
            break;
        }

        tracing::debug!(page, count = result.repositories.len(), "Fetched repository page");
        repositories.extend(result.repositories);

        if !result.has_next {
            break;
        }

        page += 1;
    }

    RepositoryCollection {
        repositories,
        complete: true,
    }
}

fn partial(repositories: Vec<Repository>, error: GitHubError) -> RepositoryCollection {
    tracing::warn!(
        collected = repositories.len(),
        "Error fetching repositories, showing partial results: {}",
        error
    );

    RepositoryCollection {
        repositories,
        complete: false,
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why does collect_repositories return a struct and not a Result?
//    - It never fails as a whole; the worst case is an incomplete list
//    - The `complete` flag records whether the list was cut short
//
// 2. What is `let _busy = ...`?
//    - Binds the guard to a name that starts with _, so it lives until the
//      end of the function (plain `_` would drop it immediately)
//
// 3. What does tracing::warn!(collected = ..., "...") do?
//    - Logs a message with a structured field attached
//    - Fields can be filtered and formatted by the subscriber set up in main
// -----------------------------------------------------------------------------
