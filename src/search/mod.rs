// src/search/mod.rs
// =============================================================================
// The search flow: user lookup -> repository collection -> a page of cards.
//
// Submodules:
// - controller: Runs searches, keeps the latest result, serves pages of it
// - pagination: Page size and page arithmetic
//
// The error messages of `SearchError` are what the user sees, so they are
// written as sentences.
// =============================================================================

mod controller;
mod pagination;

use serde::Serialize;

use crate::github::{GitHubError, LanguageSet, Repository, User};

pub use controller::SearchController;
pub use pagination::{total_pages, PaginationState, PAGE_SIZE};

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("Please enter a GitHub username.")]
    EmptyUsername,

    /// Any failure of the user lookup. The cause is logged, not shown.
    #[error("Error fetching user information or repositories. Please try again.")]
    Lookup(#[source] GitHubError),

    #[error("The search for '{0}' was replaced by a newer search.")]
    Superseded(String),

    #[error("Search for a user first.")]
    NoSession,

    #[error("Page {page} does not exist (there are {total_pages} pages).")]
    PageOutOfRange { page: usize, total_pages: usize },

    #[error("Already on the first page.")]
    NoPreviousPage,

    #[error("Already on the last page.")]
    NoNextPage,
}

/// Everything needed to render one screen of results.
#[derive(Debug, Clone, Serialize)]
pub struct PageView {
    pub user: User,
    pub total_repositories: usize,
    /// False when the repository list was cut short by an error
    pub complete: bool,
    /// The page shown, or None when every repository is shown
    pub page: Option<usize>,
    pub total_pages: usize,
    pub page_size: usize,
    pub repositories: Vec<RepositoryCard>,
}

/// One repository plus its language tags.
#[derive(Debug, Clone, Serialize)]
pub struct RepositoryCard {
    #[serde(flatten)]
    pub repository: Repository,
    pub languages: LanguageSet,
}
