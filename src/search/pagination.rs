// src/search/pagination.rs
// =============================================================================
// Page arithmetic for the repository list.
//
// The page size is fixed at 10, both for the API requests and for what we show
// at once. A list of N repositories has ceil(N / 10) pages:
//   23 -> 3 pages, 10 -> 1 page, 0 -> 0 pages
//
// Page 1 of an empty list is still a valid page to show (it just has no
// cards), so a user with no repositories can be displayed.
// =============================================================================

use serde::Serialize;
use std::ops::Range;

use super::SearchError;

/// Repositories per page.
pub const PAGE_SIZE: usize = 10;

/// Number of page controls for `total_repositories` items.
pub fn total_pages(total_repositories: usize) -> usize {
    total_repositories.div_ceil(PAGE_SIZE)
}

/// Current page and total count of the most recent search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationState {
    current_page: usize,
    total_repositories: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(0)
    }
}

impl PaginationState {
    /// State for a fresh search: page 1 of `total_repositories`.
    pub fn new(total_repositories: usize) -> Self {
        Self {
            current_page: 1,
            total_repositories,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.total_repositories)
    }

    /// Makes `page` current and returns the index range of its items.
    pub fn select(&mut self, page: usize) -> Result<Range<usize>, SearchError> {
        let total_pages = self.total_pages();
        let valid = page >= 1 && (page <= total_pages || (total_pages == 0 && page == 1));
        if !valid {
            return Err(SearchError::PageOutOfRange { page, total_pages });
        }

        self.current_page = page;

        let start = (page - 1) * PAGE_SIZE;
        let end = (start + PAGE_SIZE).min(self.total_repositories);
        Ok(start..end)
    }

    /// The page after the current one, if there is one.
    pub fn next_page(&self) -> Option<usize> {
        let next = self.current_page + 1;
        (next <= self.total_pages()).then_some(next)
    }

    /// The page before the current one, if there is one.
    pub fn previous_page(&self) -> Option<usize> {
        (self.current_page > 1).then(|| self.current_page - 1)
    }
}
