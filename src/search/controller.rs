// src/search/controller.rs
// =============================================================================
// Runs a search and serves pages of its result.
//
// A search:
// 1. Trims the username and rejects an empty one (no request is made)
// 2. Looks up the user (any failure here fails the whole search)
// 3. Collects every repository page (failures here only shorten the list)
// 4. Stores the result and resets pagination to page 1
//
// Showing a page slices the stored result. Nothing is fetched again except
// the language tags of repositories that haven't been shown before; those are
// cached for as long as the result is kept.
//
// Every search gets a token from an increasing counter. A search only stores
// its result if no newer search has started in the meantime, so an older,
// slower search can never overwrite a newer one.
//
// Rust concepts:
// - Arc: Shared ownership of the stored result
// - AtomicU64: A counter that can be bumped through &self
// - Mutex: Interior mutability; never held across an .await
// =============================================================================

use std::ops::Range;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::pagination::{PaginationState, PAGE_SIZE};
use super::{PageView, RepositoryCard, SearchError};
use crate::config::Config;
use crate::github::{self, GitHubClient, LanguageSet, Repository, User};

// The stored result of one search
struct Session {
    user: User,
    repositories: Vec<Repository>,
    complete: bool,
    languages: Mutex<Vec<Option<LanguageSet>>>,
}

impl Session {
    fn new(user: User, repositories: Vec<Repository>, complete: bool) -> Self {
        let languages = Mutex::new(vec![None; repositories.len()]);
        Self {
            user,
            repositories,
            complete,
            languages,
        }
    }
}

pub struct SearchController {
    client: GitHubClient,
    language_concurrency: usize,
    max_pages: usize,
    latest_token: AtomicU64,
    session: Mutex<Option<Arc<Session>>>,
    pagination: Mutex<PaginationState>,
}

impl SearchController {
    pub fn new(client: GitHubClient, config: &Config) -> Self {
        Self {
            client,
            language_concurrency: config.language_concurrency,
            max_pages: config.max_pages,
            latest_token: AtomicU64::new(0),
            session: Mutex::new(None),
            pagination: Mutex::new(PaginationState::default()),
        }
    }

    pub fn client(&self) -> &GitHubClient {
        &self.client
    }

    /// Pagination state of the current result.
    pub fn pagination(&self) -> PaginationState {
        *lock(&self.pagination)
    }

    /// Searches for `username` and shows page 1.
    pub async fn search(&self, username: &str) -> Result<PageView, SearchError> {
        self.search_page(username, 1).await
    }

    // Searches for `username` and shows one page of the result
    //
    // Parameters:
    //   username: As typed; surrounding whitespace is ignored
    //   page: 1-based page to show once the search is done
    //
    // Returns: The page, or the alert to show instead
    //
    // An empty username is rejected before the busy indicator is touched, so
    // the alert is the only thing the user sees.
    pub async fn search_page(&self, username: &str, page: usize) -> Result<PageView, SearchError> {
        let username = validate_username(username)?;

        let _busy = self.client.busy().enter();
        let session = self.run_search(username).await?;
        self.view(&session, Some(page)).await
    }

    /// Searches for `username` and shows every repository at once.
    pub async fn search_all(&self, username: &str) -> Result<PageView, SearchError> {
        let username = validate_username(username)?;

        let _busy = self.client.busy().enter();
        let session = self.run_search(username).await?;
        self.view(&session, None).await
    }

    /// Shows `page` of the current result.
    pub async fn show_page(&self, page: usize) -> Result<PageView, SearchError> {
        let session = self.current_session()?;
        self.view(&session, Some(page)).await
    }

    // Moves one page forward
    //
    // On the last page (or with no repositories at all) this is an alert
    // rather than a request for a page that doesn't exist.
    pub async fn next_page(&self) -> Result<PageView, SearchError> {
        let session = self.current_session()?;
        let page = self.pagination().next_page().ok_or(SearchError::NoNextPage)?;
        self.view(&session, Some(page)).await
    }

    // Moves one page back; on page 1 this is an alert
    pub async fn previous_page(&self) -> Result<PageView, SearchError> {
        let session = self.current_session()?;
        let page = self
            .pagination()
            .previous_page()
            .ok_or(SearchError::NoPreviousPage)?;
        self.view(&session, Some(page)).await
    }

    // Looks up the user and collects their repositories
    //
    // Parameters:
    //   username: Already trimmed and known to be non-empty
    //
    // Returns: The stored result, or an error if the user lookup failed or a
    // newer search started while this one was running
    async fn run_search(&self, username: &str) -> Result<Arc<Session>, SearchError> {
        // Taken before the first .await, so the order of tokens is the order
        // in which searches were started
        let token = self.begin_search();
        tracing::info!(username, token, "Searching");

        // A missing user, a network error and a bad response all end up as
        // the same alert; the cause only goes to the log
        let user = self.client.fetch_user(username).await.map_err(|e| {
            tracing::error!(username, "Error fetching user information: {}", e);
            SearchError::Lookup(e)
        })?;

        // Never fails; a broken page just makes the list shorter
        let collection =
            github::collect_repositories(&self.client, &user.repos_url, PAGE_SIZE, self.max_pages)
                .await;

        tracing::info!(
            login = %user.login,
            total = collection.repositories.len(),
            complete = collection.complete,
            "Collected repositories"
        );

        let session = Arc::new(Session::new(
            user,
            collection.repositories,
            collection.complete,
        ));
        self.commit(token, Arc::clone(&session))?;
        Ok(session)
    }

    fn begin_search(&self) -> u64 {
        self.latest_token.fetch_add(1, Ordering::SeqCst) + 1
    }

    // Stores the result unless a newer search has started since `token` was taken
    fn commit(&self, token: u64, session: Arc<Session>) -> Result<(), SearchError> {
        let mut current = lock(&self.session);

        if self.latest_token.load(Ordering::SeqCst) != token {
            tracing::debug!(token, "Discarding result of a superseded search");
            return Err(SearchError::Superseded(session.user.login.clone()));
        }

        *lock(&self.pagination) = PaginationState::new(session.repositories.len());
        *current = Some(session);
        Ok(())
    }

    fn current_session(&self) -> Result<Arc<Session>, SearchError> {
        lock(&self.session).clone().ok_or(SearchError::NoSession)
    }

    // Builds the view of `page` (or of everything when `page` is None)
    async fn view(&self, session: &Arc<Session>, page: Option<usize>) -> Result<PageView, SearchError> {
        let mut state = PaginationState::new(session.repositories.len());
        let range = match page {
            Some(page) => state.select(page)?,
            None => 0..session.repositories.len(),
        };

        // Only the current result owns the shared pagination state
        if page.is_some() {
            let current = lock(&self.session);
            if current.as_ref().is_some_and(|c| Arc::ptr_eq(c, session)) {
                *lock(&self.pagination) = state;
            }
        }

        let languages = self.languages_for(session, range.clone()).await;

        let repositories = session.repositories[range]
            .iter()
            .cloned()
            .zip(languages)
            .map(|(repository, languages)| RepositoryCard {
                repository,
                languages,
            })
            .collect();

        Ok(PageView {
            user: session.user.clone(),
            total_repositories: session.repositories.len(),
            complete: session.complete,
            page,
            total_pages: state.total_pages(),
            page_size: PAGE_SIZE,
            repositories,
        })
    }

    // Language tags for `range`, fetching the ones not cached yet
    async fn languages_for(&self, session: &Session, range: Range<usize>) -> Vec<LanguageSet> {
        let missing: Vec<usize> = {
            let cache = lock(&session.languages);
            range.clone().filter(|&i| cache[i].is_none()).collect()
        };

        if !missing.is_empty() {
            let _busy = self.client.busy().enter();
            let repositories: Vec<&Repository> =
                missing.iter().map(|&i| &session.repositories[i]).collect();
            let resolved =
                github::resolve_all(&self.client, &repositories, self.language_concurrency).await;

            let mut cache = lock(&session.languages);
            for (index, languages) in missing.into_iter().zip(resolved) {
                cache[index] = Some(languages);
            }
        }

        let cache = lock(&session.languages);
        range
            .map(|i| cache[i].clone().unwrap_or_default())
            .collect()
    }
}

// Trims the username; nothing is left means there is nothing to search for
fn validate_username(username: &str) -> Result<&str, SearchError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(SearchError::EmptyUsername);
    }
    Ok(username)
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why are the methods &self and not &mut self?
//    - The interactive prompt and the CLI share one controller
//    - State that changes (the stored result, the current page, the token
//      counter) sits behind a Mutex or an atomic, so &self is enough
//
// 2. Why is the lock never held across an .await?
//    - std::sync::MutexGuard is not meant to live across await points
//    - Every lock here is taken in a small block or a helper and dropped
//      before the next network call
//
// 3. What does Arc::ptr_eq do?
//    - Checks whether two Arcs point at the same allocation
//    - view() uses it to tell whether its session is still the current one
//
// 4. What is fetch_add?
//    - Adds to an atomic and returns the old value in one step
//    - Two searches started at the same time can never get the same token
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::testing::{client_for, next_link, repo_page_json, user_json};
    use mockito::{Matcher, Mock, ServerGuard};
    use std::io::Write;

    fn controller(server: &ServerGuard) -> SearchController {
        SearchController::new(client_for(&server.url()), &Config::default())
    }

    async fn mock_user(server: &mut ServerGuard) -> Mock {
        server
            .mock("GET", "/users/octocat")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(user_json(&server.url(), "octocat").to_string())
            .create_async()
            .await
    }

    async fn mock_repo_page(server: &mut ServerGuard, page: usize, count: usize, next: bool) -> Mock {
        let repos_url = format!("{}/users/octocat/repos", server.url());
        let mut mock = server
            .mock("GET", "/users/octocat/repos")
            .match_query(Matcher::UrlEncoded("page".into(), page.to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(repo_page_json(&server.url(), "octocat", &format!("p{page}"), count));
        if next {
            mock = mock.with_header("link", &next_link(&repos_url, page));
        }
        mock.create_async().await
    }

    async fn mock_languages(server: &mut ServerGuard, status: usize) -> Mock {
        server
            .mock("GET", Matcher::Regex(r"^/repos/octocat/[^/]+/languages$".to_string()))
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(r#"{"Rust": 1000, "Shell": 20}"#)
            .create_async()
            .await
    }

    // User with pages of 10, 10 and 5 repositories
    async fn mock_octocat_with_25(server: &mut ServerGuard) -> Mock {
        let user = mock_user(server).await;
        mock_repo_page(server, 1, 10, true).await;
        mock_repo_page(server, 2, 10, true).await;
        mock_repo_page(server, 3, 5, false).await;
        user
    }

    #[tokio::test]
    async fn test_empty_username_makes_no_request() {
        let mut server = mockito::Server::new_async().await;
        let any = server
            .mock("GET", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let controller = controller(&server);
        assert!(matches!(
            controller.search("").await,
            Err(SearchError::EmptyUsername)
        ));
        assert!(matches!(
            controller.search("   \t").await,
            Err(SearchError::EmptyUsername)
        ));

        any.assert_async().await;
        // The indicator was never shown, not even briefly
        assert_eq!(controller.client().busy().times_entered(), 0);
        assert!(matches!(
            controller.search_all(" ").await,
            Err(SearchError::EmptyUsername)
        ));
        assert_eq!(controller.client().busy().times_entered(), 0);
    }

    #[tokio::test]
    async fn test_search_collects_everything_and_shows_page_one() {
        let mut server = mockito::Server::new_async().await;
        mock_octocat_with_25(&mut server).await;
        mock_languages(&mut server, 200).await;

        let controller = controller(&server);
        let view = controller.search("  octocat ").await.unwrap();

        assert_eq!(view.user.login, "octocat");
        assert_eq!(view.total_repositories, 25);
        assert!(view.complete);
        assert_eq!(view.page, Some(1));
        assert_eq!(view.total_pages, 3);
        assert_eq!(view.repositories.len(), 10);
        assert_eq!(view.repositories[0].languages.names(), ["Rust", "Shell"]);
        assert!(!controller.client().busy().is_visible());
    }

    #[tokio::test]
    async fn test_user_lookup_failure_is_a_generic_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/users/nobody")
            .with_status(404)
            .create_async()
            .await;

        let controller = controller(&server);
        let err = controller.search("nobody").await.unwrap_err();

        assert!(matches!(err, SearchError::Lookup(_)));
        assert_eq!(
            err.to_string(),
            "Error fetching user information or repositories. Please try again."
        );
        assert!(!controller.client().busy().is_visible());
        assert!(matches!(
            controller.show_page(1).await,
            Err(SearchError::NoSession)
        ));
    }

    #[tokio::test]
    async fn test_repository_failure_shows_partial_list() {
        let mut server = mockito::Server::new_async().await;
        mock_user(&mut server).await;
        mock_repo_page(&mut server, 1, 10, true).await;
        server
            .mock("GET", "/users/octocat/repos")
            .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
            .with_status(502)
            .create_async()
            .await;
        mock_languages(&mut server, 200).await;

        let controller = controller(&server);
        let view = controller.search_all("octocat").await.unwrap();

        assert_eq!(view.total_repositories, 10);
        assert_eq!(view.repositories.len(), 10);
        assert!(!view.complete);
    }

    #[tokio::test]
    async fn test_language_failure_keeps_the_card() {
        let mut server = mockito::Server::new_async().await;
        mock_user(&mut server).await;
        mock_repo_page(&mut server, 1, 2, false).await;
        mock_languages(&mut server, 500).await;

        let controller = controller(&server);
        let view = controller.search("octocat").await.unwrap();

        assert_eq!(view.repositories.len(), 2);
        let card = &view.repositories[0];
        assert_eq!(card.repository.name, "p1-0");
        assert_eq!(card.repository.stargazers_count, 7);
        assert!(card.languages.is_empty());
    }

    #[tokio::test]
    async fn test_page_change_uses_cached_result() {
        let mut server = mockito::Server::new_async().await;
        let user = mock_octocat_with_25(&mut server).await;
        let languages = server
            .mock("GET", Matcher::Regex(r"^/repos/octocat/[^/]+/languages$".to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"Go": 1}"#)
            .expect(15)
            .create_async()
            .await;

        let controller = controller(&server);
        controller.search("octocat").await.unwrap();

        let third = controller.show_page(3).await.unwrap();
        assert_eq!(third.page, Some(3));
        assert_eq!(third.repositories.len(), 5);
        assert_eq!(third.repositories[0].repository.name, "p3-0");
        assert_eq!(controller.pagination().current_page(), 3);

        // Page 1 again: languages come from the cache
        let first = controller.show_page(1).await.unwrap();
        assert_eq!(first.repositories[9].repository.name, "p1-9");

        user.assert_async().await;
        languages.assert_async().await;
    }

    #[tokio::test]
    async fn test_search_straight_to_a_page() {
        let mut server = mockito::Server::new_async().await;
        mock_octocat_with_25(&mut server).await;
        let languages = server
            .mock("GET", Matcher::Regex(r"^/repos/octocat/[^/]+/languages$".to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{}")
            .expect(10)
            .create_async()
            .await;

        let controller = controller(&server);
        let view = controller.search_page("octocat", 2).await.unwrap();

        assert_eq!(view.page, Some(2));
        assert_eq!(view.repositories[0].repository.name, "p2-0");
        assert_eq!(controller.pagination().current_page(), 2);
        languages.assert_async().await;
    }

    #[tokio::test]
    async fn test_page_out_of_range() {
        let mut server = mockito::Server::new_async().await;
        mock_octocat_with_25(&mut server).await;
        mock_languages(&mut server, 200).await;

        let controller = controller(&server);
        controller.search("octocat").await.unwrap();

        assert!(matches!(
            controller.show_page(4).await,
            Err(SearchError::PageOutOfRange { page: 4, total_pages: 3 })
        ));
        assert_eq!(controller.pagination().current_page(), 1);
    }

    #[tokio::test]
    async fn test_next_and_previous_page() {
        let mut server = mockito::Server::new_async().await;
        mock_octocat_with_25(&mut server).await;
        mock_languages(&mut server, 200).await;

        let controller = controller(&server);
        controller.search("octocat").await.unwrap();

        let err = controller.previous_page().await.unwrap_err();
        assert!(matches!(err, SearchError::NoPreviousPage));
        assert_eq!(err.to_string(), "Already on the first page.");

        assert_eq!(controller.next_page().await.unwrap().page, Some(2));
        assert_eq!(controller.next_page().await.unwrap().page, Some(3));

        let err = controller.next_page().await.unwrap_err();
        assert!(matches!(err, SearchError::NoNextPage));
        assert_eq!(err.to_string(), "Already on the last page.");
        assert_eq!(controller.pagination().current_page(), 3);

        assert_eq!(controller.previous_page().await.unwrap().page, Some(2));
    }

    #[tokio::test]
    async fn test_next_page_without_repositories() {
        let mut server = mockito::Server::new_async().await;
        mock_user(&mut server).await;
        mock_repo_page(&mut server, 1, 0, false).await;

        let controller = controller(&server);
        let view = controller.search("octocat").await.unwrap();
        assert_eq!(view.total_pages, 0);

        assert!(matches!(
            controller.next_page().await,
            Err(SearchError::NoNextPage)
        ));
        assert!(matches!(
            controller.previous_page().await,
            Err(SearchError::NoPreviousPage)
        ));
    }

    #[tokio::test]
    async fn test_paging_before_any_search() {
        let server = mockito::Server::new_async().await;
        let controller = controller(&server);

        assert!(matches!(controller.next_page().await, Err(SearchError::NoSession)));
        assert!(matches!(controller.previous_page().await, Err(SearchError::NoSession)));
    }

    #[tokio::test]
    async fn test_slow_older_search_does_not_replace_newer_one() {
        let mut server = mockito::Server::new_async().await;

        // slowcat's profile takes a while to arrive
        let slow_body = user_json(&server.url(), "slowcat").to_string();
        server
            .mock("GET", "/users/slowcat")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_chunked_body(move |w| {
                std::thread::sleep(std::time::Duration::from_millis(300));
                w.write_all(slow_body.as_bytes())
            })
            .create_async()
            .await;
        server
            .mock("GET", "/users/slowcat/repos")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("[]")
            .create_async()
            .await;

        mock_user(&mut server).await;
        mock_repo_page(&mut server, 1, 3, false).await;
        mock_languages(&mut server, 200).await;

        let controller = controller(&server);

        // slowcat starts first, octocat second
        let (older, newer) = tokio::join!(controller.search("slowcat"), controller.search("octocat"));

        assert!(matches!(older, Err(SearchError::Superseded(login)) if login == "slowcat"));
        assert_eq!(newer.unwrap().user.login, "octocat");

        // The stored result is still octocat's
        let page = controller.show_page(1).await.unwrap();
        assert_eq!(page.user.login, "octocat");
        assert_eq!(page.total_repositories, 3);
        assert!(!controller.client().busy().is_visible());
    }

    #[test]
    fn test_superseded_search_is_discarded() {
        let controller = SearchController::new(client_for("http://127.0.0.1:9"), &Config::default());
        let user: User = serde_json::from_value(user_json("http://127.0.0.1:9", "octocat")).unwrap();

        let older = controller.begin_search();
        let newer = controller.begin_search();

        let newer_session = Arc::new(Session::new(user.clone(), Vec::new(), true));
        controller.commit(newer, Arc::clone(&newer_session)).unwrap();

        let older_session = Arc::new(Session::new(user, Vec::new(), true));
        assert!(matches!(
            controller.commit(older, older_session),
            Err(SearchError::Superseded(_))
        ));

        let current = controller.current_session().unwrap();
        assert!(Arc::ptr_eq(&current, &newer_session));
    }
}
