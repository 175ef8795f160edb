//! The pagination/search state machine behind the article list.
//!
//! [`ListController`] owns the filter/query state and decides which page to
//! fetch next; it never performs IO itself. An intent method hands back a
//! [`PendingFetch`] describing the request, the caller executes it against a
//! [`NewsApi`] (usually on a spawned task) and feeds the [`FetchOutcome`]
//! back through [`ListController::apply`]. Every fetch carries a generation
//! number; outcomes from a superseded fetch are dropped, so a slow response
//! can never overwrite the state of a newer filter or search.

use crate::api::{HeadlineFilters, NewsApi, SEARCH_PAGE_SIZE};
use crate::app::Result;
use crate::domain::{Article, ArticlePage, Category};

/// What the list is currently doing, as one tagged variant instead of a pile
/// of independent booleans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    InitialLoading,
    Refreshing,
    LoadingMore,
    Error(String),
    Empty,
    Populated,
}

/// The request a [`PendingFetch`] will issue.
#[derive(Debug, Clone)]
pub enum NewsRequest {
    Headlines(HeadlineFilters),
    Search { query: String, page: u32 },
}

/// A fetch the controller has committed to. Execute it, then hand the
/// outcome back to [`ListController::apply`].
#[derive(Debug)]
pub struct PendingFetch {
    generation: u64,
    page: u32,
    search_mode: bool,
    requested_size: u32,
    pub request: NewsRequest,
}

impl PendingFetch {
    pub async fn execute(self, client: &(dyn NewsApi + Send + Sync)) -> FetchOutcome {
        let result = match &self.request {
            NewsRequest::Headlines(filters) => client.top_headlines(filters).await,
            NewsRequest::Search { query, page } => client.search_news(query, *page).await,
        };
        FetchOutcome {
            generation: self.generation,
            page: self.page,
            search_mode: self.search_mode,
            requested_size: self.requested_size,
            result,
        }
    }
}

/// Result of an executed fetch, tagged with the fetch's identity.
#[derive(Debug)]
pub struct FetchOutcome {
    generation: u64,
    page: u32,
    search_mode: bool,
    requested_size: u32,
    result: Result<ArticlePage>,
}

/// What the presentation layer should render, in strict precedence order.
#[derive(Debug, PartialEq, Eq)]
pub enum ViewState<'a> {
    /// Full-screen spinner (filter bar still visible).
    Loading,
    /// Full-screen error with a retry affordance.
    Error(&'a str),
    /// Inline empty message; wording differs for search vs headlines.
    Empty { search_mode: bool },
    /// The article list, with a footer spinner while more is loading.
    List { loading_more: bool },
}

pub struct ListController {
    pub articles: Vec<Article>,
    pub phase: Phase,
    pub page: u32,
    pub has_more: bool,
    pub search_query: String,
    pub selected_category: Option<Category>,
    pub is_search_mode: bool,
    country: String,
    page_size: u32,
    generation: u64,
}

impl ListController {
    pub fn new(country: String, page_size: u32) -> Self {
        Self {
            articles: Vec::new(),
            phase: Phase::InitialLoading,
            page: 1,
            has_more: true,
            search_query: String::new(),
            selected_category: None,
            is_search_mode: false,
            country,
            page_size,
            generation: 0,
        }
    }

    /// First fetch after the screen mounts.
    pub fn start(&mut self) -> PendingFetch {
        self.begin_primary(Phase::InitialLoading)
    }

    /// Pull-to-refresh: same request as `start`, different in-flight phase.
    pub fn refresh(&mut self) -> PendingFetch {
        self.begin_primary(Phase::Refreshing)
    }

    /// Re-issue the failed page-1 request with the same parameters.
    pub fn retry(&mut self) -> PendingFetch {
        self.begin_primary(Phase::InitialLoading)
    }

    /// Submit a search query. An all-whitespace query behaves like
    /// [`ListController::clear_search`]: back to headlines with the stored
    /// category.
    pub fn submit_search(&mut self, query: String) -> PendingFetch {
        self.search_query = query;
        self.begin_primary(Phase::InitialLoading)
    }

    /// Drop the active query and resume headline mode with the currently
    /// selected category.
    pub fn clear_search(&mut self) -> PendingFetch {
        self.search_query.clear();
        self.begin_primary(Phase::InitialLoading)
    }

    /// Select a category (None = all). While a search query is active this
    /// only stores the category for later; no fetch is issued until the
    /// query is cleared.
    pub fn select_category(&mut self, category: Option<Category>) -> Option<PendingFetch> {
        self.selected_category = category;
        if self.active_query().is_some() {
            return None;
        }
        Some(self.begin_primary(Phase::InitialLoading))
    }

    /// Fetch the next page, appending to the current list. Gated: only when
    /// the list is populated, more pages are believed to exist, and no other
    /// fetch is in flight.
    pub fn load_more(&mut self) -> Option<PendingFetch> {
        if self.phase != Phase::Populated || !self.has_more {
            return None;
        }
        self.phase = Phase::LoadingMore;
        Some(self.build_fetch(self.page + 1))
    }

    /// Fold an executed fetch back into the state. Outcomes from a
    /// superseded generation are discarded wholesale.
    pub fn apply(&mut self, outcome: FetchOutcome) {
        if outcome.generation != self.generation {
            tracing::debug!(
                stale = outcome.generation,
                current = self.generation,
                "discarding result of superseded fetch"
            );
            return;
        }

        match outcome.result {
            Ok(fetched) => {
                self.is_search_mode = outcome.search_mode;
                let returned = fetched.articles.len();
                if outcome.page == 1 {
                    self.articles = fetched.articles;
                } else {
                    self.articles.extend(fetched.articles);
                }
                self.page = outcome.page;
                // A full page is taken as a signal more may exist; a short
                // page as the end. The last page may be re-requested once
                // and come back short or empty, which then clears has_more.
                self.has_more = returned == outcome.requested_size as usize;
                self.settle();
            }
            Err(err) if outcome.page == 1 => {
                self.articles.clear();
                self.phase = Phase::Error(err.user_message());
            }
            Err(err) => {
                // Soft failure: keep the populated list, let the user
                // scroll again to retry.
                tracing::warn!(error = %err, page = outcome.page, "load-more failed");
                self.settle();
            }
        }
    }

    /// Rendering precedence for the presentation layer.
    pub fn view_state(&self) -> ViewState<'_> {
        match (&self.phase, self.articles.is_empty()) {
            (Phase::InitialLoading, true) => ViewState::Loading,
            (Phase::Error(message), _) => ViewState::Error(message),
            (_, true) => ViewState::Empty {
                search_mode: self.is_search_mode,
            },
            (Phase::LoadingMore, false) => ViewState::List { loading_more: true },
            (_, false) => ViewState::List {
                loading_more: false,
            },
        }
    }

    /// Resolve the in-flight phase once a fetch has been folded in.
    fn settle(&mut self) {
        self.phase = if self.articles.is_empty() {
            Phase::Empty
        } else {
            Phase::Populated
        };
    }

    fn active_query(&self) -> Option<&str> {
        let trimmed = self.search_query.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    }

    fn begin_primary(&mut self, phase: Phase) -> PendingFetch {
        self.page = 1;
        self.has_more = true;
        // Replacing the phase also clears any prior error.
        self.phase = phase;
        self.build_fetch(1)
    }

    fn build_fetch(&mut self, page: u32) -> PendingFetch {
        self.generation += 1;
        match self.active_query() {
            Some(query) => PendingFetch {
                generation: self.generation,
                page,
                search_mode: true,
                requested_size: SEARCH_PAGE_SIZE,
                request: NewsRequest::Search {
                    query: query.to_string(),
                    page,
                },
            },
            None => PendingFetch {
                generation: self.generation,
                page,
                search_mode: false,
                requested_size: self.page_size,
                request: NewsRequest::Headlines(HeadlineFilters {
                    country: Some(self.country.clone()),
                    category: self.selected_category,
                    q: None,
                    page: Some(page),
                    page_size: Some(self.page_size),
                }),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::NewsError;
    use crate::domain::{Article, ArticleSource};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    fn article(tag: &str) -> Article {
        Article {
            source: ArticleSource {
                id: None,
                name: "Wire".into(),
            },
            author: None,
            title: format!("title-{tag}"),
            description: None,
            url: format!("https://example.com/{tag}"),
            url_to_image: None,
            published_at: None,
            content: None,
        }
    }

    fn page_of(count: usize, prefix: &str) -> ArticlePage {
        ArticlePage {
            status: "ok".into(),
            total_results: count as u32,
            articles: (0..count).map(|i| article(&format!("{prefix}{i}"))).collect(),
        }
    }

    /// Scripted [`NewsApi`]: pops canned responses and records every call.
    #[derive(Default)]
    struct MockNewsApi {
        responses: Mutex<VecDeque<Result<ArticlePage>>>,
        headline_calls: Mutex<Vec<HeadlineFilters>>,
        search_calls: Mutex<Vec<(String, u32)>>,
    }

    impl MockNewsApi {
        fn push(&self, response: Result<ArticlePage>) {
            self.responses.lock().unwrap().push_back(response);
        }

        fn pop(&self) -> Result<ArticlePage> {
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("mock has no scripted response left")
        }
    }

    #[async_trait]
    impl NewsApi for MockNewsApi {
        async fn top_headlines(&self, filters: &HeadlineFilters) -> Result<ArticlePage> {
            self.headline_calls.lock().unwrap().push(filters.clone());
            self.pop()
        }

        async fn search_news(&self, query: &str, page: u32) -> Result<ArticlePage> {
            self.search_calls
                .lock()
                .unwrap()
                .push((query.to_string(), page));
            self.pop()
        }
    }

    fn controller() -> ListController {
        ListController::new("us".into(), 10)
    }

    fn run(controller: &mut ListController, fetch: PendingFetch, mock: &MockNewsApi) {
        let outcome = tokio_test::block_on(fetch.execute(mock));
        controller.apply(outcome);
    }

    fn titles(controller: &ListController) -> Vec<&str> {
        controller.articles.iter().map(|a| a.title.as_str()).collect()
    }

    #[test]
    fn test_page_one_replaces_and_full_page_means_more() {
        let mock = MockNewsApi::default();
        let mut c = controller();

        mock.push(Ok(page_of(10, "a")));
        let fetch = c.start();
        assert_eq!(c.view_state(), ViewState::Loading);
        run(&mut c, fetch, &mock);

        assert_eq!(c.articles.len(), 10);
        assert_eq!(c.page, 1);
        assert!(c.has_more);
        assert_eq!(c.phase, Phase::Populated);

        // A later page-1 fetch replaces, never appends
        mock.push(Ok(page_of(3, "b")));
        let fetch = c.refresh();
        assert_eq!(c.phase, Phase::Refreshing);
        run(&mut c, fetch, &mock);
        assert_eq!(titles(&c)[0], "title-b0");
        assert_eq!(c.articles.len(), 3);
        assert!(!c.has_more, "short page clears has_more");
    }

    #[test]
    fn test_empty_page_one() {
        let mock = MockNewsApi::default();
        let mut c = controller();

        mock.push(Ok(page_of(0, "a")));
        let fetch = c.start();
        run(&mut c, fetch, &mock);

        assert_eq!(c.phase, Phase::Empty);
        assert!(!c.has_more);
        assert_eq!(c.view_state(), ViewState::Empty { search_mode: false });
    }

    #[test]
    fn test_load_more_appends_preserving_order() {
        let mock = MockNewsApi::default();
        let mut c = controller();

        mock.push(Ok(page_of(10, "a")));
        let fetch = c.start();
        run(&mut c, fetch, &mock);

        mock.push(Ok(page_of(10, "b")));
        let fetch = c.load_more().expect("populated list with more pages");
        assert_eq!(c.view_state(), ViewState::List { loading_more: true });
        run(&mut c, fetch, &mock);

        assert_eq!(c.articles.len(), 20);
        assert_eq!(titles(&c)[0], "title-a0");
        assert_eq!(titles(&c)[9], "title-a9");
        assert_eq!(titles(&c)[10], "title-b0");
        assert_eq!(c.page, 2);
        assert!(c.has_more);

        // Short page ends pagination
        mock.push(Ok(page_of(4, "c")));
        let fetch = c.load_more().unwrap();
        run(&mut c, fetch, &mock);
        assert_eq!(c.articles.len(), 24);
        assert_eq!(c.page, 3);
        assert!(!c.has_more);
        assert!(c.load_more().is_none(), "no more pages believed available");
    }

    #[test]
    fn test_load_more_gated_while_primary_in_flight() {
        let mock = MockNewsApi::default();
        let mut c = controller();

        mock.push(Ok(page_of(10, "a")));
        let fetch = c.start();
        run(&mut c, fetch, &mock);

        // A refresh is now in flight; load-more must not start
        let _refresh = c.refresh();
        assert!(c.load_more().is_none());
    }

    #[test]
    fn test_page_one_failure_clears_list_and_surfaces_message() {
        let mock = MockNewsApi::default();
        let mut c = controller();

        mock.push(Ok(page_of(10, "a")));
        let fetch = c.start();
        run(&mut c, fetch, &mock);

        mock.push(Err(NewsError::RemoteApi {
            status: "error".into(),
            code: "apiKeyInvalid".into(),
            message: "Your API key is invalid or incorrect.".into(),
        }));
        let fetch = c.refresh();
        run(&mut c, fetch, &mock);

        assert!(c.articles.is_empty());
        assert_eq!(
            c.view_state(),
            ViewState::Error("Your API key is invalid or incorrect.")
        );
    }

    #[test]
    fn test_network_failure_uses_fixed_message() {
        let mock = MockNewsApi::default();
        let mut c = controller();

        mock.push(Err(NewsError::Network("network error searching news".into())));
        let fetch = c.submit_search("bitcoin".into());
        run(&mut c, fetch, &mock);

        assert_eq!(
            c.view_state(),
            ViewState::Error("network error searching news")
        );
    }

    #[test]
    fn test_load_more_failure_is_soft() {
        let mock = MockNewsApi::default();
        let mut c = controller();

        mock.push(Ok(page_of(10, "a")));
        let fetch = c.start();
        run(&mut c, fetch, &mock);

        mock.push(Err(NewsError::Network("network error loading news".into())));
        let fetch = c.load_more().unwrap();
        run(&mut c, fetch, &mock);

        // List untouched, no error state, spinner cleared
        assert_eq!(c.articles.len(), 10);
        assert_eq!(c.phase, Phase::Populated);
        assert_eq!(c.view_state(), ViewState::List { loading_more: false });
        // Scrolling again retries
        assert!(c.load_more().is_some());
    }

    #[test]
    fn test_search_ignores_category_until_cleared() {
        let mock = MockNewsApi::default();
        let mut c = controller();

        mock.push(Ok(page_of(10, "a")));
        let fetch = c.select_category(Some(Category::Sports)).unwrap();
        run(&mut c, fetch, &mock);
        assert_eq!(
            mock.headline_calls.lock().unwrap()[0].category,
            Some(Category::Sports)
        );

        mock.push(Ok(page_of(10, "s")));
        let fetch = c.submit_search("bitcoin".into());
        run(&mut c, fetch, &mock);
        assert!(c.is_search_mode);
        assert_eq!(
            *mock.search_calls.lock().unwrap(),
            vec![("bitcoin".to_string(), 1)]
        );

        // Category change during an active search: stored, no fetch
        assert!(c.select_category(Some(Category::Health)).is_none());
        assert_eq!(c.selected_category, Some(Category::Health));
        assert_eq!(mock.headline_calls.lock().unwrap().len(), 1);

        // Clearing the search resumes headlines with the stored category
        mock.push(Ok(page_of(10, "h")));
        let fetch = c.clear_search();
        run(&mut c, fetch, &mock);
        assert!(!c.is_search_mode);
        let calls = mock.headline_calls.lock().unwrap();
        assert_eq!(calls[1].category, Some(Category::Health));
    }

    #[test]
    fn test_whitespace_search_submits_headlines() {
        let mock = MockNewsApi::default();
        let mut c = controller();

        mock.push(Ok(page_of(2, "a")));
        let fetch = c.submit_search("   ".into());
        assert!(matches!(fetch.request, NewsRequest::Headlines(_)));
        run(&mut c, fetch, &mock);

        assert!(!c.is_search_mode);
        assert!(mock.search_calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_search_pagination_uses_search_page_size() {
        let mock = MockNewsApi::default();
        let mut c = controller();

        mock.push(Ok(page_of(10, "s")));
        let fetch = c.submit_search("rust".into());
        run(&mut c, fetch, &mock);

        mock.push(Ok(page_of(10, "t")));
        let fetch = c.load_more().unwrap();
        assert!(matches!(
            fetch.request,
            NewsRequest::Search { ref query, page: 2 } if query == "rust"
        ));
        run(&mut c, fetch, &mock);
        assert_eq!(c.articles.len(), 20);
    }

    #[test]
    fn test_stale_generation_is_discarded() {
        let mock = MockNewsApi::default();
        let mut c = controller();

        // A slow search fetch...
        mock.push(Ok(page_of(10, "old")));
        let slow = c.submit_search("old".into());
        let slow_outcome = tokio_test::block_on(slow.execute(&mock));

        // ...superseded by a newer one before its result lands
        mock.push(Ok(page_of(3, "new")));
        let fast = c.submit_search("new".into());
        let fast_outcome = tokio_test::block_on(fast.execute(&mock));

        c.apply(fast_outcome);
        c.apply(slow_outcome);

        assert_eq!(c.articles.len(), 3);
        assert_eq!(titles(&c)[0], "title-new0");
        assert_eq!(c.phase, Phase::Populated);
    }

    #[test]
    fn test_stale_failure_cannot_clobber_newer_success() {
        let mock = MockNewsApi::default();
        let mut c = controller();

        mock.push(Err(NewsError::Network("network error loading news".into())));
        let slow = c.start();
        let slow_outcome = tokio_test::block_on(slow.execute(&mock));

        mock.push(Ok(page_of(5, "a")));
        let fast = c.refresh();
        let fast_outcome = tokio_test::block_on(fast.execute(&mock));

        c.apply(fast_outcome);
        c.apply(slow_outcome);

        assert_eq!(c.articles.len(), 5);
        assert_eq!(c.phase, Phase::Populated);
    }

    #[test]
    fn test_retry_repeats_same_request() {
        let mock = MockNewsApi::default();
        let mut c = controller();
        c.selected_category = Some(Category::Science);

        mock.push(Err(NewsError::Network("network error loading news".into())));
        let fetch = c.start();
        run(&mut c, fetch, &mock);
        assert!(matches!(c.view_state(), ViewState::Error(_)));

        mock.push(Ok(page_of(10, "a")));
        let fetch = c.retry();
        assert_eq!(c.phase, Phase::InitialLoading, "retry clears the error");
        run(&mut c, fetch, &mock);

        let calls = mock.headline_calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].category, Some(Category::Science));
        assert_eq!(calls[1].page, Some(1));
    }

    #[test]
    fn test_phase_resolves_after_every_fetch() {
        let mock = MockNewsApi::default();
        let mut c = controller();

        // Success with articles leaves the loading phase behind
        mock.push(Ok(page_of(10, "a")));
        let fetch = c.start();
        assert_eq!(c.phase, Phase::InitialLoading);
        run(&mut c, fetch, &mock);
        assert_eq!(c.phase, Phase::Populated);

        // A load-more that comes back empty keeps the list populated
        mock.push(Ok(page_of(0, "b")));
        let fetch = c.load_more().unwrap();
        assert_eq!(c.phase, Phase::LoadingMore);
        run(&mut c, fetch, &mock);
        assert_eq!(c.phase, Phase::Populated);

        // Success with no articles at all settles to Empty
        mock.push(Ok(page_of(0, "c")));
        let fetch = c.refresh();
        run(&mut c, fetch, &mock);
        assert_eq!(c.phase, Phase::Empty);
    }

    #[test]
    fn test_empty_search_result_view() {
        let mock = MockNewsApi::default();
        let mut c = controller();

        mock.push(Ok(page_of(0, "s")));
        let fetch = c.submit_search("zzzz".into());
        run(&mut c, fetch, &mock);

        assert_eq!(c.view_state(), ViewState::Empty { search_mode: true });
    }
}
