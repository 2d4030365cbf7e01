use std::time::{Duration, Instant};

use ghfind_directory::Repository;

use super::{PageRequest, PageResult, PagedRepositorySet, REPOS_FAILURE_FALLBACK};
use crate::cache::StaleCache;
use crate::failure::{Failure, Notice};

/// Lifecycle of the repository listing for the selected user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PagerPhase {
    /// No user is selected.
    Idle,
    LoadingFirstPage,
    /// At least one page is available and nothing is in flight.
    Ready,
    LoadingNextPage,
    Failed(Failure),
}

/// Fetches a selected user's repositories one page at a time.
///
/// Pages are requested strictly in sequence: the next page number is derived
/// from how many pages have been merged, and a new request is only issued
/// once the previous one resolved. Every username change bumps a generation
/// counter so completions for an earlier selection are ignored.
#[derive(Debug)]
pub struct RepoPager {
    username: Option<String>,
    page_size: u32,
    generation: u64,
    set: PagedRepositorySet,
    phase: PagerPhase,
    scroll_reset: bool,
    cache: StaleCache<String, PagedRepositorySet>,
}

impl RepoPager {
    #[must_use]
    pub fn new(page_size: u32, stale_for: Duration) -> Self {
        let page_size = page_size.max(1);
        Self {
            username: None,
            page_size,
            generation: 0,
            set: PagedRepositorySet::new(page_size),
            phase: PagerPhase::Idle,
            scroll_reset: false,
            cache: StaleCache::new(stale_for),
        }
    }

    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    #[must_use]
    pub fn phase(&self) -> &PagerPhase {
        &self.phase
    }

    #[must_use]
    pub fn set(&self) -> &PagedRepositorySet {
        &self.set
    }

    /// Repositories merged so far, most starred first.
    #[must_use]
    pub fn repositories(&self) -> &[Repository] {
        self.set.repositories()
    }

    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.set.has_next_page()
    }

    #[must_use]
    pub fn is_fetching(&self) -> bool {
        matches!(
            self.phase,
            PagerPhase::LoadingFirstPage | PagerPhase::LoadingNextPage
        )
    }

    /// Whether the end-of-list sentinel should currently be observed.
    #[must_use]
    pub fn wants_next_page(&self) -> bool {
        self.phase == PagerPhase::Ready && self.set.has_next_page()
    }

    /// Switch the listing to `username` (trimmed; blank means none).
    ///
    /// A change discards the previous user's pages and requests a scroll
    /// reset. Returns the first-page request unless the user is cleared or
    /// their pages are still fresh in the staleness window.
    pub fn select(&mut self, username: Option<&str>, now: Instant) -> Option<PageRequest> {
        let next = username
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string);
        if next == self.username {
            return None;
        }

        self.generation = self.generation.wrapping_add(1);
        self.username = next;
        self.set = PagedRepositorySet::new(self.page_size);
        self.scroll_reset = true;

        let Some(username) = self.username.clone() else {
            self.phase = PagerPhase::Idle;
            return None;
        };

        if let Some(set) = self.cache.get(&username, now) {
            tracing::debug!(%username, pages = set.page_count(), "repositories served from cache");
            self.set = set;
            self.phase = PagerPhase::Ready;
            return None;
        }

        self.phase = PagerPhase::LoadingFirstPage;
        Some(self.request(username))
    }

    /// Handle the end-of-list sentinel becoming visible.
    ///
    /// Requests the next page only when one exists and nothing is in flight,
    /// so repeated events while loading are absorbed.
    pub fn on_sentinel_visible(&mut self) -> Option<PageRequest> {
        if !self.wants_next_page() {
            return None;
        }
        let username = self.username.clone()?;
        self.phase = PagerPhase::LoadingNextPage;
        Some(self.request(username))
    }

    /// Request the page that failed again, keeping the pages already merged.
    pub fn retry(&mut self) -> Option<PageRequest> {
        if !matches!(self.phase, PagerPhase::Failed(_)) {
            return None;
        }
        let username = self.username.clone()?;
        self.phase = if self.set.is_empty() {
            PagerPhase::LoadingFirstPage
        } else {
            PagerPhase::LoadingNextPage
        };
        Some(self.request(username))
    }

    /// Merge a completed page. Returns `false` when the result belongs to an
    /// earlier selection or an unexpected page and was discarded.
    pub fn resolve(&mut self, result: PageResult, now: Instant) -> bool {
        if result.generation != self.generation
            || !self.is_fetching()
            || result.page != self.set.next_page_number()
        {
            tracing::debug!(
                generation = result.generation,
                page = result.page,
                "discarding stale repository page"
            );
            return false;
        }

        match result.outcome {
            Ok(repositories) => {
                tracing::debug!(page = result.page, count = repositories.len(), "repository page merged");
                self.set.push_page(repositories);
                self.phase = PagerPhase::Ready;
                if let Some(username) = &self.username {
                    self.cache.insert(username.clone(), self.set.clone(), now);
                }
            }
            Err(err) => {
                tracing::warn!(page = result.page, error = %err, "repository page failed");
                self.phase = PagerPhase::Failed(Failure::from_error(&err));
            }
        }
        true
    }

    /// Returns `true` once after each username change.
    pub fn take_scroll_reset(&mut self) -> bool {
        std::mem::take(&mut self.scroll_reset)
    }

    #[must_use]
    pub fn status_line(&self) -> Option<&'static str> {
        match self.phase {
            PagerPhase::LoadingFirstPage => Some("Loading repositories..."),
            PagerPhase::LoadingNextPage => Some("Loading more repositories..."),
            PagerPhase::Ready if self.set.is_empty() => Some("No public repositories found."),
            _ => None,
        }
    }

    #[must_use]
    pub fn notice(&self) -> Option<Notice> {
        match &self.phase {
            PagerPhase::Failed(failure) => Some(failure.notice(REPOS_FAILURE_FALLBACK)),
            _ => None,
        }
    }

    fn request(&self, username: String) -> PageRequest {
        PageRequest {
            generation: self.generation,
            username,
            page: self.set.next_page_number(),
            page_size: self.page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::set::tests::{page, repo};
    use ghfind_directory::DirectoryError;
    use pretty_assertions::assert_eq;

    const STALE: Duration = Duration::from_secs(30);

    fn loaded(request: &PageRequest, repositories: Vec<Repository>) -> PageResult {
        PageResult {
            generation: request.generation,
            page: request.page,
            outcome: Ok(repositories),
        }
    }

    #[test]
    fn blank_username_does_not_fetch() {
        let mut pager = RepoPager::new(10, STALE);
        assert_eq!(pager.select(Some("   "), Instant::now()), None);
        assert_eq!(pager.phase(), &PagerPhase::Idle);
    }

    #[test]
    fn pages_are_requested_sequentially_until_a_short_page() {
        let now = Instant::now();
        let mut pager = RepoPager::new(10, STALE);

        let first = pager.select(Some(" octocat "), now).unwrap();
        assert_eq!(first.username, "octocat");
        assert_eq!(first.page, 1);
        assert_eq!(pager.status_line(), Some("Loading repositories..."));
        assert_eq!(pager.on_sentinel_visible(), None);

        assert!(pager.resolve(loaded(&first, page(1, 10)), now));
        assert!(pager.has_next_page());

        let second = pager.on_sentinel_visible().unwrap();
        assert_eq!(second.page, 2);
        assert_eq!(pager.status_line(), Some("Loading more repositories..."));
        assert_eq!(pager.on_sentinel_visible(), None);

        assert!(pager.resolve(loaded(&second, page(11, 3)), now));
        assert!(!pager.has_next_page());
        assert_eq!(pager.repositories().len(), 13);
        assert_eq!(pager.repositories()[0].stargazers_count, 13);
        assert_eq!(pager.on_sentinel_visible(), None);
    }

    #[test]
    fn popular_repository_on_second_page_is_listed_first() {
        let now = Instant::now();
        let mut pager = RepoPager::new(10, STALE);

        let first = pager.select(Some("octocat"), now).unwrap();
        pager.resolve(loaded(&first, page(1, 10)), now);
        let second = pager.on_sentinel_visible().unwrap();
        pager.resolve(loaded(&second, vec![repo(42, 50)]), now);

        assert_eq!(pager.repositories()[0].id, 42);
    }

    #[test]
    fn switching_users_discards_pages_and_late_results() {
        let now = Instant::now();
        let mut pager = RepoPager::new(10, STALE);

        let octocat = pager.select(Some("octocat"), now).unwrap();
        pager.take_scroll_reset();
        let hubot = pager.select(Some("hubot"), now).unwrap();
        assert!(pager.take_scroll_reset());
        assert!(!pager.take_scroll_reset());

        assert!(!pager.resolve(loaded(&octocat, page(1, 10)), now));
        assert!(pager.repositories().is_empty());

        assert!(pager.resolve(loaded(&hubot, vec![repo(7, 1)]), now));
        assert_eq!(pager.repositories()[0].id, 7);
    }

    #[test]
    fn clearing_the_username_tears_down_state() {
        let now = Instant::now();
        let mut pager = RepoPager::new(10, STALE);
        let request = pager.select(Some("octocat"), now).unwrap();
        pager.resolve(loaded(&request, page(1, 4)), now);

        assert_eq!(pager.select(None, now), None);
        assert_eq!(pager.phase(), &PagerPhase::Idle);
        assert!(pager.repositories().is_empty());
    }

    #[test]
    fn empty_first_page_reports_no_repositories() {
        let now = Instant::now();
        let mut pager = RepoPager::new(10, STALE);
        let request = pager.select(Some("ghost"), now).unwrap();
        pager.resolve(loaded(&request, Vec::new()), now);
        assert_eq!(pager.status_line(), Some("No public repositories found."));
        assert!(!pager.wants_next_page());
    }

    #[test]
    fn failures_show_the_raw_message_or_rate_limit_notice() {
        let now = Instant::now();
        let mut pager = RepoPager::new(10, STALE);

        let request = pager.select(Some("ghost"), now).unwrap();
        pager.resolve(
            PageResult {
                generation: request.generation,
                page: request.page,
                outcome: Err(DirectoryError::Api {
                    status: 404,
                    status_text: "Not Found".into(),
                    message: Some("Not Found".into()),
                }),
            },
            now,
        );
        assert_eq!(
            pager.notice(),
            Some(Notice::Inline(
                "GitHub API error (404): Not Found – Not Found".into()
            ))
        );

        let request = pager.select(Some("octocat"), now).unwrap();
        pager.resolve(
            PageResult {
                generation: request.generation,
                page: request.page,
                outcome: Err(DirectoryError::RateLimited),
            },
            now,
        );
        assert!(matches!(pager.notice(), Some(Notice::RateLimit { .. })));
        assert_eq!(pager.on_sentinel_visible(), None);
    }

    #[test]
    fn reselecting_within_the_window_restores_merged_pages() {
        let now = Instant::now();
        let mut pager = RepoPager::new(10, STALE);

        let first = pager.select(Some("octocat"), now).unwrap();
        pager.resolve(loaded(&first, page(1, 10)), now);
        let second = pager.on_sentinel_visible().unwrap();
        pager.resolve(loaded(&second, page(11, 10)), now);

        pager.select(None, now);
        assert_eq!(pager.select(Some("octocat"), now + Duration::from_secs(10)), None);
        assert_eq!(pager.phase(), &PagerPhase::Ready);
        assert_eq!(pager.repositories().len(), 20);
        assert_eq!(pager.on_sentinel_visible().map(|request| request.page), Some(3));
    }

    #[test]
    fn duplicate_completion_for_the_same_page_is_ignored() {
        let now = Instant::now();
        let mut pager = RepoPager::new(10, STALE);
        let request = pager.select(Some("octocat"), now).unwrap();
        assert!(pager.resolve(loaded(&request, page(1, 10)), now));
        assert!(!pager.resolve(loaded(&request, page(1, 10)), now));
        assert_eq!(pager.repositories().len(), 10);
    }

    #[test]
    fn retry_requests_the_failed_page_again() {
        let now = Instant::now();
        let mut pager = RepoPager::new(10, STALE);
        assert_eq!(pager.retry(), None);

        let first = pager.select(Some("octocat"), now).unwrap();
        pager.resolve(loaded(&first, page(1, 10)), now);
        let second = pager.on_sentinel_visible().unwrap();
        pager.resolve(
            PageResult {
                generation: second.generation,
                page: second.page,
                outcome: Err(DirectoryError::RateLimited),
            },
            now,
        );

        let again = pager.retry().unwrap();
        assert_eq!(again, second);
        assert_eq!(pager.phase(), &PagerPhase::LoadingNextPage);
        assert_eq!(pager.retry(), None);
        assert!(pager.resolve(loaded(&again, page(11, 3)), now));
        assert_eq!(pager.repositories().len(), 13);
    }
}
