use ghfind_directory::Repository;

/// One fetched page and the cursor for the page after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryPage {
    pub repositories: Vec<Repository>,
    /// Next page number, or `None` once the listing is exhausted.
    pub next_page: Option<u32>,
}

/// All pages fetched for one user, plus a flattened view sorted by
/// popularity.
///
/// The sorted view is rebuilt whenever a page is appended. The sort is stable,
/// so repositories with equal star counts keep their fetch order.
#[derive(Debug, Clone)]
pub struct PagedRepositorySet {
    page_size: u32,
    pages: Vec<RepositoryPage>,
    sorted: Vec<Repository>,
}

impl PagedRepositorySet {
    #[must_use]
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size,
            pages: Vec::new(),
            sorted: Vec::new(),
        }
    }

    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    #[must_use]
    pub fn pages(&self) -> &[RepositoryPage] {
        &self.pages
    }

    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Number of the page that follows the ones already fetched.
    #[must_use]
    pub fn next_page_number(&self) -> u32 {
        u32::try_from(self.pages.len()).map_or(u32::MAX, |count| count.saturating_add(1))
    }

    /// True iff the most recent page was full.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.pages
            .last()
            .is_some_and(|page| page.next_page.is_some())
    }

    /// Append the next page in fetch order and rebuild the sorted view.
    pub fn push_page(&mut self, repositories: Vec<Repository>) {
        let full = u32::try_from(repositories.len()).is_ok_and(|len| len == self.page_size);
        let next_page = full.then(|| self.next_page_number().saturating_add(1));
        self.pages.push(RepositoryPage {
            repositories,
            next_page,
        });
        self.rebuild();
    }

    /// Repositories across all pages, most starred first.
    #[must_use]
    pub fn repositories(&self) -> &[Repository] {
        &self.sorted
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    fn rebuild(&mut self) {
        self.sorted = self
            .pages
            .iter()
            .flat_map(|page| page.repositories.iter().cloned())
            .collect();
        self.sorted
            .sort_by(|a, b| b.stargazers_count.cmp(&a.stargazers_count));
    }
}
