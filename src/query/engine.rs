use std::num::NonZeroUsize;

use serde::Serialize;

use crate::models::record::{Record, SearchQuery};

/// Page size of the blog listing.
pub const BLOG_PAGE_SIZE: usize = 5;

/// Category values that mean "no category filter".
const ALL_CATEGORIES: [&str; 2] = ["", "all"];

/// One pagination step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDirection {
    Previous,
    Next,
}

impl PageDirection {
    fn delta(self) -> isize {
        match self {
            PageDirection::Previous => -1,
            PageDirection::Next => 1,
        }
    }
}

/// Whether the upstream collection has arrived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Pending,
    Loaded,
    Failed(String),
}

/// The window of the filtered set shown for the current page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView<'a, R> {
    pub records: Vec<&'a R>,
    pub page_index: usize,
    pub total_pages: usize,
    /// Size of the whole filtered set, not just this window.
    pub total_matches: usize,
}

impl<R> PageView<'_, R> {
    pub fn has_previous(&self) -> bool {
        self.page_index > 1
    }

    pub fn has_next(&self) -> bool {
        self.page_index < self.total_pages
    }

    /// Pagination controls are hidden for single-page results.
    pub fn show_controls(&self) -> bool {
        self.total_pages > 1
    }
}

/// What the caller should render. Load failure and an empty filter result
/// are distinct placeholders.
#[derive(Debug)]
pub enum ListOutcome<'a, R> {
    Pending,
    LoadFailed(&'a str),
    NoMatches,
    Page(PageView<'a, R>),
}

/// A distinct category with the number of records carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub name: String,
    pub count: usize,
}

/// Page-local list state: the loaded collection, the active category and
/// search predicates, and the current page of the filtered view.
///
/// `filtered` holds indices into `all`, in ascending order, so the filtered
/// set is always an order-preserving subset of the loaded records.
#[derive(Debug)]
pub struct ListQueryEngine<R> {
    all: Vec<R>,
    filtered: Vec<usize>,
    active_category: Option<String>,
    active_query: Option<SearchQuery>,
    current_page: usize,
    page_size: Option<NonZeroUsize>,
    state: LoadState,
}

impl<R: Record> ListQueryEngine<R> {
    /// Engine showing `page_size` records per page.
    pub fn paginated(page_size: NonZeroUsize) -> Self {
        Self::with_page_size(Some(page_size))
    }

    /// Engine that always shows the whole filtered set.
    pub fn unpaginated() -> Self {
        Self::with_page_size(None)
    }

    /// Engine configured like the blog listing.
    pub fn for_blog() -> Self {
        Self::with_page_size(NonZeroUsize::new(BLOG_PAGE_SIZE))
    }

    fn with_page_size(page_size: Option<NonZeroUsize>) -> Self {
        Self {
            all: Vec::new(),
            filtered: Vec::new(),
            active_category: None,
            active_query: None,
            current_page: 1,
            page_size,
            state: LoadState::Pending,
        }
    }

    /// Replace the collection and reset every filter.
    pub fn load(&mut self, records: Vec<R>) {
        self.filtered = (0..records.len()).collect();
        self.all = records;
        self.active_category = None;
        self.active_query = None;
        self.current_page = 1;
        self.state = LoadState::Loaded;
        tracing::debug!(records = self.all.len(), "list loaded");
    }

    /// Record an upstream failure. The engine is left empty.
    pub fn mark_failed(&mut self, reason: impl Into<String>) {
        self.all.clear();
        self.filtered.clear();
        self.active_category = None;
        self.active_query = None;
        self.current_page = 1;
        self.state = LoadState::Failed(reason.into());
    }

    /// Filter by category. The empty string and `all` clear the filter, so a
    /// category literally named `all` cannot be selected on its own.
    pub fn apply_category(&mut self, category: &str) {
        self.active_category = if ALL_CATEGORIES.contains(&category) {
            None
        } else {
            Some(category.to_string())
        };
        self.refilter();
    }

    /// Filter by free text. Blank input clears the search.
    pub fn apply_search(&mut self, query: &str) {
        self.active_query = SearchQuery::parse(query);
        self.refilter();
    }

    /// Move one page back or forward. Steps past either end are ignored.
    pub fn page(&mut self, direction: PageDirection) {
        let target = self.current_page as isize + direction.delta();
        if target >= 1 && target as usize <= self.total_pages() {
            self.current_page = target as usize;
        }
    }

    pub fn current_page_view(&self) -> PageView<'_, R> {
        let window = match self.page_size {
            Some(size) => {
                let start = (self.current_page - 1) * size.get();
                let end = (start + size.get()).min(self.filtered.len());
                self.filtered.get(start..end).unwrap_or_default()
            }
            None => &self.filtered[..],
        };

        PageView {
            records: window.iter().map(|&i| &self.all[i]).collect(),
            page_index: self.current_page,
            total_pages: self.total_pages(),
            total_matches: self.filtered.len(),
        }
    }

    pub fn outcome(&self) -> ListOutcome<'_, R> {
        match &self.state {
            LoadState::Pending => ListOutcome::Pending,
            LoadState::Failed(reason) => ListOutcome::LoadFailed(reason),
            LoadState::Loaded if self.filtered.is_empty() => ListOutcome::NoMatches,
            LoadState::Loaded => ListOutcome::Page(self.current_page_view()),
        }
    }

    pub fn total_pages(&self) -> usize {
        match self.page_size {
            Some(size) => self.filtered.len().div_ceil(size.get()).max(1),
            None => 1,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn active_category(&self) -> Option<&str> {
        self.active_category.as_deref()
    }

    /// The normalized (trimmed, lowercased) active query.
    pub fn active_query(&self) -> Option<&str> {
        self.active_query.as_ref().map(SearchQuery::as_str)
    }

    pub fn load_state(&self) -> &LoadState {
        &self.state
    }

    pub fn all(&self) -> &[R] {
        &self.all
    }

    pub fn filtered(&self) -> impl Iterator<Item = &R> + '_ {
        self.filtered.iter().map(|&i| &self.all[i])
    }

    /// Distinct non-empty categories in first-seen order, with counts.
    pub fn categories(&self) -> Vec<CategoryCount> {
        let mut counts: Vec<CategoryCount> = Vec::new();
        for category in self.all.iter().filter_map(|record| record.category()) {
            if category.is_empty() {
                continue;
            }
            match counts.iter_mut().find(|c| c.name == category) {
                Some(entry) => entry.count += 1,
                None => counts.push(CategoryCount {
                    name: category.to_string(),
                    count: 1,
                }),
            }
        }
        counts
    }

    /// The first `n` loaded records, in source order.
    pub fn recent(&self, n: usize) -> &[R] {
        &self.all[..n.min(self.all.len())]
    }

    fn refilter(&mut self) {
        let category = self.active_category.as_deref();
        let query = self.active_query.as_ref();

        self.filtered = self
            .all
            .iter()
            .enumerate()
            .filter(|(_, record)| category.map_or(true, |c| record.in_category(c)))
            .filter(|(_, record)| query.map_or(true, |q| record.matches_query(q)))
            .map(|(i, _)| i)
            .collect();
        self.current_page = 1;
    }
}
