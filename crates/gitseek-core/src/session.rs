// Browsing session: current tab/page, the fetched list, selection and bookmarks
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::{
    bookmarks::Bookmarks,
    filters::SearchFilters,
    gate::UsageGate,
    models::{Repository, SortKey},
    query::{build_query, recent_query, trending_query},
    search::{SearchBackend, Tab},
    selection::Selection,
    Error, Result,
};

/// Identifies one fetch. Only the newest ticket's response is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

/// Everything needed to issue a single search request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub ticket: FetchTicket,
    pub query: String,
    pub sort: SortKey,
    pub page: u32,
    pub per_page: u32,
}

pub struct Session {
    tab: Tab,
    page: u32,
    per_page: u32,
    text: String,
    filters: SearchFilters,
    results: Vec<Repository>,
    error: Option<String>,
    selection: Selection,
    bookmarks: Bookmarks,
    generation: u64,
}

impl Session {
    pub fn new(per_page: u32) -> Self {
        Self {
            tab: Tab::default(),
            page: 1,
            per_page: per_page.max(1),
            text: String::new(),
            filters: SearchFilters::default(),
            results: Vec::new(),
            error: None,
            selection: Selection::new(),
            bookmarks: Bookmarks::new(),
            generation: 0,
        }
    }

    pub fn with_bookmarks(mut self, bookmarks: Bookmarks) -> Self {
        self.bookmarks = bookmarks;
        self
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn filters(&self) -> &SearchFilters {
        &self.filters
    }

    pub fn results(&self) -> &[Repository] {
        &self.results
    }

    /// Human-readable message from the last failed fetch
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn bookmarks(&self) -> &Bookmarks {
        &self.bookmarks
    }

    /// Changing tabs starts over at page 1 with nothing selected
    pub fn switch_tab(&mut self, tab: Tab) {
        debug!("Switching to {} tab", tab);
        self.tab = tab;
        self.page = 1;
        self.selection.clear();
    }

    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    pub fn next_page(&mut self) {
        self.page = self.page.saturating_add(1);
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.page.saturating_sub(1));
    }

    /// Store the text and filters and jump to the Search tab
    pub fn submit_search(&mut self, text: impl Into<String>, filters: SearchFilters) {
        self.text = text.into();
        self.filters = filters;
        self.switch_tab(Tab::Search);
    }

    /// Query string for the current tab; `None` on the Bookmarks tab
    pub fn current_query(&self, now: DateTime<Utc>) -> Option<String> {
        match self.tab {
            Tab::Trending => Some(trending_query(now)),
            Tab::Recent => Some(recent_query(now)),
            Tab::Search => Some(build_query(&self.text, &self.filters, now)),
            Tab::Bookmarks => None,
        }
    }

    /// Start a fetch for the current tab and page.
    ///
    /// Every call supersedes the previous ticket. The Bookmarks tab is
    /// served right here from memory and yields no request.
    pub fn begin_fetch(&mut self, now: DateTime<Utc>) -> Option<FetchRequest> {
        self.generation += 1;
        let ticket = FetchTicket(self.generation);

        let (query, sort) = match (self.current_query(now), self.tab.sort_key()) {
            (Some(query), Some(sort)) => (query, sort),
            _ => {
                self.error = None;
                self.results = self.bookmarks.repositories();
                return None;
            }
        };

        Some(FetchRequest {
            ticket,
            query,
            sort,
            page: self.page,
            per_page: self.per_page,
        })
    }

    /// Apply a response. Stale tickets are dropped and `false` is returned.
    ///
    /// Success replaces the list wholesale; failure empties it and records
    /// the message.
    pub fn apply(&mut self, ticket: FetchTicket, result: Result<Vec<Repository>>) -> bool {
        if ticket != FetchTicket(self.generation) {
            debug!("Dropping stale response {:?}", ticket);
            return false;
        }

        match result {
            Ok(repos) => {
                info!("Loaded {} repositories", repos.len());
                self.results = repos;
                self.error = None;
            }
            Err(err) => {
                debug!("Fetch failed: {}", err);
                self.results.clear();
                self.error = Some(err.to_string());
            }
        }
        true
    }

    /// One request for the current tab/page, awaited and applied
    pub async fn fetch(
        &mut self,
        backend: &dyn SearchBackend,
        gate: &dyn UsageGate,
        now: DateTime<Utc>,
    ) {
        let Some(request) = self.begin_fetch(now) else {
            return;
        };

        if !gate.may_continue() {
            self.apply(request.ticket, Err(Error::SessionExpired));
            return;
        }

        debug!("Fetching page {} for '{}'", request.page, request.query);
        let result = backend
            .search(&request.query, request.sort, request.page, request.per_page)
            .await;
        self.apply(request.ticket, result);
    }

    /// Bookmark or un-bookmark a record from the current list.
    ///
    /// Returns `None` if the id isn't on the page.
    pub fn toggle_bookmark(&mut self, id: u64, now: DateTime<Utc>) -> Option<bool> {
        let repo = self.results.iter().find(|r| r.id == id)?.clone();
        let bookmarked = self.bookmarks.toggle(&repo, now);

        // The Bookmarks tab mirrors the bookmark set
        if self.tab == Tab::Bookmarks {
            self.results = self.bookmarks.repositories();
        }
        Some(bookmarked)
    }

    pub fn toggle_selection(&mut self, id: u64) -> bool {
        self.selection.toggle(id)
    }

    /// Returns false if it was already selected
    pub fn select(&mut self, id: u64) -> bool {
        self.selection.insert(id)
    }

    pub fn select_all(&mut self) {
        self.selection.select_all(&self.results);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Selected records from the current list, in list order
    pub fn selected(&self) -> Vec<&Repository> {
        self.selection.pick(&self.results)
    }
}
