//! Paginated book list state.
//!
//! [`CatalogState`] owns the fetched books in fetch order, the favorites-only
//! filter, the pagination cursor and the in-flight flag. It never performs I/O:
//! loading methods hand back a [`PageRequest`] for the host to execute, and the
//! host reports back through [`CatalogState::complete`].
//!
//! # Pagination
//!
//! `current_page` counts pages already merged, starting at 1 for the first
//! page. The next page is requested at `current_page * page_size`. Only one
//! request is in flight at a time; `load_initial` and `load_more` return `None`
//! while `is_loading` is set.
//!
//! # Generations
//!
//! Every [`CatalogState::reset`] bumps a generation counter carried by the
//! request's [`PageTicket`]. Completions from an older generation are dropped,
//! so a slow page from an abandoned search never lands in the new list.

use crate::domain::error::Result;
use crate::domain::Book;
use crate::search::{PageKind, PageRequest, PageTicket};
use crate::storage::FavoriteKey;

/// Book list with pagination and favorites filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogState {
    books: Vec<Book>,
    show_favorites_only: bool,
    current_page: usize,
    is_loading: bool,
    generation: u64,
    exhausted: bool,
    last_error: Option<String>,
}

impl Default for CatalogState {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogState {
    /// Creates an empty catalog on page 1, not loading.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            books: Vec::new(),
            show_favorites_only: false,
            current_page: 1,
            is_loading: false,
            generation: 0,
            exhausted: false,
            last_error: None,
        }
    }

    /// All fetched books in fetch order, ignoring the filter.
    #[must_use]
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    #[must_use]
    pub const fn show_favorites_only(&self) -> bool {
        self.show_favorites_only
    }

    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.current_page
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the last `load_more` returned an empty page.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Message of the most recent failed page, cleared by the next success.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Starts fetching the first page of `query`.
    ///
    /// Returns `None` if a request is already in flight. The list is left as
    /// is until the page arrives; a successful first page replaces it.
    pub fn load_initial(&mut self, query: &str, page_size: usize) -> Option<PageRequest> {
        if self.is_loading {
            tracing::debug!("load_initial ignored, request in flight");
            return None;
        }

        self.is_loading = true;
        self.exhausted = false;
        Some(self.request(PageKind::Initial, query, page_size, 0))
    }

    /// Starts fetching the page after the last merged one.
    ///
    /// Returns `None` without touching the cursor if a request is in flight or
    /// the catalog is exhausted.
    pub fn load_more(&mut self, query: &str, page_size: usize) -> Option<PageRequest> {
        if self.is_loading {
            tracing::debug!(current_page = self.current_page, "load_more ignored, request in flight");
            return None;
        }
        if self.exhausted {
            tracing::debug!(current_page = self.current_page, "load_more ignored, catalog exhausted");
            return None;
        }

        self.is_loading = true;
        let start_index = self.current_page * page_size;
        Some(self.request(PageKind::More, query, page_size, start_index))
    }

    fn request(&self, kind: PageKind, query: &str, page_size: usize, start_index: usize) -> PageRequest {
        let ticket = PageTicket {
            generation: self.generation,
            kind,
            start_index,
        };
        tracing::debug!(generation = ticket.generation, kind = ?kind, start_index, "page requested");
        PageRequest {
            ticket,
            query: query.to_string(),
            max_results: page_size,
            start_index,
        }
    }

    /// Applies the outcome of the request identified by `ticket`.
    ///
    /// Returns `false` if the ticket belongs to an older generation, in which
    /// case nothing changes. Otherwise `is_loading` is cleared; a successful
    /// first page replaces the list, a successful later page is appended and
    /// advances the cursor, and a failure is logged leaving list and cursor
    /// untouched.
    pub fn complete(&mut self, ticket: &PageTicket, outcome: Result<Vec<Book>>) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                ticket_generation = ticket.generation,
                current_generation = self.generation,
                "dropping stale page"
            );
            return false;
        }

        self.is_loading = false;

        let page = match outcome {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!(kind = ?ticket.kind, start_index = ticket.start_index, error = %e, "page fetch failed");
                self.last_error = Some(e.to_string());
                return true;
            }
        };

        self.last_error = None;
        match ticket.kind {
            PageKind::Initial => {
                tracing::debug!(count = page.len(), "first page loaded");
                self.books = page;
                self.current_page = 1;
            }
            PageKind::More if page.is_empty() => {
                tracing::debug!(current_page = self.current_page, "empty page, no more results");
                self.exhausted = true;
            }
            PageKind::More => {
                tracing::debug!(count = page.len(), page = self.current_page + 1, "page appended");
                self.books.extend(page);
                self.current_page += 1;
            }
        }
        true
    }

    /// Books visible under the current filter, in fetch order.
    #[must_use]
    pub fn filtered_view(&self) -> Vec<&Book> {
        self.books
            .iter()
            .filter(|book| !self.show_favorites_only || book.is_favorite)
            .collect()
    }

    pub fn toggle_favorite_filter(&mut self) {
        self.show_favorites_only = !self.show_favorites_only;
        tracing::debug!(show_favorites_only = self.show_favorites_only, "favorites filter toggled");
    }

    /// Empties the catalog for a new search and invalidates in-flight requests.
    ///
    /// The favorites filter is kept.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.books.clear();
        self.current_page = 1;
        self.is_loading = false;
        self.exhausted = false;
        self.last_error = None;
        tracing::debug!(generation = self.generation, "catalog reset");
    }

    /// Sets the favorite flag on every loaded book whose key under `strategy`
    /// equals `key`. Returns how many books changed.
    pub fn apply_favorite(&mut self, strategy: FavoriteKey, key: &str, value: bool) -> usize {
        let mut changed = 0;
        for book in &mut self.books {
            if book.is_favorite != value && strategy.key_for(book) == key {
                book.is_favorite = value;
                changed += 1;
            }
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BookshelfError;

    fn book(title: &str, is_favorite: bool) -> Book {
        Book::new("1234", title, vec!["Author".to_string()]).with_favorite(is_favorite)
    }

    fn titles(catalog: &CatalogState) -> Vec<&str> {
        catalog.filtered_view().iter().map(|b| b.title.as_str()).collect()
    }

    fn fetch_error() -> BookshelfError {
        BookshelfError::Fetch {
            status: 503,
            message: "unavailable".to_string(),
        }
    }

    fn loaded(books: Vec<Book>) -> CatalogState {
        let mut catalog = CatalogState::new();
        let request = catalog.load_initial("iOS", 20).unwrap();
        catalog.complete(&request.ticket, Ok(books));
        catalog
    }

    #[test]
    fn initial_request_starts_at_zero() {
        let mut catalog = CatalogState::new();
        let request = catalog.load_initial("iOS", 20).unwrap();
        assert_eq!(request.start_index, 0);
        assert_eq!(request.max_results, 20);
        assert_eq!(request.query, "iOS");
        assert!(catalog.is_loading());
    }

    #[test]
    fn favorites_filter_shows_only_favorites() {
        let mut catalog = loaded(vec![book("Book 1", true), book("Book 2", false)]);
        assert_eq!(titles(&catalog), vec!["Book 1", "Book 2"]);

        catalog.toggle_favorite_filter();
        assert_eq!(titles(&catalog), vec!["Book 1"]);

        catalog.toggle_favorite_filter();
        assert_eq!(catalog.filtered_view().len(), 2);
    }

    #[test]
    fn filter_keeps_relative_order() {
        let mut catalog = loaded(vec![
            book("C", true),
            book("A", false),
            book("B", true),
            book("D", true),
        ]);
        catalog.toggle_favorite_filter();
        assert_eq!(titles(&catalog), vec!["C", "B", "D"]);
    }

    #[test]
    fn load_more_while_loading_is_a_no_op() {
        let mut catalog = loaded(vec![book("Book 1", false)]);
        let pending = catalog.load_more("iOS", 20).unwrap();
        assert_eq!(pending.start_index, 20);

        assert!(catalog.load_more("iOS", 20).is_none());
        assert!(catalog.load_initial("iOS", 20).is_none());
        assert_eq!(catalog.current_page(), 1);
    }

    #[test]
    fn load_more_appends_and_advances() {
        let mut catalog = loaded(vec![book("Book 1", false)]);
        let request = catalog.load_more("iOS", 20).unwrap();
        assert!(catalog.complete(&request.ticket, Ok(vec![book("Book 2", false), book("Book 1", false)])));

        assert_eq!(titles(&catalog), vec!["Book 1", "Book 2", "Book 1"]);
        assert_eq!(catalog.current_page(), 2);
        assert!(!catalog.is_loading());

        let next = catalog.load_more("iOS", 20).unwrap();
        assert_eq!(next.start_index, 40);
    }

    #[test]
    fn failed_load_more_keeps_list_and_cursor() {
        let mut catalog = loaded(vec![book("Book 1", false)]);
        let request = catalog.load_more("iOS", 20).unwrap();
        catalog.complete(&request.ticket, Err(fetch_error()));

        assert_eq!(titles(&catalog), vec!["Book 1"]);
        assert_eq!(catalog.current_page(), 1);
        assert!(!catalog.is_loading());
        assert!(catalog.last_error().is_some());

        let retry = catalog.load_more("iOS", 20).unwrap();
        assert_eq!(retry.start_index, 20);
    }

    #[test]
    fn failed_first_page_keeps_previous_list() {
        let mut catalog = loaded(vec![book("Book 1", false)]);
        let request = catalog.load_initial("iOS", 20).unwrap();
        catalog.complete(&request.ticket, Err(fetch_error()));

        assert_eq!(titles(&catalog), vec!["Book 1"]);
        assert!(!catalog.is_loading());
    }

    #[test]
    fn successful_page_clears_last_error() {
        let mut catalog = loaded(vec![]);
        let request = catalog.load_more("iOS", 20).unwrap();
        catalog.complete(&request.ticket, Err(fetch_error()));

        let retry = catalog.load_more("iOS", 20).unwrap();
        catalog.complete(&retry.ticket, Ok(vec![book("Book 3", false)]));
        assert_eq!(catalog.last_error(), None);
    }

    #[test]
    fn empty_more_page_exhausts_catalog() {
        let mut catalog = loaded(vec![book("Book 1", false)]);
        let request = catalog.load_more("iOS", 20).unwrap();
        catalog.complete(&request.ticket, Ok(vec![]));

        assert!(catalog.is_exhausted());
        assert_eq!(catalog.current_page(), 1);
        assert!(catalog.load_more("iOS", 20).is_none());

        assert!(catalog.load_initial("iOS", 20).is_some());
        assert!(!catalog.is_exhausted());
    }

    #[test]
    fn stale_completion_is_dropped() {
        let mut catalog = loaded(vec![book("Old", false)]);
        let stale = catalog.load_more("old query", 20).unwrap();

        catalog.reset();
        let fresh = catalog.load_initial("new query", 20).unwrap();

        assert!(!catalog.complete(&stale.ticket, Ok(vec![book("Late", false)])));
        assert!(catalog.books().is_empty());
        assert!(catalog.is_loading());

        assert!(catalog.complete(&fresh.ticket, Ok(vec![book("New", false)])));
        assert_eq!(titles(&catalog), vec!["New"]);
    }

    #[test]
    fn reset_keeps_filter() {
        let mut catalog = loaded(vec![book("Book 1", true)]);
        catalog.toggle_favorite_filter();
        catalog.reset();

        assert!(catalog.show_favorites_only());
        assert_eq!(catalog.current_page(), 1);
        assert_eq!(catalog.generation(), 1);
        assert!(catalog.books().is_empty());
    }

    #[test]
    fn apply_favorite_matches_by_key() {
        let mut catalog = loaded(vec![book("Book 1", false), book("Book 2", false), book("Book 1", false)]);

        assert_eq!(catalog.apply_favorite(FavoriteKey::Title, "Book 1", true), 2);
        catalog.toggle_favorite_filter();
        assert_eq!(titles(&catalog), vec!["Book 1", "Book 1"]);

        assert_eq!(catalog.apply_favorite(FavoriteKey::Title, "Book 1", true), 0);
    }
}
