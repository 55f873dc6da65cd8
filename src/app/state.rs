//! Application state management and view model computation.
//!
//! [`AppState`] is the single source of truth for the plugin: the catalog, the
//! open detail screen if any, the selection into the filtered list, the input
//! mode and query buffer, and handles to the settings store and search source.
//!
//! # View Model Computation
//!
//! [`AppState::compute_viewmodel`] turns a state snapshot into a
//! [`UIViewModel`]. It handles windowing around the selection, the empty
//! states and word wrapping of the detail description for the given terminal
//! size.

use super::catalog::CatalogState;
use super::detail::DetailState;
use super::modes::{InputMode, Screen};
use crate::domain::Book;
use crate::search::{build_source, BookSource};
use crate::storage::{FavoriteKey, SettingsStore};
use crate::ui::helpers::{truncate, wrap_text};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    BookRow, DetailView, EmptyState, FooterInfo, HeaderInfo, QueryBarInfo, UIViewModel, ViewBody,
};
use crate::Config;

/// Rows taken by header, borders and footer.
const CHROME_ROWS: usize = 6;
/// Extra rows taken by the query bar while editing.
const QUERY_BAR_ROWS: usize = 3;
/// Each book occupies a title line and an authors line.
const ROWS_PER_BOOK: usize = 2;

/// Central application state container.
pub struct AppState {
    /// Fetched books, filter and pagination.
    pub catalog: CatalogState,

    /// Detail screen state while a book is open.
    pub detail: Option<DetailState>,

    /// Zero-based index into [`CatalogState::filtered_view`].
    ///
    /// Clamped to the visible list; does not wrap.
    pub selected_index: usize,

    pub input_mode: InputMode,

    pub screen: Screen,

    /// Query of the current search.
    pub query: String,

    /// Query being edited in [`InputMode::Query`].
    pub query_buffer: String,

    /// Books requested per page.
    pub page_size: usize,

    /// Which book field keys favorites in the store.
    pub favorite_key: FavoriteKey,

    /// Color scheme for UI rendering.
    pub theme: Theme,

    store: Box<dyn SettingsStore>,
    source: Box<dyn BookSource>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("catalog", &self.catalog)
            .field("detail", &self.detail)
            .field("selected_index", &self.selected_index)
            .field("input_mode", &self.input_mode)
            .field("screen", &self.screen)
            .field("query", &self.query)
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Creates an empty application state on the catalog screen.
    ///
    /// The search source is built from `config`; nothing is fetched until
    /// [`crate::app::Event::Start`] is handled.
    ///
    /// # Example
    ///
    /// ```rust
    /// use zbooks::storage::MemorySettingsStore;
    /// use zbooks::{AppState, Config, Theme};
    ///
    /// let state = AppState::new(&Config::default(), Theme::default(), Box::new(MemorySettingsStore::default()));
    /// assert_eq!(state.query, "iOS");
    /// assert_eq!(state.selected_index, 0);
    /// ```
    #[must_use]
    pub fn new(config: &Config, theme: Theme, store: Box<dyn SettingsStore>) -> Self {
        Self {
            catalog: CatalogState::new(),
            detail: None,
            selected_index: 0,
            input_mode: InputMode::Normal,
            screen: Screen::Catalog,
            query: config.query.clone(),
            query_buffer: String::new(),
            page_size: config.page_size,
            favorite_key: config.favorite_key,
            theme,
            store,
            source: build_source(config.source, config.api_url.as_deref(), config.api_key.as_deref()),
        }
    }

    /// Settings store holding favorite flags.
    #[must_use]
    pub fn store(&self) -> &dyn SettingsStore {
        self.store.as_ref()
    }

    pub(crate) fn store_mut(&mut self) -> &mut dyn SettingsStore {
        self.store.as_mut()
    }

    pub(crate) fn source(&self) -> &dyn BookSource {
        self.source.as_ref()
    }

    /// Moves the selection down one row, stopping at the last row.
    pub fn move_selection_down(&mut self) {
        let len = self.catalog.filtered_view().len();
        if len == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1).min(len - 1);
    }

    /// Moves the selection up one row, stopping at the first row.
    pub fn move_selection_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    /// Whether the selection sits on the last rendered row.
    #[must_use]
    pub fn selection_on_last_row(&self) -> bool {
        let len = self.catalog.filtered_view().len();
        len > 0 && self.selected_index == len - 1
    }

    /// Clamps the selection to the current filtered list.
    pub fn clamp_selection(&mut self) {
        let len = self.catalog.filtered_view().len();
        self.selected_index = self.selected_index.min(len.saturating_sub(1));
    }

    /// Currently selected book in the filtered list, if any.
    #[must_use]
    pub fn selected_book(&self) -> Option<&Book> {
        self.catalog.filtered_view().get(self.selected_index).copied()
    }

    /// Computes a renderable view model for a terminal of `rows` x `cols`.
    ///
    /// # Windowing Algorithm
    ///
    /// 1. Subtract chrome (header, borders, footer, query bar) from `rows`
    /// 2. Divide by two rows per book to get the window size
    /// 3. Center the window on the selection, pulling it back near the end
    ///
    /// # Example
    ///
    /// ```rust
    /// # use zbooks::storage::MemorySettingsStore;
    /// # use zbooks::{AppState, Config, Theme};
    /// # let state = AppState::new(&Config::default(), Theme::default(), Box::new(MemorySettingsStore::default()));
    /// let viewmodel = state.compute_viewmodel(24, 80);
    /// assert!(viewmodel.header.title.contains("iOS"));
    /// ```
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let body = match (&self.screen, &self.detail) {
            (Screen::Detail, Some(detail)) => ViewBody::Detail(Self::compute_detail(detail, cols)),
            _ => self.compute_list_body(rows, cols),
        };

        UIViewModel {
            header: self.compute_header(),
            query_bar: self.compute_query_bar(),
            body,
            footer: self.compute_footer(),
        }
    }

    fn compute_list_body(&self, rows: usize, cols: usize) -> ViewBody {
        let view = self.catalog.filtered_view();
        if view.is_empty() {
            return ViewBody::Empty(self.compute_empty_state());
        }

        let available = self.calculate_available_rows(rows) / ROWS_PER_BOOK;
        let available = available.max(1);

        let mut visible_start = self.selected_index.saturating_sub(available / 2);
        let visible_end = (visible_start + available).min(view.len());
        if visible_end - visible_start < available && view.len() >= available {
            visible_start = visible_end.saturating_sub(available);
        }

        let title_width = cols.saturating_sub(4);
        let items = view[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(offset, book)| BookRow {
                title: truncate(&book.title, title_width),
                authors: truncate(&book.authors_line(), title_width),
                is_favorite: book.is_favorite,
                is_selected: visible_start + offset == self.selected_index,
            })
            .collect();

        ViewBody::List {
            items,
            has_more_above: visible_start > 0,
            has_more_below: visible_end < view.len(),
        }
    }

    fn compute_detail(detail: &DetailState, cols: usize) -> DetailView {
        let book = detail.book();
        let width = cols.saturating_sub(4).max(20);
        DetailView {
            title: book.title.clone(),
            authors: if book.authors.is_empty() {
                String::new()
            } else {
                format!("By {}", book.authors_line())
            },
            description: wrap_text(&book.description, width),
            thumbnail: book.thumbnail_url.as_ref().map(ToString::to_string),
            buy_link: detail.buy_link().map(ToString::to_string),
            is_favorite: detail.is_favorite(),
        }
    }

    fn compute_empty_state(&self) -> EmptyState {
        if self.catalog.is_loading() {
            EmptyState {
                message: "Loading books...".to_string(),
                subtitle: format!("Searching for \"{}\"", self.query),
            }
        } else if self.catalog.show_favorites_only() && !self.catalog.books().is_empty() {
            EmptyState {
                message: "No favorites loaded".to_string(),
                subtitle: "Press f to show all books".to_string(),
            }
        } else if self.catalog.last_error().is_some() {
            EmptyState {
                message: "Could not load books".to_string(),
                subtitle: "Press r to retry".to_string(),
            }
        } else {
            EmptyState {
                message: "No books found".to_string(),
                subtitle: "Press / to search for something else".to_string(),
            }
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let title = match (&self.screen, &self.detail) {
            (Screen::Detail, Some(_)) => " Book Details ".to_string(),
            _ => {
                let scope = if self.catalog.show_favorites_only() { "Favorites" } else { "Books" };
                format!(
                    " {scope}: {} ({}) ",
                    self.query,
                    self.catalog.filtered_view().len()
                )
            }
        };

        let status = if self.catalog.is_loading() {
            Some("loading...".to_string())
        } else if self.catalog.last_error().is_some() {
            Some("last request failed".to_string())
        } else {
            None
        };

        HeaderInfo { title, status }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match (self.input_mode, self.screen) {
            (InputMode::Query, _) => "Enter: search  Esc: cancel  Type to edit query",
            (InputMode::Normal, Screen::Catalog) => {
                "j/k: navigate  Enter: open  f: favorites  m: more  r: reload  /: search  q: quit"
            }
            (InputMode::Normal, Screen::Detail) => {
                "f/space: favorite  b: buy link  Esc/h: back  q: quit"
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }

    fn compute_query_bar(&self) -> Option<QueryBarInfo> {
        (self.input_mode == InputMode::Query).then(|| QueryBarInfo {
            query: self.query_buffer.clone(),
        })
    }

    const fn calculate_available_rows(&self, total_rows: usize) -> usize {
        match self.input_mode {
            InputMode::Normal => total_rows.saturating_sub(CHROME_ROWS),
            InputMode::Query => total_rows.saturating_sub(CHROME_ROWS + QUERY_BAR_ROWS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemorySettingsStore;

    fn state_with(books: Vec<Book>) -> AppState {
        let mut state = AppState::new(
            &Config::default(),
            Theme::default(),
            Box::new(MemorySettingsStore::default()),
        );
        let request = state.catalog.load_initial("iOS", 20).unwrap();
        state.catalog.complete(&request.ticket, Ok(books));
        state
    }

    fn numbered(count: usize) -> Vec<Book> {
        (0..count)
            .map(|i| Book::new(i.to_string(), format!("Book {i}"), vec!["Author".to_string()]))
            .collect()
    }

    #[test]
    fn selection_clamps_at_both_ends() {
        let mut state = state_with(numbered(2));
        state.move_selection_up();
        assert_eq!(state.selected_index, 0);

        state.move_selection_down();
        state.move_selection_down();
        assert_eq!(state.selected_index, 1);
        assert!(state.selection_on_last_row());
    }

    #[test]
    fn window_follows_selection() {
        let mut state = state_with(numbered(50));
        state.selected_index = 40;

        let vm = state.compute_viewmodel(26, 80);
        let ViewBody::List { items, has_more_above, has_more_below } = vm.body else {
            panic!("expected list body");
        };
        assert_eq!(items.len(), 10);
        assert!(has_more_above);
        assert!(has_more_below);
        assert!(items.iter().any(|row| row.is_selected && row.title == "Book 40"));
    }

    #[test]
    fn empty_states_explain_themselves() {
        let mut state = state_with(vec![]);
        let ViewBody::Empty(empty) = state.compute_viewmodel(24, 80).body else {
            panic!("expected empty body");
        };
        assert_eq!(empty.message, "No books found");

        let request = state.catalog.load_initial("iOS", 20).unwrap();
        let ViewBody::Empty(empty) = state.compute_viewmodel(24, 80).body else {
            panic!("expected empty body");
        };
        assert_eq!(empty.message, "Loading books...");

        state.catalog.complete(&request.ticket, Ok(numbered(1)));
        state.catalog.toggle_favorite_filter();
        let ViewBody::Empty(empty) = state.compute_viewmodel(24, 80).body else {
            panic!("expected empty body");
        };
        assert_eq!(empty.message, "No favorites loaded");
    }

    #[test]
    fn header_reports_failed_request() {
        let mut state = state_with(numbered(1));
        let request = state.catalog.load_more("iOS", 20).unwrap();
        state.catalog.complete(
            &request.ticket,
            Err(crate::BookshelfError::Fetch {
                status: 500,
                message: String::new(),
            }),
        );

        let header = state.compute_viewmodel(24, 80).header;
        assert_eq!(header.status.as_deref(), Some("last request failed"));
        assert_eq!(header.title, " Books: iOS (1) ");
    }
}
