//! View model types representing renderable UI state.
//!
//! View models are created by `AppState::compute_viewmodel()` and consumed by
//! the renderer. They hold display-ready strings and flags only.

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    pub header: HeaderInfo,

    /// Present while the query is being edited.
    pub query_bar: Option<QueryBarInfo>,

    /// Main area between header and footer.
    pub body: ViewBody,

    pub footer: FooterInfo,
}

/// What fills the main area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewBody {
    /// Window of the filtered book list.
    List {
        items: Vec<BookRow>,
        /// Rows exist above the window.
        has_more_above: bool,
        /// Rows exist below the window.
        has_more_below: bool,
    },

    /// Nothing to list.
    Empty(EmptyState),

    /// Detail screen of one book.
    Detail(DetailView),
}

/// One book in the list. Rendered on two lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRow {
    /// Title, truncated to the terminal width.
    pub title: String,

    /// Authors joined by ", ".
    pub authors: String,

    pub is_favorite: bool,

    pub is_selected: bool,
}

/// Detail screen contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub title: String,

    /// `"By "` followed by the authors, or empty.
    pub authors: String,

    /// Description wrapped to the terminal width.
    pub description: Vec<String>,

    pub thumbnail: Option<String>,

    pub buy_link: Option<String>,

    pub is_favorite: bool,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Title text, e.g. `" Books: iOS (20) "`.
    pub title: String,

    /// Dim status shown after the title, such as a loading indicator.
    pub status: Option<String>,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help text.
    pub keybindings: String,
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message (e.g., "No books found").
    pub message: String,

    /// Secondary hint (e.g., "Press r to retry").
    pub subtitle: String,
}

/// Query bar display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryBarInfo {
    /// Query being edited.
    pub query: String,
}
