//! Input mode and screen state types.
//!
//! # State Machine
//!
//! The plugin shows one of two screens:
//! - **Catalog**: the paginated book list
//! - **Detail**: a single book with its favorite flag
//!
//! Independently of the screen, input is either in **Normal** mode, where keys
//! are commands, or in **Query** mode, where keys edit the search query that
//! is submitted as a new search.

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Keys are commands for the current screen.
    Normal,

    /// Keys edit the query buffer. `Enter` submits a new search, `Esc` cancels.
    Query,
}

/// Which screen is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Book list with header, optional query bar and footer.
    Catalog,

    /// Detail view of the book opened from the list.
    Detail,
}
