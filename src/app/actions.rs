//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler never talks to the host. It returns a `Vec<Action>` after
//! each event and the plugin shim executes them in order with the Zellij API.

use crate::search::PageTicket;

/// Commands executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Issues a GET web request for one page of search results.
    ///
    /// The ticket is attached as the request context and comes back with the
    /// completion as [`crate::app::Event::PageFetched`].
    FetchPage {
        /// Fully encoded request URL.
        url: String,
        /// Identity of the request.
        ticket: PageTicket,
    },

    /// Opens a URL with the configured open command (`xdg-open` by default).
    OpenUrl {
        /// URL to open, usually a book's buy link.
        url: String,
    },
}
