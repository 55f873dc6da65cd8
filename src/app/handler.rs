//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place where application state changes. It
//! pattern-matches an [`Event`], mutates [`AppState`] and returns whether the
//! UI should re-render together with the [`Action`]s the host must execute.
//!
//! # Event Types
//!
//! - **Lifecycle**: `Start`, `CloseFocus`
//! - **Navigation**: `KeyDown`, `KeyUp`, `OpenSelected`, `Back`
//! - **Catalog**: `ToggleFavoritesFilter`, `LoadMore`, `Reload`
//! - **Detail**: `ToggleFavorite`, `OpenBuyLink`
//! - **Query editing**: `EditQuery`, `Char`, `Backspace`, `SubmitQuery`, `CancelQuery`
//! - **Host completions**: `PageFetched`
//!
//! # Example
//!
//! ```rust
//! use zbooks::storage::MemorySettingsStore;
//! use zbooks::{handle_event, Action, AppState, Config, Event, Theme};
//!
//! let mut state = AppState::new(&Config::default(), Theme::default(), Box::new(MemorySettingsStore::default()));
//! let (render, actions) = handle_event(&mut state, &Event::Start)?;
//! assert!(render);
//! assert!(matches!(actions.as_slice(), [Action::FetchPage { .. }]));
//! # Ok::<(), zbooks::BookshelfError>(())
//! ```

use super::detail::{resolve_favorite, DetailState};
use super::modes::{InputMode, Screen};
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::search::{interpret_response, PageKind, PageRequest, PageTicket};

/// Raw completion of a page request as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: Vec<u8>,
}

/// Events triggered by user input or host completions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Permissions were granted; fetch the first page.
    Start,
    /// Moves the selection down. On the last row this also loads more.
    KeyDown,
    /// Moves the selection up.
    KeyUp,
    /// Opens the selected book in the detail screen.
    OpenSelected,
    /// Leaves the detail screen, persisting its flag.
    Back,
    /// Flips the favorites-only filter.
    ToggleFavoritesFilter,
    /// Flips the open book's favorite flag.
    ToggleFavorite,
    /// Requests the next page.
    LoadMore,
    /// Fetches the first page of the current query again.
    Reload,
    /// Opens the open book's buy link.
    OpenBuyLink,
    /// Starts editing the query.
    EditQuery,
    /// Appends a character to the query buffer.
    Char(char),
    /// Removes the last character from the query buffer.
    Backspace,
    /// Starts a new search with the query buffer.
    SubmitQuery,
    /// Leaves query editing without searching.
    CancelQuery,
    /// Hides the plugin.
    CloseFocus,
    /// A page request completed.
    PageFetched {
        /// Ticket the request was issued with.
        ticket: PageTicket,
        /// Status and body from the host.
        outcome: FetchOutcome,
    },
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Returns
///
/// `(should_render, actions)`. Actions are executed in order.
///
/// # Errors
///
/// Nothing in the current event set fails: fetch, decode and store errors are
/// logged and reflected in state instead. The `Result` keeps the host loop
/// uniform.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event_name(event)).entered();

    match event {
        Event::Start | Event::Reload => {
            let actions = fetch_initial(state);
            Ok((true, actions))
        }
        Event::KeyDown => {
            if state.screen != Screen::Catalog {
                return Ok((false, vec![]));
            }
            state.move_selection_down();
            let actions = if state.selection_on_last_row() {
                fetch_more(state)
            } else {
                vec![]
            };
            Ok((true, actions))
        }
        Event::KeyUp => {
            if state.screen != Screen::Catalog {
                return Ok((false, vec![]));
            }
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::OpenSelected => {
            if state.screen != Screen::Catalog {
                return Ok((false, vec![]));
            }
            let Some(book) = state.selected_book().cloned() else {
                tracing::debug!("no book selected");
                return Ok((false, vec![]));
            };

            tracing::debug!(id = %book.id, title = %book.title, "opening detail");
            state.detail = Some(DetailState::enter(book, state.store(), state.favorite_key));
            state.screen = Screen::Detail;
            Ok((true, vec![]))
        }
        Event::Back => Ok((close_detail(state), vec![])),
        Event::ToggleFavoritesFilter => {
            if state.screen != Screen::Catalog {
                return Ok((false, vec![]));
            }
            state.catalog.toggle_favorite_filter();
            state.clamp_selection();
            Ok((true, vec![]))
        }
        Event::ToggleFavorite => {
            let Some(mut detail) = state.detail.take() else {
                return Ok((false, vec![]));
            };
            if let Err(e) = detail.toggle_favorite(state.store_mut()) {
                tracing::warn!(key = %detail.key(), error = %e, "failed to persist favorite");
            }
            state.detail = Some(detail);
            Ok((true, vec![]))
        }
        Event::LoadMore => {
            if state.screen != Screen::Catalog {
                return Ok((false, vec![]));
            }
            let actions = fetch_more(state);
            Ok((!actions.is_empty(), actions))
        }
        Event::OpenBuyLink => {
            let Some(url) = state.detail.as_ref().and_then(|d| d.buy_link()) else {
                tracing::debug!("no buy link to open");
                return Ok((false, vec![]));
            };
            Ok((false, vec![Action::OpenUrl { url: url.to_string() }]))
        }
        Event::EditQuery => {
            if state.screen != Screen::Catalog {
                return Ok((false, vec![]));
            }
            state.input_mode = InputMode::Query;
            state.query_buffer.clone_from(&state.query);
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            if state.input_mode != InputMode::Query {
                return Ok((false, vec![]));
            }
            state.query_buffer.push(*c);
            tracing::trace!(query = %state.query_buffer, "query edited");
            Ok((true, vec![]))
        }
        Event::Backspace => {
            if state.input_mode != InputMode::Query {
                return Ok((false, vec![]));
            }
            state.query_buffer.pop();
            Ok((true, vec![]))
        }
        Event::SubmitQuery => {
            if state.input_mode != InputMode::Query {
                return Ok((false, vec![]));
            }
            state.input_mode = InputMode::Normal;
            let query = std::mem::take(&mut state.query_buffer).trim().to_string();
            if query.is_empty() {
                tracing::debug!("empty query submitted, keeping current search");
                return Ok((true, vec![]));
            }

            tracing::debug!(query = %query, "new search");
            state.query = query;
            state.catalog.reset();
            state.selected_index = 0;
            let actions = fetch_initial(state);
            Ok((true, actions))
        }
        Event::CancelQuery => {
            state.input_mode = InputMode::Normal;
            state.query_buffer.clear();
            Ok((true, vec![]))
        }
        Event::CloseFocus => {
            close_detail(state);
            Ok((true, vec![Action::CloseFocus]))
        }
        Event::PageFetched { ticket, outcome } => Ok((page_fetched(state, ticket, outcome), vec![])),
    }
}

const fn event_name(event: &Event) -> &'static str {
    match event {
        Event::Start => "Start",
        Event::KeyDown => "KeyDown",
        Event::KeyUp => "KeyUp",
        Event::OpenSelected => "OpenSelected",
        Event::Back => "Back",
        Event::ToggleFavoritesFilter => "ToggleFavoritesFilter",
        Event::ToggleFavorite => "ToggleFavorite",
        Event::LoadMore => "LoadMore",
        Event::Reload => "Reload",
        Event::OpenBuyLink => "OpenBuyLink",
        Event::EditQuery => "EditQuery",
        Event::Char(_) => "Char",
        Event::Backspace => "Backspace",
        Event::SubmitQuery => "SubmitQuery",
        Event::CancelQuery => "CancelQuery",
        Event::CloseFocus => "CloseFocus",
        Event::PageFetched { .. } => "PageFetched",
    }
}

fn fetch_initial(state: &mut AppState) -> Vec<Action> {
    let query = state.query.clone();
    let request = state.catalog.load_initial(&query, state.page_size);
    request.and_then(|r| fetch_action(state, r)).into_iter().collect()
}

fn fetch_more(state: &mut AppState) -> Vec<Action> {
    let query = state.query.clone();
    let request = state.catalog.load_more(&query, state.page_size);
    request.and_then(|r| fetch_action(state, r)).into_iter().collect()
}

/// Builds the fetch action for `request`, failing the page at once if the
/// URL cannot be built so the catalog does not stay loading.
fn fetch_action(state: &mut AppState, request: PageRequest) -> Option<Action> {
    match state.source().request_url(&request) {
        Ok(url) => Some(Action::FetchPage {
            url,
            ticket: request.ticket,
        }),
        Err(e) => {
            state.catalog.complete(&request.ticket, Err(e));
            None
        }
    }
}

fn page_fetched(state: &mut AppState, ticket: &PageTicket, outcome: &FetchOutcome) -> bool {
    let strategy = state.favorite_key;
    let page = interpret_response(state.source(), outcome.status, &outcome.body).map(|books| {
        books
            .into_iter()
            .map(|book| {
                let is_favorite = resolve_favorite(state.store(), strategy, &book);
                book.with_favorite(is_favorite)
            })
            .collect()
    });

    if !state.catalog.complete(ticket, page) {
        return false;
    }

    if ticket.kind == PageKind::Initial {
        state.selected_index = 0;
    }
    state.clamp_selection();
    true
}

/// Leaves the detail screen if open, mirroring its flag into the catalog.
fn close_detail(state: &mut AppState) -> bool {
    let Some(detail) = state.detail.take() else {
        return false;
    };

    let book = detail.exit(state.store_mut());
    let strategy = state.favorite_key;
    let changed = state
        .catalog
        .apply_favorite(strategy, strategy.key_for(&book), book.is_favorite);
    tracing::debug!(title = %book.title, changed, "favorite mirrored to list");

    state.screen = Screen::Catalog;
    state.clamp_selection();
    true
}
