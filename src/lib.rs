//! zbooks: a Zellij plugin for browsing a remote book catalog.
//!
//! zbooks provides:
//! - A paginated book list fetched from a search API (Google Books by default)
//! - A favorites-only filter over the loaded books
//! - A detail screen per book with buy link and description
//! - Per-book favorite flags persisted in a local JSON settings file

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Event handling and key bindings                  │
//! │  - Catalog and detail state                         │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Storage Layer │   │ Search Layer  │
//! │ (ui/)         │   │ (storage/)    │   │ (search/)     │
//! │ - Rendering   │   │ - JSON file   │   │ - Request URL │
//! │ - Theming     │   │ - Memory      │   │ - Page decode │
//! │ - Components  │   │ - Store trait │   │ - Tickets     │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Platform paths (infrastructure/)                 │
//! │  - Error types (domain/error)                       │
//! │  - Book model (domain/book)                         │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - JSON log file with rotation                      │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/zbooks.wasm" {
//!         query "iOS"
//!         page_size "20"
//!         favorites_key "title"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Request Flow
//!
//! 1. On permission grant the shim posts `Event::Start`
//! 2. The catalog returns a page request; the shim issues a `web_request`
//!    carrying the request ticket as context
//! 3. `WebRequestResult` comes back as `Event::PageFetched`; the body is
//!    decoded, favorite flags are resolved against the settings store and the
//!    page replaces or extends the list
//! 4. Moving onto the last row requests the next page
//!
//! # Examples
//!
//! ```rust
//! use zbooks::storage::MemorySettingsStore;
//! use zbooks::{handle_event, AppState, Config, Event, Theme};
//!
//! let mut state = AppState::new(&Config::default(), Theme::default(), Box::new(MemorySettingsStore::default()));
//! for event in [Event::Start, Event::KeyDown, Event::ToggleFavoritesFilter] {
//!     let (_render, _actions) = handle_event(&mut state, &event)?;
//!     // Execute actions...
//! }
//! # Ok::<(), zbooks::BookshelfError>(())
//! ```
//!
//! # Platform Support
//!
//! - **Target**: `wasm32-wasip1` (Zellij WASM runtime)
//! - **Terminal**: Any ANSI-capable terminal emulator

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod search;
pub mod storage;
pub mod ui;

pub use app::{handle_event, map_key, Action, AppState, Event, FetchOutcome, InputMode, Screen};
pub use domain::{Book, BookshelfError, Result};
pub use ui::Theme;

use search::SourceKind;
use std::collections::BTreeMap;
use storage::FavoriteKey;

/// Query searched on startup.
pub const DEFAULT_QUERY: &str = "iOS";
/// Books requested per page.
pub const DEFAULT_PAGE_SIZE: usize = 20;
/// Largest page the Google Books API serves.
pub const MAX_PAGE_SIZE: usize = 40;

/// Plugin configuration parsed from Zellij's configuration system.
///
/// # Example
///
/// ```kdl
/// plugin location="file:/path/to/zbooks.wasm" {
///     query "rust programming"
///     page_size "30"
///     source "json"
///     api_url "http://localhost:8080/books"
///     favorites_key "id"
///     open_command "open"
///     theme_file "/path/to/theme.toml"
///     trace_level "debug"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Search query used on startup. Default: `"iOS"`
    pub query: String,

    /// Books per page, clamped to `1..=40`. Default: 20
    pub page_size: usize,

    /// Response format of the search endpoint. Default: Google Books
    pub source: SourceKind,

    /// Search endpoint override.
    pub api_url: Option<String>,

    /// API key appended to Google Books requests.
    pub api_key: Option<String>,

    /// Book field keying favorites in the settings store. Default: title
    pub favorite_key: FavoriteKey,

    /// Command used to open buy links. Default: `"xdg-open"`
    pub open_command: String,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file.
    pub theme_file: Option<String>,

    /// Tracing filter directive. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            query: DEFAULT_QUERY.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            source: SourceKind::Google,
            api_url: None,
            api_key: None,
            favorite_key: FavoriteKey::Title,
            open_command: "xdg-open".to_string(),
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// # Parsing Rules
    ///
    /// - Blank values count as unset
    /// - `page_size`: falls back to 20 on parse error, clamped to `1..=40`
    /// - `source`, `favorites_key`: unknown values fall back to the default
    ///   and are logged
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use zbooks::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("query".to_string(), "rust".to_string());
    /// map.insert("page_size".to_string(), "100".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.query, "rust");
    /// assert_eq!(config.page_size, 40);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let get = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };
        let defaults = Self::default();

        let page_size = get("page_size")
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);

        let source = get("source").map_or(defaults.source, |value| {
            SourceKind::parse(&value).unwrap_or_else(|| {
                tracing::warn!(value = %value, "unknown source, using google");
                defaults.source
            })
        });

        let favorite_key = get("favorites_key").map_or(defaults.favorite_key, |value| {
            FavoriteKey::parse(&value).unwrap_or_else(|| {
                tracing::warn!(value = %value, "unknown favorites_key, using title");
                defaults.favorite_key
            })
        });

        Self {
            query: get("query").unwrap_or(defaults.query),
            page_size,
            source,
            api_url: get("api_url"),
            api_key: get("api_key"),
            favorite_key,
            open_command: get("open_command").unwrap_or(defaults.open_command),
            theme_name: get("theme"),
            theme_file: get("theme_file"),
            trace_level: get("trace_level"),
        }
    }

    /// Resolves the theme: `theme_file`, then `theme`, then the default.
    ///
    /// Load failures are logged and fall through to the default theme.
    #[must_use]
    pub fn load_theme(&self) -> Theme {
        self.theme_file.as_ref().map_or_else(
            || {
                self.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                    Theme::from_name(theme_name).unwrap_or_else(|| {
                        tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
                        Theme::default()
                    })
                })
            },
            |theme_file| {
                Theme::from_file(infrastructure::expand_tilde(theme_file)).unwrap_or_else(|e| {
                    tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                    Theme::default()
                })
            },
        )
    }
}

/// Initializes the application state for the plugin.
///
/// Loads the theme and opens the favorites store in the plugin data
/// directory, falling back to an in-memory store if that fails.
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!("initializing zbooks plugin");
    AppState::new(config, config.load_theme(), storage::open_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_map_gives_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn parses_all_keys() {
        let config = Config::from_zellij(&map(&[
            ("query", " swift "),
            ("page_size", "0"),
            ("source", "json"),
            ("api_url", "http://localhost/books"),
            ("favorites_key", "id"),
            ("open_command", "open"),
            ("theme", "catppuccin-latte"),
            ("trace_level", "debug"),
        ]));

        assert_eq!(config.query, "swift");
        assert_eq!(config.page_size, 1);
        assert_eq!(config.source, SourceKind::Json);
        assert_eq!(config.api_url.as_deref(), Some("http://localhost/books"));
        assert_eq!(config.favorite_key, FavoriteKey::Id);
        assert_eq!(config.open_command, "open");
        assert_eq!(config.load_theme().name, "catppuccin-latte");
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = Config::from_zellij(&map(&[
            ("query", "   "),
            ("page_size", "many"),
            ("source", "xml"),
            ("favorites_key", "isbn"),
            ("theme", "no-such-theme"),
        ]));

        assert_eq!(config.query, DEFAULT_QUERY);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.source, SourceKind::Google);
        assert_eq!(config.favorite_key, FavoriteKey::Title);
        assert_eq!(config.load_theme().name, "catppuccin-mocha");
    }
}
