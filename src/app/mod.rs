//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin runtime (`main.rs`) and the search/storage layers.
//!
//! # Architecture
//!
//! ```text
//! Key / WebRequestResult → Event → handle_event → State Mutations → Actions → Host API
//!                                        ↑                              ↓
//!                                        └──── PageFetched completion ──┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`catalog`]: Paginated book list with favorites filter
//! - [`detail`]: Single-book screen and favorite persistence
//! - [`handler`]: Event processing and state transitions
//! - [`keys`]: Key bindings per mode and screen
//! - [`modes`]: Input mode and screen types
//! - [`state`]: Central state container and view model computation

pub mod actions;
pub mod catalog;
pub mod detail;
pub mod handler;
pub mod keys;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use catalog::CatalogState;
pub use detail::DetailState;
pub use handler::{handle_event, Event, FetchOutcome};
pub use keys::map_key;
pub use modes::{InputMode, Screen};
pub use state::AppState;
