//! Domain layer for the zbooks plugin.
//!
//! Core types independent of Zellij APIs and storage concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`book`]: Book record and wire-format decoding

pub mod book;
pub mod error;

pub use book::{decode_books, Book};
pub use error::{BookshelfError, Result};
