//! Infrastructure layer for sandbox filesystem interactions.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir};
