//! Structured logging to a rotating JSON file.
//!
//! # Architecture
//!
//! ```text
//! tracing macros → EnvFilter → fmt::layer().json() → RotatingFileWriter → zbooks.log
//! ```
//!
//! # Configuration
//!
//! The filter comes from the `trace_level` plugin option and defaults to
//! `"info"`. Events land in `/host/.local/share/zellij/zbooks/zbooks.log`, one
//! JSON object per line.
//!
//! # Modules
//!
//! - `init`: subscriber setup
//! - `file_writer`: size-rotated log file

mod file_writer;
mod init;

pub use file_writer::RotatingFileWriter;
pub use init::init_tracing;
