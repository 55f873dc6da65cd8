//! Tracing initialization and subscriber setup.

use super::file_writer::RotatingFileWriter;
use crate::infrastructure::paths::get_data_dir;
use crate::Config;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log file name inside the data directory.
const LOG_FILE_NAME: &str = "zbooks.log";

/// Initializes the tracing subscriber with a JSON log file.
///
/// Installs a registry with an [`EnvFilter`] built from `trace_level` (default
/// `"info"`, any `EnvFilter` directive is accepted) and a JSON `fmt` layer
/// writing to `zbooks.log` in the data directory, rotated at 10 MB with three
/// backups.
///
/// # Initialization Behavior
///
/// - Creates the data directory if it doesn't exist
/// - Silently gives up if the directory cannot be created or the filter does
///   not parse, since logging is optional
/// - Only the first call installs a subscriber
///
/// # Example
///
/// ```rust,no_run
/// use zbooks::observability::init_tracing;
/// use zbooks::Config;
///
/// let config = Config {
///     trace_level: Some("zbooks=debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");
    let Ok(filter) = EnvFilter::try_new(level) else {
        return;
    };

    let data_dir = get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let writer = RotatingFileWriter::new(data_dir.join(LOG_FILE_NAME));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(false)
        .with_ansi(false)
        .with_writer(Mutex::new(writer));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
