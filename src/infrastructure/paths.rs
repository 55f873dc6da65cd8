//! Path utilities for the Zellij sandbox environment.
//!
//! Inside the plugin sandbox the host filesystem is mounted under `/host`.

use std::path::PathBuf;

/// Returns the data directory for zbooks files.
///
/// Resolves to `/host/.local/share/zellij/zbooks`, which is
/// `~/.local/share/zellij/zbooks` when Zellij was started from the home
/// directory. Holds `favorites.json` and `zbooks.log`.
///
/// # Examples
///
/// ```
/// use zbooks::infrastructure::get_data_dir;
///
/// assert_eq!(
///     get_data_dir().to_str(),
///     Some("/host/.local/share/zellij/zbooks")
/// );
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("zbooks")
}

/// Expands a leading `~` to the sandbox `/host` mount.
///
/// Used for `theme_file` paths given in the plugin configuration.
///
/// # Examples
///
/// ```
/// use zbooks::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dark.toml"), "/host/themes/dark.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/theme.toml"), "/etc/theme.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}
