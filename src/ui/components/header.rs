//! Header component renderer.

use crate::ui::helpers::{display_len, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the header title bar at the specified row.
///
/// The title is centered and bold. A status, if any, follows it dimmed, or
/// in the error color when it reports a failure.
///
/// # Returns
///
/// The next available row position (row + 1)
///
/// # Layout
///
/// ```text
/// [left padding] TITLE  status [right padding]
/// ```
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let status = header.status.as_deref().map(|s| format!(" {s}"));
    let title_len = display_len(&header.title);
    let status_len = status.as_deref().map_or(0, display_len);
    let padding = cols.saturating_sub(title_len + status_len) / 2;

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }

    print!("{}", " ".repeat(padding));
    print!("{}", header.title);

    if let Some(status) = &status {
        print!("{}", Theme::reset());
        if let Some(bg) = &theme.colors.header_bg {
            print!("{}", Theme::bg(bg));
        }
        if status.contains("failed") {
            print!("{}", Theme::fg(&theme.colors.error_fg));
        } else {
            print!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim));
        }
        print!("{status}");
    }

    print!("{}", " ".repeat(cols.saturating_sub(padding + title_len + status_len)));
    print!("{}", Theme::reset());
    row + 1
}
