//! Query bar component renderer.

use crate::ui::helpers::{display_len, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::QueryBarInfo;

/// Horizontal margin for the query box (spaces on left and right).
const QUERY_BOX_MARGIN: usize = 5;

/// Renders the query input box at the specified row.
///
/// # Returns
///
/// The next available row position (row + 3)
///
/// # Layout
///
/// ```text
/// [margin] ┌──────────────┐ [margin]
/// [margin] │ Search: ...▏ │ [margin]
/// [margin] └──────────────┘ [margin]
/// ```
pub fn render_query_bar(row: usize, query: &QueryBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(QUERY_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);

    position_cursor(row, 1);
    print!("{}", " ".repeat(QUERY_BOX_MARGIN));
    print!("{}", Theme::fg(&theme.colors.query_bar_border));
    print!("┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    let query_text = format!(" Search: {}▏", query.query);
    let padding = inner_width.saturating_sub(display_len(&query_text));

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(QUERY_BOX_MARGIN));
    print!("{}", Theme::fg(&theme.colors.query_bar_border));
    print!("│");
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{query_text}");
    print!("{}", " ".repeat(padding));
    print!("{}", Theme::fg(&theme.colors.query_bar_border));
    print!("│");
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(QUERY_BOX_MARGIN));
    print!("{}", Theme::fg(&theme.colors.query_bar_border));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    row + 3
}
