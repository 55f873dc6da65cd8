//! Composable UI component renderers.
//!
//! # Components
//!
//! - `header`: title bar with count and status
//! - `query_bar`: query input box
//! - `book_list`: two-line book rows with favorite markers
//! - `detail`: single book screen
//! - `empty`: empty state message
//! - `footer`: keybinding hints
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]
//! [Query Bar - 3 lines, while editing]
//! [Body: book rows | empty state | detail]
//! [Blank padding to fill screen]
//! [Border]
//! [Footer]
//! ```

mod book_list;
mod detail;
mod empty;
mod footer;
mod header;
mod query_bar;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{UIViewModel, ViewBody};

use book_list::render_book_rows;
use detail::render_detail;
use empty::render_empty_state;
use footer::render_footer;
use header::render_header;
use query_bar::render_query_bar;

/// Rows left blank above the empty state message.
const EMPTY_STATE_OFFSET: usize = 3;

/// Renders a horizontal border line at the specified row.
///
/// # Returns
///
/// The next available row position (row + 1)
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders a full frame for `vm`.
///
/// Reserves 6 lines for chrome (blank, header, 2 borders, footer, spare) plus
/// 3 for the query bar when present.
pub fn render_frame(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    if let Some(query) = &vm.query_bar {
        current_row = render_query_bar(current_row, query, theme, cols);
    }

    let footer_start = rows.saturating_sub(1);
    let border_row = footer_start.saturating_sub(1);
    let last_body_row = border_row.saturating_sub(1);

    match &vm.body {
        ViewBody::List {
            items,
            has_more_above,
            has_more_below,
        } => {
            render_book_rows(current_row, items, *has_more_above, *has_more_below, theme, cols);
        }
        ViewBody::Empty(empty) => {
            render_empty_state(current_row + EMPTY_STATE_OFFSET, empty, theme, cols);
        }
        ViewBody::Detail(detail) => {
            render_detail(current_row + 1, last_body_row, detail, theme, cols);
        }
    }

    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_start, &vm.footer, theme, cols);
}
