//! Book list component renderer.
//!
//! Each book takes two lines: the title with a favorite marker, then the
//! authors dimmed. The selected book is drawn with the selection colors
//! across both lines.

use crate::ui::helpers::{display_len, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::BookRow;

const FAVORITE_MARKER: &str = "★ ";
const PLAIN_MARKER: &str = "  ";
const SCROLL_UP: &str = "▲";
const SCROLL_DOWN: &str = "▼";

/// Renders all book rows starting at `row`.
///
/// Scroll indicators are drawn in the right-most column when rows exist
/// above or below the window.
///
/// # Returns
///
/// The next available row position.
pub fn render_book_rows(
    row: usize,
    items: &[BookRow],
    has_more_above: bool,
    has_more_below: bool,
    theme: &Theme,
    cols: usize,
) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_book_row(current_row, item, theme, cols);
    }

    if has_more_above {
        render_scroll_marker(row, SCROLL_UP, theme, cols);
    }
    if has_more_below && current_row > row {
        render_scroll_marker(current_row - 1, SCROLL_DOWN, theme, cols);
    }
    current_row
}

fn render_scroll_marker(row: usize, marker: &str, theme: &Theme, cols: usize) {
    position_cursor(row, cols.max(1));
    print!("{}{marker}{}", Theme::fg(&theme.colors.text_dim), Theme::reset());
}

/// Renders one book on two lines.
fn render_book_row(row: usize, item: &BookRow, theme: &Theme, cols: usize) -> usize {
    let line_width = cols.saturating_sub(1);
    let set_base = || {
        if item.is_selected {
            print!("{}", Theme::fg(&theme.colors.selection_fg));
            print!("{}", Theme::bg(&theme.colors.selection_bg));
        } else {
            print!("{}", Theme::fg(&theme.colors.text_normal));
        }
    };

    position_cursor(row, 1);
    set_base();
    print!(" ");
    if item.is_favorite {
        if !item.is_selected {
            print!("{}", Theme::fg(&theme.colors.favorite_fg));
        }
        print!("{FAVORITE_MARKER}");
        set_base();
    } else {
        print!("{PLAIN_MARKER}");
    }
    print!("{}", Theme::bold());
    print!("{}", item.title);
    print!("{}", Theme::reset());
    set_base();
    let title_len = 3 + display_len(&item.title);
    print!("{}", " ".repeat(line_width.saturating_sub(title_len)));
    print!("{}", Theme::reset());

    position_cursor(row + 1, 1);
    set_base();
    if !item.is_selected {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print!("   {}", item.authors);
    let authors_len = 3 + display_len(&item.authors);
    print!("{}", " ".repeat(line_width.saturating_sub(authors_len)));
    print!("{}", Theme::reset());

    row + 2
}
