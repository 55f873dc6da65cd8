//! Detail screen component renderer.

use crate::ui::helpers::{position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DetailView;

const LEFT_MARGIN: usize = 2;

/// Renders the detail screen from `row` down to `last_row`.
///
/// # Layout
///
/// ```text
/// ★ Title
///   By Author, Author
///
///   Description line
///   Description line
///   ...
///
///   Cover: https://...
///   Buy:   https://...
/// ```
///
/// Description lines past `last_row` (minus the link lines) are dropped and
/// the last visible one ends in `...`.
pub fn render_detail(row: usize, last_row: usize, detail: &DetailView, theme: &Theme, cols: usize) {
    let width = cols.saturating_sub(LEFT_MARGIN * 2);
    let margin = " ".repeat(LEFT_MARGIN);
    let mut current_row = row;

    position_cursor(current_row, 1);
    if detail.is_favorite {
        print!("{}★ {}", Theme::fg(&theme.colors.favorite_fg), Theme::reset());
    } else {
        print!("{}☆ {}", Theme::fg(&theme.colors.text_dim), Theme::reset());
    }
    print!("{}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg));
    print!("{}", truncate(&detail.title, width));
    print!("{}", Theme::reset());
    current_row += 1;

    if !detail.authors.is_empty() {
        position_cursor(current_row, 1);
        print!("{margin}{}", Theme::fg(&theme.colors.text_dim));
        print!("{}", truncate(&detail.authors, width));
        print!("{}", Theme::reset());
        current_row += 1;
    }
    current_row += 1;

    let link_rows = usize::from(detail.thumbnail.is_some()) + usize::from(detail.buy_link.is_some());
    let link_block = if link_rows > 0 { link_rows + 1 } else { 0 };
    let description_end = (last_row + 1).saturating_sub(link_block);
    let room = description_end.saturating_sub(current_row);

    for (i, line) in detail.description.iter().take(room).enumerate() {
        position_cursor(current_row, 1);
        print!("{margin}{}", Theme::fg(&theme.colors.text_normal));
        if i + 1 == room && detail.description.len() > room {
            print!("{}", truncate(&format!("{line}..."), width));
        } else {
            print!("{line}");
        }
        print!("{}", Theme::reset());
        current_row += 1;
    }

    if link_rows == 0 {
        return;
    }
    current_row += 1;
    for (label, link) in [("Cover:", &detail.thumbnail), ("Buy:  ", &detail.buy_link)] {
        let Some(link) = link else { continue };
        position_cursor(current_row, 1);
        print!("{margin}{}{label} {}", Theme::fg(&theme.colors.text_dim), Theme::fg(&theme.colors.link_fg));
        print!("{}", truncate(link, width.saturating_sub(7)));
        print!("{}", Theme::reset());
        current_row += 1;
    }
}
