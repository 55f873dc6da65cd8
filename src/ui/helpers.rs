//! Shared rendering utilities.
//!
//! Cursor positioning plus width-aware text shaping used by the view model.
//! Widths are counted in `char`s, not bytes.

/// Positions the cursor at a specific row and column (1-indexed).
///
/// Uses the ANSI escape sequence `\u{1b}[{row};{col}H`.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Number of `char`s in `text`.
#[must_use]
pub fn display_len(text: &str) -> usize {
    text.chars().count()
}

/// Shortens `text` to at most `max` chars, ending in `...` when cut.
///
/// # Example
///
/// ```rust
/// use zbooks::ui::helpers::truncate;
///
/// assert_eq!(truncate("The Swift Programming Language", 12), "The Swift...");
/// assert_eq!(truncate("Short", 12), "Short");
/// ```
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if display_len(text) <= max {
        return text.to_string();
    }
    if max <= 3 {
        return text.chars().take(max).collect();
    }
    let kept: String = text.chars().take(max - 3).collect();
    format!("{kept}...")
}

/// Greedy word wrap of `text` to lines of at most `width` chars.
///
/// Paragraph breaks are kept as empty lines. Words longer than `width` are
/// split.
///
/// # Example
///
/// ```rust
/// use zbooks::ui::helpers::wrap_text;
///
/// assert_eq!(wrap_text("one two three", 7), vec!["one two", "three"]);
/// ```
#[must_use]
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut line = String::new();
        let mut line_len = 0;

        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();

            while word.len() > width {
                if line_len > 0 {
                    lines.push(std::mem::take(&mut line));
                    line_len = 0;
                }
                let rest = word.split_off(width);
                lines.push(word.into_iter().collect());
                word = rest;
            }

            if line_len > 0 && line_len + 1 + word.len() > width {
                lines.push(std::mem::take(&mut line));
                line_len = 0;
            }
            if line_len > 0 {
                line.push(' ');
                line_len += 1;
            }
            line_len += word.len();
            line.extend(word);
        }

        lines.push(line);
    }

    while lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_chars() {
        assert_eq!(truncate("Ünïcödé Tïtlé", 8), "Ünïcö...");
        assert_eq!(truncate("abcdef", 2), "ab");
    }

    #[test]
    fn wrap_keeps_paragraphs_and_splits_long_words() {
        let text = "A short line.\n\nsupercalifragilistic word";
        assert_eq!(
            wrap_text(text, 10),
            vec!["A short", "line.", "", "supercalif", "ragilistic", "word"]
        );
    }

    #[test]
    fn wrap_of_empty_text_is_empty() {
        assert!(wrap_text("", 40).is_empty());
        assert!(wrap_text("\n\n", 40).is_empty());
    }
}
