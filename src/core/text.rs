//! Grapheme, width and wrapping helpers.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

const TAB_WIDTH: usize = 3;

pub fn grapheme_segments(text: &str) -> unicode_segmentation::Graphemes<'_> {
    text.graphemes(true)
}

pub fn is_whitespace_char(ch: char) -> bool {
    ch.is_whitespace()
}

pub fn is_punctuation_char(ch: char) -> bool {
    ch.is_ascii_punctuation()
}

pub fn grapheme_width(grapheme: &str) -> usize {
    let mut width = 0;
    for ch in grapheme.chars() {
        if ch == '\t' {
            width += TAB_WIDTH;
            continue;
        }
        width += UnicodeWidthChar::width(ch).unwrap_or(0);
    }
    width
}

/// Length of the CSI escape sequence starting at `index`, if any.
fn csi_len(input: &str, index: usize) -> Option<usize> {
    let bytes = input.as_bytes();
    if bytes.get(index) != Some(&0x1b) || bytes.get(index + 1) != Some(&b'[') {
        return None;
    }
    let mut end = index + 2;
    while end < bytes.len() {
        let byte = bytes[end];
        end += 1;
        if (0x40..=0x7e).contains(&byte) {
            break;
        }
    }
    Some(end - index)
}

pub fn strip_ansi(input: &str) -> String {
    let mut clean = String::with_capacity(input.len());
    let mut index = 0;
    while index < input.len() {
        if let Some(len) = csi_len(input, index) {
            index += len;
            continue;
        }
        let Some(ch) = input[index..].chars().next() else {
            break;
        };
        clean.push(ch);
        index += ch.len_utf8();
    }
    clean
}

pub fn visible_width(input: &str) -> usize {
    if input.is_empty() {
        return 0;
    }
    strip_ansi(input).graphemes(true).map(grapheme_width).sum()
}

/// Wrap preformatted text into rows of at most `width` columns.
///
/// Every embedded newline starts a new row and all other whitespace is kept
/// verbatim; rows longer than `width` are hard-wrapped at grapheme boundaries.
/// Input is expected to be plain text (no ANSI sequences).
pub fn wrap_preformatted(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();

    for source_row in text.split('\n') {
        let source_row = source_row.strip_suffix('\r').unwrap_or(source_row);
        let mut row = String::new();
        let mut row_width = 0;

        for grapheme in source_row.graphemes(true) {
            let grapheme_cols = grapheme_width(grapheme);
            if row_width + grapheme_cols > width && !row.is_empty() {
                rows.push(std::mem::take(&mut row));
                row_width = 0;
            }
            row.push_str(grapheme);
            row_width += grapheme_cols;
        }

        rows.push(row);
    }

    rows
}

/// Cut plain `text` to at most `width` columns at a grapheme boundary.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for grapheme in text.graphemes(true) {
        let cols = grapheme_width(grapheme);
        if used + cols > width {
            break;
        }
        out.push_str(grapheme);
        used += cols;
    }
    out
}

/// Pad `text` with spaces up to `width` visible columns.
pub fn pad_to_width(text: &str, width: usize) -> String {
    let padding = width.saturating_sub(visible_width(text));
    format!("{text}{}", " ".repeat(padding))
}

#[cfg(test)]
mod tests {
    use super::{pad_to_width, truncate_to_width, visible_width, wrap_preformatted};

    #[test]
    fn ansi_ignored_in_width() {
        assert_eq!(visible_width("hi\x1b[31m!!\x1b[0m"), 4);
    }

    #[test]
    fn wide_chars_count_double() {
        assert_eq!(visible_width("日本"), 4);
    }

    #[test]
    fn wrap_keeps_embedded_newlines_and_indentation() {
        let rows = wrap_preformatted("  email: a@b.c\n  github: x", 40);
        assert_eq!(rows, vec!["  email: a@b.c", "  github: x"]);
    }

    #[test]
    fn wrap_keeps_blank_rows() {
        assert_eq!(wrap_preformatted("a\n\nb", 10), vec!["a", "", "b"]);
        assert_eq!(wrap_preformatted("", 10), vec![""]);
    }

    #[test]
    fn wrap_hard_breaks_long_rows() {
        assert_eq!(wrap_preformatted("abcdefg", 3), vec!["abc", "def", "g"]);
    }

    #[test]
    fn pad_fills_to_width() {
        assert_eq!(pad_to_width("ab", 4), "ab  ");
        assert_eq!(pad_to_width("abcdef", 4), "abcdef");
    }

    #[test]
    fn truncate_stops_before_overflowing_wide_graphemes() {
        assert_eq!(truncate_to_width("laura chen", 5), "laura");
        assert_eq!(truncate_to_width("ab日本", 3), "ab");
        assert_eq!(truncate_to_width("short", 40), "short");
        assert_eq!(truncate_to_width("x", 0), "");
    }
}
