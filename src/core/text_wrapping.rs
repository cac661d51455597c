//! Word wrapping for transcript text.
//!
//! The transcript is wrapped here rather than by ratatui's `Paragraph` so the
//! number of visual rows is known exactly; scrolling depends on it.

use unicode_width::UnicodeWidthChar;

/// Wrap one logical line to `width` columns, breaking after whitespace when
/// possible and inside a word only when it is longer than a whole row.
/// Always returns at least one (possibly empty) row.
pub fn wrap_line(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }

    let mut rows = Vec::new();
    let mut current = String::new();
    let mut current_width = 0usize;
    // Byte offset and column just past the last whitespace in `current`.
    let mut last_break: Option<(usize, usize)> = None;

    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);

        if current_width + ch_width > width && !current.is_empty() {
            match last_break {
                Some((byte, break_width)) if byte < current.len() => {
                    let rest = current.split_off(byte);
                    rows.push(current.trim_end().to_string());
                    current = rest;
                    current_width -= break_width;
                }
                _ => {
                    rows.push(current.trim_end().to_string());
                    current.clear();
                    current_width = 0;
                }
            }
            last_break = None;
        }

        if ch == ' ' && current.is_empty() && !rows.is_empty() {
            continue;
        }

        current.push(ch);
        current_width += ch_width;
        if ch.is_whitespace() {
            last_break = Some((current.len(), current_width));
        }
    }

    rows.push(current);
    rows
}

/// Wrap multi-line text, keeping its explicit line breaks.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    text.split('\n')
        .flat_map(|line| wrap_line(line.trim_end_matches('\r'), width))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use unicode_width::UnicodeWidthStr;

    #[test]
    fn short_lines_are_untouched() {
        assert_eq!(wrap_line("hello world", 20), vec!["hello world"]);
        assert_eq!(wrap_line("", 20), vec![""]);
    }

    #[test]
    fn breaks_at_word_boundaries() {
        assert_eq!(
            wrap_line("the quick brown fox jumps", 10),
            vec!["the quick", "brown fox", "jumps"]
        );
    }

    #[test]
    fn overlong_words_are_split() {
        assert_eq!(wrap_line("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn rows_never_exceed_width() {
        let text = "Nelson's Xanadu wasn't just about linking documents; it was about \
                    creating a web where every quotation links back to its source.";
        for width in [5, 8, 13, 21, 40] {
            for row in wrap_line(text, width) {
                assert!(row.width() <= width, "{row:?} wider than {width}");
            }
        }
    }

    #[test]
    fn wide_characters_count_double() {
        assert_eq!(wrap_line("日本語の文", 4), vec!["日本", "語の", "文"]);
    }

    #[test]
    fn explicit_newlines_are_kept() {
        assert_eq!(
            wrap_text("first\n\nsecond line here", 8),
            vec!["first", "", "second", "line", "here"]
        );
    }
}
