//! Text utilities for rendering.

use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncates a string with an ellipsis if it exceeds `max_width` columns.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= 1 {
        return "…".to_string();
    }
    let mut truncated = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width + 1 > max_width {
            break;
        }
        truncated.push(ch);
        width += ch_width;
    }
    truncated.push('…');
    truncated
}

/// Strips escape characters and expands tabs.
///
/// Backend text is untrusted; an ESC byte would otherwise reach the terminal.
pub fn sanitize_for_display(s: &str) -> Cow<'_, str> {
    if s.contains('\x1b') || s.contains('\t') || s.contains('\r') {
        Cow::Owned(
            s.replace('\x1b', "")
                .replace('\t', "    ")
                .replace('\r', ""),
        )
    } else {
        Cow::Borrowed(s)
    }
}

/// Wraps text to `width` display columns.
///
/// Breaks at spaces when possible; words wider than a line are split by
/// character. Explicit newlines are kept and empty lines survive.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for logical in text.split('\n') {
        if logical.is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current = String::new();
        let mut current_width = 0;

        for word in logical.split_inclusive(' ') {
            let word_width = word.width();
            if current_width + word_width <= width {
                current.push_str(word);
                current_width += word_width;
                continue;
            }

            if !current.is_empty() {
                lines.push(current.trim_end().to_string());
                current.clear();
                current_width = 0;
            }

            if word_width <= width {
                current.push_str(word);
                current_width = word_width;
                continue;
            }

            let bare = word.trim_end_matches(' ');
            for ch in bare.chars() {
                let ch_width = ch.width().unwrap_or(0);
                if current_width + ch_width > width && !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                current.push(ch);
                current_width += ch_width;
            }
            // The separator never starts a continuation line.
            if bare.len() < word.len() && current_width < width {
                current.push(' ');
                current_width += 1;
            }
        }

        lines.push(current.trim_end().to_string());
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_short_text_is_unchanged() {
        assert_eq!(truncate_with_ellipsis("gold", 10), "gold");
    }

    #[test]
    fn truncate_long_text_adds_ellipsis() {
        let out = truncate_with_ellipsis("Gold Investment Strategy", 10);
        assert_eq!(out, "Gold Inve…");
        assert_eq!(out.width(), 10);
    }

    #[test]
    fn truncate_respects_wide_characters() {
        let out = truncate_with_ellipsis("金金金金金", 6);
        assert!(out.width() <= 6);
        assert!(out.ends_with('…'));
    }

    #[test]
    fn sanitize_strips_escape_sequences() {
        assert_eq!(sanitize_for_display("a\x1b[31mb\tc"), "a[31mb    c");
        assert!(matches!(sanitize_for_display("plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn wrap_breaks_at_spaces() {
        assert_eq!(
            wrap_text("gold is up today", 8),
            vec!["gold is", "up today"]
        );
    }

    #[test]
    fn wrap_keeps_blank_lines_and_splits_long_words() {
        assert_eq!(wrap_text("a\n\nbcdefgh", 3), vec!["a", "", "bcd", "efg", "h"]);
    }

    #[test]
    fn wrap_split_word_does_not_carry_space_to_next_line() {
        assert_eq!(wrap_text("abc d", 3), vec!["abc", "d"]);
        assert_eq!(wrap_text("abcde f", 3), vec!["abc", "de", "f"]);
    }
}
