//! Text cleaning: deterministic whitespace normalisation ahead of segmentation.
//!
//! The segmenter's blank-line splitting only works on text with unified line
//! endings and tidy whitespace, so cleaning runs first and is part of the
//! input contract. Each rule is a pure function (`&str → String`) with no
//! shared state, applied in a defined order: line endings before per-line
//! trimming, trimming before blank-line collapsing (so blank lines that
//! contain only spaces still collapse).

use once_cell::sync::Lazy;
use regex::Regex;

/// Apply all cleaning rules to raw input text.
///
/// Rules (applied in order):
/// 1. Normalise line endings (CRLF / CR → LF)
/// 2. Collapse runs of horizontal whitespace to a single space
/// 3. Trim trailing whitespace per line
/// 4. Collapse 2+ consecutive blank lines down to one blank separator line
/// 5. Trim the whole text
pub fn clean_text(input: &str) -> String {
    let s = normalise_line_endings(input);
    let s = collapse_horizontal_whitespace(&s);
    let s = trim_trailing_whitespace(&s);
    let s = collapse_blank_lines(&s);
    s.trim().to_string()
}

fn normalise_line_endings(input: &str) -> String {
    input.replace("\r\n", "\n").replace('\r', "\n")
}

static RE_HORIZONTAL_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t\u{00A0}\u{3000}]+").unwrap());

fn collapse_horizontal_whitespace(input: &str) -> String {
    RE_HORIZONTAL_WS.replace_all(input, " ").to_string()
}

fn trim_trailing_whitespace(input: &str) -> String {
    input
        .lines()
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join("\n")
}

static RE_BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

fn collapse_blank_lines(input: &str) -> String {
    RE_BLANK_LINES.replace_all(input, "\n\n").to_string()
}

/// Length of a string in Unicode scalar values.
///
/// All length bounds in this crate (paragraph caps, split thresholds,
/// truncation) count chars, not bytes — CJK text would blow past byte-based
/// limits three times too early.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Truncate `text` to at most `max_len` chars, appending `…`-style suffix
/// only when something was actually cut.
pub fn truncate_chars(text: &str, max_len: usize, suffix: &str) -> String {
    if char_len(text) <= max_len {
        return text.to_string();
    }
    let keep = max_len.saturating_sub(char_len(suffix));
    let truncated: String = text.chars().take(keep).collect();
    format!("{truncated}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalise_line_endings() {
        assert_eq!(normalise_line_endings("a\r\nb\rc"), "a\nb\nc");
    }

    #[test]
    fn test_collapse_horizontal_whitespace() {
        assert_eq!(collapse_horizontal_whitespace("a  \t b"), "a b");
        assert_eq!(collapse_horizontal_whitespace("全角　空格"), "全角 空格");
    }

    #[test]
    fn test_collapse_blank_lines() {
        assert_eq!(collapse_blank_lines("a\n\n\n\n\nb"), "a\n\nb");
        // Single blank separator is preserved
        assert_eq!(collapse_blank_lines("a\n\nb"), "a\n\nb");
    }

    #[test]
    fn blank_lines_with_spaces_still_collapse() {
        let cleaned = clean_text("第一段\n   \n \t \n第二段");
        assert_eq!(cleaned, "第一段\n\n第二段");
    }

    #[test]
    fn clean_preserves_paragraph_boundaries() {
        let cleaned = clean_text("para one\r\n\r\n\r\npara  two  ");
        assert_eq!(cleaned, "para one\n\npara two");
    }

    #[test]
    fn clean_of_whitespace_only_is_empty() {
        assert_eq!(clean_text("   \n\t \r\n "), "");
    }

    #[test]
    fn char_len_counts_scalars() {
        assert_eq!(char_len("abc"), 3);
        assert_eq!(char_len("你好世界"), 4);
    }

    #[test]
    fn truncate_only_when_needed() {
        assert_eq!(truncate_chars("short", 10, "..."), "short");
        assert_eq!(truncate_chars("一二三四五六七八", 5, "..."), "一二...");
    }
}
