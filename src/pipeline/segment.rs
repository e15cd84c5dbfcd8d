//! Paragraph segmentation: split cleaned text into bounded paragraphs.
//!
//! A pure, deterministic function of the input text and the two length
//! bounds in the config. Candidates come from blank-line boundaries;
//! over-long candidates are re-split greedily along sentence boundaries.
//! Order is never changed — paragraphs are only filtered or split in place.
//!
//! Known accepted violation: a single sentence longer than the cap is
//! emitted whole. Splitting mid-sentence would corrupt meaning, so the
//! length invariant yields to content integrity there.

use crate::config::AnalysisConfig;
use crate::pipeline::clean::char_len;
use crate::types::{Paragraph, ParagraphType};
use once_cell::sync::Lazy;
use regex::Regex;

/// Sentence-terminal punctuation, CJK and Latin.
pub const SENTENCE_TERMINATORS: &[char] = &['。', '！', '？', '.', '!', '?'];

static RE_BLANK_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());
static RE_MD_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#{1,6}\s+").unwrap());
static RE_BULLET_LIST: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[•\-*]\s+").unwrap());
static RE_NUMBERED_LIST: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\s+").unwrap());

/// Split cleaned text into an ordered sequence of paragraph strings bounded
/// by `min_paragraph_len..=max_paragraph_len` (chars).
///
/// Returns an empty vector for degenerate input — a valid, recoverable
/// outcome the caller must branch on, never an error.
pub fn split_paragraphs(text: &str, config: &AnalysisConfig) -> Vec<String> {
    let mut result: Vec<String> = Vec::new();

    for candidate in RE_BLANK_SPLIT.split(text) {
        let paragraph = candidate.trim();
        if paragraph.is_empty() {
            continue;
        }

        if char_len(paragraph) <= config.max_paragraph_len {
            result.push(paragraph.to_string());
            continue;
        }

        // Over-long: re-split on sentence boundaries, accumulating greedily.
        let sentences = paragraph
            .split(SENTENCE_TERMINATORS)
            .map(str::trim)
            .filter(|s| !s.is_empty());

        let mut current = String::new();
        for sentence in sentences {
            if char_len(&current) + char_len(sentence) < config.max_paragraph_len {
                current.push_str(sentence);
                current.push('。');
            } else {
                if !current.is_empty() {
                    result.push(current.trim().to_string());
                }
                current = format!("{sentence}。");
            }
        }
        if !current.is_empty() {
            result.push(current.trim().to_string());
        }
    }

    result.retain(|p| char_len(p) >= config.min_paragraph_len);
    result
}

/// Classify a paragraph's structural type.
///
/// Checks run in a fixed order: heading, then list, then quote. A short
/// quoted line therefore classifies as heading — a documented ambiguity
/// that is kept as-is.
pub fn classify(text: &str) -> ParagraphType {
    let trimmed = text.trim();

    if RE_MD_HEADING.is_match(trimmed) || (char_len(trimmed) < 50 && !trimmed.contains('。')) {
        return ParagraphType::Heading;
    }

    if RE_BULLET_LIST.is_match(trimmed) || RE_NUMBERED_LIST.is_match(trimmed) {
        return ParagraphType::List;
    }

    if trimmed.starts_with(['>', '「', '“']) {
        return ParagraphType::Quote;
    }

    ParagraphType::Text
}

/// Segment cleaned text into classified [`Paragraph`]s with dash-free ids
/// (`p1`, `p2`, …) and contiguous zero-based order.
pub fn segment(text: &str, config: &AnalysisConfig) -> Vec<Paragraph> {
    split_paragraphs(text, config)
        .into_iter()
        .enumerate()
        .map(|(i, content)| Paragraph {
            id: format!("p{}", i + 1),
            kind: classify(&content),
            content,
            order: i,
        })
        .collect()
}
