//! Content metadata heuristics: word counts, language, topical bucket.
//!
//! Pure helper functions over the cleaned text, collected into a
//! [`ContentMetadata`] record attached to the analysis output. CJK
//! characters count individually; Latin text counts whole words.

use crate::types::{ContentMetadata, ContentType, Language, Paragraph};
use once_cell::sync::Lazy;
use regex::Regex;

/// Reading speed used for the estimate, in words per minute.
pub const READING_SPEED_WPM: usize = 200;

static RE_LATIN_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z]+").unwrap());

fn is_cjk(c: char) -> bool {
    ('\u{4e00}'..='\u{9fa5}').contains(&c)
}

/// Count words: each CJK character counts as one word, each Latin letter run
/// counts as one word.
pub fn count_words(text: &str) -> usize {
    let cjk = text.chars().filter(|&c| is_cjk(c)).count();
    let latin = RE_LATIN_WORD.find_iter(text).count();
    cjk + latin
}

/// Detect the dominant language by CJK-to-Latin character ratio.
pub fn detect_language(text: &str) -> Language {
    let cjk = text.chars().filter(|&c| is_cjk(c)).count();
    let latin = text.chars().filter(|c| c.is_ascii_alphabetic()).count();
    let total = cjk + latin;

    if total == 0 {
        return Language::Auto;
    }

    let ratio = cjk as f64 / total as f64;
    if ratio > 0.5 {
        Language::Zh
    } else if ratio < 0.2 {
        Language::En
    } else {
        Language::Auto
    }
}

/// Estimated reading time in whole minutes, rounded up.
pub fn reading_time_minutes(word_count: usize) -> usize {
    word_count.div_ceil(READING_SPEED_WPM)
}

/// Bucket the text by topical keywords; first matching bucket wins.
pub fn detect_content_type(text: &str) -> ContentType {
    const BUCKETS: &[(ContentType, &[&str])] = &[
        (ContentType::Travel, &["旅行", "旅游", "景点", "酒店", "机票", "行程"]),
        (ContentType::Food, &["美食", "餐厅", "菜品", "味道", "食材", "烹饪"]),
        (ContentType::Fashion, &["穿搭", "时尚", "服装", "搭配", "风格", "品牌"]),
        (ContentType::Lifestyle, &["生活", "日常", "分享", "体验", "推荐", "种草"]),
    ];

    for (content_type, keywords) in BUCKETS {
        if keywords.iter().any(|k| text.contains(k)) {
            return *content_type;
        }
    }

    ContentType::Article
}

/// Build the metadata record for a cleaned text and its segmentation.
pub fn build_metadata(text: &str, paragraphs: &[Paragraph]) -> ContentMetadata {
    let word_count = count_words(text);
    ContentMetadata {
        word_count,
        paragraph_count: paragraphs.len(),
        estimated_read_time: reading_time_minutes(word_count),
        language: detect_language(text),
        content_type: detect_content_type(text),
    }
}
