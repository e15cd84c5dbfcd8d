//! Domain model: paragraphs, enriched paragraphs, cards, and titles.
//!
//! Wire names follow the camelCase JSON contract the LLM is asked to emit
//! (`keyPoints`, `stylePreset`, …), so the same structs serve as both the
//! in-process model and the parse target for provider replies. Fields the
//! model occasionally omits default rather than failing the whole reply.

use crate::style::StylePreset;
use serde::{Deserialize, Serialize};

/// Structural classification of a paragraph. Assigned by [`crate::pipeline::segment::classify`],
/// never taken from the LLM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParagraphType {
    #[default]
    Text,
    Heading,
    List,
    Quote,
}

/// A segmented source paragraph, before enrichment.
///
/// Ids are deliberately dash-free (`p1`, `p2`, …) so that derived card ids
/// (`p1-1`, `p1-extra`) can be traced back to their source paragraph by
/// taking the prefix before the first `-`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    pub id: String,
    pub content: String,
    /// Zero-based position, contiguous within a paragraph set.
    pub order: usize,
    #[serde(rename = "type")]
    pub kind: ParagraphType,
}

/// A paragraph after LLM enrichment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedParagraph {
    #[serde(default)]
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub order: usize,
    #[serde(rename = "type", default)]
    pub kind: ParagraphType,
    #[serde(default)]
    pub key_points: Vec<String>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub emoji: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub style_preset: StylePreset,
}

/// One exportable content unit derived from a source paragraph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardData {
    /// Source paragraph id, suffixed `-1`/`-2` when split or `-extra` when synthesized.
    pub id: String,
    pub title: String,
    pub summary: String,
    pub emoji: String,
    pub tags: Vec<String>,
    pub style_preset: StylePreset,
    /// Zero-based position, contiguous after normalization.
    pub order: usize,
}

/// Title candidates generated for the whole document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleOptions {
    #[serde(default)]
    pub titles: Vec<String>,
    #[serde(default)]
    pub selected_index: usize,
}

impl TitleOptions {
    /// The currently selected title, falling back to the first one when the
    /// index is out of range and to an empty string when there are none.
    pub fn selected(&self) -> &str {
        self.titles
            .get(self.selected_index)
            .or_else(|| self.titles.first())
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Detected dominant language of the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Zh,
    En,
    #[default]
    Auto,
}

/// Coarse topical bucket used to pick export defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    #[default]
    Article,
    Travel,
    Food,
    Fashion,
    Lifestyle,
    Other,
}

/// Descriptive statistics about the parsed source text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentMetadata {
    pub word_count: usize,
    pub paragraph_count: usize,
    /// Estimated reading time in whole minutes.
    pub estimated_read_time: usize,
    pub language: Language,
    pub content_type: ContentType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paragraph_type_wire_names() {
        let json = serde_json::to_string(&ParagraphType::Heading).unwrap();
        assert_eq!(json, "\"heading\"");
        let back: ParagraphType = serde_json::from_str("\"quote\"").unwrap();
        assert_eq!(back, ParagraphType::Quote);
    }

    #[test]
    fn processed_paragraph_tolerates_missing_fields() {
        let json = r#"{"id":"p1","content":"正文内容","summary":"摘要"}"#;
        let pp: ProcessedParagraph = serde_json::from_str(json).unwrap();
        assert_eq!(pp.id, "p1");
        assert!(pp.key_points.is_empty());
        assert!(pp.tags.is_empty());
        assert_eq!(pp.kind, ParagraphType::Text);
    }

    #[test]
    fn card_data_uses_camel_case() {
        let card = CardData {
            id: "p1".into(),
            title: "t".into(),
            summary: "s".into(),
            emoji: "✨".into(),
            tags: vec!["a".into()],
            style_preset: StylePreset::default(),
            order: 0,
        };
        let json = serde_json::to_string(&card).unwrap();
        assert!(json.contains("\"stylePreset\""));
    }

    #[test]
    fn selected_title_fallbacks() {
        let empty = TitleOptions::default();
        assert_eq!(empty.selected(), "");

        let out_of_range = TitleOptions {
            titles: vec!["第一".into(), "第二".into()],
            selected_index: 9,
        };
        assert_eq!(out_of_range.selected(), "第一");

        let normal = TitleOptions {
            titles: vec!["第一".into(), "第二".into()],
            selected_index: 1,
        };
        assert_eq!(normal.selected(), "第二");
    }
}
