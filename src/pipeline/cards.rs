//! Card derivation: map enriched paragraphs 1:1 onto preview cards.
//!
//! Deliberately dumb — the interesting decisions (which cards to keep, split,
//! or synthesize) all live in [`crate::pipeline::normalize`]. Keeping this
//! stage trivial means the normalizer always sees one card per surviving
//! paragraph, which its traceability rules depend on.

use crate::pipeline::clean::truncate_chars;
use crate::types::{CardData, ProcessedParagraph};

/// Card summaries show the paragraph content capped at this many chars.
const CARD_SUMMARY_LEN: usize = 100;

/// Fallback title length when the enrichment left the summary empty.
const CARD_TITLE_LEN: usize = 20;

/// Derive one card per enriched paragraph, preserving order.
///
/// The paragraph's LLM summary becomes the card title (it is written as a
/// punchy one-liner); the card summary is the source content truncated to
/// 100 chars. Emoji, tags, and the style preset carry over unchanged.
pub fn derive_cards(paragraphs: &[ProcessedParagraph]) -> Vec<CardData> {
    paragraphs
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let title = if p.summary.trim().is_empty() {
                truncate_chars(&p.content, CARD_TITLE_LEN, "...")
            } else {
                p.summary.clone()
            };
            CardData {
                id: p.id.clone(),
                title,
                summary: truncate_chars(&p.content, CARD_SUMMARY_LEN, "..."),
                emoji: p.emoji.clone(),
                tags: p.tags.clone(),
                style_preset: p.style_preset.clone(),
                order: i,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::clean::char_len;
    use crate::style::StylePreset;
    use crate::types::ParagraphType;

    fn paragraph(id: &str, content: &str, summary: &str) -> ProcessedParagraph {
        ProcessedParagraph {
            id: id.to_string(),
            content: content.to_string(),
            order: 0,
            kind: ParagraphType::Text,
            key_points: vec!["要点".to_string()],
            summary: summary.to_string(),
            emoji: "🌊".to_string(),
            tags: vec!["旅行".to_string(), "海边".to_string()],
            style_preset: StylePreset::default(),
        }
    }

    #[test]
    fn summary_becomes_title_and_content_becomes_summary() {
        let cards = derive_cards(&[paragraph("p1", "这是原始段落内容。", "海边日落真的绝美")]);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].id, "p1");
        assert_eq!(cards[0].title, "海边日落真的绝美");
        assert_eq!(cards[0].summary, "这是原始段落内容。");
        assert_eq!(cards[0].emoji, "🌊");
        assert_eq!(cards[0].tags.len(), 2);
    }

    #[test]
    fn long_content_is_truncated_for_summary() {
        let content = "字".repeat(300);
        let cards = derive_cards(&[paragraph("p1", &content, "摘要")]);
        assert_eq!(char_len(&cards[0].summary), 100);
        assert!(cards[0].summary.ends_with("..."));
    }

    #[test]
    fn empty_summary_falls_back_to_truncated_content() {
        let content = "一".repeat(40);
        let cards = derive_cards(&[paragraph("p1", &content, "  ")]);
        assert_eq!(char_len(&cards[0].title), 20);
        assert!(cards[0].title.ends_with("..."));
    }

    #[test]
    fn order_follows_input_position() {
        let cards = derive_cards(&[
            paragraph("p1", "第一段内容。", "一"),
            paragraph("p2", "第二段内容。", "二"),
            paragraph("p3", "第三段内容。", "三"),
        ]);
        let orders: Vec<usize> = cards.iter().map(|c| c.order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
    }

    #[test]
    fn empty_input_yields_no_cards() {
        assert!(derive_cards(&[]).is_empty());
    }
}
