//! Card-count normalization: clamp the card count into the configured band.
//!
//! Pure and deterministic — same cards and paragraphs in, same cards out.
//! Too few cards are expanded by splitting the longest summary or by
//! synthesizing from an unrepresented source paragraph; too many are reduced
//! by scoring and keeping the best. Every produced card stays traceable to a
//! source paragraph through its id prefix.
//!
//! Expansion can fail to make progress (nothing splittable, every paragraph
//! represented). That is accepted: an under-minimum result is returned as-is
//! and the orchestrator logs it, because inventing content the source does
//! not contain would be worse than a short deck.

use crate::config::AnalysisConfig;
use crate::pipeline::clean::{char_len, truncate_chars};
use crate::pipeline::segment::SENTENCE_TERMINATORS;
use crate::style::StylePreset;
use crate::types::{CardData, ProcessedParagraph};
use std::cmp::Reverse;
use tracing::debug;

/// Emoji assigned to synthesized cards; scores as "default" during reduction.
pub const DEFAULT_EMOJI: &str = "📝";

/// Tag cap for synthesized cards.
const SYNTH_MAX_TAGS: usize = 3;

/// Clamp the card count into `[config.min_cards, config.max_cards]`.
///
/// Order is reassigned to the contiguous index in every branch, including
/// the in-band identity case.
pub fn normalize_cards(
    mut cards: Vec<CardData>,
    paragraphs: &[ProcessedParagraph],
    config: &AnalysisConfig,
) -> Vec<CardData> {
    if cards.len() < config.min_cards {
        expand(&mut cards, paragraphs, config);
    } else if cards.len() > config.max_cards {
        reduce(&mut cards, config);
    }

    for (i, card) in cards.iter_mut().enumerate() {
        card.order = i;
    }
    cards
}

/// Grow the deck toward `min_cards`, preferring splits over synthesis.
fn expand(cards: &mut Vec<CardData>, paragraphs: &[ProcessedParagraph], config: &AnalysisConfig) {
    while cards.len() < config.min_cards {
        if try_split_longest(cards, config) {
            continue;
        }
        if try_synthesize(cards, paragraphs) {
            continue;
        }
        debug!(
            "card expansion stalled at {} of {} cards",
            cards.len(),
            config.min_cards
        );
        break;
    }
}

/// Split the card with the longest summary in two, in place.
///
/// Returns false when no card qualifies (summary at or under the threshold,
/// or fewer than two sentences — splitting would leave an empty half).
fn try_split_longest(cards: &mut Vec<CardData>, config: &AnalysisConfig) -> bool {
    let Some(index) = longest_summary_index(cards) else {
        return false;
    };
    if char_len(&cards[index].summary) <= config.split_threshold {
        return false;
    }
    let Some((first, second)) = split_summary(&cards[index].summary) else {
        return false;
    };

    let original = cards.remove(index);
    let make_half = |suffix: &str, title_mark: &str, summary: String| CardData {
        id: format!("{}{suffix}", original.id),
        title: format!("{}{title_mark}", original.title),
        summary,
        emoji: original.emoji.clone(),
        tags: original.tags.clone(),
        style_preset: original.style_preset.clone(),
        order: 0,
    };
    cards.insert(index, make_half("-2", " (下)", second));
    cards.insert(index, make_half("-1", " (上)", first));
    true
}

/// Index of the card with the longest summary, first on ties.
///
/// `Iterator::max_by_key` returns the LAST maximum, so a manual scan with a
/// strict comparison is used instead.
fn longest_summary_index(cards: &[CardData]) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;
    for (i, card) in cards.iter().enumerate() {
        let len = char_len(&card.summary);
        if best.map_or(true, |(_, best_len)| len > best_len) {
            best = Some((i, len));
        }
    }
    best.map(|(i, _)| i)
}

/// Split a summary at its midpoint sentence boundary.
///
/// Returns `None` for summaries with fewer than two sentences. Both halves
/// are rejoined with `。` and re-terminated, so each reads as complete text.
pub(crate) fn split_summary(summary: &str) -> Option<(String, String)> {
    let sentences: Vec<&str> = summary
        .split(SENTENCE_TERMINATORS)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    if sentences.len() < 2 {
        return None;
    }

    let mid = sentences.len().div_ceil(2);
    let join = |part: &[&str]| format!("{}。", part.join("。"));
    Some((join(&sentences[..mid]), join(&sentences[mid..])))
}

/// Append a card synthesized from the first unrepresented source paragraph.
fn try_synthesize(cards: &mut Vec<CardData>, paragraphs: &[ProcessedParagraph]) -> bool {
    let represented: Vec<&str> = cards.iter().map(|c| base_id(&c.id)).collect();
    let Some(paragraph) = paragraphs
        .iter()
        .find(|p| !represented.contains(&p.id.as_str()))
    else {
        return false;
    };

    let title = paragraph
        .key_points
        .first()
        .cloned()
        .unwrap_or_else(|| truncate_chars(&paragraph.summary, 20, "..."));
    let summary = if paragraph.summary.trim().is_empty() {
        truncate_chars(&paragraph.content, 100, "...")
    } else {
        paragraph.summary.clone()
    };

    cards.push(CardData {
        id: format!("{}-extra", paragraph.id),
        title,
        summary,
        emoji: DEFAULT_EMOJI.to_string(),
        tags: paragraph.tags.iter().take(SYNTH_MAX_TAGS).cloned().collect(),
        style_preset: StylePreset::default(),
        order: 0,
    });
    true
}

/// The source-paragraph id a card traces back to: the prefix before the
/// first `-` (split and synthesized ids are suffixed `-1`/`-2`/`-extra`).
fn base_id(card_id: &str) -> &str {
    card_id.split('-').next().unwrap_or(card_id)
}

/// Drop the lowest-scoring cards until at most `max_cards` remain.
///
/// The sort is stable, so equal scores keep their source order.
fn reduce(cards: &mut Vec<CardData>, config: &AnalysisConfig) {
    cards.sort_by_key(|card| Reverse(importance_score(card)));
    cards.truncate(config.max_cards);
}

/// Heuristic keep-worthiness of a card during reduction.
///
/// Rewards tag richness, a summary in the readable 50..=150 char band, a
/// non-default emoji, and a title in the 5..=30 char band.
pub(crate) fn importance_score(card: &CardData) -> u32 {
    let mut score = 10 * card.tags.len() as u32;

    let summary_len = char_len(&card.summary);
    if (50..=150).contains(&summary_len) {
        score += 20;
    }
    if !card.emoji.is_empty() && card.emoji != DEFAULT_EMOJI {
        score += 5;
    }
    let title_len = char_len(&card.title);
    if (5..=30).contains(&title_len) {
        score += 10;
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ParagraphType;

    fn card(id: &str, title: &str, summary: &str, tags: &[&str], emoji: &str) -> CardData {
        CardData {
            id: id.to_string(),
            title: title.to_string(),
            summary: summary.to_string(),
            emoji: emoji.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            style_preset: StylePreset::default(),
            order: 0,
        }
    }

    fn paragraph(id: &str, summary: &str) -> ProcessedParagraph {
        ProcessedParagraph {
            id: id.to_string(),
            content: "这是一段用于测试的原始段落内容，描述了一次周末的短途旅行经历。".to_string(),
            order: 0,
            kind: ParagraphType::Text,
            key_points: vec!["周末短途旅行".to_string()],
            summary: summary.to_string(),
            emoji: "🚗".to_string(),
            tags: vec!["旅行".to_string(), "周末".to_string(), "攻略".to_string(), "多余".to_string()],
            style_preset: StylePreset::default(),
        }
    }

    fn config() -> AnalysisConfig {
        AnalysisConfig::default()
    }

    #[test]
    fn in_band_counts_pass_through_with_contiguous_order() {
        for n in 3..=6 {
            let cards: Vec<CardData> = (0..n)
                .map(|i| card(&format!("p{}", i + 1), "标题", "摘要内容", &["tag"], "✨"))
                .collect();
            let out = normalize_cards(cards, &[], &config());
            assert_eq!(out.len(), n);
            for (i, c) in out.iter().enumerate() {
                assert_eq!(c.order, i);
                assert_eq!(c.id, format!("p{}", i + 1));
            }
        }
    }

    /// Four sentences, comfortably past the 100-char split threshold.
    fn long_summary() -> String {
        let pad = "补充的细节描述内容用来把句子加长一点再长一点";
        format!(
            "第一句讲出发前的准备工作{pad}。第二句讲路上的风景见闻{pad}。\
             第三句讲当地的美食体验{pad}。第四句讲返程总结感悟{pad}。"
        )
    }

    #[test]
    fn long_summary_is_split_with_half_markers() {
        let long_summary = long_summary();
        assert!(char_len(&long_summary) > 100);
        let cards = vec![
            card("p1", "旅行记录", &long_summary, &["旅行"], "🚗"),
            card("p2", "美食记录", "短摘要。", &["美食"], "🍜"),
        ];
        let out = normalize_cards(cards, &[], &config());

        assert_eq!(out.len(), 3);
        assert_eq!(out[0].id, "p1-1");
        assert_eq!(out[1].id, "p1-2");
        assert_eq!(out[2].id, "p2");
        assert!(out[0].title.ends_with(" (上)"));
        assert!(out[1].title.ends_with(" (下)"));
        // ceil(4/2) = 2 sentences in each half, both re-terminated.
        assert!(out[0].summary.contains("第一句"));
        assert!(out[0].summary.contains("第二句"));
        assert!(out[1].summary.contains("第三句"));
        assert!(out[1].summary.contains("第四句"));
        assert!(out[0].summary.ends_with('。'));
        assert!(out[1].summary.ends_with('。'));
        assert_eq!(out[0].order, 0);
        assert_eq!(out[2].order, 2);
    }

    #[test]
    fn split_summary_covers_all_sentences() {
        let (first, second) = split_summary("句子一。句子二。句子三。句子四。").unwrap();
        assert_eq!(first, "句子一。句子二。");
        assert_eq!(second, "句子三。句子四。");
    }

    #[test]
    fn split_summary_odd_count_front_loads() {
        let (first, second) = split_summary("一。二。三。").unwrap();
        assert_eq!(first, "一。二。");
        assert_eq!(second, "三。");
    }

    #[test]
    fn single_sentence_summary_does_not_split() {
        assert!(split_summary("只有一句话没有第二句").is_none());
    }

    #[test]
    fn synthesis_uses_first_unrepresented_paragraph() {
        let cards = vec![
            card("p1", "标题一", "摘要一。", &["a"], "✨"),
            card("p2", "标题二", "摘要二。", &["b"], "✨"),
        ];
        let paragraphs = vec![paragraph("p1", "摘要一。"), paragraph("p2", "摘要二。"), paragraph("p3", "第三段的摘要。")];
        let out = normalize_cards(cards, &paragraphs, &config());

        assert_eq!(out.len(), 3);
        let synth = &out[2];
        assert_eq!(synth.id, "p3-extra");
        assert_eq!(synth.title, "周末短途旅行");
        assert_eq!(synth.summary, "第三段的摘要。");
        assert_eq!(synth.emoji, DEFAULT_EMOJI);
        assert_eq!(synth.tags.len(), 3, "synthesized tags are capped at 3");
        assert_eq!(synth.style_preset, StylePreset::default());
    }

    #[test]
    fn split_cards_keep_their_paragraph_represented() {
        // p1 was split into p1-1/p1-2 earlier; its base id still counts as
        // represented, so synthesis must pick p2.
        let cards = vec![
            card("p1-1", "上半 (上)", "摘要上。", &["a"], "✨"),
            card("p1-2", "下半 (下)", "摘要下。", &["a"], "✨"),
        ];
        let paragraphs = vec![paragraph("p1", "摘要。"), paragraph("p2", "第二段摘要。")];
        let out = normalize_cards(cards, &paragraphs, &config());
        assert_eq!(out.len(), 3);
        assert_eq!(out[2].id, "p2-extra");
    }

    #[test]
    fn stalled_expansion_accepts_under_minimum() {
        // One short-summary card, one paragraph, already represented:
        // nothing to split, nothing to synthesize.
        let cards = vec![card("p1", "标题", "短摘要。", &["a"], "✨")];
        let paragraphs = vec![paragraph("p1", "短摘要。")];
        let out = normalize_cards(cards, &paragraphs, &config());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].order, 0);
    }

    #[test]
    fn ties_pick_the_first_longest_summary() {
        let long = long_summary();
        let cards = vec![
            card("p1", "甲", &long, &["a"], "✨"),
            card("p2", "乙", &long, &["b"], "✨"),
        ];
        let out = normalize_cards(cards, &[], &config());
        assert_eq!(out[0].id, "p1-1");
        assert_eq!(out[1].id, "p1-2");
        assert_eq!(out[2].id, "p2");
    }

    #[test]
    fn reduction_keeps_the_six_best_cards() {
        let rich_summary = "这段摘要的长度正好落在五十到一百五十个字符的理想区间内，\
                            信息量比较适中，读起来不费力，保留价值也比较高一些。";
        assert!((50..=150).contains(&char_len(rich_summary)));

        let mut cards: Vec<CardData> = (0..6)
            .map(|i| {
                card(
                    &format!("p{}", i + 1),
                    "一个长度合适的标题",
                    rich_summary,
                    &["旅行", "攻略"],
                    "🌟",
                )
            })
            .collect();
        // Two weak cards: no tags, ten-char summary, default emoji.
        cards.push(card("p7", "弱", "十个字的摘要内容啊。", &[], DEFAULT_EMOJI));
        cards.push(card("p8", "弱", "十个字的摘要内容啊。", &[], DEFAULT_EMOJI));

        let out = normalize_cards(cards, &[], &config());
        assert_eq!(out.len(), 6);
        assert!(out.iter().all(|c| c.id != "p7" && c.id != "p8"));
        for (i, c) in out.iter().enumerate() {
            assert_eq!(c.order, i);
        }
    }

    #[test]
    fn reduction_is_stable_on_equal_scores() {
        let cards: Vec<CardData> = (0..8)
            .map(|i| card(&format!("p{}", i + 1), "同分标题啊", "同样的摘要。", &["t"], "✨"))
            .collect();
        let out = normalize_cards(cards, &[], &config());
        let ids: Vec<&str> = out.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2", "p3", "p4", "p5", "p6"]);
    }

    #[test]
    fn importance_score_components() {
        let strong = card(
            "p1",
            "长度合适的标题",
            &"字".repeat(60),
            &["a", "b", "c"],
            "🌟",
        );
        assert_eq!(importance_score(&strong), 30 + 20 + 5 + 10);

        let weak = card("p2", "短", "短摘要。", &[], DEFAULT_EMOJI);
        assert_eq!(importance_score(&weak), 0);

        let no_emoji = card("p3", "长度合适的标题", "短摘要。", &[], "");
        assert_eq!(importance_score(&no_emoji), 10);
    }
}
