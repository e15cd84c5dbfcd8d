//! Analysis output: everything a caller gets back from one run.

use crate::types::{CardData, ContentMetadata, ProcessedParagraph, TitleOptions};
use serde::{Deserialize, Serialize};

/// The complete result of analyzing one input.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisOutput {
    /// Title candidates for the whole document.
    pub title_options: TitleOptions,
    /// Enriched paragraphs, in source order.
    pub paragraphs: Vec<ProcessedParagraph>,
    /// Final cards after count normalization, in render order.
    pub cards: Vec<CardData>,
    /// Descriptive statistics about the source text.
    pub metadata: ContentMetadata,
    /// Run accounting.
    pub stats: AnalysisStats,
}

impl AnalysisOutput {
    /// The selected document title, empty when no titles were generated.
    pub fn selected_title(&self) -> &str {
        self.title_options.selected()
    }
}

/// Accounting for one analysis run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisStats {
    pub paragraph_count: usize,
    pub card_count: usize,
    /// Prompt tokens across both LLM calls.
    pub input_tokens: u64,
    /// Completion tokens across both LLM calls.
    pub output_tokens: u64,
    /// Retries spent across both LLM calls.
    pub llm_retries: u32,
    pub total_duration_ms: u64,
    pub llm_duration_ms: u64,
}
