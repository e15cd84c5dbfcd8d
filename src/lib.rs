//! # cardforge
//!
//! Turn long-form text into a small deck of styled social-media cards using
//! an LLM.
//!
//! ## Why this crate?
//!
//! Pasting an article into a card-maker tool yields walls of text; naive
//! length-based chopping cuts sentences in half and loses structure. Instead
//! this crate segments the text along paragraph and sentence boundaries,
//! asks an LLM to restyle each paragraph in a chosen voice, and clamps the
//! result into a deck of 3-6 cards that is actually postable.
//!
//! ## Pipeline Overview
//!
//! ```text
//! text / file / URL
//!  │
//!  ├─ 1. Input      resolve literal text, local .txt/.md, or URL
//!  ├─ 2. Clean      whitespace and line-ending normalisation
//!  ├─ 3. Segment    blank-line split + sentence re-split, classify
//!  ├─ 4. Enrich     concurrent LLM calls: per-paragraph restyle + titles
//!  ├─ 5. Cards      derive one card per paragraph
//!  ├─ 6. Normalize  clamp the deck into 3..=6 cards (split / synthesize / score)
//!  └─ 7. Export     Markdown or JSON
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cardforge::{analyze, AnalysisConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Provider auto-detected from OPENAI_API_KEY / ANTHROPIC_API_KEY / GEMINI_API_KEY
//!     let config = AnalysisConfig::default();
//!     let output = analyze("notes.md", &config).await?;
//!     println!("{}", output.selected_title());
//!     for card in &output.cards {
//!         println!("{} {} — {}", card.emoji, card.title, card.summary);
//!     }
//!     eprintln!("tokens: {} in / {} out",
//!         output.stats.input_tokens,
//!         output.stats.output_tokens);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `cardforge` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! cardforge = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod analyze;
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod prompts;
pub mod style;
pub mod types;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use analyze::{analyze, analyze_sync, analyze_text, analyze_to_file};
pub use config::{AnalysisConfig, AnalysisConfigBuilder, MAX_INPUT_PARAGRAPHS};
pub use error::CardforgeError;
pub use output::{AnalysisOutput, AnalysisStats};
pub use pipeline::export::ExportFormat;
pub use style::{CardTemplate, LanguageStyle, StylePreset};
pub use types::{
    CardData, ContentMetadata, ContentType, Language, Paragraph, ParagraphType,
    ProcessedParagraph, TitleOptions,
};
