//! Pipeline stages for text-to-cards analysis.
//!
//! Each submodule implements exactly one transformation step.
//! Keeping stages separate makes each independently testable and lets us
//! swap implementations without touching other stages.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ clean ──▶ segment ──▶ llm ──▶ cards ──▶ normalize ──▶ export
//! (path/URL) (whitespace) (paragraphs) (enrich)  (derive)   (clamp 3..6)  (md/json)
//! ```
//!
//! 1. [`input`]     — resolve the user-supplied path, URL, or literal text and
//!    validate the input preconditions
//! 2. [`clean`]     — deterministic whitespace normalisation ahead of segmentation
//! 3. [`segment`]   — split cleaned text into bounded paragraphs and classify each
//! 4. [`metadata`]  — word counts, language detection, content-type heuristics
//! 5. [`llm`]       — drive the enrichment and title calls with retry/backoff;
//!    the only stage with network I/O
//! 6. [`cards`]     — derive one card per enriched paragraph
//! 7. [`normalize`] — clamp the card count into the configured \[3, 6\] range
//! 8. [`export`]    — render the final cards as Markdown or JSON

pub mod cards;
pub mod clean;
pub mod export;
pub mod input;
pub mod llm;
pub mod metadata;
pub mod normalize;
pub mod segment;
