//! Export rendering: turn a finished card deck into Markdown or JSON.
//!
//! Rendering is pure string building; file placement and atomic writes live
//! in the orchestrator. The JSON envelope carries the content metadata plus
//! an export timestamp and the crate version, so downstream consumers can
//! tell which renderer produced a given file.

use crate::error::CardforgeError;
use crate::types::{CardData, ContentMetadata};
use chrono::Utc;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Output format of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Markdown,
    Json,
}

impl ExportFormat {
    /// Canonical file extension, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Markdown => write!(f, "markdown"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = CardforgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            other => Err(CardforgeError::InvalidConfig(format!(
                "Unknown export format '{other}' (expected 'markdown' or 'json')"
            ))),
        }
    }
}

/// Render the deck as a Markdown document: H1 title, one `##` section per
/// card, tag line per card, `---` rules between cards.
pub fn to_markdown(title: &str, cards: &[CardData]) -> String {
    let mut out = String::new();
    out.push_str(&format!("# {title}\n\n"));

    for (i, card) in cards.iter().enumerate() {
        if i > 0 {
            out.push_str("---\n\n");
        }
        if card.emoji.is_empty() {
            out.push_str(&format!("## {}\n\n", card.title));
        } else {
            out.push_str(&format!("## {} {}\n\n", card.emoji, card.title));
        }
        out.push_str(&format!("{}\n\n", card.summary));
        if !card.tags.is_empty() {
            let tags: Vec<String> = card.tags.iter().map(|t| format!("#{t}")).collect();
            out.push_str(&format!("**标签**: {}\n\n", tags.join(" ")));
        }
    }

    out
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportEnvelope<'a> {
    title: &'a str,
    cards: &'a [CardData],
    metadata: ExportMetadata<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportMetadata<'a> {
    #[serde(flatten)]
    content: &'a ContentMetadata,
    export_time: String,
    version: &'static str,
}

/// Render the deck as pretty-printed JSON with an export envelope.
pub fn to_json(
    title: &str,
    cards: &[CardData],
    metadata: &ContentMetadata,
) -> Result<String, CardforgeError> {
    let envelope = ExportEnvelope {
        title,
        cards,
        metadata: ExportMetadata {
            content: metadata,
            export_time: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION"),
        },
    };
    serde_json::to_string_pretty(&envelope)
        .map_err(|e| CardforgeError::Internal(format!("JSON export failed: {e}")))
}

/// Render the deck in the requested format.
pub fn render(
    format: ExportFormat,
    title: &str,
    cards: &[CardData],
    metadata: &ContentMetadata,
) -> Result<String, CardforgeError> {
    match format {
        ExportFormat::Markdown => Ok(to_markdown(title, cards)),
        ExportFormat::Json => to_json(title, cards, metadata),
    }
}
