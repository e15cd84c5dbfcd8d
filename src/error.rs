//! Error types for the cardforge library.
//!
//! All fatal failures surface as [`CardforgeError`] from the top-level
//! `analyze*` functions. The two core algorithms (segmenter, normalizer)
//! never error for structurally valid input — a zero-paragraph segmentation
//! and an under-3 card count are valid, degraded outcomes the caller must
//! branch on, not exceptions.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the cardforge library.
#[derive(Debug, Error)]
pub enum CardforgeError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Text was empty or whitespace-only. Rejected before segmentation runs.
    #[error("Input text is empty.\nProvide non-empty text, a .txt/.md file, or a URL.")]
    EmptyInput,

    /// Text is shorter than the minimum paragraph length.
    #[error("Input text too short: {got} chars (minimum {min}).")]
    TextTooShort { min: usize, got: usize },

    /// Text exceeds the supported input budget.
    #[error("Input text too long: {got} chars (maximum {max}).\nSplit the document and analyze the parts separately.")]
    TextTooLong { max: usize, got: usize },

    /// Input file was not found at the given path.
    #[error("File not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file extension is not a supported text format.
    #[error("Unsupported file type '.{extension}' for '{path}'\nSupported: .txt, .md. PDF content must be extracted to text by an external tool first.")]
    UnsupportedFileType { path: PathBuf, extension: String },

    /// HTTP URL was syntactically valid but download failed.
    #[error("Failed to download '{url}': {reason}\nCheck your internet connection.")]
    DownloadFailed { url: String, reason: String },

    /// Download exceeded the configured timeout.
    #[error("Download timed out after {secs}s for '{url}'\nIncrease --download-timeout.")]
    DownloadTimeout { url: String, secs: u64 },

    // ── LLM errors ────────────────────────────────────────────────────────
    /// The configured provider is not initialised (missing API key etc.).
    #[error("LLM provider '{provider}' is not configured.\n{hint}")]
    ProviderNotConfigured { provider: String, hint: String },

    /// The LLM API failed after all retries.
    #[error("LLM API error after {retries} retries: {message}")]
    LlmApiError { retries: u32, message: String },

    /// The LLM replied, but the reply never parsed as the expected JSON shape.
    #[error("Malformed LLM response for {what}: {detail}\nThe provider replied but not with the requested JSON shape; retrying or switching models may help.")]
    MalformedResponse { what: String, detail: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Control flow ──────────────────────────────────────────────────────
    /// The cancellation token was triggered between pipeline stages.
    #[error("Analysis cancelled")]
    Cancelled,

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}
