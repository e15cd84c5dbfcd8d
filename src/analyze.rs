//! Eager (full-document) analysis entry points.
//!
//! The pipeline runs as a sequence of staged transforms — resolve, clean,
//! segment, enrich, derive, normalize — with the cooperative cancellation
//! token checked at stage boundaries. The two LLM calls (paragraph
//! enrichment and title generation) are independent and run concurrently.

use crate::config::AnalysisConfig;
use crate::error::CardforgeError;
use crate::output::{AnalysisOutput, AnalysisStats};
use crate::pipeline::export::{self, ExportFormat};
use crate::pipeline::{cards, clean, input, llm, metadata, normalize, segment};
use crate::types::TitleOptions;
use edgequake_llm::{LLMProvider, ProviderFactory};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Analyze a text file, URL, or literal text into styled cards.
///
/// This is the primary entry point for the library.
///
/// # Arguments
/// * `input` — Local `.txt`/`.md` file path or HTTP/HTTPS URL
/// * `config` — Analysis configuration
///
/// # Errors
/// Returns `Err(CardforgeError)` for fatal errors: unreadable input, text
/// outside the accepted length bounds, no usable LLM provider, or an LLM
/// call that failed past the retry budget. An input that segments to zero
/// paragraphs is NOT an error — it returns an output with no cards.
pub async fn analyze(
    input_str: impl AsRef<str>,
    config: &AnalysisConfig,
) -> Result<AnalysisOutput, CardforgeError> {
    let input_str = input_str.as_ref();
    info!("Starting analysis: {}", input_str);
    let text = input::resolve_input(input_str, config.download_timeout_secs).await?;
    analyze_text(&text, config).await
}

/// Analyze literal text into styled cards.
pub async fn analyze_text(
    text: impl AsRef<str>,
    config: &AnalysisConfig,
) -> Result<AnalysisOutput, CardforgeError> {
    let total_start = Instant::now();

    // ── Step 1: Validate input ───────────────────────────────────────────
    check_cancelled(config)?;
    input::validate_text(text.as_ref(), config)?;

    // ── Step 2: Clean ────────────────────────────────────────────────────
    let cleaned = clean::clean_text(text.as_ref());

    // ── Step 3: Segment ──────────────────────────────────────────────────
    check_cancelled(config)?;
    let paragraphs = segment::segment(&cleaned, config);
    debug!("Segmented into {} paragraphs", paragraphs.len());

    let doc_metadata = metadata::build_metadata(&cleaned, &paragraphs);

    if paragraphs.is_empty() {
        warn!("No paragraph passed the length filter; returning an empty result");
        return Ok(AnalysisOutput {
            title_options: TitleOptions::default(),
            paragraphs: vec![],
            cards: vec![],
            metadata: doc_metadata,
            stats: AnalysisStats {
                total_duration_ms: total_start.elapsed().as_millis() as u64,
                ..Default::default()
            },
        });
    }

    // ── Step 4: Resolve provider ─────────────────────────────────────────
    let provider = resolve_provider(config).await?;

    // ── Step 5: Enrich paragraphs + generate titles, concurrently ────────
    check_cancelled(config)?;
    let llm_start = Instant::now();
    let (enriched, titles) = futures::try_join!(
        llm::enrich(&provider, &paragraphs, config),
        llm::generate_titles(&provider, &cleaned, config),
    )?;
    let llm_duration_ms = llm_start.elapsed().as_millis() as u64;
    info!(
        "LLM stage complete: {} enriched paragraphs, {} title candidates, {}ms",
        enriched.value.len(),
        titles.value.titles.len(),
        llm_duration_ms
    );

    // ── Step 6: Derive and normalize cards ───────────────────────────────
    check_cancelled(config)?;
    let derived = cards::derive_cards(&enriched.value);
    let final_cards = normalize::normalize_cards(derived, &enriched.value, config);
    if final_cards.len() < config.min_cards {
        warn!(
            "Card count {} is below the minimum of {}; source too thin to expand",
            final_cards.len(),
            config.min_cards
        );
    }

    // ── Step 7: Compute stats ────────────────────────────────────────────
    let stats = AnalysisStats {
        paragraph_count: enriched.value.len(),
        card_count: final_cards.len(),
        input_tokens: enriched.input_tokens + titles.input_tokens,
        output_tokens: enriched.output_tokens + titles.output_tokens,
        llm_retries: enriched.retries + titles.retries,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
        llm_duration_ms,
    };

    info!(
        "Analysis complete: {} cards from {} paragraphs, {}ms total",
        stats.card_count, stats.paragraph_count, stats.total_duration_ms
    );

    Ok(AnalysisOutput {
        title_options: titles.value,
        paragraphs: enriched.value,
        cards: final_cards,
        metadata: doc_metadata,
        stats,
    })
}

/// Analyze an input and write the rendered export directly to a file.
///
/// Uses atomic write (temp file + rename) to prevent partial files.
pub async fn analyze_to_file(
    input_str: impl AsRef<str>,
    output_path: impl AsRef<Path>,
    format: ExportFormat,
    config: &AnalysisConfig,
) -> Result<AnalysisStats, CardforgeError> {
    let output = analyze(input_str, config).await?;
    let rendered = export::render(
        format,
        output.selected_title(),
        &output.cards,
        &output.metadata,
    )?;

    let path = output_path.as_ref();
    let write_err = |e: std::io::Error| CardforgeError::OutputWriteFailed {
        path: path.to_path_buf(),
        source: e,
    };

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
    }

    // Atomic write: write to temp, then rename
    let tmp_path = path.with_extension(format!("{}.tmp", format.extension()));
    tokio::fs::write(&tmp_path, &rendered).await.map_err(write_err)?;
    tokio::fs::rename(&tmp_path, path).await.map_err(write_err)?;

    Ok(output.stats)
}

/// Synchronous wrapper around [`analyze`].
///
/// Creates a temporary tokio runtime internally.
pub fn analyze_sync(
    input_str: impl AsRef<str>,
    config: &AnalysisConfig,
) -> Result<AnalysisOutput, CardforgeError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| CardforgeError::Internal(format!("Failed to create tokio runtime: {e}")))?
        .block_on(analyze(input_str, config))
}

// ── Internal helpers ─────────────────────────────────────────────────────

fn check_cancelled(config: &AnalysisConfig) -> Result<(), CardforgeError> {
    match &config.cancel {
        Some(token) if token.is_cancelled() => Err(CardforgeError::Cancelled),
        _ => Ok(()),
    }
}

/// Instantiate a named provider with the given model.
fn create_provider(
    provider_name: &str,
    model: &str,
) -> Result<Arc<dyn LLMProvider>, CardforgeError> {
    ProviderFactory::create_llm_provider(provider_name, model).map_err(|e| {
        CardforgeError::ProviderNotConfigured {
            provider: provider_name.to_string(),
            hint: format!("{e}"),
        }
    })
}

/// Resolve the LLM provider, from most-specific to least-specific.
///
/// The four-level fallback chain lets library users and CLI users each set
/// exactly as much or as little as they need:
///
/// 1. **Pre-built provider** (`config.provider`) — the caller constructed and
///    configured the provider entirely; we use it as-is. Useful in tests or
///    when the caller needs custom middleware (caching, rate-limiting).
///
/// 2. **Named provider + model** (`config.provider_name`) — the caller named
///    a provider (e.g. `"openai"`) and optional model. We call
///    [`ProviderFactory::create_llm_provider`] which reads the corresponding
///    API key (`OPENAI_API_KEY`, etc.) from the environment.
///
/// 3. **Environment pair** (`CARDFORGE_LLM_PROVIDER` + `CARDFORGE_MODEL`) —
///    Both env vars set means the caller chose a provider and model at the
///    execution environment level (Makefile, shell script, CI). Checked before
///    full auto-detection so the model choice is honoured even when multiple
///    API keys are present.
///
/// 4. **Full auto-detection** (`ProviderFactory::from_env`) — the factory
///    scans all known API key variables and picks the first available provider.
///    Convenient for `cardforge notes.md` with no other configuration.
async fn resolve_provider(config: &AnalysisConfig) -> Result<Arc<dyn LLMProvider>, CardforgeError> {
    // 1) User-provided provider takes priority
    if let Some(ref provider) = config.provider {
        return Ok(Arc::clone(provider));
    }

    // 2) Provider name + model
    if let Some(ref name) = config.provider_name {
        let model = config.model.as_deref().unwrap_or("gpt-4o-mini");
        return create_provider(name, model);
    }

    // 3) Auto-detect from environment; honour CARDFORGE_LLM_PROVIDER + CARDFORGE_MODEL when both set
    if let (Ok(prov), Ok(model)) = (
        std::env::var("CARDFORGE_LLM_PROVIDER"),
        std::env::var("CARDFORGE_MODEL"),
    ) {
        if !prov.is_empty() && !model.is_empty() {
            return create_provider(&prov, &model);
        }
    }

    // Prefer OpenAI explicitly when an OpenAI API key is present, so users
    // with multiple provider keys get a predictable default.
    if let Ok(openai_key) = std::env::var("OPENAI_API_KEY") {
        if !openai_key.is_empty() {
            let model = config.model.as_deref().unwrap_or("gpt-4o-mini");
            return create_provider("openai", model);
        }
    }

    let (llm_provider, _embedding) =
        ProviderFactory::from_env().map_err(|e| CardforgeError::ProviderNotConfigured {
            provider: "auto".to_string(),
            hint: format!(
                "No LLM provider could be auto-detected from environment.\n\
                Set OPENAI_API_KEY, ANTHROPIC_API_KEY, or configure a provider.\n\
                Error: {}",
                e
            ),
        })?;

    Ok(llm_provider)
}
