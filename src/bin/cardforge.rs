//! CLI binary for cardforge.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `AnalysisConfig` and prints results.

use anyhow::{Context, Result};
use cardforge::pipeline::export;
use cardforge::{
    analyze, analyze_text, AnalysisConfig, AnalysisOutput, ExportFormat, LanguageStyle,
};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Analyze a file, print Markdown to stdout
  cardforge notes.md

  # Analyze literal text
  cardforge --text "今天去海边看日落，风景美得不像话……"

  # Write to a file
  cardforge notes.md -o cards.md

  # JSON export with metadata envelope
  cardforge notes.md --format json -o cards.json

  # Pick a voice and a model
  cardforge --style literary --model gpt-4o --provider openai notes.md

  # Analyze a URL
  cardforge https://example.com/post.md -o cards.md

  # Full structured output (paragraphs, titles, stats)
  cardforge --json notes.md > analysis.json

STYLES:
  xiaohongshu   小红书种草体 (default) — emoji-rich, enthusiastic
  minimal       极简风格 — short, calm, to the point
  scientific    科普风格 — precise, explanatory
  professional  专业商务 — formal register
  casual        轻松随意 — conversational
  literary      文艺风格 — lyrical, imagery-heavy

ENVIRONMENT VARIABLES:
  OPENAI_API_KEY          OpenAI API key
  ANTHROPIC_API_KEY       Anthropic API key
  GEMINI_API_KEY          Google Gemini API key
  CARDFORGE_LLM_PROVIDER  Override provider (openai, anthropic, gemini, ollama)
  CARDFORGE_MODEL         Override model ID

SETUP:
  1. Set API key:  export OPENAI_API_KEY=sk-...
  2. Analyze:      cardforge notes.md -o cards.md
"#;

/// Turn long-form text into styled social-media cards using LLMs.
#[derive(Parser, Debug)]
#[command(
    name = "cardforge",
    version,
    about = "Turn long-form text into styled social-media cards using LLMs",
    long_about = "Analyze long-form text (literal, local .txt/.md file, or URL), restyle it with \
an LLM in a chosen voice, and export a deck of 3-6 cards as Markdown or JSON. Supports OpenAI, \
Anthropic, Google Gemini, and any OpenAI-compatible endpoint (Ollama, vLLM, LiteLLM, etc.).",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Local .txt/.md file path or HTTP/HTTPS URL.
    #[arg(required_unless_present = "text")]
    input: Option<String>,

    /// Analyze this literal text instead of a file or URL.
    #[arg(long, conflicts_with = "input")]
    text: Option<String>,

    /// Write the export to this file instead of stdout.
    #[arg(short, long, env = "CARDFORGE_OUTPUT")]
    output: Option<PathBuf>,

    /// Export format.
    #[arg(long, env = "CARDFORGE_FORMAT", value_enum, default_value = "markdown")]
    format: FormatArg,

    /// Language style: xiaohongshu, minimal, scientific, professional, casual, literary.
    #[arg(long, env = "CARDFORGE_STYLE", value_enum, default_value = "xiaohongshu")]
    style: StyleArg,

    /// LLM model ID (e.g. gpt-4o-mini, gpt-4o, claude-sonnet-4-20250514).
    #[arg(
        long,
        env = "CARDFORGE_MODEL",
        long_help = "LLM model to use. Default: gpt-4o-mini.\n\
          The two analysis calls are small; cheap models work well here."
    )]
    model: Option<String>,

    /// LLM provider: openai, anthropic, gemini, ollama, azure.
    #[arg(
        long,
        env = "CARDFORGE_PROVIDER",
        long_help = "LLM provider. Auto-detected from API key env vars if not set.\n\
          Supported: openai, anthropic, gemini, azure, ollama, or any OpenAI-compatible URL."
    )]
    provider: Option<String>,

    /// Path to a text file containing a custom analysis system prompt.
    #[arg(long, env = "CARDFORGE_SYSTEM_PROMPT")]
    system_prompt: Option<PathBuf>,

    /// Max LLM output tokens per call.
    #[arg(long, env = "CARDFORGE_MAX_TOKENS", default_value_t = 4096)]
    max_tokens: usize,

    /// LLM temperature (0.0–2.0).
    #[arg(long, env = "CARDFORGE_TEMPERATURE", default_value_t = 0.7)]
    temperature: f32,

    /// Retries per LLM call on failure.
    #[arg(long, env = "CARDFORGE_MAX_RETRIES", default_value_t = 3)]
    max_retries: u32,

    /// Output the full structured AnalysisOutput as JSON instead of an export.
    #[arg(long, env = "CARDFORGE_JSON")]
    json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "CARDFORGE_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "CARDFORGE_QUIET")]
    quiet: bool,

    /// HTTP download timeout in seconds.
    #[arg(long, env = "CARDFORGE_DOWNLOAD_TIMEOUT", default_value_t = 120)]
    download_timeout: u64,
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum FormatArg {
    Markdown,
    Json,
}

impl From<FormatArg> for ExportFormat {
    fn from(v: FormatArg) -> Self {
        match v {
            FormatArg::Markdown => ExportFormat::Markdown,
            FormatArg::Json => ExportFormat::Json,
        }
    }
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum StyleArg {
    Xiaohongshu,
    Minimal,
    Scientific,
    Professional,
    Casual,
    Literary,
}

impl From<StyleArg> for LanguageStyle {
    fn from(v: StyleArg) -> Self {
        match v {
            StyleArg::Xiaohongshu => LanguageStyle::Xiaohongshu,
            StyleArg::Minimal => LanguageStyle::Minimal,
            StyleArg::Scientific => LanguageStyle::Scientific,
            StyleArg::Professional => LanguageStyle::Professional,
            StyleArg::Casual => LanguageStyle::Casual,
            StyleArg::Literary => LanguageStyle::Literary,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let config = build_config(&cli).await?;
    let format: ExportFormat = cli.format.clone().into();

    // ── Run analysis ─────────────────────────────────────────────────────
    let output: AnalysisOutput = if let Some(ref text) = cli.text {
        analyze_text(text, &config).await.context("Analysis failed")?
    } else {
        // Clap guarantees `input` is present when `text` is absent.
        let input = cli.input.as_deref().unwrap_or_default();
        analyze(input, &config).await.context("Analysis failed")?
    };

    // ── Emit results ─────────────────────────────────────────────────────
    let rendered = if cli.json {
        serde_json::to_string_pretty(&output).context("Failed to serialise output")?
    } else {
        export::render(format, output.selected_title(), &output.cards, &output.metadata)
            .context("Export rendering failed")?
    };

    if let Some(ref output_path) = cli.output {
        tokio::fs::write(output_path, &rendered)
            .await
            .with_context(|| format!("Failed to write {}", output_path.display()))?;
        if !cli.quiet {
            eprintln!(
                "{}  {} cards  →  {}",
                green("✔"),
                bold(&output.stats.card_count.to_string()),
                bold(&output_path.display().to_string()),
            );
        }
    } else {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(rendered.as_bytes())
            .context("Failed to write to stdout")?;
        // Ensure a trailing newline on stdout.
        if !rendered.ends_with('\n') {
            handle.write_all(b"\n").ok();
        }
    }

    // ── Summary ──────────────────────────────────────────────────────────
    if !cli.quiet {
        let s = &output.stats;
        eprintln!(
            "{}  {} paragraphs → {} cards  —  {}ms total ({}ms LLM)",
            cyan("◆"),
            s.paragraph_count,
            s.card_count,
            s.total_duration_ms,
            s.llm_duration_ms,
        );
        eprintln!(
            "   {} tokens in  /  {} tokens out{}",
            dim(&s.input_tokens.to_string()),
            dim(&s.output_tokens.to_string()),
            if s.llm_retries > 0 {
                format!("  ({} retries)", s.llm_retries)
            } else {
                String::new()
            },
        );
    }

    Ok(())
}

/// Map CLI args to `AnalysisConfig`.
async fn build_config(cli: &Cli) -> Result<AnalysisConfig> {
    let mut builder = AnalysisConfig::builder()
        .style(cli.style.clone().into())
        .max_tokens(cli.max_tokens)
        .temperature(cli.temperature)
        .max_retries(cli.max_retries)
        .download_timeout_secs(cli.download_timeout);

    if let Some(ref path) = cli.system_prompt {
        let prompt = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read system prompt from {:?}", path))?;
        builder = builder.system_prompt(prompt);
    }
    if let Some(ref model) = cli.model {
        builder = builder.model(model);
    }
    if let Some(ref provider) = cli.provider {
        builder = builder.provider_name(provider);
    }

    builder.build().context("Invalid configuration")
}
