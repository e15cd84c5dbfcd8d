//! Configuration types for content analysis.
//!
//! All analysis behaviour is controlled through [`AnalysisConfig`], built via
//! its [`AnalysisConfigBuilder`]. Keeping every knob in one struct makes it
//! trivial to share configs across calls and to diff two runs to understand
//! why their outputs differ.

use crate::error::CardforgeError;
use crate::style::LanguageStyle;
use edgequake_llm::LLMProvider;
use std::fmt;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Upper bound on how many paragraphs a single input may expand to; together
/// with `max_paragraph_len` it caps the accepted input size.
pub const MAX_INPUT_PARAGRAPHS: usize = 8;

/// Configuration for a text-to-cards analysis run.
///
/// Built via [`AnalysisConfig::builder()`] or using
/// [`AnalysisConfig::default()`].
///
/// # Example
/// ```rust
/// use cardforge::{AnalysisConfig, LanguageStyle};
///
/// let config = AnalysisConfig::builder()
///     .style(LanguageStyle::Scientific)
///     .max_retries(2)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct AnalysisConfig {
    /// Minimum paragraph length in chars. Default: 20.
    ///
    /// Segmenter output shorter than this is dropped — fragments below 20
    /// chars carry too little content to make a useful card.
    pub min_paragraph_len: usize,

    /// Maximum paragraph length in chars. Default: 500.
    ///
    /// Candidates above this are re-split along sentence boundaries. A single
    /// sentence longer than the cap is still emitted whole; truncating
    /// mid-sentence would corrupt meaning.
    pub max_paragraph_len: usize,

    /// Lower bound of the final card count. Default: 3.
    pub min_cards: usize,

    /// Upper bound of the final card count. Default: 6.
    pub max_cards: usize,

    /// Summary length (chars) above which a card may be split in two during
    /// expansion. Default: 100. Empirically chosen; treat as configuration.
    pub split_threshold: usize,

    /// Tone/voice applied when the LLM restyles the content. Default: xiaohongshu.
    pub style: LanguageStyle,

    /// LLM model identifier, e.g. "gpt-4o-mini", "claude-sonnet-4-20250514".
    /// If None, uses provider default.
    pub model: Option<String>,

    /// LLM provider name (e.g. "openai", "anthropic", "gemini").
    /// If None along with `provider`, auto-detected from the environment.
    pub provider_name: Option<String>,

    /// Pre-constructed LLM provider. Takes precedence over `provider_name`.
    pub provider: Option<Arc<dyn LLMProvider>>,

    /// Sampling temperature for the LLM completion. Default: 0.7.
    ///
    /// Restyling is a creative task; near-zero temperatures produce flat,
    /// repetitive card copy. 0.7 keeps titles and summaries lively without
    /// drifting from the source content.
    pub temperature: f32,

    /// Maximum tokens the LLM may generate per call. Default: 4096.
    pub max_tokens: usize,

    /// Maximum retry attempts on a transient LLM API failure. Default: 3.
    ///
    /// Transient 5xx/timeout errors and occasional off-contract replies are
    /// both retried; permanent errors surface after the retry budget.
    pub max_retries: u32,

    /// Initial retry delay in milliseconds (exponential backoff). Default: 500.
    ///
    /// Doubles after each attempt: 500 ms → 1 s → 2 s.
    pub retry_backoff_ms: u64,

    /// Custom analysis system prompt. If None, uses built-in default.
    pub system_prompt: Option<String>,

    /// Download timeout for URL inputs in seconds. Default: 120.
    pub download_timeout_secs: u64,

    /// Cooperative cancellation token, checked between pipeline stages.
    ///
    /// The core segmenter/normalizer functions are not abort-aware; they
    /// complete in bounded time and the orchestrator checks this token at
    /// stage boundaries only.
    pub cancel: Option<CancellationToken>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_paragraph_len: 20,
            max_paragraph_len: 500,
            min_cards: 3,
            max_cards: 6,
            split_threshold: 100,
            style: LanguageStyle::default(),
            model: None,
            provider_name: None,
            provider: None,
            temperature: 0.7,
            max_tokens: 4096,
            max_retries: 3,
            retry_backoff_ms: 500,
            system_prompt: None,
            download_timeout_secs: 120,
            cancel: None,
        }
    }
}

impl fmt::Debug for AnalysisConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalysisConfig")
            .field("min_paragraph_len", &self.min_paragraph_len)
            .field("max_paragraph_len", &self.max_paragraph_len)
            .field("min_cards", &self.min_cards)
            .field("max_cards", &self.max_cards)
            .field("split_threshold", &self.split_threshold)
            .field("style", &self.style)
            .field("model", &self.model)
            .field("provider_name", &self.provider_name)
            .field("provider", &self.provider.as_ref().map(|_| "<dyn LLMProvider>"))
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("max_retries", &self.max_retries)
            .field("cancellable", &self.cancel.is_some())
            .finish()
    }
}

impl AnalysisConfig {
    /// Create a new builder for `AnalysisConfig`.
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder {
            config: Self::default(),
        }
    }

    /// Maximum accepted input length in chars.
    pub fn max_input_len(&self) -> usize {
        self.max_paragraph_len * MAX_INPUT_PARAGRAPHS
    }
}

/// Builder for [`AnalysisConfig`].
#[derive(Debug)]
pub struct AnalysisConfigBuilder {
    config: AnalysisConfig,
}

impl AnalysisConfigBuilder {
    pub fn min_paragraph_len(mut self, n: usize) -> Self {
        self.config.min_paragraph_len = n.max(1);
        self
    }

    pub fn max_paragraph_len(mut self, n: usize) -> Self {
        self.config.max_paragraph_len = n.max(1);
        self
    }

    pub fn split_threshold(mut self, n: usize) -> Self {
        self.config.split_threshold = n.max(1);
        self
    }

    pub fn style(mut self, style: LanguageStyle) -> Self {
        self.config.style = style;
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = Some(model.into());
        self
    }

    pub fn provider_name(mut self, name: impl Into<String>) -> Self {
        self.config.provider_name = Some(name.into());
        self
    }

    pub fn provider(mut self, provider: Arc<dyn LLMProvider>) -> Self {
        self.config.provider = Some(provider);
        self
    }

    pub fn temperature(mut self, t: f32) -> Self {
        self.config.temperature = t.clamp(0.0, 2.0);
        self
    }

    pub fn max_tokens(mut self, n: usize) -> Self {
        self.config.max_tokens = n;
        self
    }

    pub fn max_retries(mut self, n: u32) -> Self {
        self.config.max_retries = n;
        self
    }

    pub fn retry_backoff_ms(mut self, ms: u64) -> Self {
        self.config.retry_backoff_ms = ms;
        self
    }

    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = Some(prompt.into());
        self
    }

    pub fn download_timeout_secs(mut self, secs: u64) -> Self {
        self.config.download_timeout_secs = secs;
        self
    }

    pub fn cancel_token(mut self, token: CancellationToken) -> Self {
        self.config.cancel = Some(token);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<AnalysisConfig, CardforgeError> {
        let c = &self.config;
        if c.min_paragraph_len >= c.max_paragraph_len {
            return Err(CardforgeError::InvalidConfig(format!(
                "min_paragraph_len ({}) must be < max_paragraph_len ({})",
                c.min_paragraph_len, c.max_paragraph_len
            )));
        }
        if c.min_cards == 0 || c.min_cards > c.max_cards {
            return Err(CardforgeError::InvalidConfig(format!(
                "card bounds must satisfy 1 <= min ({}) <= max ({})",
                c.min_cards, c.max_cards
            )));
        }
        Ok(self.config)
    }
}
