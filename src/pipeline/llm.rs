//! LLM interaction: build prompts, call the provider, parse JSON replies.
//!
//! This module is intentionally thin — all prompt engineering lives in
//! [`crate::prompts`] so it can be changed without touching retry or
//! error-handling logic here.
//!
//! ## Retry Strategy
//!
//! HTTP 429 / 503 errors from LLM APIs are transient and frequent. So are
//! occasional off-contract replies (prose instead of JSON). Both are retried
//! with exponential backoff (`retry_backoff_ms * 2^attempt`): with 500 ms
//! base and 3 retries the wait sequence is 500 ms → 1 s → 2 s.

use crate::config::AnalysisConfig;
use crate::error::CardforgeError;
use crate::prompts::{
    build_analysis_prompt, build_titles_prompt, ANALYSIS_SYSTEM_PROMPT, TITLES_SYSTEM_PROMPT,
};
use crate::types::{Paragraph, ProcessedParagraph, TitleOptions};
use edgequake_llm::{ChatMessage, CompletionOptions, LLMProvider};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Instant;
use tokio::time::{sleep, Duration};
use tracing::{debug, warn};

/// A completed LLM call: the parsed value plus accounting.
#[derive(Debug, Clone)]
pub struct LlmCall<T> {
    pub value: T,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub retries: u32,
}

/// Wire shape of the content-analysis reply.
#[derive(Debug, Deserialize)]
struct AnalysisReply {
    #[serde(default)]
    paragraphs: Vec<ProcessedParagraph>,
}

/// Run the content-analysis call: enrich each source paragraph with
/// summary, key points, emoji, tags, and a style preset.
///
/// Ids and order are re-anchored after parsing — the model is asked to echo
/// the input ids, but replies occasionally drop or mangle them, and the
/// downstream normalizer depends on traceable ids and contiguous order.
pub async fn enrich(
    provider: &Arc<dyn LLMProvider>,
    paragraphs: &[Paragraph],
    config: &AnalysisConfig,
) -> Result<LlmCall<Vec<ProcessedParagraph>>, CardforgeError> {
    let system = config
        .system_prompt
        .as_deref()
        .unwrap_or(ANALYSIS_SYSTEM_PROMPT);
    let prompt = build_analysis_prompt(paragraphs, config.style);

    let call: LlmCall<AnalysisReply> =
        chat_json(provider, system, prompt, config, "content analysis").await?;

    let mut enriched = call.value.paragraphs;
    for (i, pp) in enriched.iter_mut().enumerate() {
        if pp.id.trim().is_empty() {
            pp.id = paragraphs
                .get(i)
                .map(|p| p.id.clone())
                .unwrap_or_else(|| format!("p{}", i + 1));
        }
        pp.order = i;
    }

    Ok(LlmCall {
        value: enriched,
        input_tokens: call.input_tokens,
        output_tokens: call.output_tokens,
        retries: call.retries,
    })
}

/// Run the title-generation call.
pub async fn generate_titles(
    provider: &Arc<dyn LLMProvider>,
    text: &str,
    config: &AnalysisConfig,
) -> Result<LlmCall<TitleOptions>, CardforgeError> {
    let prompt = build_titles_prompt(text, config.style);
    let mut call: LlmCall<TitleOptions> =
        chat_json(provider, TITLES_SYSTEM_PROMPT, prompt, config, "title generation").await?;

    // A selected index past the end means the reply is unusable as-is.
    if call.value.selected_index >= call.value.titles.len() {
        call.value.selected_index = 0;
    }
    Ok(call)
}

/// Call the provider and parse the reply as JSON, retrying transient
/// failures and off-contract replies alike.
async fn chat_json<T: DeserializeOwned>(
    provider: &Arc<dyn LLMProvider>,
    system: &str,
    prompt: String,
    config: &AnalysisConfig,
    what: &str,
) -> Result<LlmCall<T>, CardforgeError> {
    let start = Instant::now();
    let messages = vec![ChatMessage::system(system), ChatMessage::user(&prompt)];
    let options = build_options(config);

    let mut last_err: Option<String> = None;
    let mut last_was_parse = false;

    for attempt in 0..=config.max_retries {
        if attempt > 0 {
            let backoff = config.retry_backoff_ms * 2u64.pow(attempt - 1);
            warn!(
                "{}: retry {}/{} after {}ms",
                what, attempt, config.max_retries, backoff
            );
            sleep(Duration::from_millis(backoff)).await;
        }

        match provider.chat(&messages, Some(&options)).await {
            Ok(response) => {
                debug!(
                    "{}: {} input tokens, {} output tokens, {:?}",
                    what,
                    response.prompt_tokens,
                    response.completion_tokens,
                    start.elapsed()
                );

                match parse_json_reply::<T>(&response.content) {
                    Ok(value) => {
                        return Ok(LlmCall {
                            value,
                            input_tokens: response.prompt_tokens as u64,
                            output_tokens: response.completion_tokens as u64,
                            retries: attempt,
                        });
                    }
                    Err(detail) => {
                        warn!("{}: attempt {} returned unparseable JSON — {}", what, attempt + 1, detail);
                        last_err = Some(detail);
                        last_was_parse = true;
                    }
                }
            }
            Err(e) => {
                let err_msg = format!("{e}");
                warn!("{}: attempt {} failed — {}", what, attempt + 1, err_msg);
                last_err = Some(err_msg);
                last_was_parse = false;
            }
        }
    }

    let message = last_err.unwrap_or_else(|| "Unknown error".to_string());
    if last_was_parse {
        Err(CardforgeError::MalformedResponse {
            what: what.to_string(),
            detail: message,
        })
    } else {
        Err(CardforgeError::LlmApiError {
            retries: config.max_retries,
            message,
        })
    }
}

/// Build `CompletionOptions` from the analysis config.
fn build_options(config: &AnalysisConfig) -> CompletionOptions {
    CompletionOptions {
        temperature: Some(config.temperature),
        max_tokens: Some(config.max_tokens),
        ..Default::default()
    }
}

// Models sometimes wrap the JSON in fences despite the prompt saying not to.
static RE_OUTER_FENCES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^```(?:json)?\s*\n(.*)\n```\s*$").unwrap());

/// Strip an outer fence block (if any) and parse the remainder as JSON.
fn parse_json_reply<T: DeserializeOwned>(content: &str) -> Result<T, String> {
    let trimmed = content.trim();
    let body = match RE_OUTER_FENCES.captures(trimmed) {
        Some(caps) => caps[1].trim().to_string(),
        None => trimmed.to_string(),
    };
    serde_json::from_str(&body).map_err(|e| e.to_string())
}
