//! Input resolution: normalise a user-supplied path or URL to source text.
//!
//! Text inputs are small enough to hold in memory, so URLs download straight
//! into a `String` — no temp files. Local files are accepted only with text
//! extensions (`.txt`, `.md`); PDF extraction belongs to an external
//! collaborator, so `.pdf` is rejected with a pointer instead of silently
//! producing garbage.

use crate::config::AnalysisConfig;
use crate::error::CardforgeError;
use crate::pipeline::clean::char_len;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Check if the input string looks like a URL.
pub fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Extensions accepted for local file inputs.
const TEXT_EXTENSIONS: &[&str] = &["txt", "md", "markdown"];

/// Resolve the input string to source text.
///
/// If the input is a URL, download its body. If it is a local file path,
/// validate the extension and read it.
pub async fn resolve_input(input: &str, timeout_secs: u64) -> Result<String, CardforgeError> {
    if is_url(input) {
        download_url(input, timeout_secs).await
    } else {
        read_local(input)
    }
}

/// Read a local text file, validating existence, permission, and extension.
fn read_local(path_str: &str) -> Result<String, CardforgeError> {
    let path = PathBuf::from(path_str);

    if !path.exists() {
        return Err(CardforgeError::FileNotFound { path });
    }

    check_extension(&path)?;

    match std::fs::read_to_string(&path) {
        Ok(text) => {
            debug!("Resolved local file: {} ({} bytes)", path.display(), text.len());
            Ok(text)
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            Err(CardforgeError::PermissionDenied { path })
        }
        Err(e) => Err(CardforgeError::Internal(format!(
            "Failed to read '{}': {e}",
            path.display()
        ))),
    }
}

fn check_extension(path: &Path) -> Result<(), CardforgeError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    if TEXT_EXTENSIONS.contains(&extension.as_str()) {
        return Ok(());
    }

    Err(CardforgeError::UnsupportedFileType {
        path: path.to_path_buf(),
        extension,
    })
}

/// Download a URL body as text.
async fn download_url(url: &str, timeout_secs: u64) -> Result<String, CardforgeError> {
    info!("Downloading text from: {}", url);

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| CardforgeError::DownloadFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    let response = client.get(url).send().await.map_err(|e| {
        if e.is_timeout() {
            CardforgeError::DownloadTimeout {
                url: url.to_string(),
                secs: timeout_secs,
            }
        } else {
            CardforgeError::DownloadFailed {
                url: url.to_string(),
                reason: e.to_string(),
            }
        }
    })?;

    if !response.status().is_success() {
        return Err(CardforgeError::DownloadFailed {
            url: url.to_string(),
            reason: format!("HTTP {}", response.status()),
        });
    }

    let text = response
        .text()
        .await
        .map_err(|e| CardforgeError::DownloadFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    info!("Downloaded {} bytes", text.len());
    Ok(text)
}

/// Validate the input-text preconditions before segmentation runs.
///
/// Empty or whitespace-only text is a rejected precondition; too-short and
/// too-long inputs are rejected against the configured bounds. A valid text
/// that later segments to zero paragraphs is NOT an error here — that case
/// is a recoverable empty result the caller branches on.
pub fn validate_text(text: &str, config: &AnalysisConfig) -> Result<(), CardforgeError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(CardforgeError::EmptyInput);
    }

    let len = char_len(trimmed);
    if len < config.min_paragraph_len {
        return Err(CardforgeError::TextTooShort {
            min: config.min_paragraph_len,
            got: len,
        });
    }
    if len > config.max_input_len() {
        return Err(CardforgeError::TextTooLong {
            max: config.max_input_len(),
            got: len,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_is_url() {
        assert!(is_url("https://example.com/post.md"));
        assert!(is_url("http://example.com/post.txt"));
        assert!(!is_url("/tmp/post.md"));
        assert!(!is_url("post.md"));
        assert!(!is_url(""));
    }

    #[test]
    fn rejects_pdf_extension() {
        let err = check_extension(Path::new("report.pdf")).unwrap_err();
        assert!(matches!(err, CardforgeError::UnsupportedFileType { extension, .. } if extension == "pdf"));
    }

    #[test]
    fn accepts_text_extensions() {
        assert!(check_extension(Path::new("notes.txt")).is_ok());
        assert!(check_extension(Path::new("notes.md")).is_ok());
        assert!(check_extension(Path::new("notes.MARKDOWN")).is_ok());
    }

    #[test]
    fn reads_local_markdown_file() {
        let mut file = tempfile::Builder::new().suffix(".md").tempfile().unwrap();
        write!(file, "# 标题\n\n这是一段用于测试的正文内容。").unwrap();
        let text = read_local(file.path().to_str().unwrap()).unwrap();
        assert!(text.contains("正文内容"));
    }

    #[test]
    fn missing_file_is_reported() {
        let err = read_local("/nonexistent/never.md").unwrap_err();
        assert!(matches!(err, CardforgeError::FileNotFound { .. }));
    }

    #[test]
    fn validate_rejects_empty_and_bounds() {
        let config = AnalysisConfig::default();
        assert!(matches!(
            validate_text("", &config),
            Err(CardforgeError::EmptyInput)
        ));
        assert!(matches!(
            validate_text("   \n ", &config),
            Err(CardforgeError::EmptyInput)
        ));
        assert!(matches!(
            validate_text("太短", &config),
            Err(CardforgeError::TextTooShort { .. })
        ));
        let long = "字".repeat(4001);
        assert!(matches!(
            validate_text(&long, &config),
            Err(CardforgeError::TextTooLong { .. })
        ));
        let ok = "这是一段长度刚好合适的输入文本内容没有问题。";
        assert!(validate_text(ok, &config).is_ok());
    }
}
