//! Prompt template loading for the answer stage.
//!
//! A template is a YAML document with two string fields:
//!
//! ```yaml
//! system: You are a research assistant...
//! user: Answer the question using the results below.
//! ```
//!
//! It is read again for every submission so edits take effect immediately.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// System and user prompt text
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PromptTemplate {
    pub system: String,
    pub user: String,
}

impl PromptTemplate {
    pub fn parse(text: &str) -> Result<Self, PromptLoadError> {
        serde_yaml::from_str(text).map_err(PromptLoadError::Parse)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PromptLoadError {
    #[error("Failed to read prompt template {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to fetch prompt template {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("Malformed prompt template: {0}")]
    Parse(#[source] serde_yaml::Error),
}

/// Where the template lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptSource {
    File(PathBuf),
    Url(String),
}

impl PromptSource {
    /// `http://` and `https://` locations are fetched, anything else is a path
    pub fn parse(location: &str) -> Self {
        let location = location.trim();
        if location.starts_with("http://") || location.starts_with("https://") {
            Self::Url(location.to_string())
        } else {
            Self::File(PathBuf::from(crate::logging::expand_tilde(location)))
        }
    }

    /// Anchor a relative file path at `base_dir`; URLs and absolute paths are unchanged.
    pub fn relative_to(self, base_dir: &Path) -> Self {
        match self {
            Self::File(path) if path.is_relative() => Self::File(base_dir.join(path)),
            other => other,
        }
    }

    pub async fn load(&self, client: &reqwest::Client) -> Result<PromptTemplate, PromptLoadError> {
        let text = match self {
            Self::File(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(|source| PromptLoadError::Read {
                    path: path.clone(),
                    source,
                })?,
            Self::Url(url) => {
                let fetch_error = |reason: String| PromptLoadError::Fetch {
                    url: url.clone(),
                    reason,
                };

                let response = client
                    .get(url)
                    .send()
                    .await
                    .map_err(|e| fetch_error(e.to_string()))?;

                if !response.status().is_success() {
                    return Err(fetch_error(format!("HTTP {}", response.status())));
                }

                response.text().await.map_err(|e| fetch_error(e.to_string()))?
            }
        };

        PromptTemplate::parse(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_template() {
        let template = PromptTemplate::parse("system: be brief\nuser: |\n  Answer this.\n").unwrap();
        assert_eq!(template.system, "be brief");
        assert_eq!(template.user, "Answer this.\n");
    }

    #[test]
    fn test_missing_field_is_parse_error() {
        let err = PromptTemplate::parse("system: only this").unwrap_err();
        assert!(matches!(err, PromptLoadError::Parse(_)));
    }

    #[test]
    fn test_source_detection() {
        assert_eq!(
            PromptSource::parse("https://example.com/p.yaml"),
            PromptSource::Url("https://example.com/p.yaml".to_string())
        );
        assert_eq!(
            PromptSource::parse(" prompts/answer.yaml "),
            PromptSource::File(PathBuf::from("prompts/answer.yaml"))
        );
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("answer.yaml");
        std::fs::write(&path, "system: s\nuser: u\n").unwrap();

        let template = PromptSource::File(path).load(&reqwest::Client::new()).await.unwrap();
        assert_eq!(template, PromptTemplate { system: "s".into(), user: "u".into() });
    }

    #[tokio::test]
    async fn test_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = PromptSource::File(dir.path().join("nope.yaml"));
        let err = source.load(&reqwest::Client::new()).await.unwrap_err();
        assert!(matches!(err, PromptLoadError::Read { .. }));
    }
}
