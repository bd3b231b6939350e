use crate::config::SearchSettings;
use crate::query::{encode_component, SearchQuery};
use crate::search::{SearchError, SearchItem, SearchProvider};
use serde_json::Value;

/// Google Custom Search JSON API provider
///
/// Needs an API key and a programmable search engine id (`cx`).
/// Documentation: https://developers.google.com/custom-search/v1/overview
pub struct GoogleSearchProvider {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
    cse_id: String,
}

impl GoogleSearchProvider {
    pub fn new(settings: &SearchSettings) -> Self {
        Self::with_client(reqwest::Client::new(), settings)
    }

    pub fn with_client(client: reqwest::Client, settings: &SearchSettings) -> Self {
        if settings.api_key.trim().is_empty() {
            tracing::warn!("search api_key not set, web searches will fail");
        }

        Self {
            client,
            api_base: settings.api_base.clone(),
            api_key: settings.api_key.trim().to_string(),
            cse_id: settings.cse_id.trim().to_string(),
        }
    }

    /// Full request URL: `q`, `key` and `cx` as query parameters
    pub fn request_url(&self, query: &SearchQuery) -> String {
        format!(
            "{}?q={}&key={}&cx={}",
            self.api_base,
            query.encoded(),
            encode_component(&self.api_key),
            encode_component(&self.cse_id)
        )
    }

    /// Interpret a response body. An `error` envelope wins over everything else.
    fn parse_envelope(status: reqwest::StatusCode, body: &str) -> Result<Vec<SearchItem>, SearchError> {
        let json: Value = serde_json::from_str(body)?;

        if let Some(error) = json.get("error") {
            let message = error["message"]
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| error.to_string());
            return Err(SearchError::Api(message));
        }

        if !status.is_success() {
            return Err(SearchError::Api(format!("HTTP {}", status)));
        }

        let items = match json.get("items") {
            Some(Value::Array(items)) => items.iter().cloned().map(SearchItem::from_value).collect(),
            _ => Vec::new(),
        };

        Ok(items)
    }
}

#[async_trait::async_trait]
impl SearchProvider for GoogleSearchProvider {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchItem>, SearchError> {
        if self.api_key.is_empty() {
            return Err(SearchError::InvalidApiKey);
        }

        tracing::debug!(query = %query, "performing google search");

        let response = self.client.get(self.request_url(query)).send().await?;
        let status = response.status();
        let body = response.text().await?;

        let items = Self::parse_envelope(status, &body).inspect_err(|e| {
            tracing::warn!(
                status = %status,
                error = %crate::logging::redact_secrets(&e.to_string()),
                "google search failed"
            );
        })?;

        tracing::debug!(
            query = %query,
            result_count = items.len(),
            "google search completed"
        );

        Ok(items)
    }
}
