pub mod providers;

use crate::query::SearchQuery;
use serde::Serialize;
use serde_json::Value;

/// Search provider abstraction - different providers can be plugged in
#[async_trait::async_trait]
pub trait SearchProvider: Send + Sync {
    /// Run a query and return the items in relevance order
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchItem>, SearchError>;
}

/// Individual search result
#[derive(Debug, Clone, PartialEq)]
pub struct SearchItem {
    /// Page title
    pub title: String,
    /// Page URL
    pub link: String,
    /// Short description of the page, when the engine provides one
    pub snippet: Option<String>,
    /// The item object exactly as the API returned it
    raw: Value,
}

impl SearchItem {
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        snippet: Option<impl Into<String>>,
    ) -> Self {
        let title = title.into();
        let link = link.into();
        let snippet = snippet.map(Into::into);

        let mut raw = serde_json::Map::new();
        raw.insert("title".to_string(), Value::String(title.clone()));
        raw.insert("link".to_string(), Value::String(link.clone()));
        if let Some(snippet) = &snippet {
            raw.insert("snippet".to_string(), Value::String(snippet.clone()));
        }

        Self {
            title,
            link,
            snippet,
            raw: Value::Object(raw),
        }
    }

    /// Build an item from one element of the API's `items` array.
    ///
    /// Missing `title`/`link` become empty strings; every other key is kept in
    /// `raw` in the order the API sent it.
    pub fn from_value(raw: Value) -> Self {
        let title = raw["title"].as_str().unwrap_or("").to_string();
        let link = raw["link"].as_str().unwrap_or("").to_string();
        let snippet = raw["snippet"].as_str().map(str::to_string);

        Self {
            title,
            link,
            snippet,
            raw,
        }
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }
}

impl Serialize for SearchItem {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}

/// Search-related errors
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    #[error("Invalid API key")]
    InvalidApiKey,
}
