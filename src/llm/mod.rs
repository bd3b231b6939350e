pub mod openai;
pub mod types;

use types::ChatMessage;

/// Chat-completion backend used by the answer stage
#[async_trait::async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send the messages and return the first choice's content, if any
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<Option<String>, ChatError>;
}

/// Chat-completion errors
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(#[from] serde_json::Error),
}
