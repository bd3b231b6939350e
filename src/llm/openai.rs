use crate::config::SynthesisSettings;
use crate::llm::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use crate::llm::{ChatError, ChatProvider};
use reqwest::Client;

/// OpenAI-compatible chat completion client
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    api_base: String,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(settings: &SynthesisSettings) -> Self {
        Self {
            client: Client::new(),
            api_base: settings.api_base.trim_end_matches('/').to_string(),
            api_key: settings.api_key.trim().to_string(),
            model: settings.model.clone(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait::async_trait]
impl ChatProvider for OpenAiClient {
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<Option<String>, ChatError> {
        let url = format!("{}/v1/chat/completions", self.api_base);

        tracing::debug!(
            api_base = %self.api_base,
            model = %self.model,
            message_count = messages.len(),
            "openai chat completion request"
        );

        let request_body = ChatCompletionRequest {
            model: self.model.clone(),
            messages,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            tracing::warn!(
                status = %status,
                error = %crate::logging::redact_secrets(&error_text),
                "openai api returned error"
            );

            return Err(ChatError::Api(format!(
                "OpenAI API error: {}",
                status.canonical_reason().unwrap_or(status.as_str())
            )));
        }

        let body = response.text().await?;
        let parsed: ChatCompletionResponse = serde_json::from_str(&body)?;

        let content = parsed.first_content().map(str::to_string);
        tracing::debug!(has_content = content.is_some(), "openai chat completion done");

        Ok(content)
    }
}
