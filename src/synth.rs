use crate::llm::types::ChatMessage;
use crate::llm::{ChatError, ChatProvider};
use crate::prompt::{PromptLoadError, PromptSource, PromptTemplate};
use crate::render::{OutputRegion, RegionContent, NO_AI_RESPONSE};
use crate::search::SearchItem;
use std::sync::Arc;

/// How many results the model gets to see
pub const CONTEXT_RESULTS: usize = 5;

#[derive(Debug, thiserror::Error)]
pub enum SynthError {
    #[error(transparent)]
    PromptLoad(#[from] PromptLoadError),

    #[error(transparent)]
    Chat(#[from] ChatError),

    #[error("Failed to serialize search results: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Pretty-printed JSON of the first [`CONTEXT_RESULTS`] items, in order
pub fn results_context(items: &[SearchItem]) -> Result<String, serde_json::Error> {
    let top = &items[..items.len().min(CONTEXT_RESULTS)];
    serde_json::to_string_pretty(top)
}

/// The system message and the user message with query and results appended
pub fn build_messages(template: &PromptTemplate, query: &str, context: &str) -> Vec<ChatMessage> {
    let user = format!(
        "{}\n\nQuery: \"{}\"\n\nTop Search Results:\n{}",
        template.user, query, context
    );
    vec![ChatMessage::system(template.system.clone()), ChatMessage::user(user)]
}

/// Second stage: asks a chat model to answer the query from the results.
pub struct AnswerSynthesizer {
    chat: Arc<dyn ChatProvider>,
    prompt: PromptSource,
    http: reqwest::Client,
}

impl AnswerSynthesizer {
    pub fn new(chat: Arc<dyn ChatProvider>, prompt: PromptSource) -> Self {
        Self {
            chat,
            prompt,
            http: reqwest::Client::new(),
        }
    }

    /// Produce the answer text, showing a status in `region` before the model call.
    pub async fn answer(
        &self,
        query: &str,
        items: &[SearchItem],
        region: &dyn OutputRegion,
    ) -> Result<String, SynthError> {
        let template = self.prompt.load(&self.http).await?;
        let context = results_context(items)?;
        let messages = build_messages(&template, query, &context);

        region.replace(RegionContent::generating());

        let content = self.chat.complete(messages).await?;
        Ok(content.unwrap_or_else(|| NO_AI_RESPONSE.to_string()))
    }

    /// Run the stage and render the outcome. Failures end up in `region`, never in the caller.
    pub async fn run(&self, query: &str, items: &[SearchItem], region: &dyn OutputRegion) -> Result<(), SynthError> {
        match self.answer(query, items, region).await {
            Ok(text) => {
                region.replace(RegionContent::answer(text));
                Ok(())
            }
            Err(e) => {
                tracing::warn!(
                    error = %crate::logging::redact_secrets(&e.to_string()),
                    "answer synthesis failed"
                );
                region.replace(RegionContent::answer_failed());
                Err(e)
            }
        }
    }
}
