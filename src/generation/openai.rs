//! Chat-completions backed text generator.

use super::TextGenerator;
use crate::config::LlmSettings;
use crate::error::{Result, VidnotesError};
use crate::llm::create_client;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Text generator for any OpenAI-compatible chat completions endpoint.
pub struct OpenAIGenerator {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    temperature: Option<f32>,
}

impl OpenAIGenerator {
    /// Create a generator from LLM settings and an API key.
    pub fn with_config(settings: &LlmSettings, api_key: &str) -> Result<Self> {
        Ok(Self {
            client: create_client(settings, api_key)?,
            model: settings.model.clone(),
            temperature: settings.temperature,
        })
    }
}

#[async_trait]
impl TextGenerator for OpenAIGenerator {
    #[instrument(skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
    async fn complete(&self, prompt: &str) -> Result<String> {
        let message = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()
            .map_err(|e| VidnotesError::GenerationFailed(e.to_string()))?;

        let messages: Vec<ChatCompletionRequestMessage> = vec![message.into()];

        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(&self.model).messages(messages);
        if let Some(temperature) = self.temperature {
            args.temperature(temperature);
        }
        let request = args
            .build()
            .map_err(|e| VidnotesError::GenerationFailed(e.to_string()))?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            VidnotesError::GenerationFailed(format!("Chat API error: {}", e))
        })?;

        let text = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| VidnotesError::GenerationFailed("Empty response from model".to_string()))?
            .clone();

        debug!("Model returned {} characters", text.len());
        Ok(text)
    }

    fn model(&self) -> &str {
        &self.model
    }
}
