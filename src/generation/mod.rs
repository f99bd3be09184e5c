//! Text generation: notes, fact-checks and follow-up answers.
//!
//! Every request goes through a [`TextGenerator`]. [`ContentGenerator`] glues a
//! prompt prefix to a body; [`QueryResponder`] renders the question template.

mod openai;

pub use openai::OpenAIGenerator;

use crate::config::Prompts;
use crate::error::{Result, VidnotesError};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Trait for generative-text providers.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Submit a single prompt and return the generated text.
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Model identifier used for every request.
    fn model(&self) -> &str;
}

fn generation_failed(e: VidnotesError) -> VidnotesError {
    match e {
        VidnotesError::GenerationFailed(msg) => VidnotesError::GenerationFailed(msg),
        other => VidnotesError::GenerationFailed(other.to_string()),
    }
}

/// Generates text from a fixed prompt prefix and a body.
#[derive(Clone)]
pub struct ContentGenerator {
    generator: Arc<dyn TextGenerator>,
}

impl ContentGenerator {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Submit `prefix + body` with no separator and return the output verbatim.
    #[instrument(skip_all, fields(model = self.generator.model(), body_len = body.len()))]
    pub async fn generate(&self, prefix: &str, body: &str) -> Result<String> {
        let prompt = format!("{}{}", prefix, body);
        let text = self
            .generator
            .complete(&prompt)
            .await
            .map_err(generation_failed)?;
        debug!("Generated {} characters", text.len());
        Ok(text)
    }
}

/// Answers free-form questions about a video.
#[derive(Clone)]
pub struct QueryResponder {
    generator: Arc<dyn TextGenerator>,
    prompts: Prompts,
}

impl QueryResponder {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            prompts: Prompts::default(),
        }
    }

    /// Set custom prompts (with user-defined variables).
    pub fn with_prompts(mut self, prompts: Prompts) -> Self {
        self.prompts = prompts;
        self
    }

    /// Answer a question using the transcript as context.
    ///
    /// The model is told to fall back to general knowledge when the video does
    /// not cover the question.
    #[instrument(skip(self, transcript), fields(transcript_len = transcript.len()))]
    pub async fn answer(&self, transcript: &str, question: &str) -> Result<String> {
        let prompt = self.prompts.query_prompt(transcript, question);
        self.generator
            .complete(&prompt)
            .await
            .map_err(generation_failed)
    }
}
