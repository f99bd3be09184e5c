//! Stub collaborators for tests.

use crate::error::{Result, VidnotesError};
use crate::generation::TextGenerator;
use crate::transcript::{CaptionSegment, TranscriptProvider};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Transcript provider returning canned segments and recording requested ids.
pub struct StubTranscripts {
    result: std::result::Result<Vec<CaptionSegment>, String>,
    requested: Mutex<Vec<String>>,
}

impl StubTranscripts {
    pub fn with_texts(texts: &[&str]) -> Self {
        let segments = texts
            .iter()
            .enumerate()
            .map(|(i, text)| CaptionSegment::new(*text, i as f64 * 2.0, 2.0))
            .collect();
        Self {
            result: Ok(segments),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(message.to_string()),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl TranscriptProvider for StubTranscripts {
    async fn fetch_segments(&self, video_id: &str) -> Result<Vec<CaptionSegment>> {
        self.requested.lock().unwrap().push(video_id.to_string());
        self.result
            .clone()
            .map_err(VidnotesError::TranscriptUnavailable)
    }
}

/// Text generator replaying scripted outcomes and capturing every prompt.
pub struct StubGenerator {
    replies: Mutex<VecDeque<std::result::Result<String, String>>>,
    fallback_error: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl StubGenerator {
    /// Reply with each text in turn.
    pub fn replying(texts: &[&str]) -> Self {
        Self::scripted(texts.iter().map(|t| Ok(t.to_string())).collect())
    }

    pub fn scripted(outcomes: Vec<std::result::Result<String, String>>) -> Self {
        Self {
            replies: Mutex::new(outcomes.into()),
            fallback_error: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Fail every request with the same message.
    pub fn failing(message: &str) -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            fallback_error: Some(message.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let next = self.replies.lock().unwrap().pop_front();
        match next {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(VidnotesError::GenerationFailed(message)),
            None => Err(VidnotesError::GenerationFailed(
                self.fallback_error
                    .clone()
                    .unwrap_or_else(|| "no scripted reply left".to_string()),
            )),
        }
    }

    fn model(&self) -> &str {
        "stub-model"
    }
}
