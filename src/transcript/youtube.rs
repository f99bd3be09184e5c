//! YouTube caption provider.

use super::{CaptionSegment, TranscriptProvider};
use crate::config::TranscriptSettings;
use crate::error::{Result, VidnotesError};
use async_trait::async_trait;
use tracing::{debug, instrument};
use yt_transcript_rs::api::YouTubeTranscriptApi;

/// Fetches captions straight from YouTube.
pub struct YoutubeTranscriptProvider {
    api: YouTubeTranscriptApi,
    languages: Vec<String>,
    preserve_formatting: bool,
}

impl YoutubeTranscriptProvider {
    /// Create a provider with English captions and no formatting.
    pub fn new() -> Result<Self> {
        Self::with_settings(&TranscriptSettings::default())
    }

    /// Create a provider from transcript settings.
    pub fn with_settings(settings: &TranscriptSettings) -> Result<Self> {
        let api = YouTubeTranscriptApi::new(None, None, None).map_err(|e| {
            VidnotesError::Config(format!("Failed to create transcript client: {}", e))
        })?;

        Ok(Self {
            api,
            languages: settings.languages.clone(),
            preserve_formatting: settings.preserve_formatting,
        })
    }
}

#[async_trait]
impl TranscriptProvider for YoutubeTranscriptProvider {
    #[instrument(skip(self))]
    async fn fetch_segments(&self, video_id: &str) -> Result<Vec<CaptionSegment>> {
        let languages: Vec<&str> = self.languages.iter().map(String::as_str).collect();

        let transcript = self
            .api
            .fetch_transcript(video_id, &languages, self.preserve_formatting)
            .await
            .map_err(|e| VidnotesError::TranscriptUnavailable(e.to_string()))?;

        debug!(
            "Fetched {} captions in {} ({}, auto-generated: {})",
            transcript.snippets.len(),
            transcript.language,
            transcript.language_code,
            transcript.is_generated
        );

        Ok(transcript
            .snippets
            .into_iter()
            .map(|s| CaptionSegment {
                text: s.text,
                start: s.start,
                duration: s.duration,
            })
            .collect())
    }
}
