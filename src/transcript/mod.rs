//! Transcript retrieval.
//!
//! A [`TranscriptProvider`] returns caption segments for a video id; the
//! [`TranscriptFetcher`] resolves URLs and flattens segments into one string.

mod youtube;

pub use youtube::YoutubeTranscriptProvider;

use crate::error::{Result, VidnotesError};
use crate::video_id::extract_video_id;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// A single caption line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionSegment {
    /// Caption text.
    pub text: String,
    /// Start time in seconds.
    pub start: f64,
    /// Duration in seconds.
    pub duration: f64,
}

impl CaptionSegment {
    pub fn new(text: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            text: text.into(),
            start,
            duration,
        }
    }
}

/// Trait for caption providers.
#[async_trait]
pub trait TranscriptProvider: Send + Sync {
    /// Fetch caption segments for a video, in caption order.
    async fn fetch_segments(&self, video_id: &str) -> Result<Vec<CaptionSegment>>;
}

/// Join segment texts with single spaces.
pub fn join_segments(segments: &[CaptionSegment]) -> String {
    segments
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Turns a YouTube URL into transcript text.
#[derive(Clone)]
pub struct TranscriptFetcher {
    provider: Arc<dyn TranscriptProvider>,
}

impl TranscriptFetcher {
    pub fn new(provider: Arc<dyn TranscriptProvider>) -> Self {
        Self { provider }
    }

    /// Fetch the full transcript for a URL.
    ///
    /// Fails with `InvalidUrl` before any network call when no video id can be
    /// extracted. Every provider failure is reported as `TranscriptUnavailable`.
    #[instrument(skip(self))]
    pub async fn fetch(&self, url: &str) -> Result<String> {
        let video_id = extract_video_id(url)
            .ok_or_else(|| VidnotesError::InvalidUrl(url.to_string()))?;

        info!("Fetching transcript for {}", video_id);

        let segments = self
            .provider
            .fetch_segments(&video_id)
            .await
            .map_err(|e| match e {
                VidnotesError::TranscriptUnavailable(msg) => {
                    VidnotesError::TranscriptUnavailable(msg)
                }
                other => VidnotesError::TranscriptUnavailable(other.to_string()),
            })?;

        let transcript = join_segments(&segments);
        debug!(
            "Joined {} segments into {} characters",
            segments.len(),
            transcript.len()
        );

        Ok(transcript)
    }
}
