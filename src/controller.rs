//! Interaction controller.
//!
//! Maps each user [`Command`] onto the pipeline and produces the next
//! [`SessionState`]. All network access goes through the transcript and text
//! generation traits, so the controller itself holds no session data.

use crate::config::{Prompts, Settings};
use crate::error::Result;
use crate::generation::{ContentGenerator, OpenAIGenerator, QueryResponder, TextGenerator};
use crate::session::{Command, Notice, QueryRecord, SessionState};
use crate::transcript::{TranscriptFetcher, TranscriptProvider, YoutubeTranscriptProvider};
use crate::video_id::{extract_video_id, thumbnail_url};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Result of handling one command.
#[derive(Debug, Clone)]
pub struct Transition {
    pub state: SessionState,
    pub notices: Vec<Notice>,
}

/// Drives a session through URL entry, notes, fact-checking and questions.
pub struct InteractionController {
    fetcher: TranscriptFetcher,
    content: ContentGenerator,
    responder: QueryResponder,
    prompts: Prompts,
    clear_stale_on_refresh: bool,
}

impl InteractionController {
    /// Create a controller over the given collaborators.
    pub fn new(
        transcripts: Arc<dyn TranscriptProvider>,
        generator: Arc<dyn TextGenerator>,
        prompts: Prompts,
    ) -> Self {
        Self {
            fetcher: TranscriptFetcher::new(transcripts),
            content: ContentGenerator::new(generator.clone()),
            responder: QueryResponder::new(generator).with_prompts(prompts.clone()),
            prompts,
            clear_stale_on_refresh: false,
        }
    }

    /// Build the production controller: YouTube captions and the configured LLM.
    ///
    /// Reads the API key once; fails if it is missing.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let api_key = settings.api_key()?;
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        let transcripts = Arc::new(YoutubeTranscriptProvider::with_settings(&settings.transcript)?);
        let generator = Arc::new(OpenAIGenerator::with_config(&settings.llm, &api_key)?);

        info!("Using model {} at {}", settings.llm.model, settings.llm.api_base);

        Ok(Self::new(transcripts, generator, prompts)
            .with_clear_stale_on_refresh(settings.session.clear_stale_on_refresh))
    }

    /// Drop fact-check results and query history when notes are regenerated.
    pub fn with_clear_stale_on_refresh(mut self, clear: bool) -> Self {
        self.clear_stale_on_refresh = clear;
        self
    }

    /// Transcript fetcher, for one-shot use outside a session.
    pub fn fetcher(&self) -> &TranscriptFetcher {
        &self.fetcher
    }

    /// Question responder, for one-shot use outside a session.
    pub fn responder(&self) -> &QueryResponder {
        &self.responder
    }

    /// Handle a command against a session state.
    pub async fn dispatch(&self, state: SessionState, command: Command) -> Transition {
        let mut state = state;
        let notices = match command {
            Command::SubmitUrl(url) => self.submit_url(&mut state, &url),
            Command::RequestNotes => self.request_notes(&mut state).await,
            Command::RequestFactCheck => self.request_fact_check(&mut state).await,
            Command::Ask(question) => self.ask(&mut state, &question).await,
        };
        debug_assert!(state.is_consistent());
        Transition { state, notices }
    }

    /// Handle a command in place.
    ///
    /// Works on a copy and writes it back only once the command finishes, so
    /// dropping the future midway leaves `state` as it was.
    pub async fn apply(&self, state: &mut SessionState, command: Command) -> Vec<Notice> {
        let transition = self.dispatch(state.clone(), command).await;
        *state = transition.state;
        transition.notices
    }

    fn submit_url(&self, state: &mut SessionState, url: &str) -> Vec<Notice> {
        let url = url.trim();
        // Thumbnail lookup is best-effort; a bad URL is only reported on fetch.
        state.thumbnail_url = extract_video_id(url).map(|id| thumbnail_url(&id));
        state.url = Some(url.to_string());
        Vec::new()
    }

    #[instrument(skip_all)]
    async fn request_notes(&self, state: &mut SessionState) -> Vec<Notice> {
        let url = match state.url.as_deref() {
            Some(url) if !url.is_empty() => url.to_string(),
            _ => return vec![Notice::Warning("Please enter a YouTube video link first.".to_string())],
        };

        let transcript = match self.fetcher.fetch(&url).await {
            Ok(transcript) => transcript,
            Err(e) => {
                warn!("Transcript fetch failed: {}", e);
                return vec![Notice::Error(format!("Error extracting transcript: {}", e))];
            }
        };

        state.transcript = Some(transcript.clone());
        if self.clear_stale_on_refresh {
            state.fact_check = None;
            state.queries.clear();
        }

        let result = self
            .content
            .generate(&self.prompts.summary_prefix(), &transcript)
            .await;
        match result {
            Ok(summary) => {
                state.summary = Some(summary);
                state.fact_check_enabled = true;
                vec![Notice::Info("Detailed notes are ready.".to_string())]
            }
            Err(e) => {
                warn!("Summary generation failed: {}", e);
                state.summary = None;
                state.fact_check_enabled = false;
                state.fact_check = None;
                vec![Notice::Error(format!("Error generating content: {}", e))]
            }
        }
    }

    #[instrument(skip_all)]
    async fn request_fact_check(&self, state: &mut SessionState) -> Vec<Notice> {
        let summary = match (&state.summary, state.fact_check_enabled) {
            (Some(summary), true) => summary.clone(),
            _ => {
                return vec![Notice::Warning(
                    "Fact check is available once detailed notes exist.".to_string(),
                )]
            }
        };

        match self
            .content
            .generate(&self.prompts.fact_check_prefix(), &summary)
            .await
        {
            Ok(result) => {
                state.fact_check = Some(result);
                Vec::new()
            }
            Err(e) => {
                warn!("Fact check failed: {}", e);
                state.fact_check = None;
                vec![Notice::Error(format!("Error generating content: {}", e))]
            }
        }
    }

    #[instrument(skip_all)]
    async fn ask(&self, state: &mut SessionState, question: &str) -> Vec<Notice> {
        if question.trim().is_empty() {
            return vec![Notice::Warning("Please type your query first.".to_string())];
        }

        let transcript = match &state.transcript {
            Some(transcript) => transcript.clone(),
            None => {
                return vec![Notice::Warning(
                    "Get detailed notes for a video before asking questions.".to_string(),
                )]
            }
        };

        let (answer, notices) = match self.responder.answer(&transcript, question).await {
            Ok(answer) => (Some(answer), Vec::new()),
            Err(e) => {
                warn!("Query failed: {}", e);
                (None, vec![Notice::Error(format!("Error generating content: {}", e))])
            }
        };

        state.queries.push(QueryRecord {
            question: question.to_string(),
            answer,
        });
        notices
    }
}
