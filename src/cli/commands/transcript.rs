//! Transcript command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::transcript::{TranscriptFetcher, YoutubeTranscriptProvider};
use anyhow::Result;
use std::sync::Arc;

/// Run the transcript command.
pub async fn run_transcript(url: &str, output: Option<String>, settings: Settings) -> Result<()> {
    preflight::check(Operation::Transcript, &settings)?;

    let provider = Arc::new(YoutubeTranscriptProvider::with_settings(&settings.transcript)?);
    let fetcher = TranscriptFetcher::new(provider);

    let spinner = Output::spinner("Fetching transcript...");
    let result = fetcher.fetch(url).await;
    spinner.finish_and_clear();

    let transcript = match result {
        Ok(transcript) => transcript,
        Err(e) => {
            Output::error(&format!("Error extracting transcript: {}", e));
            return Err(e.into());
        }
    };

    match output {
        Some(path) => {
            std::fs::write(&path, &transcript)?;
            Output::success(&format!(
                "Wrote {} characters to {}",
                transcript.len(),
                path
            ));
        }
        None => println!("{}", transcript),
    }

    Ok(())
}
