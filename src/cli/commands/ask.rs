//! Ask command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::controller::InteractionController;
use anyhow::Result;

/// Run the ask command.
pub async fn run_ask(url: &str, question: &str, settings: Settings) -> Result<()> {
    if question.trim().is_empty() {
        Output::warning("Please type your query first.");
        anyhow::bail!("Empty question");
    }

    if let Err(e) = preflight::check(Operation::Generate, &settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'vidnotes doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let controller = InteractionController::from_settings(&settings)?;

    let spinner = Output::spinner("Fetching transcript...");
    let transcript = match controller.fetcher().fetch(url).await {
        Ok(transcript) => transcript,
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Error extracting transcript: {}", e));
            return Err(e.into());
        }
    };

    spinner.set_message("Thinking...");
    match controller.responder().answer(&transcript, question).await {
        Ok(answer) => {
            spinner.finish_and_clear();
            println!("\n{}\n", answer);
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Failed to generate answer: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
