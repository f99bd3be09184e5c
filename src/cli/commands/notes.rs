//! Notes command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::controller::InteractionController;
use crate::session::{Command, SessionState};
use anyhow::Result;

/// Run the notes command.
pub async fn run_notes(url: &str, fact_check: bool, json: bool, settings: Settings) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Generate, &settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'vidnotes doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let controller = InteractionController::from_settings(&settings)?;
    let mut state = SessionState::new();

    let mut commands = vec![Command::SubmitUrl(url.to_string()), Command::RequestNotes];
    if fact_check {
        commands.push(Command::RequestFactCheck);
    }

    let mut failed = false;
    for command in commands {
        let spinner = match command {
            Command::SubmitUrl(_) => None,
            Command::RequestFactCheck => Some(Output::spinner("Fact-checking...")),
            _ => Some(Output::spinner("Fetching transcript and writing notes...")),
        };
        let notices = controller.apply(&mut state, command).await;
        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }

        if notices.iter().any(|n| n.is_error()) {
            failed = true;
        }
        if !json {
            Output::notices(&notices);
        }
        // Nothing to fact-check without notes.
        if state.summary.is_none() && failed {
            break;
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&state)?);
    } else {
        Output::thumbnail(&state);
        Output::notes(&state);
        Output::fact_check(&state);
    }

    if failed {
        anyhow::bail!("Could not complete all steps for {}", url);
    }
    Ok(())
}
