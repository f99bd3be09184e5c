//! Interactive session command.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::controller::InteractionController;
use crate::session::{Command, SessionState};
use anyhow::Result;
use console::style;
use std::io::{self, BufRead, Write};
use tracing::debug;

/// One line of user input.
#[derive(Debug, PartialEq)]
enum Input {
    Action(Command),
    Show,
    Help,
    Exit,
}

/// Parse a line typed at the session prompt.
///
/// Anything that isn't a known command is treated as a question.
fn parse_input(line: &str) -> Option<Input> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let input = match word.to_ascii_lowercase().as_str() {
        "url" | "open" => Input::Action(Command::SubmitUrl(rest.to_string())),
        "notes" => Input::Action(Command::RequestNotes),
        "check" | "fact-check" | "factcheck" => Input::Action(Command::RequestFactCheck),
        "ask" => Input::Action(Command::Ask(rest.to_string())),
        "show" => Input::Show,
        "help" | "?" => Input::Help,
        "exit" | "quit" => Input::Exit,
        _ => Input::Action(Command::Ask(line.to_string())),
    };
    Some(input)
}

fn print_help() {
    Output::kv("url <link>", "Choose a YouTube video");
    Output::kv("notes", "Fetch the transcript and generate detailed notes");
    Output::kv("check", "Fact-check the notes");
    Output::kv("ask <question>", "Ask about the video (or just type the question)");
    Output::kv("show", "Show everything produced so far");
    Output::kv("exit", "Leave the session");
}

/// Render what changed after a command.
fn render(command: &Command, state: &SessionState) {
    match command {
        Command::SubmitUrl(_) => Output::thumbnail(state),
        Command::RequestNotes => Output::notes(state),
        Command::RequestFactCheck => Output::fact_check(state),
        Command::Ask(_) => {
            if let Some(record) = state.queries.last() {
                Output::query(state.queries.len(), &record.question, record.answer.as_deref());
            }
        }
    }
}

fn spinner_message(command: &Command) -> Option<&'static str> {
    match command {
        Command::SubmitUrl(_) => None,
        Command::RequestNotes => Some("Fetching transcript and writing notes..."),
        Command::RequestFactCheck => Some("Fact-checking..."),
        Command::Ask(_) => Some("Thinking..."),
    }
}

/// Run the interactive session command.
pub async fn run_session(url: Option<String>, settings: Settings) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Generate, &settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'vidnotes doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let controller = InteractionController::from_settings(&settings)?;
    let mut state = SessionState::new();

    println!("\n{}", style("vidnotes session").bold().cyan());
    println!(
        "{}\n",
        style("Type 'help' for commands, or 'exit' to quit.").dim()
    );

    if let Some(url) = url {
        let command = Command::SubmitUrl(url);
        let notices = controller.apply(&mut state, command.clone()).await;
        Output::notices(&notices);
        render(&command, &state);
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{} ", style("vidnotes>").green().bold());
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let command = match parse_input(&line) {
            None => continue,
            Some(Input::Exit) => {
                Output::info("Goodbye!");
                break;
            }
            Some(Input::Help) => {
                print_help();
                continue;
            }
            Some(Input::Show) => {
                Output::session(&state);
                continue;
            }
            Some(Input::Action(command)) => command,
        };

        debug!("Session command: {:?}", command);

        let spinner = spinner_message(&command).map(Output::spinner);
        let notices = controller.apply(&mut state, command.clone()).await;
        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }

        Output::notices(&notices);
        render(&command, &state);
        println!();
    }

    Ok(())
}
