//! CLI output formatting utilities.

use crate::session::{Notice, SessionState};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output helper for CLI formatting.
pub struct Output;

/// Shorten a secret to its first and last four characters.
///
/// Returns `None` when the value is too short to reveal anything safely.
pub fn mask_secret(secret: &str) -> Option<String> {
    let chars: Vec<char> = secret.trim().chars().collect();
    if chars.len() <= 12 {
        return None;
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    Some(format!("{}...{}", head, tail))
}

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a controller notice at its level.
    pub fn notice(notice: &Notice) {
        match notice {
            Notice::Info(msg) => Self::success(msg),
            Notice::Warning(msg) => Self::warning(msg),
            Notice::Error(msg) => Self::error(msg),
        }
    }

    pub fn notices(notices: &[Notice]) {
        for notice in notices {
            Self::notice(notice);
        }
    }

    /// Print the thumbnail link for the current video.
    pub fn thumbnail(state: &SessionState) {
        if let Some(url) = &state.thumbnail_url {
            Self::kv("Thumbnail", url);
        }
    }

    pub fn notes(state: &SessionState) {
        if let Some(summary) = &state.summary {
            Self::header("Detailed Notes");
            println!("\n{}", summary);
        }
    }

    pub fn fact_check(state: &SessionState) {
        if let Some(result) = &state.fact_check {
            Self::header("Fact Check Response");
            println!("\n{}", result);
        }
    }

    /// Print every question asked so far, numbered from 1.
    pub fn queries(state: &SessionState) {
        if state.queries.is_empty() {
            return;
        }
        Self::header("Queries and Responses");
        for (i, record) in state.queries.iter().enumerate() {
            Self::query(i + 1, &record.question, record.answer.as_deref());
        }
    }

    /// Print a single question and its answer.
    pub fn query(number: usize, question: &str, answer: Option<&str>) {
        println!(
            "\n{} {}",
            style(format!("Query {}:", number)).italic().bold(),
            question
        );
        match answer {
            Some(text) => println!("{}", text),
            None => println!("{}", style("(no answer)").dim()),
        }
    }

    /// Print the whole session.
    pub fn session(state: &SessionState) {
        Self::thumbnail(state);
        Self::notes(state);
        Self::fact_check(state);
        Self::queries(state);
    }

    /// Create a spinner.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}
