//! CLI module for vidnotes.

pub mod commands;
mod output;
pub mod preflight;

pub use output::{mask_secret, Output};

use clap::{Parser, Subcommand};

/// vidnotes - YouTube notes, fact-checks and Q&A
///
/// Fetches a video's transcript, asks a language model for detailed notes,
/// optionally fact-checks them and answers follow-up questions.
#[derive(Parser, Debug)]
#[command(name = "vidnotes")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Model to use instead of the configured one
    #[arg(short, long, global = true, env = "VIDNOTES_MODEL")]
    pub model: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start an interactive session (notes, fact-check, questions)
    Session {
        /// YouTube URL to start with
        url: Option<String>,
    },

    /// Generate detailed notes for a video
    Notes {
        /// YouTube URL (watch, embed or youtu.be link)
        url: String,

        /// Fact-check the notes afterwards
        #[arg(short, long)]
        fact_check: bool,

        /// Print the resulting session state as JSON
        #[arg(long)]
        json: bool,
    },

    /// Ask a single question about a video
    Ask {
        /// YouTube URL (watch, embed or youtu.be link)
        url: String,

        /// The question to ask
        question: String,
    },

    /// Print a video's transcript
    Transcript {
        /// YouTube URL (watch, embed or youtu.be link)
        url: String,

        /// Write the transcript to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Start the HTTP API with per-client sessions
    Serve {
        /// Host to bind to (defaults to the configured host)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (defaults to the configured port)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check configuration and API key
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the effective configuration and where its pieces come from
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Show configuration file path
    Path,
}
