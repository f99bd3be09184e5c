//! vidnotes - YouTube notes, fact-checks and Q&A
//!
//! A CLI tool that fetches a YouTube video's transcript, asks a language model
//! for detailed notes, optionally fact-checks them, and answers follow-up
//! questions about the video.
//!
//! # Architecture
//!
//! - `video_id` - Video id extraction from YouTube URLs
//! - `transcript` - Caption retrieval behind the `TranscriptProvider` trait
//! - `generation` - Notes, fact-checks and answers behind the `TextGenerator` trait
//! - `session` - Per-session state, commands and notices
//! - `controller` - Command dispatch over a session
//! - `config` - Settings and prompt templates
//! - `llm` - Chat client construction
//!
//! # Example
//!
//! ```rust,no_run
//! use vidnotes::config::Settings;
//! use vidnotes::controller::InteractionController;
//! use vidnotes::session::{Command, SessionState};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let controller = InteractionController::from_settings(&settings)?;
//!
//!     let mut state = SessionState::new();
//!     controller
//!         .apply(&mut state, Command::SubmitUrl("https://youtu.be/dQw4w9WgXcQ".to_string()))
//!         .await;
//!     controller.apply(&mut state, Command::RequestNotes).await;
//!
//!     if let Some(summary) = &state.summary {
//!         println!("{}", summary);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod generation;
pub mod llm;
pub mod session;
pub mod transcript;
pub mod video_id;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{Result, VidnotesError};
