//! Configuration module for vidnotes.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::Prompts;
pub use settings::{
    GeneralSettings, LlmSettings, PromptSettings, ServerSettings, SessionSettings, Settings,
    TranscriptSettings,
};
