//! Pre-flight checks before network operations.
//!
//! Validates that configuration is usable before starting operations that
//! would otherwise fail midway.

use crate::config::Settings;
use crate::error::Result;

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Anything that talks to the language model needs an API key.
    Generate,
    /// Transcript download needs no key.
    Transcript,
}

/// Run pre-flight checks for the given operation.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
pub fn check(operation: Operation, settings: &Settings) -> Result<()> {
    match operation {
        Operation::Generate => {
            settings.api_key()?;
        }
        Operation::Transcript => {
            // No external requirements
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_transcript_no_requirements() {
        let mut settings = Settings::default();
        settings.llm.api_key_env = "VIDNOTES_PREFLIGHT_UNSET_KEY".to_string();
        assert!(check(Operation::Transcript, &settings).is_ok());
    }

    #[test]
    fn test_check_generate_requires_key() {
        let mut settings = Settings::default();
        settings.llm.api_key_env = "VIDNOTES_PREFLIGHT_UNSET_KEY".to_string();
        assert!(check(Operation::Generate, &settings).is_err());
    }
}
