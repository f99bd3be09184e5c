//! Configuration settings for vidnotes.

use crate::error::{Result, VidnotesError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub llm: LlmSettings,
    pub transcript: TranscriptSettings,
    pub session: SessionSettings,
    pub server: ServerSettings,
    pub prompts: PromptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
        }
    }
}

/// Generative-text provider settings.
///
/// Any OpenAI-compatible chat completions endpoint works. The default points
/// at Gemini's compatibility layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    /// Base URL of the chat completions API.
    pub api_base: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    /// Model identifier used for every request.
    pub model: String,
    /// Sampling temperature (provider default when unset).
    pub temperature: Option<f32>,
    /// HTTP timeout for a single request.
    pub timeout_seconds: u64,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            api_base: "https://generativelanguage.googleapis.com/v1beta/openai".to_string(),
            api_key_env: "GOOGLE_API_KEY".to_string(),
            model: "gemini-2.0-flash".to_string(),
            temperature: None,
            timeout_seconds: 300,
        }
    }
}

/// Transcript retrieval settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptSettings {
    /// Preferred caption languages, in priority order.
    pub languages: Vec<String>,
    /// Keep HTML formatting tags in caption text.
    pub preserve_formatting: bool,
}

impl Default for TranscriptSettings {
    fn default() -> Self {
        Self {
            languages: vec!["en".to_string()],
            preserve_formatting: false,
        }
    }
}

/// Interactive session behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Drop the fact-check result and query history when notes are
    /// regenerated. Off by default: earlier results stay visible.
    pub clear_stale_on_refresh: bool,
    /// Seconds an HTTP API session may sit unused before it is discarded.
    pub idle_timeout_seconds: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            clear_stale_on_refresh: false,
            idle_timeout_seconds: 3600,
        }
    }
}

/// HTTP API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory containing a `prompts.toml` that overrides the defaults.
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to the default configuration file.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| VidnotesError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vidnotes")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Location of the prompt overrides file, if a custom directory is set.
    pub fn prompts_file(&self) -> Option<PathBuf> {
        self.prompts
            .custom_dir
            .as_deref()
            .map(|dir| Self::expand_path(dir).join("prompts.toml"))
    }

    /// Read the API key from the configured environment variable.
    pub fn api_key(&self) -> Result<String> {
        let var = &self.llm.api_key_env;
        match std::env::var(var) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            Ok(_) => Err(VidnotesError::Config(format!(
                "{} is empty. Set it in your environment or a .env file.",
                var
            ))),
            Err(_) => Err(VidnotesError::Config(format!(
                "{} not set. Set it with: export {}='...'",
                var, var
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.llm.api_key_env, "GOOGLE_API_KEY");
        assert_eq!(settings.transcript.languages, vec!["en".to_string()]);
        assert!(!settings.session.clear_stale_on_refresh);
        assert_eq!(settings.session.idle_timeout_seconds, 3600);
        assert_eq!(settings.server.port, 3000);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [llm]
            model = "gpt-4o-mini"
            api_base = "https://api.openai.com/v1"

            [session]
            clear_stale_on_refresh = true
            "#,
        )
        .unwrap();

        assert_eq!(settings.llm.model, "gpt-4o-mini");
        assert_eq!(settings.llm.timeout_seconds, 300);
        assert!(settings.session.clear_stale_on_refresh);
        assert_eq!(settings.session.idle_timeout_seconds, 3600);
        assert_eq!(settings.server.host, "127.0.0.1");
    }

    #[test]
    fn test_idle_timeout_from_file() {
        let settings: Settings = toml::from_str(
            r#"
            [session]
            idle_timeout_seconds = 600
            "#,
        )
        .unwrap();

        assert_eq!(settings.session.idle_timeout_seconds, 600);
        assert!(!settings.session.clear_stale_on_refresh);
    }

    #[test]
    fn test_prompts_file() {
        let mut settings = Settings::default();
        assert!(settings.prompts_file().is_none());

        settings.prompts.custom_dir = Some("/srv/vidnotes".to_string());
        assert_eq!(
            settings.prompts_file(),
            Some(PathBuf::from("/srv/vidnotes/prompts.toml"))
        );
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut settings = Settings::default();
        settings.llm.temperature = Some(0.2);
        settings.transcript.languages = vec!["de".to_string(), "en".to_string()];
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(loaded.llm.temperature, Some(0.2));
        assert_eq!(loaded.transcript.languages.len(), 2);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let settings = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(settings.llm.model, "gemini-2.0-flash");
    }

    #[test]
    fn test_api_key_missing_var() {
        let mut settings = Settings::default();
        settings.llm.api_key_env = "VIDNOTES_TEST_KEY_THAT_IS_NEVER_SET".to_string();
        let err = settings.api_key().unwrap_err();
        assert!(matches!(err, VidnotesError::Config(_)));
    }
}
