//! Config command implementation.

use crate::cli::{mask_secret, ConfigAction, Output};
use crate::config::Settings;
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Run the config command against the file at `config_path`.
pub fn run_config(action: &ConfigAction, config_path: PathBuf, settings: Settings) -> Result<()> {
    match action {
        ConfigAction::Show => {
            Output::header("Configuration");
            Output::kv("Config file", &describe_config_file(&config_path));
            let key = std::env::var(&settings.llm.api_key_env).ok();
            Output::kv(
                "API key",
                &describe_api_key(&settings.llm.api_key_env, key.as_deref()),
            );
            Output::kv("Prompts", &describe_prompts(&settings));
            println!();

            let toml_str = toml::to_string_pretty(&settings)
                .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;
            println!("{}", toml_str);
        }

        ConfigAction::Init { force } => {
            if config_path.exists() && !force {
                Output::warning(&format!(
                    "{} already exists. Use --force to overwrite it.",
                    config_path.display()
                ));
                return Ok(());
            }
            Settings::default().save_to(&config_path)?;
            Output::success(&format!("Wrote default config to {}", config_path.display()));
        }

        ConfigAction::Path => {
            println!("{}", config_path.display());
        }
    }

    Ok(())
}

fn describe_config_file(path: &Path) -> String {
    if path.exists() {
        path.display().to_string()
    } else {
        format!("{} (not found, using defaults)", path.display())
    }
}

/// Name the variable the key is read from without revealing the key.
fn describe_api_key(var: &str, value: Option<&str>) -> String {
    match value {
        None => format!("${} (not set)", var),
        Some(key) if key.trim().is_empty() => format!("${} (empty)", var),
        Some(key) => match mask_secret(key) {
            Some(masked) => format!("${} ({})", var, masked),
            None => format!("${} (set)", var),
        },
    }
}

fn describe_prompts(settings: &Settings) -> String {
    match settings.prompts_file() {
        None => "built-in".to_string(),
        Some(path) if path.exists() => path.display().to_string(),
        Some(path) => format!("{} (not found, using built-in)", path.display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_is_never_printed_in_full() {
        let key = "AIzaSyExampleKey1234";
        let described = describe_api_key("GOOGLE_API_KEY", Some(key));
        assert_eq!(described, "$GOOGLE_API_KEY (AIza...1234)");
        assert!(!described.contains(key));

        assert_eq!(describe_api_key("KEY", Some("tiny")), "$KEY (set)");
        assert_eq!(describe_api_key("KEY", Some(" ")), "$KEY (empty)");
        assert_eq!(describe_api_key("KEY", None), "$KEY (not set)");
    }

    #[test]
    fn test_prompts_resolution() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = Settings::default();
        assert_eq!(describe_prompts(&settings), "built-in");

        settings.prompts.custom_dir = Some(dir.path().display().to_string());
        let expected = dir.path().join("prompts.toml");
        assert!(describe_prompts(&settings).ends_with("(not found, using built-in)"));

        std::fs::write(&expected, "summary = \"Summarize:\"\n").unwrap();
        assert_eq!(describe_prompts(&settings), expected.display().to_string());
    }

    #[test]
    fn test_init_writes_defaults_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vidnotes").join("config.toml");

        let mut custom = Settings::default();
        custom.llm.model = "custom-model".to_string();

        run_config(&ConfigAction::Init { force: false }, path.clone(), custom.clone()).unwrap();
        assert_eq!(Settings::load_from(Some(&path)).unwrap().llm.model, "gemini-2.0-flash");

        std::fs::write(&path, "[llm]\nmodel = \"kept\"\n").unwrap();
        run_config(&ConfigAction::Init { force: false }, path.clone(), custom.clone()).unwrap();
        assert_eq!(Settings::load_from(Some(&path)).unwrap().llm.model, "kept");

        run_config(&ConfigAction::Init { force: true }, path.clone(), custom).unwrap();
        assert_eq!(Settings::load_from(Some(&path)).unwrap().llm.model, "gemini-2.0-flash");
    }
}
