//! Doctor command - verify configuration before first use.

use crate::cli::{mask_secret, Output};
use crate::config::Settings;
use console::style;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub fn run_doctor(settings: &Settings) -> anyhow::Result<()> {
    Output::header("vidnotes Doctor");
    println!();
    println!("Checking configuration...\n");

    let mut checks = Vec::new();

    println!("{}", style("Language Model").bold());
    let llm_checks = vec![
        check_api_key(&settings.llm.api_key_env, std::env::var(&settings.llm.api_key_env).ok()),
        check_api_base(&settings.llm.api_base),
        CheckResult::ok("Model", &settings.llm.model),
    ];
    for check in &llm_checks {
        check.print();
    }
    checks.extend(llm_checks);

    println!();

    println!("{}", style("Transcripts").bold());
    let languages_check = check_languages(&settings.transcript.languages);
    languages_check.print();
    checks.push(languages_check);

    println!();

    println!("{}", style("Configuration").bold());
    let config_checks = vec![check_config_file(), check_prompts_dir(settings)];
    for check in &config_checks {
        check.print();
    }
    checks.extend(config_checks);

    println!();

    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before using vidnotes.",
            errors
        ));
        anyhow::bail!("{} doctor check(s) failed", errors);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! vidnotes is ready to use.");
    }

    Ok(())
}

/// Check that the API key variable holds a value.
fn check_api_key(var: &str, value: Option<String>) -> CheckResult {
    let hint = format!("Set with: export {}='...' (or add it to .env)", var);
    match value {
        Some(key) if key.trim().is_empty() => CheckResult::error(var, "empty", &hint),
        Some(key) => match mask_secret(&key) {
            Some(masked) => CheckResult::ok(var, &format!("configured ({})", masked)),
            None => CheckResult::warning(var, "set but looks too short", &hint),
        },
        None => CheckResult::error(var, "not set", &hint),
    }
}

fn check_api_base(api_base: &str) -> CheckResult {
    if api_base.starts_with("https://") {
        CheckResult::ok("Endpoint", api_base)
    } else if api_base.starts_with("http://") {
        CheckResult::warning(
            "Endpoint",
            api_base,
            "The API key will be sent without TLS",
        )
    } else {
        CheckResult::error(
            "Endpoint",
            &format!("{} is not an http(s) URL", api_base),
            "Set llm.api_base in the config file",
        )
    }
}

fn check_languages(languages: &[String]) -> CheckResult {
    if languages.is_empty() {
        CheckResult::error(
            "Caption languages",
            "none configured",
            "Set transcript.languages, e.g. [\"en\"]",
        )
    } else {
        CheckResult::ok("Caption languages", &languages.join(", "))
    }
}

/// Check if config file exists.
fn check_config_file() -> CheckResult {
    let config_path = Settings::default_config_path();
    if config_path.exists() {
        CheckResult::ok("Config file", &format!("{}", config_path.display()))
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults",
            "Create with: vidnotes config init",
        )
    }
}

fn check_prompts_dir(settings: &Settings) -> CheckResult {
    match settings.prompts_file() {
        None => CheckResult::ok("Prompts", "built-in"),
        Some(path) => {
            if path.exists() {
                CheckResult::ok("Prompts", &format!("{}", path.display()))
            } else {
                CheckResult::warning(
                    "Prompts",
                    &format!("{} not found, using built-in prompts", path.display()),
                    "Create prompts.toml with summary, fact_check or query keys",
                )
            }
        }
    }
}
