//! vidnotes CLI entry point.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use vidnotes::cli::{commands, Cli, Commands};
use vidnotes::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    // API keys usually live in .env
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Load configuration
    let mut settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&std::path::PathBuf::from(path)))?,
        None => Settings::load()?,
    };

    // Initialize logging
    let log_level = match cli.verbose {
        0 => settings.general.log_level.clone(),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("vidnotes={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    if let Some(model) = &cli.model {
        settings.llm.model = model.clone();
    }

    // Execute command
    match &cli.command {
        Commands::Session { url } => {
            commands::run_session(url.clone(), settings).await?;
        }

        Commands::Notes {
            url,
            fact_check,
            json,
        } => {
            commands::run_notes(url, *fact_check, *json, settings).await?;
        }

        Commands::Ask { url, question } => {
            commands::run_ask(url, question, settings).await?;
        }

        Commands::Transcript { url, output } => {
            commands::run_transcript(url, output.clone(), settings).await?;
        }

        Commands::Serve { host, port } => {
            commands::run_serve(host.clone(), *port, settings).await?;
        }

        Commands::Doctor => {
            commands::run_doctor(&settings)?;
        }

        Commands::Config { action } => {
            let config_path = cli
                .config
                .as_ref()
                .map(std::path::PathBuf::from)
                .unwrap_or_else(Settings::default_config_path);
            commands::run_config(action, config_path, settings)?;
        }
    }

    Ok(())
}
