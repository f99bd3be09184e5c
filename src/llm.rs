//! Client construction for OpenAI-compatible chat APIs.

use crate::config::LlmSettings;
use crate::error::Result;
use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// Create a chat client for the configured endpoint.
///
/// The key is passed in rather than read here so that it is looked up once
/// at startup.
pub fn create_client(settings: &LlmSettings, api_key: &str) -> Result<Client<OpenAIConfig>> {
    create_client_with_timeout(
        settings,
        api_key,
        Duration::from_secs(settings.timeout_seconds),
    )
}

/// Create a chat client with a custom timeout.
pub fn create_client_with_timeout(
    settings: &LlmSettings,
    api_key: &str,
    timeout: Duration,
) -> Result<Client<OpenAIConfig>> {
    let http_client = reqwest::Client::builder().timeout(timeout).build()?;

    let config = OpenAIConfig::new()
        .with_api_base(settings.api_base.trim_end_matches('/'))
        .with_api_key(api_key);

    Ok(Client::with_config(config).with_http_client(http_client))
}
