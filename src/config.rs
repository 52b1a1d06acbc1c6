use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use log::info;
use reqwest::Url;

const DEFAULT_API_URL: &str = "http://localhost:11434/v1/chat/completions";
const DEFAULT_MODEL: &str = "llama3.2:1b";
const DEFAULT_APP_PROMPT: &str = "You are an AI assistant created to be helpful, \
harmless, and honest. Respond concisely to the user's queries, providing relevant \
information without unnecessary details.";

/// Everything needed to start a session; cloned into each new conversation.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub endpoint: Url,
    pub model: String,
    pub system_prompt: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub session: SessionConfig,
    pub request_timeout: Duration,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    /// Reads configuration from the process environment (after `.env` is loaded).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let raw_url = lookup("CHAT_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let endpoint = Url::parse(&raw_url)
            .with_context(|| format!("CHAT_API_URL is not a valid URL: {}", raw_url))?;

        let model = lookup("CHAT_MODEL")
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let system_prompt =
            Some(lookup("SYSTEM_PROMPT").unwrap_or_else(|| DEFAULT_APP_PROMPT.to_string()));

        let timeout_secs = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(v) => v
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .context("REQUEST_TIMEOUT_SECS must be a positive whole number of seconds")?,
            None => 60,
        };

        let host = lookup("BIND_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = match lookup("PORT") {
            Some(v) => v.parse::<u16>().context("PORT must be a valid port number")?,
            None => 8080,
        };

        info!("Using chat endpoint {} with model {}", endpoint, model);

        Ok(Self {
            session: SessionConfig { endpoint, model, system_prompt },
            request_timeout: Duration::from_secs(timeout_secs),
            host,
            port,
        })
    }
}
