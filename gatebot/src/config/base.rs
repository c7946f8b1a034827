//! Base config: Telegram Bot connection, logging, liveness port. Loaded from env.

use anyhow::{Context, Result};
use std::env;

/// Port the liveness endpoint binds when PORT is unset.
pub const DEFAULT_HEALTH_PORT: u16 = 8000;

/// Base config: Telegram-related, logging and liveness only.
#[derive(Debug, Clone)]
pub struct BaseConfig {
    /// BOT_TOKEN
    pub bot_token: String,
    /// TELEGRAM_API_URL or TELOXIDE_API_URL
    pub telegram_api_url: Option<String>,
    /// LOG_FILE; stdout only when unset
    pub log_file: Option<String>,
    /// PORT for the liveness endpoint
    pub health_port: u16,
}

impl BaseConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token.filter(|t| !t.trim().is_empty()) {
            Some(t) => t,
            None => env::var("BOT_TOKEN")
                .ok()
                .filter(|t| !t.trim().is_empty())
                .context("BOT_TOKEN not set: the bot cannot start without a Telegram bot token")?,
        };
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok()
            .filter(|s| !s.trim().is_empty());
        let log_file = env::var("LOG_FILE").ok().filter(|s| !s.trim().is_empty());
        let health_port = match env::var("PORT") {
            Ok(raw) if !raw.trim().is_empty() => raw
                .trim()
                .parse()
                .with_context(|| format!("PORT is set but not a valid port number: {}", raw))?,
            _ => DEFAULT_HEALTH_PORT,
        };

        Ok(Self {
            bot_token,
            telegram_api_url,
            log_file,
            health_port,
        })
    }

    /// Validate config (e.g. telegram_api_url must be valid URL if set).
    pub fn validate(&self) -> Result<()> {
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        Ok(())
    }
}
