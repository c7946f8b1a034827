//! BotConfig: BaseConfig + GateConfig + optional LLM config. Use load() for env-based loading.
//!
//! LLM config lives in the llm-client crate; its absence disables prompt replies but not the bot.

use anyhow::Result;
use llm_client::EnvLlmConfig;

use super::{BaseConfig, GateConfig};

/// Bot config, built once in main and passed explicitly to every component.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub base: BaseConfig,
    pub gate: GateConfig,
    pub llm: Option<EnvLlmConfig>,
}

impl BotConfig {
    /// Load full config from environment variables. If `token` is provided it overrides BOT_TOKEN.
    /// Call validate() after load to check config before init.
    pub fn load(token: Option<String>) -> Result<Self> {
        let base = BaseConfig::load(token)?;
        let gate = GateConfig::from_env();
        let llm = EnvLlmConfig::from_env();
        Ok(Self { base, gate, llm })
    }

    /// Validate config. Call after load() to fail fast before init.
    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        self.gate.validate()
    }

    pub fn base(&self) -> &BaseConfig {
        &self.base
    }
    pub fn gate(&self) -> &GateConfig {
        &self.gate
    }
    pub fn llm(&self) -> Option<&EnvLlmConfig> {
        self.llm.as_ref()
    }

    pub fn bot_token(&self) -> &str {
        &self.base.bot_token
    }
    pub fn log_file(&self) -> Option<&str> {
        self.base.log_file.as_deref()
    }
    pub fn telegram_api_url(&self) -> Option<&str> {
        self.base.telegram_api_url.as_deref()
    }
    pub fn health_port(&self) -> u16 {
        self.base.health_port
    }
}
