//! Bot configuration: BaseConfig (Telegram + log + liveness port) + GateConfig (channel gate) + optional LLM config.

mod base;
mod bot_config;
mod gate;


pub use base::{BaseConfig, DEFAULT_HEALTH_PORT};
pub use bot_config::BotConfig;
pub use gate::GateConfig;
