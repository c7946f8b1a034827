//! # gatebot
//!
//! Telegram bot that answers prompts with Gemini, but only for members of a configured channel.
//! Non-members get a wall with a join link and a re-check button. Loads config from env and long-polls.

pub mod cli;
pub mod config;
pub mod dispatcher;
pub mod gate;
pub mod health;
pub mod responder;
pub mod runner;
pub mod wall;

pub use cli::{load_config, Cli, Commands};
pub use config::{BaseConfig, BotConfig, GateConfig};
pub use dispatcher::{classify, EventKind, GateDispatcher, IgnoreReason};
pub use gate::{AccessDecision, GateKeeper};
pub use responder::{chunk_message, PromptResponder};
pub use runner::{build_dispatcher, build_llm_client, run_bot, RunOptions};
pub use wall::WallPresenter;
