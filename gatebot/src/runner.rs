use anyhow::Result;
use std::sync::Arc;

use gatebot_core::{init_tracing, Bot, Handler, MembershipOracle};
use gatebot_telegram::{
    fetch_bot_username, run_dispatcher, TelegramBotAdapter, TelegramMembershipOracle,
};
use llm_client::{GeminiLlmClient, LlmClient};
use tracing::{info, instrument, warn};

use crate::config::BotConfig;
use crate::dispatcher::GateDispatcher;
use crate::gate::GateKeeper;
use crate::health::run_health_server;
use crate::responder::PromptResponder;
use crate::wall::WallPresenter;

/// Startup switches that do not come from the environment.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    pub health_check: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self { health_check: true }
    }
}

/// Builds the LLM client from config. None when no GEMINI_API_KEY is set.
pub fn build_llm_client(config: &BotConfig) -> Option<Arc<dyn LlmClient>> {
    let llm_config = config.llm()?;
    let client = GeminiLlmClient::from_config(llm_config);
    info!(model = %client.model(), "Gemini client configured");
    Some(Arc::new(client))
}

/// Wires gate, wall and responder around the given transport. Does not touch the network, so tests
/// pass recording mocks for `bot`, `oracle` and `llm`.
pub fn build_dispatcher(
    config: &BotConfig,
    bot: Arc<dyn Bot>,
    oracle: Arc<dyn MembershipOracle>,
    llm: Option<Arc<dyn LlmClient>>,
    bot_username: Option<String>,
) -> GateDispatcher {
    let gate = GateKeeper::new(config.gate(), oracle);
    let wall = WallPresenter::new(bot.clone(), config.gate().invite_link.clone());
    let responder = match llm {
        Some(llm) => Some(PromptResponder::new(llm, bot.clone())),
        None => {
            warn!("GEMINI_API_KEY not set; allowed prompts get the service-unavailable reply");
            None
        }
    };
    GateDispatcher::new(bot, gate, wall, responder).with_bot_username(bot_username)
}

/// Main entry: validate config, init logging, start the liveness endpoint, then long-poll until Ctrl-C.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig, options: RunOptions) -> Result<()> {
    config.validate()?;
    init_tracing(config.log_file())?;

    info!(
        channel = ?config.gate().channel.as_ref().map(|c| c.to_string()),
        llm_configured = config.llm().is_some(),
        health_check = options.health_check,
        "Initializing bot"
    );

    let mut teloxide_bot = teloxide::Bot::new(config.bot_token());
    if let Some(url) = config.telegram_api_url() {
        teloxide_bot = teloxide_bot.set_api_url(reqwest::Url::parse(url)?);
    }

    if options.health_check {
        tokio::spawn(run_health_server(config.health_port()));
    }

    let bot: Arc<dyn Bot> = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));
    let oracle: Arc<dyn MembershipOracle> =
        Arc::new(TelegramMembershipOracle::new(teloxide_bot.clone()));
    let llm = build_llm_client(&config);
    let bot_username = fetch_bot_username(&teloxide_bot).await;

    let handler: Arc<dyn Handler> =
        Arc::new(build_dispatcher(&config, bot, oracle, llm, bot_username));

    info!("Bot started successfully");

    run_dispatcher(teloxide_bot, handler).await
}
