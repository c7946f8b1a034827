//! gatebot binary: channel-gated Gemini bot.

use anyhow::Result;
use clap::Parser;
use gatebot::{load_config, run_bot, Cli, Commands, RunOptions};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            token,
            no_health_check,
        } => {
            let config = load_config(token)?;
            run_bot(
                config,
                RunOptions {
                    health_check: !no_health_check,
                },
            )
            .await
        }
    }
}
