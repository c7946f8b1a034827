//! Long-polling runner: converts teloxide updates to core events and passes them to the [`Handler`].
//! Messages and callback queries are routed; every other update kind is dropped at debug level.

use std::sync::Arc;

use anyhow::Result;
use gatebot_core::{Event, Handler, ToCoreEvent};
use teloxide::{dispatching::UpdateFilterExt, prelude::*};
use tracing::{debug, error, info, instrument};

use super::adapters::{TelegramCallbackWrapper, TelegramMessageWrapper};

/// Calls get_me and returns the bot's username, used to recognise `/start@<bot>` in groups.
pub async fn fetch_bot_username(bot: &teloxide::Bot) -> Option<String> {
    match bot.get_me().await {
        Ok(me) => {
            let username = me.user.username.clone();
            if let Some(ref name) = username {
                info!(username = %name, "Bot username resolved");
            }
            username
        }
        Err(e) => {
            error!(error = %e, "get_me failed; commands addressed to other bots cannot be told apart");
            None
        }
    }
}

/// Runs one event through the handler and logs the outcome. Handler errors are logged, never propagated:
/// one failed event must not stop the dispatcher.
#[instrument(skip(handler, event), fields(user_id = ?event.user_id(), chat_id = event.chat_id()))]
pub async fn dispatch_event(handler: &dyn Handler, event: Event) {
    match &event {
        Event::Message(m) => info!(has_text = m.text.is_some(), "Received message"),
        Event::Callback(c) => info!(data = ?c.data, "Received callback query"),
    }

    match handler.handle(&event).await {
        Ok(response) => info!(response_type = %response.kind(), "step: event handled"),
        Err(e) => error!(error = %e, "Handler failed"),
    }
}

async fn on_message(msg: Message, handler: Arc<dyn Handler>) -> ResponseResult<()> {
    let event = TelegramMessageWrapper(&msg).to_core();
    dispatch_event(handler.as_ref(), event).await;
    Ok(())
}

async fn on_callback_query(query: CallbackQuery, handler: Arc<dyn Handler>) -> ResponseResult<()> {
    let event = TelegramCallbackWrapper(&query).to_core();
    dispatch_event(handler.as_ref(), event).await;
    Ok(())
}

/// Starts long polling with the given teloxide Bot and handler. Returns when the dispatcher stops (Ctrl-C).
#[instrument(skip(bot, handler))]
pub async fn run_dispatcher(bot: teloxide::Bot, handler: Arc<dyn Handler>) -> Result<()> {
    let schema = dptree::entry()
        .branch(Update::filter_message().endpoint(on_message))
        .branch(Update::filter_callback_query().endpoint(on_callback_query));

    info!("Telegram bot is running using long polling");

    Dispatcher::builder(bot, schema)
        .dependencies(dptree::deps![handler])
        .default_handler(|update| async move {
            debug!(update_id = ?update.id, "Unhandled update ignored");
        })
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
