//! Wraps teloxide::Bot and implements [`gatebot_core::Bot`]. Production code talks to Telegram; tests substitute another Bot impl.

use async_trait::async_trait;
use gatebot_core::{
    parse_message_id, Bot as CoreBot, Chat, GatebotError, InlineKeyboard, KeyboardButton,
    Message, MessageRef, Result,
};
use teloxide::{
    prelude::*,
    types::{
        CallbackQueryId, ChatAction, ChatId, InlineKeyboardButton, InlineKeyboardMarkup,
        MessageId, ParseMode,
    },
};

/// Thin wrapper around teloxide::Bot that implements gatebot-core's Bot trait.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

fn bot_err(e: teloxide::RequestError) -> GatebotError {
    GatebotError::Bot(e.to_string())
}

/// Converts a core keyboard into Telegram inline markup. Fails on a URL button with an unparsable link.
pub fn to_inline_markup(keyboard: &InlineKeyboard) -> Result<InlineKeyboardMarkup> {
    let mut rows = Vec::with_capacity(keyboard.rows.len());
    for row in &keyboard.rows {
        let mut buttons = Vec::with_capacity(row.len());
        for button in row {
            buttons.push(match button {
                KeyboardButton::Url { text, url } => {
                    let url = reqwest::Url::parse(url).map_err(|e| {
                        GatebotError::Bot(format!("Invalid button URL {}: {}", url, e))
                    })?;
                    InlineKeyboardButton::url(text.clone(), url)
                }
                KeyboardButton::Callback { text, data } => {
                    InlineKeyboardButton::callback(text.clone(), data.clone())
                }
            });
        }
        rows.push(buttons);
    }
    Ok(InlineKeyboardMarkup::new(rows))
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .await
            .map_err(bot_err)?;
        Ok(())
    }

    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.send_message(&message.chat, text).await
    }

    async fn send_html(
        &self,
        chat: &Chat,
        html: &str,
        keyboard: Option<&InlineKeyboard>,
    ) -> Result<()> {
        let mut request = self
            .bot
            .send_message(ChatId(chat.id), html.to_string())
            .parse_mode(ParseMode::Html);
        if let Some(keyboard) = keyboard {
            request = request.reply_markup(to_inline_markup(keyboard)?);
        }
        request.await.map_err(bot_err)?;
        Ok(())
    }

    async fn edit_message_html(&self, target: &MessageRef, html: &str) -> Result<()> {
        let id = parse_message_id(&target.message_id)?;
        // No reply_markup on the edit: Telegram drops the existing inline keyboard.
        self.bot
            .edit_message_text(ChatId(target.chat.id), MessageId(id), html.to_string())
            .parse_mode(ParseMode::Html)
            .await
            .map_err(bot_err)?;
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str, text: &str, show_alert: bool) -> Result<()> {
        self.bot
            .answer_callback_query(CallbackQueryId(callback_id.to_string()))
            .text(text.to_string())
            .show_alert(show_alert)
            .await
            .map_err(bot_err)?;
        Ok(())
    }

    async fn send_typing(&self, chat: &Chat) -> Result<()> {
        self.bot
            .send_chat_action(ChatId(chat.id), ChatAction::Typing)
            .await
            .map_err(bot_err)?;
        Ok(())
    }
}
