//! Bot abstraction for the outbound side: send, edit, answer button presses, chat actions.
//!
//! [`Bot`] is transport-agnostic; `gatebot-telegram` implements it via teloxide and tests substitute recording mocks.

use crate::error::{GatebotError, Result};
use crate::types::{Chat, InlineKeyboard, Message, MessageRef};
use async_trait::async_trait;

/// Abstraction for outbound messaging operations. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a plain-text message (no parse mode, content untouched).
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;
    /// Sends a plain-text reply into the chat of `message`.
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()>;
    /// Sends an HTML-formatted message, optionally with an inline keyboard.
    async fn send_html(
        &self,
        chat: &Chat,
        html: &str,
        keyboard: Option<&InlineKeyboard>,
    ) -> Result<()>;
    /// Replaces the text of an already-sent message. The edited message carries no keyboard.
    async fn edit_message_html(&self, target: &MessageRef, html: &str) -> Result<()>;
    /// Answers a button press with a toast, or a modal alert when `show_alert` is set.
    async fn answer_callback(&self, callback_id: &str, text: &str, show_alert: bool) -> Result<()>;
    /// Shows the transient "typing…" indicator in `chat`.
    async fn send_typing(&self, chat: &Chat) -> Result<()>;
}

/// Parses a message id string into an i32. Used by edit_message_html.
pub fn parse_message_id(s: &str) -> Result<i32> {
    s.parse()
        .map_err(|_| GatebotError::Bot(format!("Invalid message_id for edit: {}", s)))
}
