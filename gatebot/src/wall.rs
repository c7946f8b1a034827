//! The membership wall: onboarding message for non-members with a join link and a re-check button.

use std::sync::Arc;

use gatebot_core::{Bot, CallbackAction, Chat, InlineKeyboard, KeyboardButton, Result};
use tracing::{info, instrument};

/// Callback data carried by the re-check button.
pub const CHECK_JOIN_DATA: &str = "check_join";

pub const JOIN_BUTTON_TEXT: &str = "🔗 Join Channel";
pub const CHECK_BUTTON_TEXT: &str = "✅ I have joined";

/// Onboarding message (HTML).
pub const WALL_TEXT: &str = "👋 <b>Welcome to the free Gemini Bot!</b>\n\n\
To use this bot for free, you are required to join our official channel.\n\n\
<b>Why join?</b>\n\n\
1️⃣ It <b>unlocks</b> your free access to the bot.\n\n\
2️⃣ You'll <b>discover</b> our other free bots.\n\n\
3️⃣ You'll get all <b>updates</b> and support alerts.\n\n\n\
Please join the channel, then return here and press the button below.";

/// Replaces the wall once a re-check succeeds (HTML).
pub const VERIFIED_TEXT: &str = "🎉 <b>Verification Complete!</b>\n\n\
Thank you for joining. Your account is now active.\n\n\
You can now send me any question, and I will answer using Gemini.";

/// Toast shown as soon as the re-check button is pressed.
pub const CHECKING_ACK_TEXT: &str = "Checking your membership...";

/// Alert shown when a re-check finds the user still outside the channel.
pub const NOT_MEMBER_ALERT_TEXT: &str =
    "Please subscribe to the channel to be allowed to use the bot.";

/// Sends the wall and performs its two transitions (verified / still not a member).
#[derive(Clone)]
pub struct WallPresenter {
    bot: Arc<dyn Bot>,
    invite_link: Option<String>,
}

impl WallPresenter {
    pub fn new(bot: Arc<dyn Bot>, invite_link: Option<String>) -> Self {
        Self { bot, invite_link }
    }

    /// One row: join link (when an invite link is configured) and the re-check button.
    pub fn keyboard(&self) -> InlineKeyboard {
        let mut row = Vec::with_capacity(2);
        if let Some(ref url) = self.invite_link {
            row.push(KeyboardButton::Url {
                text: JOIN_BUTTON_TEXT.to_string(),
                url: url.clone(),
            });
        }
        row.push(KeyboardButton::Callback {
            text: CHECK_BUTTON_TEXT.to_string(),
            data: CHECK_JOIN_DATA.to_string(),
        });
        InlineKeyboard::new(vec![row])
    }

    /// Sends the wall message with its buttons to `chat`.
    #[instrument(skip(self, chat), fields(chat_id = chat.id))]
    pub async fn present(&self, chat: &Chat) -> Result<()> {
        info!("step: showing membership wall");
        self.bot
            .send_html(chat, WALL_TEXT, Some(&self.keyboard()))
            .await
    }

    /// Replaces the wall carrying the pressed button with the confirmation, dropping both buttons.
    /// When Telegram no longer exposes that message, the confirmation goes to the presser's private chat.
    #[instrument(skip(self, callback), fields(user_id = callback.user.id))]
    pub async fn confirm(&self, callback: &CallbackAction) -> Result<()> {
        match callback.message {
            Some(ref target) => self.bot.edit_message_html(target, VERIFIED_TEXT).await,
            None => {
                self.bot
                    .send_html(&Chat::private(callback.user.id), VERIFIED_TEXT, None)
                    .await
            }
        }
    }

    /// Transient alert; the wall message is left untouched so its buttons stay usable.
    ///
    /// Best effort: the press was already acknowledged, and Telegram usually refuses a second
    /// answer to the same callback query.
    pub async fn reject(&self, callback: &CallbackAction) -> Result<()> {
        self.bot
            .answer_callback(&callback.id, NOT_MEMBER_ALERT_TEXT, true)
            .await
    }
}
