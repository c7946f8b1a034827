//! Adapters from Telegram (teloxide) types to gatebot_core types.
//! Depends only on teloxide and gatebot_core type definitions.

use gatebot_core::{
    CallbackAction, Chat, Event, Message, MessageRef, ToCoreEvent, ToCoreUser, User,
};

/// Wraps a teloxide User for conversion to core [`User`].
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> ToCoreUser for TelegramUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
        }
    }
}

fn core_chat(chat: &teloxide::types::Chat) -> Chat {
    let chat_type = if chat.is_private() {
        "private"
    } else if chat.is_channel() {
        "channel"
    } else if chat.is_supergroup() {
        "supergroup"
    } else {
        "group"
    };
    Chat {
        id: chat.id.0,
        chat_type: chat_type.to_string(),
    }
}

/// Wraps a teloxide Message for conversion to a core [`Event::Message`].
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> ToCoreEvent for TelegramMessageWrapper<'a> {
    fn to_core(&self) -> Event {
        Event::Message(Message {
            id: self.0.id.to_string(),
            user: self.0.from.as_ref().map(|u| TelegramUserWrapper(u).to_core()),
            chat: core_chat(&self.0.chat),
            text: self.0.text().map(|s| s.to_string()),
            created_at: self.0.date,
        })
    }
}

/// Wraps a teloxide CallbackQuery (inline button press) for conversion to a core [`Event::Callback`].
pub struct TelegramCallbackWrapper<'a>(pub &'a teloxide::types::CallbackQuery);

impl<'a> ToCoreEvent for TelegramCallbackWrapper<'a> {
    fn to_core(&self) -> Event {
        let query = self.0;
        Event::Callback(CallbackAction {
            id: query.id.0.clone(),
            user: TelegramUserWrapper(&query.from).to_core(),
            data: query.data.clone(),
            message: query.message.as_ref().map(|m| MessageRef {
                chat: core_chat(m.chat()),
                message_id: m.id().to_string(),
            }),
        })
    }
}
