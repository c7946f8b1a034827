//! Core types: user, chat, inbound events, inline keyboards, handler response, and Handler trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User identity (id, username, names).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Chat (channel, group or private) identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chat {
    pub id: i64,
    pub chat_type: String,
}

impl Chat {
    /// The private chat between the bot and `user_id` (Telegram uses the user id as chat id).
    pub fn private(user_id: i64) -> Self {
        Self {
            id: user_id,
            chat_type: "private".to_string(),
        }
    }
}

/// An inbound message. `user` is None for anonymous channel posts; `text` is None for media.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: Option<User>,
    pub chat: Chat,
    pub text: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Points at an already-sent message so it can be edited in place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageRef {
    pub chat: Chat,
    /// Transport-specific id (Telegram numeric string).
    pub message_id: String,
}

/// An inline button press.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallbackAction {
    /// Id used to answer the press (toast / alert).
    pub id: String,
    pub user: User,
    pub data: Option<String>,
    /// The message carrying the pressed button; None when Telegram no longer exposes it.
    pub message: Option<MessageRef>,
}

/// Everything the bot can receive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    Message(Message),
    Callback(CallbackAction),
}

impl Event {
    /// Id of the user behind the event, if any.
    pub fn user_id(&self) -> Option<i64> {
        match self {
            Event::Message(m) => m.user.as_ref().map(|u| u.id),
            Event::Callback(c) => Some(c.user.id),
        }
    }

    /// Chat the event came from; for callbacks without an accessible message, the presser's private chat.
    pub fn chat_id(&self) -> i64 {
        match self {
            Event::Message(m) => m.chat.id,
            Event::Callback(c) => c
                .message
                .as_ref()
                .map(|r| r.chat.id)
                .unwrap_or(c.user.id),
        }
    }
}

/// A single inline keyboard button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyboardButton {
    /// Opens an external link.
    Url { text: String, url: String },
    /// Sends `data` back to the bot as a callback.
    Callback { text: String, data: String },
}

/// Rows of inline buttons attached to a message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineKeyboard {
    pub rows: Vec<Vec<KeyboardButton>>,
}

impl InlineKeyboard {
    pub fn new(rows: Vec<Vec<KeyboardButton>>) -> Self {
        Self { rows }
    }
}

/// What a handler did with an event. Logged by the runner and asserted on in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// A text reply was sent; carries the reply body.
    Reply(String),
    /// The membership wall was shown.
    Wall,
    /// A re-check succeeded and the wall was replaced by the confirmation.
    Verified,
    /// A re-check failed; the wall stays.
    NotYetMember,
    /// The event was not one the bot handles.
    Ignore,
}

impl HandlerResponse {
    /// Short name for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            HandlerResponse::Reply(_) => "Reply",
            HandlerResponse::Wall => "Wall",
            HandlerResponse::Verified => "Verified",
            HandlerResponse::NotYetMember => "NotYetMember",
            HandlerResponse::Ignore => "Ignore",
        }
    }
}

/// Converts a transport-specific user type to core [`User`].
pub trait ToCoreUser: Send + Sync {
    fn to_core(&self) -> User;
}

/// Converts a transport-specific update to a core [`Event`].
pub trait ToCoreEvent: Send + Sync {
    fn to_core(&self) -> Event;
}

/// Processes one inbound event. Implementations must not keep per-user state between calls.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, event: &Event) -> crate::error::Result<HandlerResponse>;
}
