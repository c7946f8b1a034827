//! Dispatcher: classifies each inbound event and runs the matching gated flow.
//!
//! | kind      | gate allowed                         | gate blocked            |
//! |-----------|--------------------------------------|-------------------------|
//! | `Start`   | welcome back                         | wall                    |
//! | `Prompt`  | LLM reply (or "unavailable")         | wall, no LLM call       |
//! | `Recheck` | ack, then wall → confirmation        | ack, then alert         |
//! | `Ignored` | nothing                              | nothing                 |

use std::sync::Arc;

use async_trait::async_trait;
use gatebot_core::{
    Bot, CallbackAction, Event, Handler, HandlerResponse, Message, Result,
};
use tracing::{debug, info, instrument, warn};

use crate::gate::{AccessDecision, GateKeeper};
use crate::responder::{
    chunk_message, PromptResponder, SERVICE_UNAVAILABLE_REPLY, TELEGRAM_MAX_MESSAGE_LEN,
};
use crate::wall::{WallPresenter, CHECKING_ACK_TEXT, CHECK_JOIN_DATA};

/// Reply to `/start` from a user who already passes the gate (HTML).
pub const WELCOME_BACK_TEXT: &str =
    "👋 <b>Welcome back!</b>\n\nYou're all set. Just send your question.";

/// Why an event is not handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Message without a sender (anonymous channel post).
    NoSender,
    /// Media or service message.
    NonText,
    EmptyText,
    /// A command other than /start.
    OtherCommand,
    /// `/start@other_bot` in a group.
    CommandForOtherBot,
    /// Button press with data other than `check_join`.
    UnknownAction,
}

/// Classification of one inbound event. Every event maps to exactly one kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind<'a> {
    Start,
    Prompt(&'a str),
    Recheck,
    Ignored(IgnoreReason),
}

/// Total classification of `event`. `bot_username` (without `@`) disambiguates `/start@name`;
/// when unknown, any addressee is accepted.
pub fn classify<'a>(event: &'a Event, bot_username: Option<&str>) -> EventKind<'a> {
    match event {
        Event::Callback(callback) => match callback.data.as_deref() {
            Some(CHECK_JOIN_DATA) => EventKind::Recheck,
            _ => EventKind::Ignored(IgnoreReason::UnknownAction),
        },
        Event::Message(message) => {
            if message.user.is_none() {
                return EventKind::Ignored(IgnoreReason::NoSender);
            }
            let Some(text) = message.text.as_deref() else {
                return EventKind::Ignored(IgnoreReason::NonText);
            };
            if text.trim().is_empty() {
                return EventKind::Ignored(IgnoreReason::EmptyText);
            }
            if !text.starts_with('/') {
                return EventKind::Prompt(text);
            }
            classify_command(text, bot_username)
        }
    }
}

fn classify_command(text: &str, bot_username: Option<&str>) -> EventKind<'static> {
    let token = text.split_whitespace().next().unwrap_or_default();
    let token = &token[1..];
    let (name, addressee) = match token.split_once('@') {
        Some((name, addressee)) => (name, Some(addressee)),
        None => (token, None),
    };
    if !name.eq_ignore_ascii_case("start") {
        return EventKind::Ignored(IgnoreReason::OtherCommand);
    }
    match (addressee, bot_username) {
        (Some(to), Some(me)) if !to.eq_ignore_ascii_case(me) => {
            EventKind::Ignored(IgnoreReason::CommandForOtherBot)
        }
        _ => EventKind::Start,
    }
}

/// The bot's [`Handler`]: gate check per event, then welcome / LLM reply / wall / re-check.
pub struct GateDispatcher {
    bot: Arc<dyn Bot>,
    gate: GateKeeper,
    wall: WallPresenter,
    /// None when no LLM is configured.
    responder: Option<PromptResponder>,
    bot_username: Option<String>,
}

impl GateDispatcher {
    pub fn new(
        bot: Arc<dyn Bot>,
        gate: GateKeeper,
        wall: WallPresenter,
        responder: Option<PromptResponder>,
    ) -> Self {
        Self {
            bot,
            gate,
            wall,
            responder,
            bot_username: None,
        }
    }

    /// Sets the username used to recognise `/start@<bot>`.
    pub fn with_bot_username(mut self, username: Option<String>) -> Self {
        self.bot_username = username.map(|u| u.trim_start_matches('@').to_string());
        self
    }

    async fn handle_start(&self, message: &Message, user_id: i64) -> Result<HandlerResponse> {
        match self.gate.decide(user_id).await {
            AccessDecision::Allowed => {
                self.bot
                    .send_html(&message.chat, WELCOME_BACK_TEXT, None)
                    .await?;
                Ok(HandlerResponse::Reply(WELCOME_BACK_TEXT.to_string()))
            }
            AccessDecision::Blocked => {
                self.wall.present(&message.chat).await?;
                Ok(HandlerResponse::Wall)
            }
        }
    }

    async fn handle_prompt(
        &self,
        message: &Message,
        user_id: i64,
        text: &str,
    ) -> Result<HandlerResponse> {
        if self.gate.decide(user_id).await == AccessDecision::Blocked {
            self.wall.present(&message.chat).await?;
            return Ok(HandlerResponse::Wall);
        }

        let reply = match self.responder {
            Some(ref responder) => responder.respond(&message.chat, text).await,
            None => {
                warn!(user_id, "LLM not configured, replying with service unavailable");
                SERVICE_UNAVAILABLE_REPLY.to_string()
            }
        };

        for chunk in chunk_message(&reply, TELEGRAM_MAX_MESSAGE_LEN) {
            self.bot.reply_to(message, &chunk).await?;
        }
        Ok(HandlerResponse::Reply(reply))
    }

    async fn handle_recheck(&self, callback: &CallbackAction) -> Result<HandlerResponse> {
        if let Err(e) = self
            .bot
            .answer_callback(&callback.id, CHECKING_ACK_TEXT, false)
            .await
        {
            warn!(error = %e, user_id = callback.user.id, "Failed to acknowledge re-check");
        }

        match self.gate.decide(callback.user.id).await {
            AccessDecision::Allowed => {
                self.wall.confirm(callback).await?;
                Ok(HandlerResponse::Verified)
            }
            AccessDecision::Blocked => {
                // Telegram may refuse a second answer to the same press; the wall stays usable either way.
                if let Err(e) = self.wall.reject(callback).await {
                    warn!(error = %e, user_id = callback.user.id, "Failed to show not-a-member alert");
                }
                Ok(HandlerResponse::NotYetMember)
            }
        }
    }
}

#[async_trait]
impl Handler for GateDispatcher {
    #[instrument(skip(self, event), fields(user_id = ?event.user_id(), chat_id = event.chat_id()))]
    async fn handle(&self, event: &Event) -> Result<HandlerResponse> {
        let kind = classify(event, self.bot_username.as_deref());
        info!(kind = kind_name(&kind), "step: event classified");

        match (kind, event) {
            (EventKind::Start, Event::Message(message)) => {
                let user_id = sender_id(message);
                self.handle_start(message, user_id).await
            }
            (EventKind::Prompt(text), Event::Message(message)) => {
                let user_id = sender_id(message);
                self.handle_prompt(message, user_id, text).await
            }
            (EventKind::Recheck, Event::Callback(callback)) => self.handle_recheck(callback).await,
            (EventKind::Ignored(reason), _) => {
                debug!(reason = ?reason, "Event ignored");
                Ok(HandlerResponse::Ignore)
            }
            // classify never pairs a message kind with a callback or vice versa.
            _ => Ok(HandlerResponse::Ignore),
        }
    }
}

fn kind_name(kind: &EventKind<'_>) -> &'static str {
    match kind {
        EventKind::Start => "Start",
        EventKind::Prompt(_) => "Prompt",
        EventKind::Recheck => "Recheck",
        EventKind::Ignored(_) => "Ignored",
    }
}

/// Sender id of a message that `classify` accepted (it rejects sender-less messages).
fn sender_id(message: &Message) -> i64 {
    message.user.as_ref().map(|u| u.id).unwrap_or_default()
}
