//! # gatebot-core
//!
//! Core types and traits for the channel-gated bot: [`Bot`], [`Handler`], [`MembershipOracle`], inbound
//! [`Event`]s, and tracing initialization. Transport-agnostic; used by gatebot-telegram and gatebot.

pub mod bot;
pub mod error;
pub mod logger;
pub mod membership;
pub mod types;

pub use bot::{parse_message_id, Bot};
pub use error::{GatebotError, MembershipError, Result};
pub use logger::init_tracing;
pub use membership::{ChannelRef, MembershipOracle, MembershipStatus};
pub use types::{
    CallbackAction, Chat, Event, Handler, HandlerResponse, InlineKeyboard, KeyboardButton,
    Message, MessageRef, ToCoreEvent, ToCoreUser, User,
};
