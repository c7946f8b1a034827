//! # gatebot-telegram
//!
//! Telegram transport layer: update adapters, [`gatebot_core::Bot`] and [`gatebot_core::MembershipOracle`]
//! implementations, and the long-polling runner. No gating or AI logic lives here.

mod adapters;
mod bot_adapter;
mod membership;
mod runner;

pub use adapters::{TelegramCallbackWrapper, TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::{to_inline_markup, TelegramBotAdapter};
pub use membership::{classify_request_error, map_member_status, TelegramMembershipOracle};
pub use runner::{dispatch_event, fetch_bot_username, run_dispatcher};
