use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatebotError {
    #[error("Bot error: {0}")]
    Bot(String),
}

/// Tagged failure of a membership lookup. Every variant means "not allowed" to the gate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MembershipError {
    /// The user has never been in the channel (or the API cannot see them).
    #[error("user not found in chat")]
    UserNotFound,

    /// Wrong channel id, or the bot is not an administrator of the channel.
    #[error("chat not found: {0}")]
    ChatNotFound(String),

    #[error("membership lookup failed: {0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, GatebotError>;
