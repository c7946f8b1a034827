//! [`MembershipOracle`] backed by the Bot API `getChatMember` call.

use async_trait::async_trait;
use gatebot_core::{ChannelRef, MembershipError, MembershipOracle, MembershipStatus};
use teloxide::{
    prelude::*,
    types::{ChatMemberStatus, Recipient},
    ApiError, RequestError,
};
use tracing::instrument;

/// Looks up channel membership through teloxide. One request per call; nothing is cached.
pub struct TelegramMembershipOracle {
    bot: teloxide::Bot,
}

impl TelegramMembershipOracle {
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

fn recipient(channel: &ChannelRef) -> Recipient {
    match channel {
        ChannelRef::Id(id) => Recipient::Id(ChatId(*id)),
        ChannelRef::Username(name) => Recipient::ChannelUsername(name.clone()),
    }
}

/// Maps teloxide's member status onto the core enum.
pub fn map_member_status(status: ChatMemberStatus) -> MembershipStatus {
    #[allow(unreachable_patterns)]
    match status {
        ChatMemberStatus::Owner => MembershipStatus::Owner,
        ChatMemberStatus::Administrator => MembershipStatus::Administrator,
        ChatMemberStatus::Member => MembershipStatus::Member,
        ChatMemberStatus::Restricted => MembershipStatus::Restricted,
        ChatMemberStatus::Left => MembershipStatus::Left,
        ChatMemberStatus::Banned => MembershipStatus::Kicked,
        _ => MembershipStatus::Unknown,
    }
}

/// Tags a failed `getChatMember` request. API errors teloxide does not know arrive as
/// `ApiError::Unknown(description)` and are matched on their text.
pub fn classify_request_error(err: &RequestError) -> MembershipError {
    match err {
        RequestError::Api(ApiError::UserNotFound) => MembershipError::UserNotFound,
        RequestError::Api(ApiError::ChatNotFound) => MembershipError::ChatNotFound(err.to_string()),
        RequestError::Api(ApiError::Unknown(description)) => {
            let lower = description.to_lowercase();
            if lower.contains("user not found") {
                MembershipError::UserNotFound
            } else if lower.contains("chat not found") {
                MembershipError::ChatNotFound(description.clone())
            } else {
                MembershipError::Other(description.clone())
            }
        }
        other => MembershipError::Other(other.to_string()),
    }
}

#[async_trait]
impl MembershipOracle for TelegramMembershipOracle {
    #[instrument(skip(self), fields(channel = %channel))]
    async fn check_membership(
        &self,
        user_id: i64,
        channel: &ChannelRef,
    ) -> Result<MembershipStatus, MembershipError> {
        let member = self
            .bot
            .get_chat_member(recipient(channel), UserId(user_id as u64))
            .await
            .map_err(|e| classify_request_error(&e))?;
        Ok(map_member_status(member.status()))
    }
}
