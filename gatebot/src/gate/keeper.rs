//! Gate keeper: one membership lookup per call, fail closed on every error.

use std::sync::Arc;

use gatebot_core::{ChannelRef, MembershipError, MembershipOracle};
use tracing::{error, info, instrument, warn};

use crate::config::GateConfig;

/// Outcome of a gate check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Allowed,
    Blocked,
}

impl AccessDecision {
    pub fn is_allowed(self) -> bool {
        self == AccessDecision::Allowed
    }
}

/// Decides whether a user may use the bot. Holds only immutable config and the oracle.
#[derive(Clone)]
pub struct GateKeeper {
    channel: Option<ChannelRef>,
    oracle: Arc<dyn MembershipOracle>,
}

impl GateKeeper {
    /// Creates the gate. Bypass mode (no channel) is logged here, once per process, not per request.
    pub fn new(gate: &GateConfig, oracle: Arc<dyn MembershipOracle>) -> Self {
        match gate.channel {
            None => warn!("CHANNEL_ID is not set. Skipping subscription check and allowing access for everyone"),
            Some(ref channel) => info!(channel = %channel, "Channel gate enabled"),
        }
        Self {
            channel: gate.channel.clone(),
            oracle,
        }
    }

    /// The gated channel, or None in bypass mode.
    pub fn channel(&self) -> Option<&ChannelRef> {
        self.channel.as_ref()
    }

    /// Fresh decision for `user_id`. Member, administrator and owner are allowed; any other
    /// status and every lookup error are blocked.
    #[instrument(skip(self))]
    pub async fn decide(&self, user_id: i64) -> AccessDecision {
        let Some(ref channel) = self.channel else {
            return AccessDecision::Allowed;
        };

        match self.oracle.check_membership(user_id, channel).await {
            Ok(status) if status.is_member_equivalent() => {
                info!(user_id, status = ?status, decision = "allowed", "step: gate decided");
                AccessDecision::Allowed
            }
            Ok(status) => {
                info!(user_id, status = ?status, decision = "blocked", "step: gate decided, not a member");
                AccessDecision::Blocked
            }
            Err(MembershipError::UserNotFound) => {
                warn!(user_id, channel = %channel, "User not found in channel, likely not joined");
                AccessDecision::Blocked
            }
            Err(MembershipError::ChatNotFound(detail)) => {
                error!(
                    severity = "critical",
                    user_id,
                    channel = %channel,
                    error = %detail,
                    "Channel not found while checking membership. Check that CHANNEL_ID is correct and the bot is an admin of the channel"
                );
                AccessDecision::Blocked
            }
            Err(MembershipError::Other(detail)) => {
                error!(user_id, channel = %channel, error = %detail, "Error checking channel membership");
                AccessDecision::Blocked
            }
        }
    }
}
