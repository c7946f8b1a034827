//! Gate config: which channel users must join, and the invite link shown on the wall.

use anyhow::Result;
use gatebot_core::ChannelRef;
use std::env;

/// Immutable gate settings, fixed at process start.
///
/// `channel == None` switches the gate to bypass mode: everyone is allowed. This is a deliberate
/// convenience for deployments without a channel, and makes access control best effort only.
#[derive(Debug, Clone, Default)]
pub struct GateConfig {
    /// CHANNEL_ID: numeric chat id or @username
    pub channel: Option<ChannelRef>,
    /// CHANNEL_INVITE_LINK
    pub invite_link: Option<String>,
}

impl GateConfig {
    /// Load from CHANNEL_ID and CHANNEL_INVITE_LINK. Blank values count as unset.
    pub fn from_env() -> Self {
        let channel = env::var("CHANNEL_ID")
            .ok()
            .and_then(|raw| ChannelRef::parse(&raw));
        let invite_link = env::var("CHANNEL_INVITE_LINK")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        Self {
            channel,
            invite_link,
        }
    }

    /// True when no channel is configured.
    pub fn is_bypass(&self) -> bool {
        self.channel.is_none()
    }

    /// The invite link is required (and must be a URL) whenever a channel is set.
    pub fn validate(&self) -> Result<()> {
        if self.channel.is_none() {
            return Ok(());
        }
        match self.invite_link {
            None => anyhow::bail!("CHANNEL_INVITE_LINK not set: it is required when CHANNEL_ID is set"),
            Some(ref link) if reqwest::Url::parse(link).is_err() => {
                anyhow::bail!("CHANNEL_INVITE_LINK is set but not a valid URL: {}", link)
            }
            Some(_) => Ok(()),
        }
    }
}
