//! Channel membership: status values, channel references, and the [`MembershipOracle`] trait.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::MembershipError;

/// Membership status as reported by the messaging platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MembershipStatus {
    Member,
    Administrator,
    Owner,
    Restricted,
    Left,
    Kicked,
    Unknown,
}

impl MembershipStatus {
    /// Parses a Bot API status string (`member`, `administrator`, `creator`, `restricted`, `left`, `kicked`).
    pub fn from_api_str(status: &str) -> Self {
        match status {
            "member" => MembershipStatus::Member,
            "administrator" => MembershipStatus::Administrator,
            "creator" => MembershipStatus::Owner,
            "restricted" => MembershipStatus::Restricted,
            "left" => MembershipStatus::Left,
            "kicked" => MembershipStatus::Kicked,
            _ => MembershipStatus::Unknown,
        }
    }

    /// True for statuses that grant access: member, administrator, owner.
    pub fn is_member_equivalent(self) -> bool {
        matches!(
            self,
            MembershipStatus::Member | MembershipStatus::Administrator | MembershipStatus::Owner
        )
    }
}

/// Gated channel: numeric chat id (`-100…`) or public `@username`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelRef {
    Id(i64),
    Username(String),
}

impl ChannelRef {
    /// Parses a configured channel identifier. Blank input means "no channel" and yields None.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        match raw.parse::<i64>() {
            Ok(id) => Some(ChannelRef::Id(id)),
            Err(_) if raw.starts_with('@') => Some(ChannelRef::Username(raw.to_string())),
            Err(_) => Some(ChannelRef::Username(format!("@{}", raw))),
        }
    }
}

impl fmt::Display for ChannelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelRef::Id(id) => write!(f, "{}", id),
            ChannelRef::Username(name) => f.write_str(name),
        }
    }
}

/// Read-only membership lookup against the messaging platform. One remote call per invocation, no caching.
#[async_trait]
pub trait MembershipOracle: Send + Sync {
    async fn check_membership(
        &self,
        user_id: i64,
        channel: &ChannelRef,
    ) -> std::result::Result<MembershipStatus, MembershipError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_equivalent_statuses() {
        for s in ["member", "administrator", "creator"] {
            assert!(MembershipStatus::from_api_str(s).is_member_equivalent(), "{s}");
        }
    }

    #[test]
    fn test_non_member_statuses() {
        for s in ["left", "kicked", "restricted", "", "banned?"] {
            assert!(!MembershipStatus::from_api_str(s).is_member_equivalent(), "{s}");
        }
        assert_eq!(MembershipStatus::from_api_str("kicked"), MembershipStatus::Kicked);
        assert_eq!(MembershipStatus::from_api_str("whatever"), MembershipStatus::Unknown);
    }

    #[test]
    fn test_channel_ref_parse() {
        assert_eq!(ChannelRef::parse(""), None);
        assert_eq!(ChannelRef::parse("   "), None);
        assert_eq!(
            ChannelRef::parse("-1001234567890"),
            Some(ChannelRef::Id(-1001234567890))
        );
        assert_eq!(
            ChannelRef::parse("@my_channel"),
            Some(ChannelRef::Username("@my_channel".to_string()))
        );
        assert_eq!(
            ChannelRef::parse("my_channel"),
            Some(ChannelRef::Username("@my_channel".to_string()))
        );
    }

    #[test]
    fn test_channel_ref_display() {
        assert_eq!(ChannelRef::Id(-42).to_string(), "-42");
        assert_eq!(ChannelRef::Username("@c".to_string()).to_string(), "@c");
    }
}
