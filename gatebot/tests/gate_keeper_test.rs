//! GateKeeper: bypass mode, status mapping, fail-closed error handling.

mod common;

use std::io;
use std::sync::{Arc, Mutex};

use common::{init_tracing, MockOracle, CHANNEL, USER_ID};
use gatebot::config::GateConfig;
use gatebot::{AccessDecision, GateKeeper};
use gatebot_core::{ChannelRef, MembershipError, MembershipStatus};
use tracing_subscriber::fmt;

/// In-memory log sink shared between the subscriber and the test.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn gated(oracle: Arc<MockOracle>) -> GateKeeper {
    init_tracing();
    let config = GateConfig {
        channel: Some(ChannelRef::Id(CHANNEL)),
        invite_link: None,
    };
    GateKeeper::new(&config, oracle)
}

/// **Test: Without a channel every user is allowed and the oracle is never consulted.**
#[tokio::test]
async fn test_bypass_allows_without_lookup() {
    init_tracing();
    let oracle = Arc::new(MockOracle::status(MembershipStatus::Kicked));
    let gate = GateKeeper::new(&GateConfig::default(), oracle.clone());

    assert!(gate.channel().is_none());
    for user_id in [1, USER_ID, i64::MAX] {
        assert_eq!(gate.decide(user_id).await, AccessDecision::Allowed);
    }
    assert_eq!(oracle.calls(), 0);
}

#[tokio::test]
async fn test_member_equivalent_statuses_are_allowed() {
    for status in [
        MembershipStatus::Member,
        MembershipStatus::Administrator,
        MembershipStatus::Owner,
    ] {
        let oracle = Arc::new(MockOracle::status(status));
        let gate = gated(oracle.clone());
        assert_eq!(gate.decide(USER_ID).await, AccessDecision::Allowed, "{status:?}");
        assert_eq!(oracle.calls(), 1);
    }
}

#[tokio::test]
async fn test_other_statuses_are_blocked() {
    for status in [
        MembershipStatus::Left,
        MembershipStatus::Kicked,
        MembershipStatus::Restricted,
        MembershipStatus::Unknown,
    ] {
        let gate = gated(Arc::new(MockOracle::status(status)));
        assert_eq!(gate.decide(USER_ID).await, AccessDecision::Blocked, "{status:?}");
    }
}

/// **Test: Every lookup failure fails closed.**
#[tokio::test]
async fn test_lookup_errors_are_blocked() {
    let errors = [
        MembershipError::UserNotFound,
        MembershipError::ChatNotFound("Bad Request: chat not found".to_string()),
        MembershipError::Other("timeout".to_string()),
    ];
    for err in errors {
        let gate = gated(Arc::new(MockOracle::error(err.clone())));
        assert_eq!(gate.decide(USER_ID).await, AccessDecision::Blocked, "{err:?}");
    }
}

/// **Test: Decisions are not cached; each call performs a fresh lookup.**
#[tokio::test]
async fn test_each_decision_is_a_fresh_lookup() {
    let oracle = Arc::new(MockOracle::status(MembershipStatus::Member));
    let gate = gated(oracle.clone());

    let first = gate.decide(USER_ID).await;
    let second = gate.decide(USER_ID).await;

    assert_eq!(first, second);
    assert!(first.is_allowed());
    assert_eq!(oracle.calls(), 2);
}

/// **Test: Bypass mode is logged once when the gate is built, not on every decision.**
#[tokio::test]
async fn test_bypass_warning_logged_once() {
    let logs = LogBuffer::default();
    let writer = logs.clone();
    let subscriber = fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let oracle = Arc::new(MockOracle::status(MembershipStatus::Member));
    let gate = GateKeeper::new(&GateConfig::default(), oracle);
    for user_id in 0..5 {
        assert!(gate.decide(user_id).await.is_allowed());
    }

    assert_eq!(logs.contents().matches("CHANNEL_ID is not set").count(), 1);
}
