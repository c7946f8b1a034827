//! Channel gate: turns a membership lookup into an [`AccessDecision`].
//!
//! Every inbound event gets a fresh decision; nothing about a user is remembered. With no channel
//! configured the gate is open to everyone (bypass mode), so access control is only as strong as
//! the deployment's configuration.

mod keeper;

pub use keeper::{AccessDecision, GateKeeper};
