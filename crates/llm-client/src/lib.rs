//! # LLM client abstraction
//!
//! Defines the [`LlmClient`] trait and a Gemini implementation. Transport-agnostic;
//! used by the gatebot prompt responder, which only ever sends a single prompt.

use anyhow::Result;
use async_trait::async_trait;

mod config;
mod gemini_llm;

pub use config::{EnvLlmConfig, LlmConfig};
pub use gemini_llm::GeminiLlmClient;

/// LLM client interface: one prompt in, one reply out.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Returns the model reply text for `prompt`. No history, no system instruction.
    async fn get_llm_response(&self, prompt: &str) -> Result<String>;
}
