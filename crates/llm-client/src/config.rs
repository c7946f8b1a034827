//! LLM configuration: trait and env-based implementation.

use std::env;

/// LLM configuration interface for the Gemini API.
pub trait LlmConfig: Send + Sync {
    fn api_key(&self) -> &str;
    fn base_url(&self) -> &str;
    fn model(&self) -> &str;
}

/// LLM config loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvLlmConfig {
    pub gemini_api_key: String,
    pub gemini_base_url: String,
    pub gemini_model: String,
}

impl LlmConfig for EnvLlmConfig {
    fn api_key(&self) -> &str {
        &self.gemini_api_key
    }
    fn base_url(&self) -> &str {
        &self.gemini_base_url
    }
    fn model(&self) -> &str {
        &self.gemini_model
    }
}

impl EnvLlmConfig {
    /// Load from environment variables. Returns None when GEMINI_API_KEY is unset or blank:
    /// completion is an optional capability and its absence only disables prompt replies.
    pub fn from_env() -> Option<Self> {
        let gemini_api_key = env::var("GEMINI_API_KEY")
            .ok()
            .filter(|s| !s.trim().is_empty())?;
        let gemini_base_url = env::var("GEMINI_BASE_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| gemini_client::DEFAULT_BASE_URL.to_string());
        let gemini_model = env::var("GEMINI_MODEL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| gemini_client::DEFAULT_MODEL.to_string());
        Some(Self {
            gemini_api_key,
            gemini_base_url,
            gemini_model,
        })
    }
}
