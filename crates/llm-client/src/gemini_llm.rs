//! Gemini 实现的 LlmClient：包装 gemini-client，只发送单条用户消息。

use anyhow::Result;
use async_trait::async_trait;
use tracing::instrument;

use super::{LlmClient, LlmConfig};

/// 基于 gemini-client 的 LlmClient 实现。
#[derive(Clone)]
pub struct GeminiLlmClient {
    client: gemini_client::GeminiClient,
    model: String,
}

impl GeminiLlmClient {
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: gemini_client::GeminiClient::with_base_url(api_key, base_url),
            model: gemini_client::DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    /// 由配置构造（api_key、base_url、model）。
    pub fn from_config(config: &dyn LlmConfig) -> Self {
        Self::with_base_url(config.api_key().to_string(), config.base_url().to_string())
            .with_model(config.model().to_string())
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl LlmClient for GeminiLlmClient {
    #[instrument(skip(self, prompt), fields(model = %self.model))]
    async fn get_llm_response(&self, prompt: &str) -> Result<String> {
        Ok(self.client.generate_content(&self.model, prompt).await?)
    }
}
