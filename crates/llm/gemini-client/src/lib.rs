//! # Gemini API client
//!
//! Thin reqwest wrapper around the Generative Language `generateContent` endpoint (single-turn, non-stream).
//! Provides token masking for safe logging and typed errors for every failure the API can report.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing;

/// Public Generative Language API host.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Masks an API key/token for safe logging: shows first 7 chars + "***" + last 4 chars.
/// If length <= 11, returns "***" to avoid leaking any part of the key.
/// Exposed for tests and for callers who need to log API keys safely.
pub fn mask_token(token: &str) -> String {
    let len = token.len();
    if len <= 11 || !token.is_ascii() {
        "***".to_string()
    } else {
        format!("{}***{}", &token[..7], &token[len - 4..])
    }
}

/// Accepts both `gemini-2.5-flash` and the fully qualified `models/gemini-2.5-flash`.
pub fn normalize_model(model: &str) -> &str {
    model.trim().trim_start_matches("models/")
}

/// Everything that can go wrong with one `generateContent` call.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// Transport failure or an undecodable success body.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response; fields come from the API error body when it has one.
    #[error("Gemini API error {code} ({status}): {message}")]
    Api {
        code: u16,
        status: String,
        message: String,
    },

    /// The prompt was rejected by safety filters before generation.
    #[error("Prompt blocked: {0}")]
    Blocked(String),

    /// The response had no text (e.g. candidate stopped for SAFETY or RECITATION).
    #[error("Empty response (finish reason: {0})")]
    EmptyResponse(String),
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<ResponseContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    prompt_token_count: Option<u32>,
    candidates_token_count: Option<u32>,
    total_token_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    code: u16,
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

impl GenerateContentResponse {
    /// Joins the text parts of the first candidate, the same way the official SDKs build `response.text`.
    fn into_text(self) -> Result<String, GeminiError> {
        let block_reason = self.prompt_feedback.and_then(|f| f.block_reason);
        let Some(candidate) = self.candidates.into_iter().next() else {
            return Err(match block_reason {
                Some(reason) => GeminiError::Blocked(reason),
                None => GeminiError::EmptyResponse("NO_CANDIDATES".to_string()),
            });
        };

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(GeminiError::EmptyResponse(
                candidate
                    .finish_reason
                    .unwrap_or_else(|| "UNKNOWN".to_string()),
            ));
        }
        Ok(text)
    }
}

/// Gemini client. Cheap to clone; the underlying reqwest client is shared.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    /// Builds a client using the given API key and the public API host.
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Builds a client with a custom base URL (e.g. for proxies or a mock server).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Base URL requests are sent to (no trailing slash).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url,
            normalize_model(model)
        )
    }

    /// Sends `prompt` as the only user turn and returns the generated text.
    ///
    /// Logs masked API key and token usage. No system instruction, no history, no retry.
    pub async fn generate_content(&self, model: &str, prompt: &str) -> Result<String, GeminiError> {
        let model = normalize_model(model);
        tracing::info!(
            model = %model,
            prompt_len = prompt.len(),
            api_key = %mask_token(&self.api_key),
            "Gemini generate_content request"
        );

        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .http
            .post(self.endpoint(model))
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            let err = match serde_json::from_str::<ErrorBody>(&raw) {
                Ok(body) => GeminiError::Api {
                    code: body.error.code,
                    status: body.error.status,
                    message: body.error.message,
                },
                Err(_) => GeminiError::Api {
                    code: status.as_u16(),
                    status: status.canonical_reason().unwrap_or("UNKNOWN").to_string(),
                    message: raw,
                },
            };
            tracing::warn!(error = %err, "Gemini generate_content failed");
            return Err(err);
        }

        let parsed: GenerateContentResponse = response.json().await?;

        if let Some(ref u) = parsed.usage_metadata {
            tracing::info!(
                prompt_tokens = ?u.prompt_token_count,
                completion_tokens = ?u.candidates_token_count,
                total_tokens = ?u.total_token_count,
                "Gemini generate_content usage"
            );
        }

        parsed.into_text()
    }
}
