//! Prompt responder: forwards an allowed user's text to the LLM and relays the answer verbatim.

use std::sync::Arc;

use gatebot_core::{Bot, Chat};
use llm_client::LlmClient;
use tracing::{debug, error, info, instrument};

/// Sent when the LLM call fails for any reason. Never includes error detail.
pub const FALLBACK_REPLY: &str =
    "Sorry, I couldn't process your request at the moment. Please try again later.";

/// Sent instead of calling the responder when no GEMINI_API_KEY is configured.
pub const SERVICE_UNAVAILABLE_REPLY: &str =
    "Sorry, the AI service is currently unavailable due to a missing or invalid GEMINI_API_KEY. Please contact support.";

/// Telegram message size limit.
pub const TELEGRAM_MAX_MESSAGE_LEN: usize = 4096;

/// Single-prompt LLM responder. No history, no system instruction, no retry.
#[derive(Clone)]
pub struct PromptResponder {
    llm: Arc<dyn LlmClient>,
    bot: Arc<dyn Bot>,
}

impl PromptResponder {
    pub fn new(llm: Arc<dyn LlmClient>, bot: Arc<dyn Bot>) -> Self {
        Self { llm, bot }
    }

    /// Shows "typing…" in `chat` (best effort), asks the LLM, and returns the reply text.
    /// On any LLM failure returns [`FALLBACK_REPLY`].
    #[instrument(skip(self, chat, user_text), fields(chat_id = chat.id))]
    pub async fn respond(&self, chat: &Chat, user_text: &str) -> String {
        if let Err(e) = self.bot.send_typing(chat).await {
            debug!(error = %e, "typing indicator failed, ignored");
        }

        match self.llm.get_llm_response(user_text).await {
            Ok(reply) if !reply.trim().is_empty() => {
                info!(reply_len = reply.len(), "step: LLM reply received");
                reply
            }
            Ok(_) => {
                // Telegram rejects blank message text.
                error!("LLM returned an empty reply");
                FALLBACK_REPLY.to_string()
            }
            Err(e) => {
                error!(error = %e, "Gemini error");
                FALLBACK_REPLY.to_string()
            }
        }
    }
}

/// Split text into chunks that fit within Telegram's message limit. Length is measured in bytes,
/// so a chunk never exceeds Telegram's character limit. Tries to split at newlines or spaces to avoid
/// breaking words, and never inside a UTF-8 character.
pub fn chunk_message(text: &str, max_len: usize) -> Vec<String> {
    if max_len == 0 {
        return Vec::new();
    }

    if text.len() <= max_len {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut remaining = text;

    while !remaining.is_empty() {
        if remaining.len() <= max_len {
            chunks.push(remaining.to_string());
            break;
        }

        let mut window_end = floor_char_boundary(remaining, max_len);
        if window_end == 0 {
            window_end = remaining
                .chars()
                .next()
                .map(char::len_utf8)
                .unwrap_or(remaining.len());
        }

        let slice = &remaining[..window_end];
        let split_at = match slice.rfind('\n').or_else(|| slice.rfind(' ')) {
            Some(0) | None => window_end,
            Some(i) => i,
        };

        chunks.push(remaining[..split_at].to_string());
        remaining = remaining[split_at..].trim_start_matches('\n');
        if let Some(rest) = remaining.strip_prefix(' ') {
            remaining = rest;
        }
    }

    chunks
}

fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    (0..=index).rev().find(|&i| s.is_char_boundary(i)).unwrap_or(0)
}
