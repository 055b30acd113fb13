//! Chat assistant bridge.
//!
//! Forwards a user message plus the templated Zai system prompt and the
//! trimmed conversation history to the completion endpoint, and relays
//! the reply. A failed request produces exactly one canned apology with
//! the `degraded` flag set — errors never propagate to callers, and no
//! retry is attempted.

use std::sync::Arc;

use serde::Serialize;

use zerozero_core::chat::{
    build_system_prompt, starter_message, trim_history, ChatMessage, FALLBACK_APOLOGY,
};
use zerozero_core::profile::LifestyleProfile;

use crate::client::CompletionClient;

/// The assistant's reply and whether it came from the fallback path.
#[derive(Debug, Clone, Serialize)]
pub struct ChatOutcome {
    pub reply: ChatMessage,
    pub degraded: bool,
}

/// Bridges conversations to the completion endpoint.
pub struct ChatBridge {
    client: Arc<CompletionClient>,
}

impl ChatBridge {
    /// Create a bridge over an injected completion client.
    pub fn new(client: Arc<CompletionClient>) -> Self {
        Self { client }
    }

    /// Send one user message and return the assistant's reply.
    ///
    /// History is trimmed to the most recent turns before the request.
    /// On any failure the reply is [`FALLBACK_APOLOGY`] with
    /// `degraded: true`.
    pub async fn send(
        &self,
        profile: &LifestyleProfile,
        history: &[ChatMessage],
        message: &str,
    ) -> ChatOutcome {
        let trimmed = trim_history(history);

        let mut messages = Vec::with_capacity(trimmed.len() + 2);
        messages.push(ChatMessage::system(build_system_prompt(profile)));
        messages.extend_from_slice(trimmed);
        messages.push(ChatMessage::user(message));

        match self.client.complete(&messages).await {
            Ok(content) => ChatOutcome {
                reply: ChatMessage::assistant(content),
                degraded: false,
            },
            Err(e) => {
                tracing::warn!(error = %e, "Chat completion failed, returning canned apology");
                ChatOutcome {
                    reply: ChatMessage::assistant(FALLBACK_APOLOGY),
                    degraded: true,
                }
            }
        }
    }

    /// Produce the opening assistant message for a new conversation.
    ///
    /// Asks the endpoint for a personalized greeting; degrades to the
    /// deterministic local starter when the remote path is unavailable.
    pub async fn starter(&self, profile: &LifestyleProfile) -> ChatOutcome {
        let messages = [
            ChatMessage::system(build_system_prompt(profile)),
            ChatMessage::user(
                "Greet me in one or two sentences and invite me to ask a question.",
            ),
        ];

        match self.client.complete(&messages).await {
            Ok(content) => ChatOutcome {
                reply: ChatMessage::assistant(content),
                degraded: false,
            },
            Err(e) => {
                tracing::debug!(error = %e, "Starter fetch unavailable, using local greeting");
                ChatOutcome {
                    reply: ChatMessage::assistant(starter_message(profile)),
                    degraded: true,
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
