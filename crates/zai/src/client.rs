//! HTTP client for an OpenAI-shaped chat-completions endpoint.
//!
//! Wraps the `/chat/completions` API using [`reqwest`]. The client is
//! constructed explicitly from a [`CompletionConfig`] and injected into
//! the tip generator and chat bridge, so tests can swap in an
//! unconfigured instance and exercise the fallback paths offline.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use zerozero_core::chat::ChatMessage;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Default completion endpoint base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model name.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Default completion token budget.
pub const DEFAULT_MAX_TOKENS: u32 = 600;

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Connection configuration for the completion endpoint.
///
/// `api_key` is optional by design: with no key the client reports
/// itself unconfigured and every call fails fast with
/// [`CompletionError::Unconfigured`], which callers treat identically
/// to a runtime failure (demo mode).
#[derive(Debug, Clone)]
pub struct CompletionConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl CompletionConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var            | Default                     |
    /// |--------------------|-----------------------------|
    /// | `ZAI_API_KEY`      | unset (demo mode)           |
    /// | `ZAI_BASE_URL`     | `https://api.openai.com/v1` |
    /// | `ZAI_MODEL`        | `gpt-4o-mini`               |
    /// | `ZAI_TEMPERATURE`  | `0.7`                       |
    /// | `ZAI_MAX_TOKENS`   | `600`                       |
    /// | `ZAI_TIMEOUT_SECS` | `20`                        |
    pub fn from_env() -> Self {
        let api_key = std::env::var("ZAI_API_KEY").ok().filter(|k| !k.is_empty());

        let base_url =
            std::env::var("ZAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let model = std::env::var("ZAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let temperature: f32 = std::env::var("ZAI_TEMPERATURE")
            .unwrap_or_else(|_| DEFAULT_TEMPERATURE.to_string())
            .parse()
            .expect("ZAI_TEMPERATURE must be a valid f32");

        let max_tokens: u32 = std::env::var("ZAI_MAX_TOKENS")
            .unwrap_or_else(|_| DEFAULT_MAX_TOKENS.to_string())
            .parse()
            .expect("ZAI_MAX_TOKENS must be a valid u32");

        let timeout_secs: u64 = std::env::var("ZAI_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .expect("ZAI_TIMEOUT_SECS must be a valid u64");

        Self {
            api_key,
            base_url,
            model,
            temperature,
            max_tokens,
            timeout_secs,
        }
    }

    /// A config with no API key, for tests and demo mode.
    pub fn unconfigured() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from the completion client.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    /// No API key is configured; callers take their local fallback.
    #[error("Completion endpoint is not configured (no API key)")]
    Unconfigured,

    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint returned a non-2xx status code.
    #[error("Completion API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The response parsed but did not contain a usable completion.
    #[error("Malformed completion response: {0}")]
    MalformedResponse(String),
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// HTTP client for the completion endpoint.
pub struct CompletionClient {
    client: reqwest::Client,
    config: CompletionConfig,
}

impl CompletionClient {
    /// Create a new client from the given configuration.
    pub fn new(config: CompletionConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling across services).
    pub fn with_client(client: reqwest::Client, config: CompletionConfig) -> Self {
        Self { client, config }
    }

    /// Whether an API key is present.
    pub fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    /// The configured model name.
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Issue a single completion request and return the assistant text.
    ///
    /// Exactly one attempt is made — there is no retry policy anywhere
    /// in the Zai paths; callers substitute local fallbacks instead.
    pub async fn complete(&self, messages: &[ChatMessage]) -> Result<String, CompletionError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(CompletionError::Unconfigured)?;

        let request = CompletionRequest {
            model: &self.config.model,
            messages: messages
                .iter()
                .map(|m| WireMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(api_key)
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(CompletionError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: CompletionResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| {
                CompletionError::MalformedResponse("response contained no choices".to_string())
            })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
