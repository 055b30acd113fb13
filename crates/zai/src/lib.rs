//! The Zai engine: Zero Zero's LLM-backed assistant.
//!
//! Wraps an OpenAI-shaped chat-completions endpoint behind a
//! dependency-injected [`client::CompletionClient`], and builds the two
//! product features on top of it: personalized tip generation
//! ([`tips::TipGenerator`]) and the chat assistant bridge
//! ([`chat::ChatBridge`]). Both degrade to deterministic local content
//! on any remote failure — an unconfigured key behaves exactly like a
//! network error, and neither feature ever surfaces an error to its
//! caller.

pub mod chat;
pub mod client;
pub mod tips;
