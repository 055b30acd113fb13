//! Chat assistant prompt construction and message types.
//!
//! The Zai persona's system prompt is templated from the user's
//! lifestyle profile; history is trimmed to the most recent turns before
//! each completion request. The engine crate owns the network call, this
//! module owns everything deterministic about a conversation.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::profile::LifestyleProfile;

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Number of most-recent history messages included in a completion request.
pub const MAX_HISTORY_TURNS: usize = 8;

// ---------------------------------------------------------------------------
// Canned content
// ---------------------------------------------------------------------------

/// The single apology appended to history when a remote request fails.
pub const FALLBACK_APOLOGY: &str =
    "Sorry, I'm having trouble connecting right now. Please try again in a \
     moment \u{2014} your dashboard tips are still there in the meantime.";

// ---------------------------------------------------------------------------
// Roles and messages
// ---------------------------------------------------------------------------

/// Speaker role for a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

impl ChatRole {
    /// Parse a role string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "system" => Ok(Self::System),
            "user" => Ok(Self::User),
            "assistant" => Ok(Self::Assistant),
            _ => Err(CoreError::Validation(format!(
                "Invalid chat role '{s}'. Must be one of: system, user, assistant"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// One turn in a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

/// Keep only the most recent [`MAX_HISTORY_TURNS`] messages.
pub fn trim_history(history: &[ChatMessage]) -> &[ChatMessage] {
    let start = history.len().saturating_sub(MAX_HISTORY_TURNS);
    &history[start..]
}

// ---------------------------------------------------------------------------
// Prompts
// ---------------------------------------------------------------------------

/// Build the Zai system prompt for a profile.
pub fn build_system_prompt(profile: &LifestyleProfile) -> String {
    format!(
        "You are Zai, the friendly sustainability coach inside the Zero Zero app. \
         You help people cut their carbon footprint and save money with small, \
         practical steps. Keep replies under 120 words, warm and specific, and \
         suggest one concrete action where possible. Never invent statistics.\n\
         \n\
         The person you are helping:\n\
         - Name: {name}\n\
         - Area: {postcode}\n\
         - Home: {home} with {rooms} rooms, {people} people\n\
         - Transport: {transport}\n\
         - Monthly spend: \u{00a3}{spend}",
        name = profile.name,
        postcode = profile.postcode,
        home = profile.home_type.label(),
        rooms = profile.rooms,
        people = profile.people,
        transport = profile.transport.label(),
        spend = profile.monthly_spend,
    )
}

/// Deterministic greeting used to open a conversation when the remote
/// starter fetch is unavailable.
pub fn starter_message(profile: &LifestyleProfile) -> String {
    format!(
        "Hi {}! I'm Zai. Ask me anything about cutting your footprint or your \
         bills \u{2014} I know your setup, so I can keep it practical.",
        profile.name
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{EnergySource, HomeType, TransportMode};

    fn sample_profile() -> LifestyleProfile {
        LifestyleProfile {
            name: "Ada".to_string(),
            postcode: "BS1 4DJ".to_string(),
            home_type: HomeType::Apartment,
            rooms: 2,
            people: 1,
            transport: TransportMode::Bike,
            car_type: None,
            energy_source: EnergySource::Mixed,
            monthly_spend: 900,
            goals: vec![],
        }
    }

    #[test]
    fn role_roundtrip() {
        for role in [ChatRole::System, ChatRole::User, ChatRole::Assistant] {
            assert_eq!(ChatRole::from_str_db(role.as_str()).unwrap(), role);
        }
        assert!(ChatRole::from_str_db("narrator").is_err());
    }

    #[test]
    fn trim_keeps_last_eight() {
        let history: Vec<ChatMessage> = (0..12)
            .map(|i| ChatMessage::user(format!("message {i}")))
            .collect();
        let trimmed = trim_history(&history);
        assert_eq!(trimmed.len(), MAX_HISTORY_TURNS);
        assert_eq!(trimmed[0].content, "message 4");
        assert_eq!(trimmed[7].content, "message 11");
    }

    #[test]
    fn trim_short_history_is_noop() {
        let history = vec![ChatMessage::user("hello")];
        assert_eq!(trim_history(&history).len(), 1);
    }

    #[test]
    fn trim_empty_history() {
        assert!(trim_history(&[]).is_empty());
    }

    #[test]
    fn system_prompt_embeds_profile() {
        let prompt = build_system_prompt(&sample_profile());
        assert!(prompt.contains("Ada"));
        assert!(prompt.contains("BS1 4DJ"));
        assert!(prompt.contains("Apartment or flat"));
        assert!(prompt.contains("\u{00a3}900"));
    }

    #[test]
    fn starter_greets_by_name() {
        assert!(starter_message(&sample_profile()).starts_with("Hi Ada!"));
    }
}
