//! Personalized tip generation: remote path plus deterministic fallback.
//!
//! The generator asks the completion endpoint for a JSON array of tips
//! embedding the user's profile and footprint breakdown. Any failure on
//! that path — unconfigured key, network error, non-2xx response, or a
//! response that does not parse — is logged and replaced with the
//! deterministic rule table from `zerozero_core::tips`. The generator
//! itself never returns an error.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use zerozero_core::chat::ChatMessage;
use zerozero_core::footprint::CarbonFootprint;
use zerozero_core::profile::LifestyleProfile;
use zerozero_core::tips::{fallback_tips, Difficulty, PersonalizedTip, TipCategory, MAX_TIPS};

use crate::client::{CompletionClient, CompletionError};

// ---------------------------------------------------------------------------
// Batch types
// ---------------------------------------------------------------------------

/// Where a tip batch came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TipSource {
    Assistant,
    Fallback,
}

impl TipSource {
    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Assistant => "assistant",
            Self::Fallback => "fallback",
        }
    }
}

/// A generated batch of tips and its provenance.
#[derive(Debug, Clone, Serialize)]
pub struct TipBatch {
    pub tips: Vec<PersonalizedTip>,
    pub source: TipSource,
}

// ---------------------------------------------------------------------------
// Remote wire shape
// ---------------------------------------------------------------------------

/// Tip object shape requested from the model.
#[derive(Debug, Deserialize)]
struct RemoteTip {
    title: String,
    content: String,
    category: String,
    priority: u8,
    action: String,
    saving_carbon_kg: f64,
    saving_money_monthly: f64,
    timeframe: String,
    difficulty: String,
}

#[derive(Debug, thiserror::Error)]
enum TipGenerationError {
    #[error(transparent)]
    Completion(#[from] CompletionError),

    #[error("Failed to parse tip response: {0}")]
    Parse(String),
}

// ---------------------------------------------------------------------------
// Prompts
// ---------------------------------------------------------------------------

const TIP_SYSTEM_PROMPT: &str =
    "You are the tip engine for Zero Zero, a sustainability app. Respond with \
     ONLY a JSON array, no prose. Each element must have exactly these fields: \
     title, content, category (one of: carbon, money, local, partners), \
     priority (integer 1-10), action, saving_carbon_kg (number), \
     saving_money_monthly (number), timeframe, difficulty (one of: easy, \
     medium, hard).";

/// Build the user prompt embedding profile and footprint breakdown.
fn build_tip_prompt(profile: &LifestyleProfile, footprint: &CarbonFootprint) -> String {
    format!(
        "Generate exactly {MAX_TIPS} personalized sustainability tips for this \
         person.\n\
         Profile: lives in {postcode}, {home} with {rooms} rooms and {people} \
         people, gets around by {transport}, energy source {energy}, spends \
         \u{00a3}{spend} a month. Goals: {goals}.\n\
         Footprint: {total:.2} tonnes CO2e/year (home {home_t:.2}, transport \
         {transport_t:.2}, spending {spending_t:.2}), grade {grade}.\n\
         Prioritize the largest components of their footprint.",
        postcode = profile.postcode,
        home = profile.home_type.label(),
        rooms = profile.rooms,
        people = profile.people,
        transport = profile.transport.label(),
        energy = profile.energy_source.as_str(),
        spend = profile.monthly_spend,
        goals = if profile.goals.is_empty() {
            "none given".to_string()
        } else {
            profile.goals.join(", ")
        },
        total = footprint.total,
        home_t = footprint.breakdown.home,
        transport_t = footprint.breakdown.transport,
        spending_t = footprint.breakdown.spending,
        grade = footprint.grade.as_str(),
    )
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Strip a markdown code fence if the model wrapped its JSON in one.
fn extract_json(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop an optional language tag on the fence line.
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.trim_end_matches('`').trim()
}

/// Parse a model response into typed tips.
///
/// Category and difficulty strings go through the loud core parsers, so
/// a hallucinated enum value rejects the whole batch (and the caller
/// falls back) instead of producing a half-valid card.
fn parse_remote_tips(content: &str) -> Result<Vec<PersonalizedTip>, TipGenerationError> {
    let remote: Vec<RemoteTip> = serde_json::from_str(extract_json(content))
        .map_err(|e| TipGenerationError::Parse(e.to_string()))?;

    if remote.is_empty() {
        return Err(TipGenerationError::Parse(
            "response contained no tips".to_string(),
        ));
    }

    let mut tips = Vec::with_capacity(remote.len().min(MAX_TIPS));
    for raw in remote.into_iter().take(MAX_TIPS) {
        let category = TipCategory::from_str_db(&raw.category)
            .map_err(|e| TipGenerationError::Parse(e.to_string()))?;
        let difficulty = Difficulty::from_str_db(&raw.difficulty)
            .map_err(|e| TipGenerationError::Parse(e.to_string()))?;

        tips.push(PersonalizedTip {
            id: uuid::Uuid::new_v4().to_string(),
            title: raw.title,
            content: raw.content,
            category,
            priority: raw.priority.clamp(1, 10),
            action: raw.action,
            saving_carbon_kg: raw.saving_carbon_kg,
            saving_money_monthly: raw.saving_money_monthly,
            timeframe: raw.timeframe,
            difficulty,
        });
    }
    Ok(tips)
}

// ---------------------------------------------------------------------------
// Generator
// ---------------------------------------------------------------------------

/// Generates personalized tip batches.
pub struct TipGenerator {
    client: Arc<CompletionClient>,
}

impl TipGenerator {
    /// Create a generator over an injected completion client.
    pub fn new(client: Arc<CompletionClient>) -> Self {
        Self { client }
    }

    /// Generate a tip batch for a profile.
    ///
    /// Always resolves: the remote path's failures are logged and
    /// replaced by the fallback rule table. The batch never exceeds
    /// [`MAX_TIPS`] entries.
    pub async fn generate(
        &self,
        profile: &LifestyleProfile,
        footprint: &CarbonFootprint,
    ) -> TipBatch {
        match self.generate_remote(profile, footprint).await {
            Ok(tips) => TipBatch {
                tips,
                source: TipSource::Assistant,
            },
            Err(e) => {
                tracing::warn!(error = %e, "Remote tip generation failed, using fallback rules");
                TipBatch {
                    tips: fallback_tips(profile, footprint),
                    source: TipSource::Fallback,
                }
            }
        }
    }

    async fn generate_remote(
        &self,
        profile: &LifestyleProfile,
        footprint: &CarbonFootprint,
    ) -> Result<Vec<PersonalizedTip>, TipGenerationError> {
        let messages = [
            ChatMessage::system(TIP_SYSTEM_PROMPT),
            ChatMessage::user(build_tip_prompt(profile, footprint)),
        ];
        let content = self.client.complete(&messages).await?;
        parse_remote_tips(&content)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
