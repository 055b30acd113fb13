//! Saved tip entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use zerozero_core::tips::PersonalizedTip;
use zerozero_core::types::{DbId, Timestamp};

/// A row from the `zai_tips` table: one tip of the last generated batch
/// for a profile.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SavedTip {
    pub id: DbId,
    pub profile_id: DbId,
    /// Generator-assigned tip identifier (UUID string).
    pub tip_id: String,
    pub title: String,
    pub content: String,
    pub category: String,
    pub priority: i32,
    pub action: String,
    pub saving_carbon_kg: f64,
    pub saving_money_monthly: f64,
    pub timeframe: String,
    pub difficulty: String,
    /// Where the batch came from: `assistant` or `fallback`.
    pub source: String,
    /// Insertion order within the batch.
    pub sort_order: i32,
    pub created_at: Timestamp,
}

/// DTO for inserting one tip of a batch.
#[derive(Debug, Clone, Deserialize)]
pub struct NewSavedTip {
    pub tip_id: String,
    pub title: String,
    pub content: String,
    pub category: String,
    pub priority: i32,
    pub action: String,
    pub saving_carbon_kg: f64,
    pub saving_money_monthly: f64,
    pub timeframe: String,
    pub difficulty: String,
    pub source: String,
    pub sort_order: i32,
}

impl NewSavedTip {
    /// Build the insert DTO from a generated tip.
    pub fn from_tip(tip: &PersonalizedTip, source: &str, sort_order: i32) -> Self {
        Self {
            tip_id: tip.id.clone(),
            title: tip.title.clone(),
            content: tip.content.clone(),
            category: tip.category.as_str().to_string(),
            priority: tip.priority as i32,
            action: tip.action.clone(),
            saving_carbon_kg: tip.saving_carbon_kg,
            saving_money_monthly: tip.saving_money_monthly,
            timeframe: tip.timeframe.clone(),
            difficulty: tip.difficulty.as_str().to_string(),
            source: source.to_string(),
            sort_order,
        }
    }
}
