//! Dashboard card interaction entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use zerozero_core::types::{DbId, Timestamp};

/// A row from the `card_interactions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CardInteraction {
    pub id: DbId,
    pub profile_id: DbId,
    pub category: String,
    pub action: String,
    /// The tip card acted on, when the card was a tip.
    pub tip_id: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for recording a card interaction.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCardInteraction {
    pub category: String,
    pub action: String,
    pub tip_id: Option<String>,
}
