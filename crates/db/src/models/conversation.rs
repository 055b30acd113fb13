//! Conversation and message entity models.

use serde::Serialize;
use sqlx::FromRow;

use zerozero_core::types::{DbId, Timestamp};

/// A row from the `zai_conversations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Conversation {
    pub id: DbId,
    pub profile_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `zai_messages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ConversationMessage {
    pub id: DbId,
    pub conversation_id: DbId,
    pub role: String,
    pub content: String,
    pub created_at: Timestamp,
}
