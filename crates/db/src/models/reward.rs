//! Reward balance entity model.

use serde::Serialize;
use sqlx::FromRow;

use zerozero_core::types::{DbId, Timestamp};

/// A row from the `user_rewards` table: one points balance per profile.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserReward {
    pub id: DbId,
    pub profile_id: DbId,
    pub points: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
