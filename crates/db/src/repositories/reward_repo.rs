//! Repository for the `user_rewards` table.

use sqlx::PgPool;

use zerozero_core::types::DbId;

use crate::models::reward::UserReward;

/// Column list for `user_rewards` queries.
const COLUMNS: &str = "id, profile_id, points, created_at, updated_at";

/// Maintains the per-profile reward points balance.
pub struct RewardRepo;

impl RewardRepo {
    /// Fetch the balance row for a profile, creating it at zero points
    /// if it does not exist yet.
    pub async fn get_or_create(pool: &PgPool, profile_id: DbId) -> Result<UserReward, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_rewards (profile_id) VALUES ($1) \
             ON CONFLICT (profile_id) DO UPDATE SET profile_id = EXCLUDED.profile_id \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserReward>(&query)
            .bind(profile_id)
            .fetch_one(pool)
            .await
    }

    /// Add points to a profile's balance, creating the row if needed.
    pub async fn add_points(
        pool: &PgPool,
        profile_id: DbId,
        points: i64,
    ) -> Result<UserReward, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_rewards (profile_id, points) VALUES ($1, $2) \
             ON CONFLICT (profile_id) DO UPDATE \
             SET points = user_rewards.points + EXCLUDED.points, updated_at = now() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserReward>(&query)
            .bind(profile_id)
            .bind(points)
            .fetch_one(pool)
            .await
    }
}
