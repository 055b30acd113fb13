//! Repository for the `card_interactions` table.

use sqlx::PgPool;

use zerozero_core::types::DbId;

use crate::models::card_interaction::{CardInteraction, CreateCardInteraction};

/// Column list for `card_interactions` queries.
const COLUMNS: &str = "id, profile_id, category, action, tip_id, created_at";

/// Records dashboard card telemetry.
pub struct CardInteractionRepo;

impl CardInteractionRepo {
    /// Record one card interaction.
    pub async fn record(
        pool: &PgPool,
        profile_id: DbId,
        interaction: &CreateCardInteraction,
    ) -> Result<CardInteraction, sqlx::Error> {
        let query = format!(
            "INSERT INTO card_interactions (profile_id, category, action, tip_id) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CardInteraction>(&query)
            .bind(profile_id)
            .bind(&interaction.category)
            .bind(&interaction.action)
            .bind(&interaction.tip_id)
            .fetch_one(pool)
            .await
    }

    /// List interactions for a profile, most recent first.
    pub async fn list_by_profile(
        pool: &PgPool,
        profile_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CardInteraction>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM card_interactions \
             WHERE profile_id = $1 \
             ORDER BY created_at DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, CardInteraction>(&query)
            .bind(profile_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count interactions of one action kind for a profile.
    pub async fn count_by_action(
        pool: &PgPool,
        profile_id: DbId,
        action: &str,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM card_interactions WHERE profile_id = $1 AND action = $2",
        )
        .bind(profile_id)
        .bind(action)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }
}
