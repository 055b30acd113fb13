//! Repository for the `zai_tips` table.

use sqlx::PgPool;

use zerozero_core::types::DbId;

use crate::models::tip::{NewSavedTip, SavedTip};

/// Column list for `zai_tips` queries.
const COLUMNS: &str = "id, profile_id, tip_id, title, content, category, priority, \
     action, saving_carbon_kg, saving_money_monthly, timeframe, difficulty, \
     source, sort_order, created_at";

/// Provides batch persistence for generated tips.
pub struct TipRepo;

impl TipRepo {
    /// Replace the stored batch for a profile with a fresh one.
    ///
    /// Runs in a transaction so a failed insert never leaves the profile
    /// with a half-written batch.
    pub async fn replace_for_profile(
        pool: &PgPool,
        profile_id: DbId,
        tips: &[NewSavedTip],
    ) -> Result<Vec<SavedTip>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM zai_tips WHERE profile_id = $1")
            .bind(profile_id)
            .execute(&mut *tx)
            .await?;

        let insert = format!(
            "INSERT INTO zai_tips \
             (profile_id, tip_id, title, content, category, priority, action, \
              saving_carbon_kg, saving_money_monthly, timeframe, difficulty, \
              source, sort_order) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
             RETURNING {COLUMNS}"
        );

        let mut saved = Vec::with_capacity(tips.len());
        for tip in tips {
            let row = sqlx::query_as::<_, SavedTip>(&insert)
                .bind(profile_id)
                .bind(&tip.tip_id)
                .bind(&tip.title)
                .bind(&tip.content)
                .bind(&tip.category)
                .bind(tip.priority)
                .bind(&tip.action)
                .bind(tip.saving_carbon_kg)
                .bind(tip.saving_money_monthly)
                .bind(&tip.timeframe)
                .bind(&tip.difficulty)
                .bind(&tip.source)
                .bind(tip.sort_order)
                .fetch_one(&mut *tx)
                .await?;
            saved.push(row);
        }

        tx.commit().await?;
        Ok(saved)
    }

    /// List the stored batch for a profile in insertion order.
    pub async fn list_by_profile(
        pool: &PgPool,
        profile_id: DbId,
    ) -> Result<Vec<SavedTip>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM zai_tips \
             WHERE profile_id = $1 \
             ORDER BY sort_order ASC"
        );
        sqlx::query_as::<_, SavedTip>(&query)
            .bind(profile_id)
            .fetch_all(pool)
            .await
    }
}
