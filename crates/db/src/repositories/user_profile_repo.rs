//! Repository for the `user_profiles` table.

use sqlx::PgPool;

use zerozero_core::types::DbId;

use crate::models::user_profile::{NewUserProfile, UserProfile};

/// Column list for `user_profiles` queries.
const COLUMNS: &str = "id, name, postcode, home_type, rooms, people, transport, \
     car_type, energy_source, monthly_spend, goals, created_at, updated_at";

/// Provides CRUD operations for user profiles.
pub struct UserProfileRepo;

impl UserProfileRepo {
    /// Insert a new profile row.
    pub async fn create(pool: &PgPool, new: &NewUserProfile) -> Result<UserProfile, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_profiles \
             (name, postcode, home_type, rooms, people, transport, car_type, \
              energy_source, monthly_spend, goals) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(&new.name)
            .bind(&new.postcode)
            .bind(&new.home_type)
            .bind(new.rooms)
            .bind(new.people)
            .bind(&new.transport)
            .bind(&new.car_type)
            .bind(&new.energy_source)
            .bind(new.monthly_spend)
            .bind(&new.goals)
            .fetch_one(pool)
            .await
    }

    /// Find a profile by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<UserProfile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_profiles WHERE id = $1");
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Replace the lifestyle fields of a profile.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        update: &NewUserProfile,
    ) -> Result<Option<UserProfile>, sqlx::Error> {
        let query = format!(
            "UPDATE user_profiles SET \
             name = $2, postcode = $3, home_type = $4, rooms = $5, people = $6, \
             transport = $7, car_type = $8, energy_source = $9, \
             monthly_spend = $10, goals = $11, updated_at = now() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(id)
            .bind(&update.name)
            .bind(&update.postcode)
            .bind(&update.home_type)
            .bind(update.rooms)
            .bind(update.people)
            .bind(&update.transport)
            .bind(&update.car_type)
            .bind(&update.energy_source)
            .bind(update.monthly_spend)
            .bind(&update.goals)
            .fetch_optional(pool)
            .await
    }

    /// Delete a profile (user reset). Returns the number of rows removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM user_profiles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// List profiles, most recent first.
    pub async fn list(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<UserProfile>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_profiles \
             ORDER BY created_at DESC \
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
