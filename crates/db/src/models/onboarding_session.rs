//! Onboarding session entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use zerozero_core::types::{DbId, Timestamp};

/// A row from the `onboarding_sessions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OnboardingSession {
    pub id: DbId,
    pub current_step: i32,
    pub step_data: serde_json::Value,
    /// Set when the session completes and a profile row is created.
    pub profile_id: Option<DbId>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for updating the step data of an onboarding session.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateOnboardingStepData {
    pub step_data: serde_json::Value,
}
