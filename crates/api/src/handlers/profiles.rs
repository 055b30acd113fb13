//! Handlers for lifestyle profile CRUD.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use serde::Deserialize;
use validator::Validate;

use zerozero_core::error::CoreError;
use zerozero_core::profile::{
    CarType, EnergySource, HomeType, LifestyleProfile, TransportMode, DEFAULT_TRANSPORT,
};
use zerozero_core::types::DbId;
use zerozero_db::models::user_profile::{NewUserProfile, UserProfile};
use zerozero_db::repositories::UserProfileRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request payload
// ---------------------------------------------------------------------------

/// Inbound profile payload for create, update, and footprint preview.
///
/// Field ranges are checked by the validator derive; enum strings go
/// through the loud core parsers in [`ProfilePayload::to_lifestyle`].
#[derive(Debug, Deserialize, Validate)]
pub struct ProfilePayload {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "postcode must not be empty"))]
    pub postcode: String,
    pub home_type: String,
    #[validate(range(min = 1, message = "rooms must be at least 1"))]
    pub rooms: i32,
    #[validate(range(min = 1, message = "people must be at least 1"))]
    pub people: i32,
    /// Optional; defaults to `mixed` when absent.
    pub transport: Option<String>,
    pub car_type: Option<String>,
    pub energy_source: String,
    #[validate(range(min = 500, max = 10000, message = "monthly spend out of bounds"))]
    pub monthly_spend: i64,
    #[serde(default)]
    pub goals: Vec<String>,
}

impl ProfilePayload {
    /// Parse into the canonical lifestyle record.
    pub fn to_lifestyle(&self) -> Result<LifestyleProfile, CoreError> {
        let transport = match self.transport.as_deref() {
            Some(raw) => TransportMode::from_str_db(raw)?,
            None => DEFAULT_TRANSPORT,
        };

        let car_type = match self.car_type.as_deref() {
            Some(raw) => Some(CarType::from_str_db(raw)?),
            None => None,
        };

        let profile = LifestyleProfile {
            name: self.name.trim().to_string(),
            postcode: self.postcode.trim().to_string(),
            home_type: HomeType::from_str_db(&self.home_type)?,
            rooms: self.rooms,
            people: self.people,
            transport,
            car_type,
            energy_source: EnergySource::from_str_db(&self.energy_source)?,
            monthly_spend: self.monthly_spend,
            goals: self.goals.clone(),
        };
        profile.validate()?;
        Ok(profile)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Verify that a profile exists, returning the full row.
pub(crate) async fn ensure_profile_exists(
    pool: &sqlx::PgPool,
    id: DbId,
) -> AppResult<UserProfile> {
    UserProfileRepo::find_by_id(pool, id).await?.ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "UserProfile",
            id,
        })
    })
}

// ---------------------------------------------------------------------------
// POST /profiles
// ---------------------------------------------------------------------------

/// Create a profile directly from a validated payload.
pub async fn create_profile(
    State(state): State<AppState>,
    Json(body): Json<ProfilePayload>,
) -> AppResult<impl IntoResponse> {
    body.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    let lifestyle = body.to_lifestyle()?;

    let profile =
        UserProfileRepo::create(&state.pool, &NewUserProfile::from_lifestyle(&lifestyle)).await?;

    tracing::info!(profile_id = profile.id, "Profile created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: profile })))
}

// ---------------------------------------------------------------------------
// GET /profiles/{id}
// ---------------------------------------------------------------------------

/// Get a single profile by ID.
pub async fn get_profile(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let profile = ensure_profile_exists(&state.pool, id).await?;
    Ok(Json(DataResponse { data: profile }))
}

// ---------------------------------------------------------------------------
// PUT /profiles/{id}
// ---------------------------------------------------------------------------

/// Replace the lifestyle fields of a profile.
pub async fn update_profile(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<ProfilePayload>,
) -> AppResult<impl IntoResponse> {
    body.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    let lifestyle = body.to_lifestyle()?;

    let updated =
        UserProfileRepo::update(&state.pool, id, &NewUserProfile::from_lifestyle(&lifestyle))
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::NotFound {
                    entity: "UserProfile",
                    id,
                })
            })?;

    tracing::info!(profile_id = id, "Profile updated");

    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// DELETE /profiles/{id}
// ---------------------------------------------------------------------------

/// Delete a profile (user reset). Cascades to tips, conversations,
/// interactions, and rewards.
pub async fn delete_profile(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let removed = UserProfileRepo::delete(&state.pool, id).await?;
    if removed == 0 {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "UserProfile",
            id,
        }));
    }

    tracing::info!(profile_id = id, "Profile deleted");

    Ok(StatusCode::NO_CONTENT)
}
