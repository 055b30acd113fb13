//! Handlers for the lifestyle onboarding wizard.
//!
//! Provides endpoints for creating, advancing, navigating, and managing
//! wizard sessions, and for completing a session into a persisted
//! lifestyle profile.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use serde::{Deserialize, Serialize};

use zerozero_core::error::CoreError;
use zerozero_core::onboarding;
use zerozero_core::pagination::{clamp_limit, clamp_offset};
use zerozero_core::types::DbId;
use zerozero_db::models::onboarding_session::{OnboardingSession, UpdateOnboardingStepData};
use zerozero_db::models::user_profile::{NewUserProfile, UserProfile};
use zerozero_db::repositories::{OnboardingSessionRepo, UserProfileRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// Pagination parameters for listing sessions.
#[derive(Debug, Deserialize)]
pub struct ListSessionsParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Response payload for a completed session.
#[derive(Debug, Serialize)]
pub struct CompletedSessionResponse {
    pub session: OnboardingSession,
    pub profile: UserProfile,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Verify that an onboarding session exists, returning the full row.
async fn ensure_session_exists(pool: &sqlx::PgPool, id: DbId) -> AppResult<OnboardingSession> {
    OnboardingSessionRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "OnboardingSession",
                id,
            })
        })
}

fn ensure_in_progress(session: &OnboardingSession, verb: &str) -> AppResult<()> {
    if session.status != onboarding::OnboardingStatus::InProgress.as_str() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Cannot {verb} a session that is not in progress"
        ))));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// POST /onboarding-sessions
// ---------------------------------------------------------------------------

/// Create a new onboarding wizard session at step 1.
pub async fn create_session(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let session = OnboardingSessionRepo::create(&state.pool).await?;

    tracing::info!(session_id = session.id, "Onboarding session created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: session })))
}

// ---------------------------------------------------------------------------
// GET /onboarding-sessions/{id}
// ---------------------------------------------------------------------------

/// Get a single onboarding session by ID.
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let session = ensure_session_exists(&state.pool, id).await?;
    Ok(Json(DataResponse { data: session }))
}

// ---------------------------------------------------------------------------
// POST /onboarding-sessions/{id}/advance
// ---------------------------------------------------------------------------

/// Advance the wizard to the next step.
///
/// Validates the current step's data before allowing advancement.
pub async fn advance_step(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let session = ensure_session_exists(&state.pool, id).await?;
    ensure_in_progress(&session, "advance")?;

    let current = session.current_step as u8;
    let next = current + 1;

    // Validate step transition.
    onboarding::validate_step_transition(current, next)?;

    // Validate that current step data is sufficient to advance.
    onboarding::validate_step_data(current, &session.step_data)?;

    let updated = OnboardingSessionRepo::update_step(&state.pool, id, next as i32)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "OnboardingSession",
                id,
            })
        })?;

    tracing::info!(
        session_id = id,
        from_step = current,
        to_step = next,
        "Onboarding session advanced"
    );

    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// POST /onboarding-sessions/{id}/go-back
// ---------------------------------------------------------------------------

/// Go back one step in the wizard.
pub async fn go_back(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let session = ensure_session_exists(&state.pool, id).await?;
    ensure_in_progress(&session, "navigate")?;

    let current = session.current_step as u8;
    if current <= onboarding::MIN_STEP {
        return Err(AppError::Core(CoreError::Validation(
            "Already on the first step; cannot go back".to_string(),
        )));
    }

    let prev = current - 1;
    onboarding::validate_step_transition(current, prev)?;

    let updated = OnboardingSessionRepo::update_step(&state.pool, id, prev as i32)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "OnboardingSession",
                id,
            })
        })?;

    tracing::info!(
        session_id = id,
        from_step = current,
        to_step = prev,
        "Onboarding session went back"
    );

    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// PUT /onboarding-sessions/{id}/step-data
// ---------------------------------------------------------------------------

/// Merge new step data into the session's accumulated record.
pub async fn update_step_data(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<UpdateOnboardingStepData>,
) -> AppResult<impl IntoResponse> {
    let session = ensure_session_exists(&state.pool, id).await?;
    ensure_in_progress(&session, "update step data for")?;

    if !body.step_data.is_object() {
        return Err(AppError::Core(CoreError::Validation(
            "Step data must be a JSON object".to_string(),
        )));
    }

    let updated = OnboardingSessionRepo::update_step_data(&state.pool, id, &body.step_data)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "OnboardingSession",
                id,
            })
        })?;

    tracing::info!(
        session_id = id,
        step = session.current_step,
        "Onboarding session step data updated"
    );

    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// POST /onboarding-sessions/{id}/abandon
// ---------------------------------------------------------------------------

/// Mark an onboarding session as abandoned.
pub async fn abandon_session(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let session = ensure_session_exists(&state.pool, id).await?;

    onboarding::can_abandon_session(&session.status)?;

    let updated = OnboardingSessionRepo::update_status(
        &state.pool,
        id,
        onboarding::OnboardingStatus::Abandoned.as_str(),
    )
    .await?
    .ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "OnboardingSession",
            id,
        })
    })?;

    tracing::info!(session_id = id, "Onboarding session abandoned");

    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// POST /onboarding-sessions/{id}/complete
// ---------------------------------------------------------------------------

/// Complete an onboarding session into a lifestyle profile.
///
/// Only allowed when the session is on the final step. Validates the
/// final step's data, assembles the canonical profile from everything
/// accumulated, persists it, and links it back to the session.
pub async fn complete_session(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let session = ensure_session_exists(&state.pool, id).await?;
    ensure_in_progress(&session, "complete")?;

    let current = session.current_step as u8;
    onboarding::can_complete_session(current)?;
    onboarding::validate_step_data(current, &session.step_data)?;

    let lifestyle = onboarding::profile_from_step_data(&session.step_data)?;
    let profile =
        UserProfileRepo::create(&state.pool, &NewUserProfile::from_lifestyle(&lifestyle)).await?;

    OnboardingSessionRepo::link_profile(&state.pool, id, profile.id).await?;
    let updated = OnboardingSessionRepo::update_status(
        &state.pool,
        id,
        onboarding::OnboardingStatus::Completed.as_str(),
    )
    .await?
    .ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "OnboardingSession",
            id,
        })
    })?;

    tracing::info!(
        session_id = id,
        profile_id = profile.id,
        "Onboarding session completed"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: CompletedSessionResponse {
                session: updated,
                profile,
            },
        }),
    ))
}

// ---------------------------------------------------------------------------
// GET /onboarding-sessions
// ---------------------------------------------------------------------------

/// List onboarding sessions, most recent first.
pub async fn list_sessions(
    State(state): State<AppState>,
    Query(params): Query<ListSessionsParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit, 25, 100);
    let offset = clamp_offset(params.offset);

    let items = OnboardingSessionRepo::list_recent(&state.pool, limit, offset).await?;

    tracing::debug!(count = items.len(), "Listed onboarding sessions");

    Ok(Json(DataResponse { data: items }))
}
