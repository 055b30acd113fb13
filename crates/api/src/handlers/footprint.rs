//! Handlers for carbon footprint calculation.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use validator::Validate;

use zerozero_core::footprint;
use zerozero_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::handlers::profiles::{ensure_profile_exists, ProfilePayload};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET /profiles/{id}/footprint
// ---------------------------------------------------------------------------

/// Compute the footprint for a stored profile.
///
/// Recomputed on demand; the footprint has no identity or persistence
/// of its own.
pub async fn get_footprint(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let profile = ensure_profile_exists(&state.pool, id).await?;
    let lifestyle = profile.lifestyle()?;

    let result = footprint::calculate(&lifestyle);

    tracing::debug!(
        profile_id = id,
        total = result.total,
        grade = result.grade.as_str(),
        "Footprint computed"
    );

    Ok(Json(DataResponse { data: result }))
}

// ---------------------------------------------------------------------------
// POST /footprint/preview
// ---------------------------------------------------------------------------

/// Compute a footprint from an inline payload without persisting
/// anything. Used by the onboarding summary screen.
pub async fn preview_footprint(
    Json(body): Json<ProfilePayload>,
) -> AppResult<impl IntoResponse> {
    body.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    let lifestyle = body.to_lifestyle()?;

    let result = footprint::calculate(&lifestyle);

    Ok(Json(DataResponse { data: result }))
}
