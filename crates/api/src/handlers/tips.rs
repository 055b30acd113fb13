//! Handlers for personalized tip generation and retrieval.
//!
//! Generation never surfaces a remote failure as an HTTP error: the
//! Zai engine falls back to the deterministic rule table, and the batch
//! is persisted and returned either way.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use zerozero_core::footprint;
use zerozero_core::types::DbId;
use zerozero_db::models::tip::NewSavedTip;
use zerozero_db::repositories::TipRepo;

use crate::error::AppResult;
use crate::handlers::profiles::ensure_profile_exists;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET /profiles/{id}/tips
// ---------------------------------------------------------------------------

/// Generate a fresh tip batch for a profile, persist it, and return it.
pub async fn generate_tips(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let profile = ensure_profile_exists(&state.pool, id).await?;
    let lifestyle = profile.lifestyle()?;
    let result = footprint::calculate(&lifestyle);

    let batch = state.tip_generator.generate(&lifestyle, &result).await;

    let rows: Vec<NewSavedTip> = batch
        .tips
        .iter()
        .enumerate()
        .map(|(i, tip)| NewSavedTip::from_tip(tip, batch.source.as_str(), i as i32))
        .collect();
    TipRepo::replace_for_profile(&state.pool, id, &rows).await?;

    tracing::info!(
        profile_id = id,
        count = batch.tips.len(),
        source = batch.source.as_str(),
        "Tip batch generated"
    );

    Ok(Json(DataResponse { data: batch }))
}

// ---------------------------------------------------------------------------
// GET /profiles/{id}/tips/saved
// ---------------------------------------------------------------------------

/// Return the last persisted batch for a profile.
pub async fn saved_tips(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_profile_exists(&state.pool, id).await?;

    let tips = TipRepo::list_by_profile(&state.pool, id).await?;
    Ok(Json(DataResponse { data: tips }))
}
