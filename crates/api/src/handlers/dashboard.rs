//! Handlers for dashboard card telemetry and reward points.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use serde::{Deserialize, Serialize};

use zerozero_core::dashboard::CardAction;
use zerozero_core::pagination::{clamp_limit, clamp_offset};
use zerozero_core::tips::TipCategory;
use zerozero_core::types::DbId;
use zerozero_db::models::card_interaction::{CardInteraction, CreateCardInteraction};
use zerozero_db::models::reward::UserReward;
use zerozero_db::repositories::{CardInteractionRepo, RewardRepo};

use crate::error::AppResult;
use crate::handlers::profiles::ensure_profile_exists;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// Inbound card interaction.
#[derive(Debug, Deserialize)]
pub struct RecordInteractionRequest {
    pub category: String,
    pub action: String,
    pub tip_id: Option<String>,
}

/// The recorded interaction plus its reward effect.
#[derive(Debug, Serialize)]
pub struct RecordInteractionResponse {
    pub interaction: CardInteraction,
    pub points_awarded: i64,
    pub balance: UserReward,
}

/// Pagination parameters for listing interactions.
#[derive(Debug, Deserialize)]
pub struct ListInteractionsParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

// ---------------------------------------------------------------------------
// POST /profiles/{id}/card-interactions
// ---------------------------------------------------------------------------

/// Record a card interaction and award any points it earns.
pub async fn record_card_interaction(
    State(state): State<AppState>,
    Path(profile_id): Path<DbId>,
    Json(body): Json<RecordInteractionRequest>,
) -> AppResult<impl IntoResponse> {
    ensure_profile_exists(&state.pool, profile_id).await?;

    // Both strings parse loudly before anything is written.
    let category = TipCategory::from_str_db(&body.category)?;
    let action = CardAction::from_str_db(&body.action)?;

    let interaction = CardInteractionRepo::record(
        &state.pool,
        profile_id,
        &CreateCardInteraction {
            category: category.as_str().to_string(),
            action: action.as_str().to_string(),
            tip_id: body.tip_id.clone(),
        },
    )
    .await?;

    let points_awarded = action.points();
    let balance = if points_awarded > 0 {
        RewardRepo::add_points(&state.pool, profile_id, points_awarded).await?
    } else {
        RewardRepo::get_or_create(&state.pool, profile_id).await?
    };

    tracing::info!(
        profile_id,
        action = action.as_str(),
        points_awarded,
        "Card interaction recorded"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: RecordInteractionResponse {
                interaction,
                points_awarded,
                balance,
            },
        }),
    ))
}

// ---------------------------------------------------------------------------
// GET /profiles/{id}/card-interactions
// ---------------------------------------------------------------------------

/// List a profile's card interactions, most recent first.
pub async fn list_card_interactions(
    State(state): State<AppState>,
    Path(profile_id): Path<DbId>,
    Query(params): Query<ListInteractionsParams>,
) -> AppResult<impl IntoResponse> {
    ensure_profile_exists(&state.pool, profile_id).await?;

    let limit = clamp_limit(params.limit, 25, 100);
    let offset = clamp_offset(params.offset);

    let items =
        CardInteractionRepo::list_by_profile(&state.pool, profile_id, limit, offset).await?;
    Ok(Json(DataResponse { data: items }))
}

// ---------------------------------------------------------------------------
// GET /profiles/{id}/rewards
// ---------------------------------------------------------------------------

/// Get a profile's reward points balance.
pub async fn get_rewards(
    State(state): State<AppState>,
    Path(profile_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_profile_exists(&state.pool, profile_id).await?;

    let balance = RewardRepo::get_or_create(&state.pool, profile_id).await?;
    Ok(Json(DataResponse { data: balance }))
}
