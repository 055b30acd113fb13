//! Handlers for location and water-quality lookups.
//!
//! Thin passthroughs: query mistakes map to 400, upstream failures to
//! 502 via the error classifier.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;

use chrono::NaiveDate;
use serde::Deserialize;

use zerozero_lookup::water_quality::WaterQualityQuery;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// Parameters for `/locations/lookup`.
#[derive(Debug, Deserialize)]
pub struct LocationParams {
    pub postcode: String,
}

/// Parameters for `/water-quality`.
#[derive(Debug, Deserialize)]
pub struct WaterParams {
    pub state: String,
    pub characteristic: String,
    pub from: NaiveDate,
    pub to: NaiveDate,
}

// ---------------------------------------------------------------------------
// GET /locations/lookup
// ---------------------------------------------------------------------------

/// Resolve a postcode to a city, country, and coordinates.
pub async fn lookup_location(
    State(state): State<AppState>,
    Query(params): Query<LocationParams>,
) -> AppResult<impl IntoResponse> {
    let location = state.geocode.lookup(&params.postcode).await?;

    tracing::debug!(postcode = %params.postcode, city = %location.city, "Postcode resolved");

    Ok(Json(DataResponse { data: location }))
}

// ---------------------------------------------------------------------------
// GET /water-quality
// ---------------------------------------------------------------------------

/// Query the water-quality portal by state, characteristic, and range.
pub async fn water_quality(
    State(state): State<AppState>,
    Query(params): Query<WaterParams>,
) -> AppResult<impl IntoResponse> {
    let query = WaterQualityQuery {
        state_code: params.state,
        characteristic: params.characteristic,
        start_date: params.from,
        end_date: params.to,
    };

    let results = state.water.query(&query).await?;
    Ok(Json(DataResponse { data: results }))
}
