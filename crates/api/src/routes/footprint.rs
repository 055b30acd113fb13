//! Route definitions for footprint calculation.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::footprint;
use crate::state::AppState;

/// Footprint routes: per-profile computation and inline preview.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/profiles/{id}/footprint", get(footprint::get_footprint))
        .route("/footprint/preview", post(footprint::preview_footprint))
}
