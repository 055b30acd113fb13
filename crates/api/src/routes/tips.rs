//! Route definitions for personalized tips.

use axum::routing::get;
use axum::Router;

use crate::handlers::tips;
use crate::state::AppState;

/// Tip routes: batch generation and the last persisted batch.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/profiles/{id}/tips", get(tips::generate_tips))
        .route("/profiles/{id}/tips/saved", get(tips::saved_tips))
}
