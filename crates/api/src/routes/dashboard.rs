//! Route definitions for dashboard card telemetry and rewards.

use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Dashboard routes: card interactions and the reward balance.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/profiles/{id}/card-interactions",
            get(dashboard::list_card_interactions).post(dashboard::record_card_interaction),
        )
        .route("/profiles/{id}/rewards", get(dashboard::get_rewards))
}
