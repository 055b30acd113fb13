//! Route definitions for the lifestyle onboarding wizard.
//!
//! Mounted at `/onboarding-sessions` by `api_routes()`.
//!
//! ```text
//! POST   /                              create_session
//! GET    /                              list_sessions (?limit, offset)
//! GET    /{id}                          get_session
//! POST   /{id}/advance                  advance_step
//! POST   /{id}/go-back                  go_back
//! PUT    /{id}/step-data                update_step_data
//! POST   /{id}/abandon                  abandon_session
//! POST   /{id}/complete                 complete_session
//! ```

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::onboarding;
use crate::state::AppState;

/// Onboarding wizard routes -- mounted at `/onboarding-sessions`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/onboarding-sessions",
            get(onboarding::list_sessions).post(onboarding::create_session),
        )
        .route("/onboarding-sessions/{id}", get(onboarding::get_session))
        .route(
            "/onboarding-sessions/{id}/advance",
            post(onboarding::advance_step),
        )
        .route("/onboarding-sessions/{id}/go-back", post(onboarding::go_back))
        .route(
            "/onboarding-sessions/{id}/step-data",
            put(onboarding::update_step_data),
        )
        .route(
            "/onboarding-sessions/{id}/abandon",
            post(onboarding::abandon_session),
        )
        .route(
            "/onboarding-sessions/{id}/complete",
            post(onboarding::complete_session),
        )
}
