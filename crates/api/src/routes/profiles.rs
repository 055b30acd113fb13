//! Route definitions for lifestyle profiles.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::profiles;
use crate::state::AppState;

/// Profile CRUD routes -- mounted at `/profiles`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/profiles", post(profiles::create_profile))
        .route(
            "/profiles/{id}",
            get(profiles::get_profile)
                .put(profiles::update_profile)
                .delete(profiles::delete_profile),
        )
}
