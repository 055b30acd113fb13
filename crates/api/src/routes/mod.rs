pub mod chat;
pub mod dashboard;
pub mod footprint;
pub mod health;
pub mod lookup;
pub mod onboarding;
pub mod profiles;
pub mod tips;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /onboarding-sessions                     list, create
/// /onboarding-sessions/{id}                get
/// /onboarding-sessions/{id}/advance        advance one step (POST)
/// /onboarding-sessions/{id}/go-back        go back one step (POST)
/// /onboarding-sessions/{id}/step-data      merge step data (PUT)
/// /onboarding-sessions/{id}/abandon        abandon session (POST)
/// /onboarding-sessions/{id}/complete       build the profile (POST)
///
/// /profiles                                create
/// /profiles/{id}                           get, update, delete
/// /profiles/{id}/footprint                 compute footprint (GET)
/// /footprint/preview                       compute from inline payload (POST)
///
/// /profiles/{id}/tips                      generate batch (GET)
/// /profiles/{id}/tips/saved                last persisted batch (GET)
///
/// /profiles/{id}/conversations             open conversation (POST)
/// /conversations/{id}/messages             send message (POST), history (GET)
///
/// /profiles/{id}/card-interactions         record (POST), list (GET)
/// /profiles/{id}/rewards                   points balance (GET)
///
/// /locations/lookup                        geocode a postcode (GET)
/// /water-quality                           portal query (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(onboarding::router())
        .merge(profiles::router())
        .merge(footprint::router())
        .merge(tips::router())
        .merge(chat::router())
        .merge(dashboard::router())
        .merge(lookup::router())
}
