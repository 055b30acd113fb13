//! Route definitions for location and water-quality lookups.

use axum::routing::get;
use axum::Router;

use crate::handlers::lookup;
use crate::state::AppState;

/// Lookup routes: geocoding and the water-quality portal.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/locations/lookup", get(lookup::lookup_location))
        .route("/water-quality", get(lookup::water_quality))
}
