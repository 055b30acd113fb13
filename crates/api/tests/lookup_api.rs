//! Integration tests for lookup endpoints.
//!
//! The test clients point at an unroutable address, so upstream
//! failures are exercised without the network; validation errors are
//! caught before any request is issued.

mod common;

use axum::http::StatusCode;
use common::{body_json, get};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn water_quality_rejects_inverted_date_range(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(
        &app,
        "/api/v1/water-quality?state=06&characteristic=pH&from=2024-12-31&to=2024-01-01",
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn water_quality_maps_unreachable_upstream_to_502(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(
        &app,
        "/api/v1/water-quality?state=06&characteristic=pH&from=2024-01-01&to=2024-12-31",
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body = body_json(response).await;
    assert_eq!(body["code"], "UPSTREAM_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn location_lookup_maps_unreachable_upstream_to_502(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(&app, "/api/v1/locations/lookup?postcode=BS1%204DJ").await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn location_lookup_rejects_blank_postcode(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(&app, "/api/v1/locations/lookup?postcode=%20").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
