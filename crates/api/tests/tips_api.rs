//! Integration tests for tip generation and persistence.
//!
//! The test harness runs with an unconfigured completion client, so
//! every generation exercises the deterministic fallback rules.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_profile, get, sample_profile_payload};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn generation_falls_back_without_api_key(pool: PgPool) {
    let app = common::build_test_app(pool);
    let id = create_profile(&app, sample_profile_payload()).await;

    let response = get(&app, &format!("/api/v1/profiles/{id}/tips")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["source"], "fallback");

    let tips = body["data"]["tips"].as_array().unwrap();
    assert!(!tips.is_empty());
    assert!(tips.len() <= 6);

    // Grid energy puts the tariff tip first.
    assert_eq!(tips[0]["title"], "Switch to a renewable tariff");
    assert_eq!(tips[0]["category"], "carbon");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn generated_batch_is_persisted(pool: PgPool) {
    let app = common::build_test_app(pool);
    let id = create_profile(&app, sample_profile_payload()).await;

    let generated = body_json(get(&app, &format!("/api/v1/profiles/{id}/tips")).await).await;
    let generated_count = generated["data"]["tips"].as_array().unwrap().len();

    let response = get(&app, &format!("/api/v1/profiles/{id}/tips/saved")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let saved = body_json(response).await;
    let rows = saved["data"].as_array().unwrap();
    assert_eq!(rows.len(), generated_count);
    assert_eq!(rows[0]["source"], "fallback");

    // Insertion order is preserved.
    for (i, row) in rows.iter().enumerate() {
        assert_eq!(row["sort_order"], i as i64);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn regeneration_replaces_the_batch(pool: PgPool) {
    let app = common::build_test_app(pool);
    let id = create_profile(&app, sample_profile_payload()).await;

    get(&app, &format!("/api/v1/profiles/{id}/tips")).await;
    let second = body_json(get(&app, &format!("/api/v1/profiles/{id}/tips")).await).await;
    let second_count = second["data"]["tips"].as_array().unwrap().len();

    let saved = body_json(get(&app, &format!("/api/v1/profiles/{id}/tips/saved")).await).await;
    // Replaced, not appended.
    assert_eq!(saved["data"].as_array().unwrap().len(), second_count);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn tips_for_unknown_profile_return_404(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(&app, "/api/v1/profiles/9999/tips").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn saved_tips_empty_before_first_generation(pool: PgPool) {
    let app = common::build_test_app(pool);
    let id = create_profile(&app, sample_profile_payload()).await;

    let saved = body_json(get(&app, &format!("/api/v1/profiles/{id}/tips/saved")).await).await;
    assert!(saved["data"].as_array().unwrap().is_empty());
}
