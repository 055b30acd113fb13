//! Integration tests for the onboarding wizard endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post, put_json};
use serde_json::json;
use sqlx::PgPool;

/// Create a session and return its ID.
async fn create_session(app: &axum::Router) -> i64 {
    let response = post(app, "/api/v1/onboarding-sessions").await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    json["data"]["id"].as_i64().expect("session id missing")
}

/// Merge step data into a session.
async fn put_step_data(app: &axum::Router, id: i64, data: serde_json::Value) {
    let response = put_json(
        app,
        &format!("/api/v1/onboarding-sessions/{id}/step-data"),
        json!({ "step_data": data }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// Advance a session one step, asserting success.
async fn advance(app: &axum::Router, id: i64) -> serde_json::Value {
    let response = post(app, &format!("/api/v1/onboarding-sessions/{id}/advance")).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Session creation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn new_session_starts_at_step_one(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post(&app, "/api/v1/onboarding-sessions").await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["current_step"], 1);
    assert_eq!(json["data"]["status"], "in_progress");
    assert!(json["data"]["profile_id"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn sessions_are_listed(pool: PgPool) {
    let app = common::build_test_app(pool);

    create_session(&app).await;
    create_session(&app).await;

    let response = get(&app, "/api/v1/onboarding-sessions").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_session_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(&app, "/api/v1/onboarding-sessions/9999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Step navigation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn advance_without_step_data_fails(pool: PgPool) {
    let app = common::build_test_app(pool);
    let id = create_session(&app).await;

    let response = post(&app, &format!("/api/v1/onboarding-sessions/{id}/advance")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn step_data_then_advance_moves_forward(pool: PgPool) {
    let app = common::build_test_app(pool);
    let id = create_session(&app).await;

    put_step_data(&app, id, json!({ "name": "Ada" })).await;
    let json = advance(&app, id).await;

    assert_eq!(json["data"]["current_step"], 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn go_back_from_first_step_fails(pool: PgPool) {
    let app = common::build_test_app(pool);
    let id = create_session(&app).await;

    let response = post(&app, &format!("/api/v1/onboarding-sessions/{id}/go-back")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn go_back_returns_to_previous_step(pool: PgPool) {
    let app = common::build_test_app(pool);
    let id = create_session(&app).await;

    put_step_data(&app, id, json!({ "name": "Ada" })).await;
    advance(&app, id).await;

    let response = post(&app, &format!("/api/v1/onboarding-sessions/{id}/go-back")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["current_step"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn malformed_enum_in_step_data_is_rejected_on_advance(pool: PgPool) {
    let app = common::build_test_app(pool);
    let id = create_session(&app).await;

    put_step_data(&app, id, json!({ "name": "Ada" })).await;
    advance(&app, id).await;
    put_step_data(&app, id, json!({ "postcode": "BS1 4DJ" })).await;
    advance(&app, id).await;

    // Step 3 expects a recognized home type.
    put_step_data(&app, id, json!({ "home_type": "castle" })).await;
    let response = post(&app, &format!("/api/v1/onboarding-sessions/{id}/advance")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFIGURATION_ERROR");
}

// ---------------------------------------------------------------------------
// Abandonment
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn abandoned_session_rejects_navigation(pool: PgPool) {
    let app = common::build_test_app(pool);
    let id = create_session(&app).await;

    let response = post(&app, &format!("/api/v1/onboarding-sessions/{id}/abandon")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "abandoned");

    let response = post(&app, &format!("/api/v1/onboarding-sessions/{id}/advance")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn abandoning_twice_fails(pool: PgPool) {
    let app = common::build_test_app(pool);
    let id = create_session(&app).await;

    post(&app, &format!("/api/v1/onboarding-sessions/{id}/abandon")).await;
    let response = post(&app, &format!("/api/v1/onboarding-sessions/{id}/abandon")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Completion
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn complete_before_final_step_fails(pool: PgPool) {
    let app = common::build_test_app(pool);
    let id = create_session(&app).await;

    let response = post(&app, &format!("/api/v1/onboarding-sessions/{id}/complete")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn full_wizard_run_creates_a_profile(pool: PgPool) {
    let app = common::build_test_app(pool);
    let id = create_session(&app).await;

    let steps = [
        json!({ "name": "Ada" }),
        json!({ "postcode": "BS1 4DJ" }),
        json!({ "home_type": "house" }),
        json!({ "rooms": 3, "people": 2 }),
        json!({ "transport": "car", "car_type": "petrol" }),
        json!({ "energy_source": "grid" }),
        json!({ "monthly_spend": 2000 }),
    ];
    for step in steps {
        put_step_data(&app, id, step).await;
        advance(&app, id).await;
    }
    put_step_data(&app, id, json!({ "goals": ["reduce_carbon", "save_money"] })).await;

    let response = post(&app, &format!("/api/v1/onboarding-sessions/{id}/complete")).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["session"]["status"], "completed");
    assert_eq!(json["data"]["profile"]["name"], "Ada");
    assert_eq!(json["data"]["profile"]["home_type"], "house");
    assert_eq!(json["data"]["profile"]["monthly_spend"], 2000);

    let profile_id = json["data"]["profile"]["id"].as_i64().unwrap();
    assert_eq!(json["data"]["session"]["profile_id"], profile_id);

    // The profile is fetchable afterwards.
    let response = get(&app, &format!("/api/v1/profiles/{profile_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn completed_session_cannot_complete_again(pool: PgPool) {
    let app = common::build_test_app(pool);
    let id = create_session(&app).await;

    let steps = [
        json!({ "name": "Ada" }),
        json!({ "postcode": "BS1 4DJ" }),
        json!({ "home_type": "shared" }),
        json!({ "rooms": 1, "people": 3 }),
        json!({ "transport": "walk" }),
        json!({ "energy_source": "renewable" }),
        json!({ "monthly_spend": 500 }),
    ];
    for step in steps {
        put_step_data(&app, id, step).await;
        advance(&app, id).await;
    }
    put_step_data(&app, id, json!({ "goals": ["waste_less"] })).await;

    let response = post(&app, &format!("/api/v1/onboarding-sessions/{id}/complete")).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post(&app, &format!("/api/v1/onboarding-sessions/{id}/complete")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
