//! Integration tests for card interactions and rewards.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_profile, get, post_json, sample_profile_payload};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn completed_card_awards_points(pool: PgPool) {
    let app = common::build_test_app(pool);
    let id = create_profile(&app, sample_profile_payload()).await;

    let response = post_json(
        &app,
        &format!("/api/v1/profiles/{id}/card-interactions"),
        json!({ "category": "carbon", "action": "completed" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["data"]["points_awarded"], 20);
    assert_eq!(body["data"]["balance"]["points"], 20);
    assert_eq!(body["data"]["interaction"]["action"], "completed");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn viewed_card_awards_nothing(pool: PgPool) {
    let app = common::build_test_app(pool);
    let id = create_profile(&app, sample_profile_payload()).await;

    let response = post_json(
        &app,
        &format!("/api/v1/profiles/{id}/card-interactions"),
        json!({ "category": "money", "action": "viewed" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["data"]["points_awarded"], 0);
    assert_eq!(body["data"]["balance"]["points"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn points_accumulate_across_interactions(pool: PgPool) {
    let app = common::build_test_app(pool);
    let id = create_profile(&app, sample_profile_payload()).await;

    for (action, _) in [("saved", 5), ("completed", 20)] {
        post_json(
            &app,
            &format!("/api/v1/profiles/{id}/card-interactions"),
            json!({ "category": "carbon", "action": action }),
        )
        .await;
    }

    let body = body_json(get(&app, &format!("/api/v1/profiles/{id}/rewards")).await).await;
    assert_eq!(body["data"]["points"], 25);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn rewards_balance_initializes_at_zero(pool: PgPool) {
    let app = common::build_test_app(pool);
    let id = create_profile(&app, sample_profile_payload()).await;

    let response = get(&app, &format!("/api/v1/profiles/{id}/rewards")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["points"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn interactions_are_listed(pool: PgPool) {
    let app = common::build_test_app(pool);
    let id = create_profile(&app, sample_profile_payload()).await;

    for action in ["viewed", "saved"] {
        post_json(
            &app,
            &format!("/api/v1/profiles/{id}/card-interactions"),
            json!({ "category": "local", "action": action, "tip_id": "tip-1" }),
        )
        .await;
    }

    let body = body_json(
        get(&app, &format!("/api/v1/profiles/{id}/card-interactions")).await,
    )
    .await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_action_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let id = create_profile(&app, sample_profile_payload()).await;

    let response = post_json(
        &app,
        &format!("/api/v1/profiles/{id}/card-interactions"),
        json!({ "category": "carbon", "action": "ignored" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_category_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let id = create_profile(&app, sample_profile_payload()).await;

    let response = post_json(
        &app,
        &format!("/api/v1/profiles/{id}/card-interactions"),
        json!({ "category": "crypto", "action": "viewed" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["code"], "CONFIGURATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn interaction_for_unknown_profile_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        &app,
        "/api/v1/profiles/9999/card-interactions",
        json!({ "category": "carbon", "action": "viewed" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
