//! Shared integration-test harness.
//!
//! Builds the full application router over a `#[sqlx::test]` pool with
//! the exact middleware stack production uses, plus request/response
//! helpers. The Zai completion client is deliberately unconfigured and
//! the lookup clients point at an unroutable address, so every remote
//! path exercises its fallback without touching the network.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use zerozero_api::config::ServerConfig;
use zerozero_api::router::build_app_router;
use zerozero_api::state::AppState;
use zerozero_lookup::geocode::GeocodeClient;
use zerozero_lookup::water_quality::WaterQualityClient;
use zerozero_zai::chat::ChatBridge;
use zerozero_zai::client::{CompletionClient, CompletionConfig};
use zerozero_zai::tips::TipGenerator;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
    }
}

/// Build the full application router with all middleware layers, using
/// the given database pool and offline external clients.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let completion = Arc::new(CompletionClient::new(CompletionConfig::unconfigured()));

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        tip_generator: Arc::new(TipGenerator::new(completion.clone())),
        chat_bridge: Arc::new(ChatBridge::new(completion)),
        geocode: Arc::new(GeocodeClient::new("http://127.0.0.1:9".to_string())),
        water: Arc::new(WaterQualityClient::new("http://127.0.0.1:9".to_string())),
    };

    build_app_router(state, &config)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

/// Issue a GET request.
pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

/// Issue a POST request with no body.
pub async fn post(app: &Router, uri: &str) -> Response<Body> {
    send(app, Method::POST, uri, None).await
}

/// Issue a POST request with a JSON body.
pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

/// Issue a PUT request with a JSON body.
pub async fn put_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

/// Issue a DELETE request.
pub async fn delete(app: &Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body was not valid JSON")
}

/// A valid profile payload for tests; the reference high-footprint
/// profile (house, 3 rooms, grid energy, petrol car, 2000/month).
pub fn sample_profile_payload() -> serde_json::Value {
    serde_json::json!({
        "name": "Ada",
        "postcode": "BS1 4DJ",
        "home_type": "house",
        "rooms": 3,
        "people": 2,
        "transport": "car",
        "car_type": "petrol",
        "energy_source": "grid",
        "monthly_spend": 2000,
        "goals": ["reduce_carbon"],
    })
}

/// Create a profile via the API and return its ID.
pub async fn create_profile(app: &Router, payload: serde_json::Value) -> i64 {
    let response = post_json(app, "/api/v1/profiles", payload).await;
    assert_eq!(response.status().as_u16(), 201, "profile creation failed");
    let json = body_json(response).await;
    json["data"]["id"].as_i64().expect("profile id missing")
}
