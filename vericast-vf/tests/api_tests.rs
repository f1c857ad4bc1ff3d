//! HTTP API integration tests
//!
//! Drives the router in-process. The orchestrator is built from an empty
//! provider configuration, so handlers run the real pipeline without any
//! network traffic.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use vericast_vf::config::VerifierConfig;
use vericast_vf::services::VerificationOrchestrator;
use vericast_vf::{build_router, AppState};

fn test_app_state() -> AppState {
    let orchestrator = VerificationOrchestrator::from_config(&VerifierConfig::unconfigured());
    AppState::new(orchestrator)
}

fn verify_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/verify")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn verify_returns_complete_result() {
    // Given: a router with no providers configured
    let app = build_router(test_app_state());

    // When: POST /verify
    let response = app
        .oneshot(verify_request(json!({"statement": "The Earth is flat"})))
        .await
        .unwrap();

    // Then: a complete camelCase result with all four agents
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let result: Value = serde_json::from_slice(&body).unwrap();

    assert!(result["statementId"].is_string());
    assert_eq!(result["isFalse"], false);
    assert_eq!(result["consensus"], "inconclusive");
    assert!(result.get("correctInformation").is_none());

    let agents = result["agents"].as_array().unwrap();
    assert_eq!(agents.len(), 4);
    let names: Vec<&str> = agents.iter().map(|a| a["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Claude", "Fetch.ai", "Gemini", "BrightData"]);
    for agent in agents {
        assert_eq!(agent["verdict"], "inconclusive");
        assert_eq!(agent["confidence"], 0.0);
        assert_eq!(agent["reasoning"], "API key not configured");
    }

    assert_eq!(result["lavaGatewayConsensus"]["verdict"], "inconclusive");
    assert_eq!(result["lavaGatewayConsensus"]["score"], 1.0);
}

#[tokio::test]
async fn verify_rejects_empty_statement() {
    let app = build_router(test_app_state());

    let response = app
        .oneshot(verify_request(json!({"statement": "   "})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let error: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn verify_rejects_missing_field() {
    let app = build_router(test_app_state());

    let response = app
        .oneshot(verify_request(json!({"text": "wrong field"})))
        .await
        .unwrap();

    // axum's Json extractor rejects the body before the handler runs
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn health_reports_module_identity() {
    let app = build_router(test_app_state());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let health: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(health["status"], "ok");
    assert_eq!(health["module"], "vericast-vf");
    assert!(health["version"].is_string());
    assert!(health["uptime_seconds"].is_u64());
}

#[tokio::test]
async fn degraded_run_surfaces_in_health() {
    // Same state shared across both requests
    let state = test_app_state();

    let response = build_router(state.clone())
        .oneshot(verify_request(json!({"statement": "Anything"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = build_router(state)
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let health: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        health["last_error"],
        "all providers unavailable or unconfigured"
    );
}

#[tokio::test]
async fn events_stream_connects() {
    let app = build_router(test_app_state());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/events")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // The stream never terminates; assert on status and content type only
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers().get(header::CONTENT_TYPE).unwrap();
    assert!(content_type.to_str().unwrap().contains("text/event-stream"));
}

#[tokio::test]
async fn unknown_route_is_404() {
    let app = build_router(test_app_state());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/does-not-exist")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
