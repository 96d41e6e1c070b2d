// tests/api_http.rs
//
// HTTP-level tests for the public API Router without opening sockets.
// We exercise the router directly via tower::ServiceExt::oneshot against
// the offline state (no provider keys, canned text).
//
// Covered:
// - GET  /health, GET /api/market/industries
// - POST /api/market
// - POST /api/insights
// - POST /api/strategy and /api/strategy/{kind}
// - POST /api/forecast

use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::json;
use serde_json::Value as Json;
use tower::ServiceExt as _; // for `oneshot`

use stratiq::{api, AppState};

const BODY_LIMIT: usize = 4 * 1024 * 1024;

fn test_router() -> Router {
    api::router(AppState::offline(), &["http://localhost:3000".to_string()])
}

async fn call(method: &str, uri: &str, payload: Option<Json>) -> (StatusCode, Json) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match payload {
        Some(p) => builder
            .header("content-type", "application/json")
            .body(Body::from(p.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("build request");

    let resp = test_router().oneshot(req).await.expect("oneshot");
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body");
    let v: Json = serde_json::from_slice(&bytes).expect("json body");
    (status, v)
}

#[tokio::test]
async fn health_reports_healthy() {
    let (status, v) = call("GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["status"], "healthy");
}

#[tokio::test]
async fn industries_lists_every_baseline() {
    let (status, v) = call("GET", "/api/market/industries", None).await;
    assert_eq!(status, StatusCode::OK);
    let list = v["industries"].as_array().expect("industries array");
    assert_eq!(list.len(), 9);
    assert!(list.iter().any(|i| i == "Real Estate"));
}

#[tokio::test]
async fn market_falls_back_to_baseline_with_caveat() {
    let (status, v) = call("POST", "/api/market", Some(json!({ "industry": "Technology" }))).await;
    assert_eq!(status, StatusCode::OK);

    let m = &v["metrics"];
    assert_eq!(m["growth_rate"], 12.5);
    assert_eq!(m["market_size"], 8_500_000_000_000u64);
    assert_eq!(m["competition_level"], "Very High");
    assert_eq!(m["data_source"], "estimated_fallback");
    assert_eq!(m["source_api"], "industry_baseline");
    assert!(m["note"].as_str().is_some_and(|n| !n.is_empty()));
    assert_eq!(v["data"]["timeframe"], "1y");
    assert_eq!(v["data"]["sources"], json!(["industry_baseline"]));
}

#[tokio::test]
async fn market_with_empty_body_uses_default_record() {
    let (status, v) = call("POST", "/api/market", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["metrics"]["source_api"], "default_baseline");
    assert_eq!(v["metrics"]["top_sectors"], json!(["General"]));
}

#[tokio::test]
async fn insight_has_summary_and_takeaways() {
    let (status, v) = call("POST", "/api/insights", Some(json!({ "industry": "Healthcare" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(v["summary"].as_str().is_some_and(|s| !s.is_empty()));
    let takeaways = v["key_takeaways"].as_array().expect("takeaways");
    assert!(!takeaways.is_empty() && takeaways.len() <= 7);
    assert_eq!(v["data_source"], "estimated_fallback");
    assert!(v["created_at"].is_string());
}

#[tokio::test]
async fn strategy_body_and_path_select_kind() {
    let (_, swot) = call("POST", "/api/strategy", Some(json!({ "industry": "Retail" }))).await;
    assert_eq!(swot["type"], "swot");
    for quadrant in ["strengths", "weaknesses", "opportunities", "threats"] {
        let items = swot["content"][quadrant].as_array().expect(quadrant);
        assert!(!items.is_empty() && items.len() <= 4, "{quadrant}");
    }

    let (_, pestel) = call(
        "POST",
        "/api/strategy/pestel",
        Some(json!({ "industry": "Retail", "analysis_type": "swot" })),
    )
    .await;
    assert_eq!(pestel["type"], "pestel");
    assert!(pestel["content"]["legal"].as_array().is_some_and(|l| !l.is_empty()));
    assert!(pestel["recommendations"].as_array().is_some_and(|r| !r.is_empty()));
}

#[tokio::test]
async fn forecast_clamps_periods() {
    let (status, v) = call(
        "POST",
        "/api/forecast",
        Some(json!({ "industry": "Energy", "periods": 99 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["forecast"].as_array().map(Vec::len), Some(36 * 30));
    assert_eq!(v["source_api"], "trend_synthesis");
    let lower = v["confidence_interval"]["lower"].as_f64().expect("lower");
    let upper = v["confidence_interval"]["upper"].as_f64().expect("upper");
    assert!(lower < upper);
}

#[tokio::test]
async fn malformed_json_is_rejected_by_extractor() {
    let req = Request::builder()
        .method("POST")
        .uri("/api/market")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .expect("build request");
    let resp = test_router().oneshot(req).await.expect("oneshot");
    assert!(resp.status().is_client_error());
}
