// src/api.rs
//! HTTP surface. Handlers are thin: every operation degrades internally, so
//! none of them return an error status for missing provider data.

use axum::{
    extract::{Path, State},
    http::HeaderValue,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::warn;

use crate::market::baseline;
use crate::services::forecast::{generate_forecast, ForecastRequest, ForecastResponse};
use crate::services::insight::{generate_insight, InsightRequest, InsightResponse};
use crate::services::market::{get_market_metrics, MarketDataRequest, MarketDataResponse};
use crate::services::strategy::{generate_strategy, StrategyRequest, StrategyResponse};
use crate::services::AppState;

pub fn router(state: AppState, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(|| async { Json(json!({ "status": "healthy" })) }))
        .route("/api/market", post(market))
        .route("/api/market/industries", get(industries))
        .route("/api/insights", post(insights))
        .route("/api/strategy", post(strategy))
        .route("/api/strategy/{kind}", post(strategy_of_kind))
        .route("/api/forecast", post(forecast))
        .layer(cors_layer(cors_origins))
        .with_state(state)
}

/// `*` anywhere in the list means any origin.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o.trim() == "*") {
        return CorsLayer::permissive();
    }
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o.trim()) {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(origin = %o, "invalid CORS origin ignored");
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn root() -> Json<Value> {
    Json(json!({
        "name": "StratIQ API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn industries() -> Json<Value> {
    let list: Vec<&str> = baseline::known_industries().collect();
    Json(json!({ "industries": list }))
}

async fn market(
    State(state): State<AppState>,
    Json(req): Json<MarketDataRequest>,
) -> Json<MarketDataResponse> {
    Json(get_market_metrics(&state, req).await)
}

async fn insights(
    State(state): State<AppState>,
    Json(req): Json<InsightRequest>,
) -> Json<InsightResponse> {
    Json(generate_insight(&state, req).await)
}

async fn strategy(
    State(state): State<AppState>,
    Json(req): Json<StrategyRequest>,
) -> Json<StrategyResponse> {
    Json(generate_strategy(&state, req).await)
}

/// `/api/strategy/{swot|pestel|growth}`; the path wins over the body.
async fn strategy_of_kind(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Json(mut req): Json<StrategyRequest>,
) -> Json<StrategyResponse> {
    req.analysis_type = kind;
    Json(generate_strategy(&state, req).await)
}

async fn forecast(
    State(state): State<AppState>,
    Json(req): Json<ForecastRequest>,
) -> Json<ForecastResponse> {
    Json(generate_forecast(&state, req).await)
}
