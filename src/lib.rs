// src/lib.rs
// Public library surface for the binary and the integration tests.

pub mod ai;
pub mod api;
pub mod config;
pub mod error;
pub mod forecast;
pub mod market;
pub mod narrative;
pub mod providers;
pub mod services;
pub mod telemetry;

use anyhow::Context;
use axum::Router;
use tracing::info;

pub use crate::api::router;
pub use crate::config::Settings;
pub use crate::services::AppState;

/// The router the binary serves, wired from the environment.
pub fn app() -> anyhow::Result<Router> {
    let settings = Settings::from_env();
    let state = AppState::from_settings(&settings).context("building application state")?;
    let mut router = api::router(state, &settings.cors_origins);

    if telemetry::route_enabled() {
        let m = telemetry::Metrics::init()?;
        router = router.merge(m.router());
        info!("metrics route mounted at /metrics");
    }
    Ok(router)
}
