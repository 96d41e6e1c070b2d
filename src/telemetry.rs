// src/telemetry.rs
//! Prometheus exporter for the `metrics` counters.

use anyhow::Context;
use axum::{routing::get, Router};
use metrics::describe_counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

/// The global recorder can be installed once per process.
static HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

pub const ENV_METRICS_ROUTE: &str = "METRICS_ROUTE";

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the recorder on first call; later calls share it.
    pub fn init() -> anyhow::Result<Self> {
        let handle = HANDLE
            .get_or_try_init(|| {
                let handle = PrometheusBuilder::new()
                    .install_recorder()
                    .context("prometheus: install recorder")?;
                describe();
                Ok::<_, anyhow::Error>(handle)
            })?
            .clone();
        Ok(Self { handle })
    }

    pub fn render(&self) -> String {
        self.handle.render()
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}

pub fn route_enabled() -> bool {
    std::env::var(ENV_METRICS_ROUTE)
        .map(|v| matches!(v.trim(), "1" | "true" | "on"))
        .unwrap_or(false)
}

fn describe() {
    describe_counter!(
        "resolver_tier_total",
        "Metric resolver tier attempts by tier and outcome"
    );
    describe_counter!(
        "narrative_stage_total",
        "Narrative parser stages that produced the result, by shape"
    );
    describe_counter!(
        "text_generation_total",
        "Text generation calls by provider and outcome"
    );
    describe_counter!(
        "provider_errors_total",
        "Provider failures (not unavailability) by error kind"
    );
}
