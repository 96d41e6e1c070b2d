// src/forecast/mod.rs
//! Time-series types and the optional fitting seam.

pub mod trend;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One daily observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub ds: DateTime<Utc>,
    pub yhat: f64,
    pub yhat_lower: f64,
    pub yhat_upper: f64,
}

/// External statistical fitter. When none is configured, or it errors, the
/// forecast falls back to [`trend::extrapolate`].
pub trait TrendFitter: Send + Sync {
    fn name(&self) -> &'static str;

    /// `horizon_days` points past the end of `history`.
    fn fit(&self, history: &[TrendPoint], horizon_days: u32) -> anyhow::Result<Vec<ForecastPoint>>;
}
