// src/services/forecast.rs
//! GenerateForecast.
//!
//! History, first available: caller data, the company's daily closes, a trend
//! synthesized from the resolved growth rate, a straight-line sample. The
//! forecast comes from the configured fitter, or extrapolates the history.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::forecast::trend::{self, DAYS_PER_PERIOD};
use crate::forecast::{ForecastPoint, TrendPoint};
use crate::market::{symbols, DataSource, Subject, SOURCE_REQUEST};
use crate::providers::http::lenient_f64;
use crate::providers::ProviderSet;
use crate::services::AppState;

pub const MIN_PERIODS: i64 = 1;
pub const MAX_PERIODS: i64 = 36;
pub const PRICE_HISTORY_DAYS: u32 = 365;

pub const SOURCE_TREND: &str = "trend_synthesis";
pub const SOURCE_SAMPLE: &str = "sample_series";
pub const NOTE_SUPPLIED_SERIES: &str =
    "⚠️ Series supplied by the caller; not verified against providers.";
pub const NOTE_SAMPLE: &str =
    "⚠️ Sample series. No historical data or growth rate was available for this request.";

fn default_metric() -> String {
    "growth".to_string()
}

fn default_periods() -> i64 {
    12
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastRequest {
    /// `funding`, `growth`, `revenue`, ...; also the fallback value key of `data` rows.
    #[serde(default = "default_metric")]
    pub metric: String,
    /// Rows with a date (`date`/`ds`) and a value (`value`/`y`/<metric>).
    #[serde(default)]
    pub data: Vec<Value>,
    /// Months; clamped to 1..=36.
    #[serde(default = "default_periods")]
    pub periods: i64,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
}

impl Default for ForecastRequest {
    fn default() -> Self {
        Self {
            metric: default_metric(),
            data: Vec::new(),
            periods: default_periods(),
            industry: None,
            company: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistoricalPoint {
    pub ds: DateTime<Utc>,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ForecastResponse {
    pub metric: String,
    pub historical: Vec<HistoricalPoint>,
    pub forecast: Vec<ForecastPoint>,
    pub confidence_interval: ConfidenceInterval,
    pub data_source: DataSource,
    pub source_api: String,
    pub note: Option<String>,
}

/// A history series and where it came from.
struct History {
    points: Vec<TrendPoint>,
    /// Growth rate the series was built from, if any.
    growth: Option<f64>,
    data_source: DataSource,
    source_api: String,
    note: Option<String>,
}

pub fn clamp_periods(periods: i64) -> u32 {
    periods.clamp(MIN_PERIODS, MAX_PERIODS) as u32
}

pub async fn generate_forecast(state: &AppState, req: ForecastRequest) -> ForecastResponse {
    let periods = clamp_periods(req.periods);
    let horizon = periods * DAYS_PER_PERIOD;
    let subject = Subject::new(req.industry.as_deref(), req.company.as_deref());

    let history = assemble_history(state, &subject, &req.data, &req.metric, periods).await;
    let growth = history
        .growth
        .or_else(|| trend::implied_annual_growth(&history.points))
        .unwrap_or(0.0);

    let forecast = match fit(state, &history.points, horizon) {
        Some(points) => points,
        None => trend::extrapolate(&history.points, growth, periods),
    };
    let confidence_interval = interval(&forecast);

    info!(
        subject = subject.label(),
        metric = %req.metric,
        periods,
        history = history.points.len(),
        source_api = %history.source_api,
        "forecast generated"
    );

    let keep = horizon as usize;
    let skip = history.points.len().saturating_sub(keep);
    ForecastResponse {
        metric: req.metric,
        historical: history.points[skip..]
            .iter()
            .map(|p| HistoricalPoint {
                ds: p.timestamp,
                y: p.value,
            })
            .collect(),
        forecast,
        confidence_interval,
        data_source: history.data_source,
        source_api: history.source_api,
        note: history.note,
    }
}

async fn assemble_history(
    state: &AppState,
    subject: &Subject,
    data: &[Value],
    metric: &str,
    periods: u32,
) -> History {
    let supplied = supplied_series(data, metric, trend::today_anchor());
    if supplied.len() >= 2 {
        return History {
            points: supplied,
            growth: None,
            data_source: DataSource::EstimatedFallback,
            source_api: SOURCE_REQUEST.to_string(),
            note: Some(NOTE_SUPPLIED_SERIES.to_string()),
        };
    }
    if !data.is_empty() {
        debug!(rows = data.len(), "request data has fewer than two usable rows");
    }

    if let Some(h) = price_history(state, subject).await {
        return h;
    }

    if !subject.label().is_empty() {
        let (_, metrics) = state.metrics_for(subject).await;
        if metrics.growth_rate > 0.0 {
            let g = metrics.growth_rate;
            return History {
                points: trend::synthesize(g, periods * DAYS_PER_PERIOD, None),
                growth: Some(g),
                data_source: DataSource::EstimatedFallback,
                source_api: SOURCE_TREND.to_string(),
                note: Some(format!(
                    "⚠️ Synthetic trend from a {g:.1}% annual growth rate ({}).",
                    metrics.source_api
                )),
            };
        }
        debug!(subject = subject.label(), "no positive growth rate, using sample series");
    }

    History {
        points: trend::linear_sample(periods * DAYS_PER_PERIOD, trend::today_anchor()),
        growth: None,
        data_source: DataSource::EstimatedFallback,
        source_api: SOURCE_SAMPLE.to_string(),
        note: Some(NOTE_SAMPLE.to_string()),
    }
}

async fn price_history(state: &AppState, subject: &Subject) -> Option<History> {
    let company = subject.company.as_deref()?;
    let ticker = symbols::company_to_ticker(company)?;
    let slot = &state.resolver.providers().history;
    let attempt = ProviderSet::attempt(slot, |p| p.price_history(&ticker, PRICE_HISTORY_DAYS)).await;
    attempt.log_outcome("price_history", company);

    let points: Vec<TrendPoint> = attempt
        .success()?
        .into_iter()
        .filter(|p| p.close.is_finite() && p.close > 0.0)
        .map(|p| TrendPoint {
            timestamp: p.date,
            value: p.close,
        })
        .collect();
    if points.len() < 2 {
        return None;
    }
    Some(History {
        points,
        growth: None,
        data_source: DataSource::RealTimeApi,
        source_api: slot.as_ref().map_or("price_history", |p| p.name()).to_string(),
        note: None,
    })
}

/// `None` when no fitter is configured, it errors, or it returns nothing.
fn fit(state: &AppState, history: &[TrendPoint], horizon_days: u32) -> Option<Vec<ForecastPoint>> {
    let fitter = state.fitter.as_ref()?;
    match fitter.fit(history, horizon_days) {
        Ok(points) if !points.is_empty() => Some(points),
        Ok(_) => {
            warn!(fitter = fitter.name(), "trend fitter returned no points, extrapolating");
            None
        }
        Err(e) => {
            warn!(fitter = fitter.name(), error = %e, "trend fitter failed, extrapolating");
            None
        }
    }
}

fn interval(forecast: &[ForecastPoint]) -> ConfidenceInterval {
    if forecast.is_empty() {
        return ConfidenceInterval {
            lower: 0.0,
            upper: 0.0,
        };
    }
    let n = forecast.len() as f64;
    ConfidenceInterval {
        lower: forecast.iter().map(|p| p.yhat_lower).sum::<f64>() / n,
        upper: forecast.iter().map(|p| p.yhat_upper).sum::<f64>() / n,
    }
}

fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .map(|d| d.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            let day = raw.get(..10)?;
            NaiveDate::parse_from_str(day, "%Y-%m-%d")
                .ok()
                .map(|d| d.and_time(NaiveTime::MIN).and_utc())
        })
}

/// Rows with a usable value, in date order. When any row lacks a date the
/// rows keep their order and get consecutive days ending before `anchor`.
fn supplied_series(rows: &[Value], metric: &str, anchor: DateTime<Utc>) -> Vec<TrendPoint> {
    let parsed: Vec<(Option<DateTime<Utc>>, f64)> = rows
        .iter()
        .filter_map(|row| {
            let value = ["value", "y", metric]
                .iter()
                .find_map(|k| row.get(*k).and_then(lenient_f64))?;
            let date = ["date", "ds", "timestamp"]
                .iter()
                .find_map(|k| row.get(*k).and_then(Value::as_str).and_then(parse_date));
            Some((date, value))
        })
        .collect();

    if parsed.iter().all(|(d, _)| d.is_some()) {
        let mut points: Vec<TrendPoint> = parsed
            .into_iter()
            .filter_map(|(d, value)| d.map(|timestamp| TrendPoint { timestamp, value }))
            .collect();
        points.sort_by_key(|p| p.timestamp);
        return points;
    }

    let start = anchor - Duration::days(parsed.len() as i64);
    parsed
        .into_iter()
        .enumerate()
        .map(|(i, (_, value))| TrendPoint {
            timestamp: start + Duration::days(i as i64),
            value,
        })
        .collect()
}
