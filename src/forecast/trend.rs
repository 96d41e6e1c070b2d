// src/forecast/trend.rs
//! Synthetic trend series derived from a growth rate, and a noiseless
//! forward extrapolation of the same multiplicative trend.

use chrono::{DateTime, Duration, NaiveTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

use crate::forecast::{ForecastPoint, TrendPoint};

const DAILY_VOLATILITY: f64 = 0.02;
const BAND_LOWER: f64 = 0.95;
const BAND_UPPER: f64 = 1.05;
pub const DAYS_PER_PERIOD: u32 = 30;

/// Start of the current UTC day. Series are anchored here so two calls on
/// the same day produce identical timestamps.
pub fn today_anchor() -> DateTime<Utc> {
    midnight(Utc::now())
}

pub fn midnight(t: DateTime<Utc>) -> DateTime<Utc> {
    t.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// `(1 + growth/100)^(1/365)`.
pub fn daily_factor(growth_pct: f64) -> f64 {
    (1.0 + growth_pct / 100.0).max(0.0).powf(1.0 / 365.0)
}

fn seed_for(growth_pct: f64) -> u64 {
    // Negative rates wrap; only reproducibility matters.
    (growth_pct * 100.0).floor() as i64 as u64
}

/// `days` points ending the day before today (UTC).
pub fn synthesize(growth_pct: f64, days: u32, base: Option<f64>) -> Vec<TrendPoint> {
    synthesize_at(growth_pct, days, base, today_anchor())
}

/// Point `i` is dated `anchor - days + i` and valued
/// `base * factor^i * (1 + N(0, 0.02))`, with the noise drawn from a
/// generator seeded by `floor(growth * 100)`.
pub fn synthesize_at(
    growth_pct: f64,
    days: u32,
    base: Option<f64>,
    anchor: DateTime<Utc>,
) -> Vec<TrendPoint> {
    let base = base.unwrap_or(50.0 + 2.0 * growth_pct);
    let factor = daily_factor(growth_pct);
    let mut rng = StdRng::seed_from_u64(seed_for(growth_pct));
    let noise = Normal::new(0.0, DAILY_VOLATILITY).ok();
    let start = anchor - Duration::days(i64::from(days));

    (0..days)
        .map(|i| {
            let shock = noise.as_ref().map_or(0.0, |n| n.sample(&mut rng));
            TrendPoint {
                timestamp: start + Duration::days(i64::from(i)),
                value: base * factor.powi(i as i32) * (1.0 + shock),
            }
        })
        .collect()
}

/// `periods * 30` daily points after the last history point, no noise,
/// with a ±5 % band.
pub fn extrapolate(history: &[TrendPoint], growth_pct: f64, periods: u32) -> Vec<ForecastPoint> {
    let Some(last) = history.last() else {
        return Vec::new();
    };
    let factor = daily_factor(growth_pct);
    (1..=periods * DAYS_PER_PERIOD)
        .map(|step| {
            let yhat = last.value * factor.powi(step as i32);
            ForecastPoint {
                ds: last.timestamp + Duration::days(i64::from(step)),
                yhat,
                yhat_lower: yhat * BAND_LOWER,
                yhat_upper: yhat * BAND_UPPER,
            }
        })
        .collect()
}

/// Annualized growth (percent) implied by the first and last values.
/// `None` for series shorter than a day or with non-positive endpoints.
pub fn implied_annual_growth(series: &[TrendPoint]) -> Option<f64> {
    let (first, last) = (series.first()?, series.last()?);
    let span_days = (last.timestamp - first.timestamp).num_days();
    if span_days < 1 || first.value <= 0.0 || last.value <= 0.0 {
        return None;
    }
    let annual = (last.value / first.value).powf(365.0 / span_days as f64) - 1.0;
    Some(annual * 100.0).filter(|g| g.is_finite())
}

/// Deterministic straight line (`100 + 0.5 i`), the last-resort history.
pub fn linear_sample(days: u32, anchor: DateTime<Utc>) -> Vec<TrendPoint> {
    let start = anchor - Duration::days(i64::from(days));
    (0..days)
        .map(|i| TrendPoint {
            timestamp: start + Duration::days(i64::from(i)),
            value: 100.0 + f64::from(i) * 0.5,
        })
        .collect()
}
