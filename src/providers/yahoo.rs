// src/providers/yahoo.rs
//! Public Yahoo Finance endpoints (no key). Serves the free stock tier and the
//! historical price series used by forecasts.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::HeaderMap;
use serde_json::Value;

use crate::error::ProviderError;
use crate::providers::http::{get_json, lenient_f64, number_at, string_at};
use crate::providers::{DataProvider, PricePoint, ProviderResult, StockInfo};

const QUOTE_SUMMARY_URL: &str = "https://query2.finance.yahoo.com/v10/finance/quoteSummary";
const CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

pub struct YahooFreeClient {
    http: reqwest::Client,
}

impl YahooFreeClient {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl DataProvider for YahooFreeClient {
    fn name(&self) -> &'static str {
        "yahoo_finance_free"
    }

    async fn stock_info(&self, symbol: &str) -> ProviderResult<StockInfo> {
        let url = format!("{QUOTE_SUMMARY_URL}/{symbol}");
        let body = get_json(
            &self.http,
            self.name(),
            &url,
            HeaderMap::new(),
            &[("modules", "price,financialData,assetProfile")],
        )
        .await?;
        parse_quote_summary(&body).ok_or_else(|| ProviderError::no_data(self.name(), symbol))
    }

    async fn price_history(&self, symbol: &str, days: u32) -> ProviderResult<Vec<PricePoint>> {
        let url = format!("{CHART_URL}/{symbol}");
        let range = chart_range(days);
        let body = get_json(
            &self.http,
            self.name(),
            &url,
            HeaderMap::new(),
            &[("range", range), ("interval", "1d")],
        )
        .await?;
        let points = parse_chart(&body);
        if points.is_empty() {
            return Err(ProviderError::no_data(self.name(), symbol));
        }
        Ok(points)
    }
}

fn chart_range(days: u32) -> &'static str {
    match days {
        0..=31 => "1mo",
        32..=93 => "3mo",
        94..=186 => "6mo",
        187..=366 => "1y",
        367..=731 => "2y",
        _ => "5y",
    }
}

pub(crate) fn parse_quote_summary(body: &Value) -> Option<StockInfo> {
    let result = body.pointer("/quoteSummary/result/0")?;
    let market_cap = number_at(result, &["/price/marketCap"]).filter(|c| *c > 0.0)?;
    Some(StockInfo {
        market_cap: Some(market_cap),
        revenue_growth: number_at(result, &["/financialData/revenueGrowth"]),
        revenue: number_at(result, &["/financialData/totalRevenue"]),
        sector: string_at(result, &["/assetProfile/sector"]),
        industry: string_at(result, &["/assetProfile/industry"]),
    })
}

/// Zip chart timestamps with closes, skipping null closes.
pub(crate) fn parse_chart(body: &Value) -> Vec<PricePoint> {
    let Some(result) = body.pointer("/chart/result/0") else {
        return Vec::new();
    };
    let stamps = result
        .get("timestamp")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    let closes = result
        .pointer("/indicators/quote/0/close")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    stamps
        .iter()
        .zip(closes.iter())
        .filter_map(|(ts, close)| {
            let date = DateTime::<Utc>::from_timestamp(ts.as_i64()?, 0)?;
            let close = lenient_f64(close)?;
            Some(PricePoint { date, close })
        })
        .collect()
}
