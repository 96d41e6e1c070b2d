// src/providers/types.rs
//! Payloads returned by the data capabilities. Growth figures here are raw
//! fractions as the providers report them (0.061 = 6.1 %), except where noted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stock overview capability (Alpha Vantage OVERVIEW shape).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StockOverview {
    pub market_cap: Option<f64>,
    pub revenue_growth_yoy: Option<f64>,
    pub eps_growth: Option<f64>,
    pub sector: Option<String>,
    pub industry: Option<String>,
}

/// Stock info capability (Yahoo Finance shapes, RapidAPI and public).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StockInfo {
    pub market_cap: Option<f64>,
    pub revenue_growth: Option<f64>,
    pub revenue: Option<f64>,
    pub sector: Option<String>,
    pub industry: Option<String>,
}

/// First matched entity of a company-database search. `growth_rate` is
/// already a percentage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompanyRecord {
    pub growth_rate: f64,
    pub total_funding: u64,
    pub valuation: u64,
    pub categories: Vec<String>,
}

/// Industry-level market data. `growth_rate` is a percentage.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct IndustryRecord {
    #[serde(default)]
    pub growth_rate: f64,
    #[serde(default)]
    pub funding_volume: u64,
    #[serde(default)]
    pub sectors: Vec<String>,
    #[serde(default)]
    pub market_size: u64,
    #[serde(default)]
    pub competition_level: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    #[serde(rename = "publishedAt", default)]
    pub published_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One daily close.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub date: DateTime<Utc>,
    pub close: f64,
}
