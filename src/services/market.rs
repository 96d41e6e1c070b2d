// src/services/market.rs
//! GetMarketMetrics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::market::{MarketMetrics, Subject};
use crate::providers::NewsItem;
use crate::services::AppState;

fn default_timeframe() -> String {
    "1y".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarketDataRequest {
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    /// `1m`, `3m`, `6m` or `1y`; echoed back, not interpreted.
    #[serde(default = "default_timeframe")]
    pub timeframe: String,
}

impl Default for MarketDataRequest {
    fn default() -> Self {
        Self {
            industry: None,
            company: None,
            timeframe: default_timeframe(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MarketDataInfo {
    pub timeframe: String,
    pub timestamp: DateTime<Utc>,
    pub sources: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarketDataResponse {
    pub industry: Option<String>,
    pub company: Option<String>,
    pub data: MarketDataInfo,
    pub news: Vec<NewsItem>,
    pub metrics: MarketMetrics,
}

pub async fn get_market_metrics(state: &AppState, req: MarketDataRequest) -> MarketDataResponse {
    let subject = Subject::new(req.industry.as_deref(), req.company.as_deref());
    let (news, metrics) = state.metrics_for(&subject).await;

    let mut sources = Vec::with_capacity(2);
    if !news.is_empty() {
        sources.push("newsapi".to_string());
    }
    sources.push(metrics.source_api.clone());

    MarketDataResponse {
        industry: subject.industry,
        company: subject.company,
        data: MarketDataInfo {
            timeframe: req.timeframe,
            timestamp: Utc::now(),
            sources,
        },
        news,
        metrics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::DataSource;

    #[tokio::test]
    async fn offline_request_resolves_to_baseline() {
        let resp = get_market_metrics(
            &AppState::offline(),
            MarketDataRequest {
                industry: Some("Healthcare".into()),
                ..Default::default()
            },
        )
        .await;
        assert_eq!(resp.industry.as_deref(), Some("Healthcare"));
        assert!(resp.news.is_empty());
        assert_eq!(resp.data.timeframe, "1y");
        assert_eq!(resp.data.sources, vec!["industry_baseline"]);
        assert_eq!(resp.metrics.data_source, DataSource::EstimatedFallback);
        assert!(resp.metrics.note.is_some());
    }
}
