// src/providers/mod.rs
//! Capability interface for external data sources.
//!
//! Every source implements [`DataProvider`]; a method the source does not
//! support keeps the default body and reports `Unavailable`. The resolver
//! never sees concrete clients, only the role slots of a [`ProviderSet`].

pub mod http;
pub mod news;
pub mod rapidapi;
pub mod types;
pub mod yahoo;

use std::sync::Arc;

use async_trait::async_trait;
use metrics::counter;

use crate::config::settings::Settings;
use crate::error::ProviderError;
pub use crate::providers::types::{
    CompanyRecord, IndustryRecord, NewsItem, PricePoint, StockInfo, StockOverview,
};

pub type ProviderResult<T> = Result<T, ProviderError>;

#[async_trait]
pub trait DataProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn stock_overview(&self, _symbol: &str) -> ProviderResult<StockOverview> {
        Err(ProviderError::unavailable(self.name()))
    }

    async fn stock_info(&self, _symbol: &str) -> ProviderResult<StockInfo> {
        Err(ProviderError::unavailable(self.name()))
    }

    async fn company_lookup(&self, _name: &str) -> ProviderResult<CompanyRecord> {
        Err(ProviderError::unavailable(self.name()))
    }

    async fn industry_data(&self, _industry: &str) -> ProviderResult<IndustryRecord> {
        Err(ProviderError::unavailable(self.name()))
    }

    async fn news(&self, _query: &str, _limit: usize) -> ProviderResult<Vec<NewsItem>> {
        Err(ProviderError::unavailable(self.name()))
    }

    async fn price_history(&self, _symbol: &str, _days: u32) -> ProviderResult<Vec<PricePoint>> {
        Err(ProviderError::unavailable(self.name()))
    }
}

pub type SharedProvider = Arc<dyn DataProvider>;

/// One try against one capability.
#[derive(Debug)]
pub enum Attempt<T> {
    Success(T),
    Unavailable,
    Failure(ProviderError),
}

impl<T> Attempt<T> {
    pub fn label(&self) -> &'static str {
        match self {
            Attempt::Success(_) => "success",
            Attempt::Unavailable => "unavailable",
            Attempt::Failure(_) => "failure",
        }
    }

    pub fn success(self) -> Option<T> {
        match self {
            Attempt::Success(v) => Some(v),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Attempt<U> {
        match self {
            Attempt::Success(v) => Attempt::Success(f(v)),
            Attempt::Unavailable => Attempt::Unavailable,
            Attempt::Failure(e) => Attempt::Failure(e),
        }
    }

    /// Validate or reshape a success; an `Err` becomes the matching non-success.
    pub fn and_then<U>(self, f: impl FnOnce(T) -> ProviderResult<U>) -> Attempt<U> {
        match self {
            Attempt::Success(v) => Attempt::from(f(v)),
            Attempt::Unavailable => Attempt::Unavailable,
            Attempt::Failure(e) => Attempt::Failure(e),
        }
    }

    /// Log (and count) a non-success outcome. Unavailable stays at debug level.
    pub fn log_outcome(&self, tier: &str, subject: &str) {
        match self {
            Attempt::Success(_) => {}
            Attempt::Unavailable => {
                tracing::debug!(tier, subject, "provider unavailable, skipping tier");
            }
            Attempt::Failure(e) => {
                tracing::warn!(tier, subject, error = %e, "provider failed, falling through");
                counter!("provider_errors_total", "kind" => e.kind()).increment(1);
            }
        }
    }
}

impl<T> From<ProviderResult<T>> for Attempt<T> {
    fn from(res: ProviderResult<T>) -> Self {
        match res {
            Ok(v) => Attempt::Success(v),
            Err(e) if e.is_unavailable() => Attempt::Unavailable,
            Err(e) => Attempt::Failure(e),
        }
    }
}

/// Role slots; an empty slot is an unavailable capability.
#[derive(Clone, Default)]
pub struct ProviderSet {
    pub stock_overview: Option<SharedProvider>,
    pub stock_info: Option<SharedProvider>,
    pub company_db: Option<SharedProvider>,
    pub free_stock: Option<SharedProvider>,
    pub industry: Option<SharedProvider>,
    pub news: Option<SharedProvider>,
    pub history: Option<SharedProvider>,
}

impl ProviderSet {
    /// Every role unavailable. Resolution then always ends at the baselines.
    pub fn offline() -> Self {
        Self::default()
    }

    /// Wire the concrete HTTP clients according to configured credentials.
    /// Clients without a key are still wired; they report `Unavailable`.
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let http = http::build_client(settings.http_timeout_secs)?;

        let alpha = Arc::new(rapidapi::AlphaVantageClient::new(
            http.clone(),
            settings.rapidapi_key.clone(),
            settings.alpha_vantage_host.clone(),
        ));
        let yahoo_rapid = Arc::new(rapidapi::YahooRapidClient::new(
            http.clone(),
            settings.rapidapi_key.clone(),
            settings.yahoo_finance_host.clone(),
        ));
        let crunchbase = Arc::new(rapidapi::CrunchbaseRapidClient::new(
            http.clone(),
            settings.rapidapi_key.clone(),
            settings.crunchbase_host.clone(),
        ));
        let market_data = Arc::new(rapidapi::MarketDataClient::new(
            http.clone(),
            settings.rapidapi_key.clone(),
            settings.market_data_host.clone(),
        ));
        let news = Arc::new(news::NewsApiClient::new(
            http.clone(),
            settings.news_api_key.clone(),
        ));

        let (free_stock, history): (Option<SharedProvider>, Option<SharedProvider>) =
            if settings.yahoo_free_enabled {
                let yahoo = Arc::new(yahoo::YahooFreeClient::new(http));
                (Some(yahoo.clone()), Some(yahoo))
            } else {
                (None, None)
            };

        Ok(Self {
            stock_overview: Some(alpha),
            stock_info: Some(yahoo_rapid),
            company_db: Some(crunchbase),
            free_stock,
            industry: Some(market_data),
            news: Some(news),
            history,
        })
    }

    /// Run `call` against a role, turning an empty slot into `Unavailable`.
    pub async fn attempt<'a, T, F, Fut>(slot: &'a Option<SharedProvider>, call: F) -> Attempt<T>
    where
        F: FnOnce(&'a dyn DataProvider) -> Fut,
        Fut: std::future::Future<Output = ProviderResult<T>> + 'a,
    {
        match slot {
            Some(p) => Attempt::from(call(p.as_ref()).await),
            None => Attempt::Unavailable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NewsOnly;

    #[async_trait]
    impl DataProvider for NewsOnly {
        fn name(&self) -> &'static str {
            "news_only"
        }
        async fn news(&self, query: &str, _limit: usize) -> ProviderResult<Vec<NewsItem>> {
            Ok(vec![NewsItem {
                title: format!("{query} headline"),
                published_at: None,
                source: None,
                url: None,
                description: None,
            }])
        }
    }

    #[tokio::test]
    async fn unimplemented_capabilities_report_unavailable() {
        let slot: Option<SharedProvider> = Some(Arc::new(NewsOnly));
        let got = ProviderSet::attempt(&slot, |p| p.stock_overview("AAPL")).await;
        assert!(matches!(got, Attempt::Unavailable));

        let got = ProviderSet::attempt(&slot, |p| p.news("Energy", 3)).await;
        assert_eq!(got.success().unwrap()[0].title, "Energy headline");
    }

    #[tokio::test]
    async fn empty_slot_is_unavailable() {
        let slot: Option<SharedProvider> = None;
        let got = ProviderSet::attempt(&slot, |p| p.industry_data("Energy")).await;
        assert_eq!(got.label(), "unavailable");
    }

    #[test]
    fn failures_stay_failures() {
        let res: ProviderResult<u32> = Err(ProviderError::no_data("x", "AAPL"));
        assert!(matches!(Attempt::from(res), Attempt::Failure(_)));
    }
}
