// src/providers/rapidapi.rs
//! RapidAPI-hosted providers. All four share the key/host header pair and
//! report `Unavailable` when no key is configured.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::Value;

use crate::error::ProviderError;
use crate::providers::http::{get_json, lenient_f64, number_at, string_at};
use crate::providers::{
    CompanyRecord, DataProvider, IndustryRecord, ProviderResult, StockInfo, StockOverview,
};

/// Key + host pair and the shared client.
#[derive(Clone)]
struct RapidApi {
    http: reqwest::Client,
    api_key: String,
    host: String,
}

impl RapidApi {
    fn new(http: reqwest::Client, api_key: String, host: String) -> Self {
        Self {
            http,
            api_key: api_key.trim().to_string(),
            host: host.trim().to_string(),
        }
    }

    fn configured(&self) -> bool {
        !self.api_key.is_empty() && !self.host.is_empty()
    }

    fn headers(&self, provider: &'static str) -> Result<HeaderMap, ProviderError> {
        let mut h = HeaderMap::new();
        let key = HeaderValue::from_str(&self.api_key)
            .map_err(|_| ProviderError::malformed(provider, "api key is not a valid header"))?;
        let host = HeaderValue::from_str(&self.host)
            .map_err(|_| ProviderError::malformed(provider, "host is not a valid header"))?;
        h.insert("X-RapidAPI-Key", key);
        h.insert("X-RapidAPI-Host", host);
        Ok(h)
    }

    async fn get(
        &self,
        provider: &'static str,
        path: &str,
        query: &[(&str, &str)],
    ) -> ProviderResult<Value> {
        if !self.configured() {
            return Err(ProviderError::unavailable(provider));
        }
        let url = format!("https://{}{}", self.host, path);
        get_json(&self.http, provider, &url, self.headers(provider)?, query).await
    }
}

// ------------------------------------------------------------
// Alpha Vantage: stock overview
// ------------------------------------------------------------

pub struct AlphaVantageClient {
    api: RapidApi,
}

impl AlphaVantageClient {
    pub fn new(http: reqwest::Client, api_key: String, host: String) -> Self {
        Self {
            api: RapidApi::new(http, api_key, host),
        }
    }
}

#[async_trait]
impl DataProvider for AlphaVantageClient {
    fn name(&self) -> &'static str {
        "alpha_vantage"
    }

    async fn stock_overview(&self, symbol: &str) -> ProviderResult<StockOverview> {
        let body = self
            .api
            .get(
                self.name(),
                "/query",
                &[("function", "OVERVIEW"), ("symbol", symbol), ("datatype", "json")],
            )
            .await?;
        parse_overview(&body).ok_or_else(|| ProviderError::no_data(self.name(), symbol))
    }
}

/// `None` when the payload carries no market capitalization (unknown
/// symbols come back as `{}` or an informational message).
pub(crate) fn parse_overview(body: &Value) -> Option<StockOverview> {
    let market_cap = number_at(body, &["/MarketCapitalization"]).filter(|c| *c > 0.0)?;
    Some(StockOverview {
        market_cap: Some(market_cap),
        revenue_growth_yoy: number_at(body, &["/QuarterlyRevenueGrowthYOY"]),
        eps_growth: number_at(body, &["/EPSGrowth", "/QuarterlyEarningsGrowthYOY"]),
        sector: string_at(body, &["/Sector"]),
        industry: string_at(body, &["/Industry"]),
    })
}

// ------------------------------------------------------------
// Yahoo Finance (RapidAPI): stock info
// ------------------------------------------------------------

pub struct YahooRapidClient {
    api: RapidApi,
}

impl YahooRapidClient {
    pub fn new(http: reqwest::Client, api_key: String, host: String) -> Self {
        Self {
            api: RapidApi::new(http, api_key, host),
        }
    }
}

#[async_trait]
impl DataProvider for YahooRapidClient {
    fn name(&self) -> &'static str {
        "yahoo_finance_rapid"
    }

    async fn stock_info(&self, symbol: &str) -> ProviderResult<StockInfo> {
        let body = self
            .api
            .get(self.name(), "/api/v1/markets/stock/info", &[("ticker", symbol)])
            .await?;
        parse_stock_info(&body).ok_or_else(|| ProviderError::no_data(self.name(), symbol))
    }
}

pub(crate) fn parse_stock_info(body: &Value) -> Option<StockInfo> {
    let market_cap = number_at(
        body,
        &["/marketCap", "/body/marketCap", "/body/summaryDetail/marketCap"],
    )
    .filter(|c| *c > 0.0)?;
    Some(StockInfo {
        market_cap: Some(market_cap),
        revenue_growth: number_at(
            body,
            &["/revenueGrowth", "/body/revenueGrowth", "/body/financialData/revenueGrowth"],
        ),
        revenue: number_at(
            body,
            &["/totalRevenue", "/body/totalRevenue", "/body/financialData/totalRevenue"],
        ),
        sector: string_at(body, &["/sector", "/body/sector", "/body/assetProfile/sector"]),
        industry: string_at(
            body,
            &["/industry", "/body/industry", "/body/assetProfile/industry"],
        ),
    })
}

// ------------------------------------------------------------
// Crunchbase (RapidAPI): company database lookup
// ------------------------------------------------------------

pub struct CrunchbaseRapidClient {
    api: RapidApi,
}

impl CrunchbaseRapidClient {
    pub fn new(http: reqwest::Client, api_key: String, host: String) -> Self {
        Self {
            api: RapidApi::new(http, api_key, host),
        }
    }
}

#[async_trait]
impl DataProvider for CrunchbaseRapidClient {
    fn name(&self) -> &'static str {
        "crunchbase_rapid"
    }

    async fn company_lookup(&self, name: &str) -> ProviderResult<CompanyRecord> {
        let body = self
            .api
            .get(self.name(), "/v4/searches/organizations", &[("query", name)])
            .await?;
        parse_first_entity(&body).ok_or_else(|| ProviderError::no_data(self.name(), name))
    }
}

pub(crate) fn parse_first_entity(body: &Value) -> Option<CompanyRecord> {
    let entity = body.get("entities")?.as_array()?.first()?;
    let whole = |key: &str| {
        entity
            .get(key)
            .and_then(lenient_f64)
            .map(|x| x.max(0.0) as u64)
            .unwrap_or(0)
    };
    let categories = entity
        .get("categories")
        .and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(|c| match c {
                    Value::String(s) => Some(s.clone()),
                    Value::Object(o) => o.get("value").and_then(Value::as_str).map(str::to_string),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default();

    Some(CompanyRecord {
        growth_rate: entity.get("growth_rate").and_then(lenient_f64).unwrap_or(0.0),
        total_funding: whole("total_funding_usd"),
        valuation: whole("valuation_usd"),
        categories,
    })
}

// ------------------------------------------------------------
// Market data (RapidAPI): industry-level figures
// ------------------------------------------------------------

pub struct MarketDataClient {
    api: RapidApi,
}

impl MarketDataClient {
    pub fn new(http: reqwest::Client, api_key: String, host: String) -> Self {
        Self {
            api: RapidApi::new(http, api_key, host),
        }
    }
}

#[async_trait]
impl DataProvider for MarketDataClient {
    fn name(&self) -> &'static str {
        "market_data_rapid"
    }

    async fn industry_data(&self, industry: &str) -> ProviderResult<IndustryRecord> {
        let body = self
            .api
            .get(self.name(), "/industry", &[("name", industry)])
            .await?;
        let payload = body.get("data").cloned().unwrap_or(body);
        let record: IndustryRecord = serde_json::from_value(payload)
            .map_err(|e| ProviderError::malformed(self.name(), e.to_string()))?;
        if record.market_size == 0 && record.growth_rate == 0.0 {
            return Err(ProviderError::no_data(self.name(), industry));
        }
        Ok(record)
    }
}
