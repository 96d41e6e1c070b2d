// src/market/resolver.rs
//! Tiered metric resolution. Tiers are tried strictly in order; the first
//! success wins and the baselines at the end make the chain infallible.

use metrics::counter;
use tracing::{debug, info};

use crate::config::heuristics::Heuristics;
use crate::error::ProviderError;
use crate::market::aggregator::IndustryAggregator;
use crate::market::{baseline, symbols, to_amount, CompetitionLevel, Figures, MarketMetrics};
use crate::providers::{Attempt, NewsItem, ProviderSet};

/// What metrics are requested for. Blank strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Subject {
    pub industry: Option<String>,
    pub company: Option<String>,
}

impl Subject {
    pub fn new(industry: Option<&str>, company: Option<&str>) -> Self {
        let clean = |s: Option<&str>| {
            s.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        Self {
            industry: clean(industry),
            company: clean(company),
        }
    }

    pub fn industry(industry: &str) -> Self {
        Self::new(Some(industry), None)
    }

    pub fn company(company: &str) -> Self {
        Self::new(None, Some(company))
    }

    /// Used for log fields and news queries: industry first, then company.
    pub fn label(&self) -> &str {
        self.industry
            .as_deref()
            .or(self.company.as_deref())
            .unwrap_or("")
    }
}

/// The four company-level tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CompanyTier {
    StockOverview,
    StockInfo,
    CompanyDb,
    FreeStock,
}

impl CompanyTier {
    pub(crate) const ORDER: [CompanyTier; 4] = [
        CompanyTier::StockOverview,
        CompanyTier::StockInfo,
        CompanyTier::CompanyDb,
        CompanyTier::FreeStock,
    ];

    fn label(self) -> &'static str {
        match self {
            CompanyTier::StockOverview => "1_stock_overview",
            CompanyTier::StockInfo => "2_stock_info",
            CompanyTier::CompanyDb => "3_company_db",
            CompanyTier::FreeStock => "4_free_stock",
        }
    }

    fn source_api(self) -> &'static str {
        match self {
            CompanyTier::StockOverview => "alpha_vantage",
            CompanyTier::StockInfo => "yahoo_finance_rapid",
            CompanyTier::CompanyDb => "crunchbase_rapid",
            CompanyTier::FreeStock => "yahoo_finance_free",
        }
    }
}

const TIER_INDUSTRY: &str = "5_industry_data";
const TIER_AGGREGATE: &str = "6_aggregate";
const TIER_BASELINE: &str = "7_baseline";
const TIER_DEFAULT: &str = "8_default";
const SOURCE_INDUSTRY_DATA: &str = "market_data_rapid";

/// One company's figures as one tier reported them.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CompanyQuote {
    pub tier: CompanyTier,
    /// Market cap (valuation for the company database).
    pub market_cap: f64,
    /// Percent.
    pub growth_rate: f64,
    pub funding_volume: u64,
    pub sectors: Vec<String>,
    pub competition: CompetitionLevel,
}

impl CompanyQuote {
    pub fn into_metrics(self) -> MarketMetrics {
        let source = self.tier.source_api();
        MarketMetrics::live(
            Figures {
                growth_rate: self.growth_rate,
                funding_volume: self.funding_volume,
                market_size: to_amount(self.market_cap),
                top_sectors: self.sectors,
                competition_level: self.competition,
            },
            source,
        )
    }

    /// Sector reported first, used by panel aggregation.
    pub fn primary_sector(&self) -> Option<&str> {
        self.sectors
            .iter()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
    }
}

fn record_tier(tier: &'static str, outcome: &'static str) {
    counter!("resolver_tier_total", "tier" => tier, "outcome" => outcome).increment(1);
}

fn pct(fraction: Option<f64>) -> Option<f64> {
    fraction.map(|g| g * 100.0).filter(|g| g.is_finite())
}

fn present(sector: Option<String>, industry: Option<String>) -> Vec<String> {
    [sector, industry].into_iter().flatten().collect()
}

/// Resolves a [`Subject`] to [`MarketMetrics`]. Holds only immutable
/// configuration and shared provider handles, so it is cheap to clone.
#[derive(Clone)]
pub struct MetricResolver {
    providers: ProviderSet,
    heuristics: Heuristics,
}

impl MetricResolver {
    pub fn new(providers: ProviderSet, heuristics: Heuristics) -> Self {
        Self {
            providers,
            heuristics,
        }
    }

    pub fn providers(&self) -> &ProviderSet {
        &self.providers
    }

    pub fn heuristics(&self) -> &Heuristics {
        &self.heuristics
    }

    pub fn aggregator(&self) -> IndustryAggregator<'_> {
        IndustryAggregator::new(self)
    }

    /// Never fails: the last tier is unconditional.
    pub async fn resolve(&self, subject: &Subject, news: &[NewsItem]) -> MarketMetrics {
        let mut metrics = self.resolve_tiers(subject, news).await;
        metrics.ensure_provenance();
        info!(
            subject = subject.label(),
            source_api = %metrics.source_api,
            data_source = metrics.data_source.as_str(),
            "market metrics resolved"
        );
        metrics
    }

    async fn resolve_tiers(&self, subject: &Subject, news: &[NewsItem]) -> MarketMetrics {
        if let Some(company) = subject.company.as_deref() {
            let ticker = symbols::company_to_ticker(company);
            if ticker.is_none() {
                debug!(company, "no ticker for company; ticker tiers skipped");
            }
            if let Some(quote) = self.company_quote(company, ticker.as_deref()).await {
                return quote.into_metrics();
            }
        }

        if let Some(industry) = subject.industry.as_deref() {
            if let Some(m) = self.industry_tier(industry).await {
                return m;
            }
            match self.aggregator().aggregate(industry).await {
                Some(m) => {
                    record_tier(TIER_AGGREGATE, "success");
                    return m;
                }
                None => record_tier(TIER_AGGREGATE, "failure"),
            }
        }

        let known = subject
            .industry
            .as_deref()
            .and_then(baseline::lookup)
            .is_some();
        record_tier(if known { TIER_BASELINE } else { TIER_DEFAULT }, "success");
        baseline::fallback(subject.industry.as_deref(), news.len(), &self.heuristics)
    }

    /// Tiers 1-4 for one company. `name` feeds the company database, `ticker`
    /// the three stock tiers (skipped as unavailable when there is none).
    pub(crate) async fn company_quote(
        &self,
        name: &str,
        ticker: Option<&str>,
    ) -> Option<CompanyQuote> {
        for tier in CompanyTier::ORDER {
            let attempt = match (tier, ticker) {
                (CompanyTier::CompanyDb, _) => self.via_company_db(name).await,
                (_, None) => Attempt::Unavailable,
                (CompanyTier::StockOverview, Some(t)) => self.via_stock_overview(t).await,
                (CompanyTier::StockInfo, Some(t)) => self.via_stock_info(t).await,
                (CompanyTier::FreeStock, Some(t)) => self.via_free_stock(t).await,
            };
            attempt.log_outcome(tier.label(), name);
            record_tier(tier.label(), attempt.label());
            if let Attempt::Success(quote) = attempt {
                return Some(quote);
            }
        }
        None
    }

    async fn via_stock_overview(&self, ticker: &str) -> Attempt<CompanyQuote> {
        let h = &self.heuristics;
        ProviderSet::attempt(&self.providers.stock_overview, |p| p.stock_overview(ticker))
            .await
            .and_then(|o| {
                let cap = require_cap(o.market_cap, "stock_overview", ticker)?;
                let growth = pct(o.revenue_growth_yoy)
                    .filter(|g| *g != 0.0)
                    .or_else(|| pct(o.eps_growth))
                    .unwrap_or(0.0);
                Ok(CompanyQuote {
                    tier: CompanyTier::StockOverview,
                    market_cap: cap,
                    growth_rate: growth,
                    funding_volume: to_amount(cap * h.funding_fraction),
                    sectors: present(o.sector, o.industry),
                    competition: CompetitionLevel::by_cap(
                        cap,
                        h.competition.company_very_high_cap,
                        h.competition.company_high_cap,
                        CompetitionLevel::Medium,
                    ),
                })
            })
    }

    async fn via_stock_info(&self, ticker: &str) -> Attempt<CompanyQuote> {
        let h = &self.heuristics;
        ProviderSet::attempt(&self.providers.stock_info, |p| p.stock_info(ticker))
            .await
            .and_then(|s| {
                let cap = require_cap(s.market_cap, "stock_info", ticker)?;
                Ok(CompanyQuote {
                    tier: CompanyTier::StockInfo,
                    market_cap: cap,
                    growth_rate: pct(s.revenue_growth).unwrap_or(0.0),
                    funding_volume: to_amount(cap * h.funding_fraction),
                    sectors: present(s.sector, s.industry),
                    competition: CompetitionLevel::High,
                })
            })
    }

    async fn via_company_db(&self, name: &str) -> Attempt<CompanyQuote> {
        ProviderSet::attempt(&self.providers.company_db, |p| p.company_lookup(name))
            .await
            .map(|c| CompanyQuote {
                tier: CompanyTier::CompanyDb,
                market_cap: c.valuation as f64,
                growth_rate: c.growth_rate,
                funding_volume: c.total_funding,
                sectors: c.categories,
                competition: CompetitionLevel::High,
            })
    }

    async fn via_free_stock(&self, ticker: &str) -> Attempt<CompanyQuote> {
        let h = &self.heuristics;
        ProviderSet::attempt(&self.providers.free_stock, |p| p.stock_info(ticker))
            .await
            .and_then(|s| {
                let cap = require_cap(s.market_cap, "free_stock", ticker)?;
                let revenue = s.revenue.filter(|r| *r > 0.0).unwrap_or(cap);
                Ok(CompanyQuote {
                    tier: CompanyTier::FreeStock,
                    market_cap: cap,
                    growth_rate: pct(s.revenue_growth).unwrap_or(0.0),
                    funding_volume: to_amount(revenue * h.funding_fraction),
                    sectors: present(s.sector, s.industry),
                    competition: CompetitionLevel::by_cap(
                        cap,
                        f64::INFINITY,
                        h.competition.free_tier_high_cap,
                        CompetitionLevel::Medium,
                    ),
                })
            })
    }

    async fn industry_tier(&self, industry: &str) -> Option<MarketMetrics> {
        let attempt =
            ProviderSet::attempt(&self.providers.industry, |p| p.industry_data(industry)).await;
        attempt.log_outcome(TIER_INDUSTRY, industry);
        record_tier(TIER_INDUSTRY, attempt.label());
        attempt.success().map(|r| {
            MarketMetrics::live(
                Figures {
                    growth_rate: r.growth_rate,
                    funding_volume: r.funding_volume,
                    market_size: r.market_size,
                    top_sectors: r.sectors,
                    competition_level: r
                        .competition_level
                        .as_deref()
                        .and_then(CompetitionLevel::parse_lenient)
                        .unwrap_or(CompetitionLevel::Medium),
                },
                SOURCE_INDUSTRY_DATA,
            )
        })
    }
}

fn require_cap(cap: Option<f64>, role: &'static str, ticker: &str) -> Result<f64, ProviderError> {
    cap.filter(|c| c.is_finite() && *c > 0.0)
        .ok_or_else(|| ProviderError::no_data(role, format!("{ticker} (no market cap)")))
}
