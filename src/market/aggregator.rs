// src/market/aggregator.rs
//! Industry metrics estimated from a small panel of representative companies.

use tracing::{debug, info, warn};

use crate::error::InsufficientPanelData;
use crate::market::resolver::{CompanyQuote, MetricResolver};
use crate::market::{baseline, clean_sectors, to_amount, CompetitionLevel, Figures, MarketMetrics};

pub const SOURCE_AGGREGATION: &str = "company_aggregation";
pub const NOTE_AGGREGATED: &str = "Aggregated from real company data";
pub const NOTE_AGGREGATED_NO_GROWTH: &str =
    "⚠️ Panel companies reported no positive growth; growth rate uses the estimated industry baseline.";

pub struct IndustryAggregator<'a> {
    resolver: &'a MetricResolver,
}

impl<'a> IndustryAggregator<'a> {
    pub fn new(resolver: &'a MetricResolver) -> Self {
        Self { resolver }
    }

    /// `None` for industries without a panel and for panels that yield too
    /// few usable samples.
    pub async fn aggregate(&self, industry: &str) -> Option<MarketMetrics> {
        match self.try_aggregate(industry).await {
            Ok(Some(m)) => Some(m),
            Ok(None) => {
                debug!(industry, "no representative panel for industry");
                None
            }
            Err(e) => {
                warn!(error = %e, "industry aggregation skipped");
                None
            }
        }
    }

    pub async fn try_aggregate(
        &self,
        industry: &str,
    ) -> Result<Option<MarketMetrics>, InsufficientPanelData> {
        let (Some(tickers), Some(base)) = (
            crate::market::symbols::panel_tickers(industry),
            baseline::lookup(industry),
        ) else {
            return Ok(None);
        };

        let h = self.resolver.heuristics();
        let mut samples = Vec::with_capacity(h.panel_size);
        for &ticker in tickers.iter().take(h.panel_size) {
            match self.resolver.company_quote(ticker, Some(ticker)).await {
                Some(q) => samples.push(q),
                None => debug!(industry, ticker, "panel company yielded no data"),
            }
        }

        if samples.len() < h.panel_min_samples {
            return Err(InsufficientPanelData {
                industry: base.name.to_string(),
                usable: samples.len(),
                required: h.panel_min_samples,
            });
        }

        let m = combine(&samples, base, h);
        info!(
            industry = base.name,
            samples = samples.len(),
            data_source = m.data_source.as_str(),
            "industry aggregated from panel"
        );
        Ok(Some(m))
    }
}

fn combine(
    samples: &[CompanyQuote],
    base: &baseline::IndustryBaseline,
    h: &crate::config::heuristics::Heuristics,
) -> MarketMetrics {
    let total_cap: f64 = samples.iter().map(|q| q.market_cap.max(0.0)).sum();
    let positive: Vec<f64> = samples
        .iter()
        .map(|q| q.growth_rate)
        .filter(|g| *g > 0.0)
        .collect();

    let growth_rate = if positive.is_empty() {
        base.growth_rate
    } else {
        let mean = positive.iter().sum::<f64>() / positive.len() as f64;
        (mean * 10.0).round() / 10.0
    };
    let funding_volume = if total_cap > 0.0 {
        to_amount(total_cap * h.funding_fraction)
    } else {
        base.funding_volume
    };
    let market_size = base
        .market_size
        .max(to_amount(total_cap * h.panel_market_multiplier));
    let competition_level = CompetitionLevel::by_cap(
        total_cap,
        h.competition.panel_very_high_cap,
        h.competition.panel_high_cap,
        base.competition,
    );

    let mut top_sectors = clean_sectors(samples.iter().filter_map(CompanyQuote::primary_sector));
    if top_sectors.is_empty() {
        top_sectors = clean_sectors(base.sectors.iter());
    }

    let figures = Figures {
        growth_rate,
        funding_volume,
        market_size,
        top_sectors,
        competition_level,
    };
    if positive.is_empty() {
        MarketMetrics::estimated(figures, SOURCE_AGGREGATION, NOTE_AGGREGATED_NO_GROWTH)
    } else {
        MarketMetrics::aggregated(figures, SOURCE_AGGREGATION, NOTE_AGGREGATED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::heuristics::Heuristics;
    use crate::market::resolver::CompanyTier;
    use crate::market::DataSource;

    fn quote(cap: f64, growth: f64, sector: &str) -> CompanyQuote {
        CompanyQuote {
            tier: CompanyTier::StockOverview,
            market_cap: cap,
            growth_rate: growth,
            funding_volume: 0,
            sectors: vec![sector.to_string()],
            competition: CompetitionLevel::High,
        }
    }

    #[test]
    fn combine_uses_positive_growth_mean() {
        let base = baseline::lookup("Technology").unwrap();
        let m = combine(
            &[
                quote(3.0e12, 6.07, "Technology"),
                quote(2.5e12, 12.0, "Technology"),
                quote(1.0e12, -3.0, "Communication Services"),
            ],
            base,
            &Heuristics::default(),
        );
        assert_eq!(m.growth_rate, 9.0);
        assert_eq!(m.funding_volume, 650_000_000_000);
        assert_eq!(m.market_size, 13_000_000_000_000);
        assert_eq!(m.competition_level, CompetitionLevel::VeryHigh);
        assert_eq!(m.top_sectors, vec!["Technology", "Communication Services"]);
        assert_eq!(m.data_source, DataSource::AggregatedRealData);
        assert_eq!(m.source_api, SOURCE_AGGREGATION);
    }

    #[test]
    fn combine_without_growth_is_estimated() {
        let base = baseline::lookup("Education").unwrap();
        let m = combine(
            &[quote(2.0e9, 0.0, ""), quote(1.0e9, -1.0, "")],
            base,
            &Heuristics::default(),
        );
        assert_eq!(m.growth_rate, 9.8);
        assert_eq!(m.market_size, base.market_size);
        assert_eq!(m.competition_level, CompetitionLevel::Medium);
        assert_eq!(m.top_sectors, vec!["EdTech", "Online Learning", "Corporate Training"]);
        assert_eq!(m.data_source, DataSource::EstimatedFallback);
        assert!(m.note.is_some());
    }
}
