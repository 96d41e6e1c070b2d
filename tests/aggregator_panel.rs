// tests/aggregator_panel.rs
//
// Industry aggregation over the representative panel (tier 6), fed by a
// stock-overview provider that only knows some tickers.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use stratiq::config::Heuristics;
use stratiq::error::{InsufficientPanelData, ProviderError};
use stratiq::market::aggregator::{NOTE_AGGREGATED, SOURCE_AGGREGATION};
use stratiq::market::{baseline, CompetitionLevel, DataSource, MetricResolver, Subject};
use stratiq::providers::{DataProvider, ProviderResult, ProviderSet, StockOverview};

/// ticker -> (market cap, yoy revenue growth fraction, sector)
struct Overviews(HashMap<&'static str, (f64, f64, &'static str)>);

#[async_trait]
impl DataProvider for Overviews {
    fn name(&self) -> &'static str {
        "overviews"
    }

    async fn stock_overview(&self, symbol: &str) -> ProviderResult<StockOverview> {
        let (cap, growth, sector) = self
            .0
            .get(symbol)
            .copied()
            .ok_or_else(|| ProviderError::no_data("overviews", symbol))?;
        Ok(StockOverview {
            market_cap: Some(cap),
            revenue_growth_yoy: Some(growth),
            eps_growth: None,
            sector: Some(sector.to_string()),
            industry: None,
        })
    }
}

fn resolver(known: &[(&'static str, (f64, f64, &'static str))]) -> MetricResolver {
    let provider = Overviews(known.iter().copied().collect());
    MetricResolver::new(
        ProviderSet {
            stock_overview: Some(Arc::new(provider)),
            ..ProviderSet::offline()
        },
        Heuristics::default(),
    )
}

#[tokio::test]
async fn two_samples_are_enough_to_aggregate() {
    let r = resolver(&[
        ("AAPL", (3.0e12, 0.06, "Technology")),
        ("MSFT", (2.5e12, 0.12, "Software")),
    ]);

    let m = r.resolve(&Subject::industry("Technology"), &[]).await;
    assert_eq!(m.data_source, DataSource::AggregatedRealData);
    assert_eq!(m.source_api, SOURCE_AGGREGATION);
    assert_eq!(m.note.as_deref(), Some(NOTE_AGGREGATED));
    assert_eq!(m.growth_rate, 9.0);
    assert_eq!(m.funding_volume, 550_000_000_000);
    assert_eq!(m.market_size, 11_000_000_000_000);
    assert_eq!(m.competition_level, CompetitionLevel::VeryHigh);
    assert_eq!(m.top_sectors, vec!["Technology", "Software"]);
}

#[tokio::test]
async fn one_sample_is_insufficient() {
    let r = resolver(&[("AAPL", (3.0e12, 0.06, "Technology"))]);

    let err: InsufficientPanelData = r
        .aggregator()
        .try_aggregate("Technology")
        .await
        .expect_err("one sample is below the minimum");
    assert_eq!(err.usable, 1);
    assert_eq!(err.required, 2);

    let m = r.resolve(&Subject::industry("Technology"), &[]).await;
    assert_eq!(m.source_api, baseline::SOURCE_BASELINE);
    assert_eq!(m.data_source, DataSource::EstimatedFallback);
}

#[tokio::test]
async fn tickers_past_the_panel_size_are_ignored() {
    // NVDA is sixth in the Technology panel; the default panel size is five.
    let r = resolver(&[
        ("META", (1.2e12, 0.2, "Communication Services")),
        ("NVDA", (3.0e12, 1.2, "Semiconductors")),
    ]);

    let m = r.resolve(&Subject::industry("Technology"), &[]).await;
    assert_eq!(m.source_api, baseline::SOURCE_BASELINE);
}

#[tokio::test]
async fn industries_without_panel_are_not_aggregated() {
    let r = resolver(&[("AAPL", (3.0e12, 0.06, "Technology"))]);
    let got = r.aggregator().try_aggregate("Aerospace").await;
    assert!(matches!(got, Ok(None)));
}

#[tokio::test]
async fn panel_without_growth_stays_estimated() {
    let r = resolver(&[
        ("XOM", (4.0e11, -0.05, "Energy")),
        ("CVX", (3.0e11, 0.0, "Energy")),
    ]);

    let m = r.resolve(&Subject::industry("energy"), &[]).await;
    assert_eq!(m.source_api, SOURCE_AGGREGATION);
    assert_eq!(m.data_source, DataSource::EstimatedFallback);
    assert_eq!(m.growth_rate, 11.5);
    assert_eq!(m.market_size, 8_000_000_000_000);
    assert_eq!(m.competition_level, CompetitionLevel::High);
    assert!(m.note.is_some());
}
