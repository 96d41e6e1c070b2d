// tests/resolver_tiers.rs
//
// Tier ordering and provenance of the metric resolver, driven by in-memory
// providers plugged into the role slots of a ProviderSet.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use stratiq::config::Heuristics;
use stratiq::error::ProviderError;
use stratiq::market::baseline;
use stratiq::market::{CompetitionLevel, DataSource, MetricResolver, Subject};
use stratiq::providers::{
    DataProvider, IndustryRecord, NewsItem, ProviderResult, ProviderSet, SharedProvider, StockInfo,
};
use stratiq::AppState;

/// Counts calls and answers every stock query with fixed figures.
struct FixedStock {
    calls: AtomicUsize,
    cap: f64,
}

#[async_trait]
impl DataProvider for FixedStock {
    fn name(&self) -> &'static str {
        "fixed_stock"
    }

    async fn stock_info(&self, _symbol: &str) -> ProviderResult<StockInfo> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(StockInfo {
            market_cap: Some(self.cap),
            revenue_growth: Some(0.061),
            revenue: None,
            sector: Some("Technology".into()),
            industry: Some("Consumer Electronics".into()),
        })
    }
}

struct Failing;

#[async_trait]
impl DataProvider for Failing {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn stock_info(&self, symbol: &str) -> ProviderResult<StockInfo> {
        Err(ProviderError::no_data("failing", symbol))
    }

    async fn industry_data(&self, industry: &str) -> ProviderResult<IndustryRecord> {
        Err(ProviderError::malformed("failing", format!("{industry}: bad payload")))
    }
}

struct IndustryFeed;

#[async_trait]
impl DataProvider for IndustryFeed {
    fn name(&self) -> &'static str {
        "industry_feed"
    }

    async fn industry_data(&self, _industry: &str) -> ProviderResult<IndustryRecord> {
        Ok(IndustryRecord {
            growth_rate: 14.2,
            funding_volume: 1_000_000,
            sectors: vec!["AI".into(), "".into(), "AI".into(), "Cloud".into()],
            market_size: 9_000_000,
            competition_level: Some("very_high".into()),
        })
    }
}

struct Headlines(usize);

#[async_trait]
impl DataProvider for Headlines {
    fn name(&self) -> &'static str {
        "headlines"
    }

    async fn news(&self, query: &str, _limit: usize) -> ProviderResult<Vec<NewsItem>> {
        Ok((0..self.0)
            .map(|i| NewsItem {
                title: format!("{query} headline {i}"),
                published_at: None,
                source: None,
                url: None,
                description: None,
            })
            .collect())
    }
}

fn resolver(set: ProviderSet) -> MetricResolver {
    MetricResolver::new(set, Heuristics::default())
}

#[tokio::test]
async fn stock_info_tier_is_live_without_note() {
    let stock = Arc::new(FixedStock {
        calls: AtomicUsize::new(0),
        cap: 3.0e12,
    });
    let r = resolver(ProviderSet {
        stock_info: Some(stock.clone() as SharedProvider),
        ..ProviderSet::offline()
    });

    let m = r.resolve(&Subject::new(Some("Technology"), Some("Apple")), &[]).await;
    assert_eq!(m.data_source, DataSource::RealTimeApi);
    assert_eq!(m.source_api, "yahoo_finance_rapid");
    assert!((m.growth_rate - 6.1).abs() < 1e-9);
    assert_eq!(m.market_size, 3_000_000_000_000);
    assert_eq!(m.funding_volume, 300_000_000_000);
    assert_eq!(m.competition_level, CompetitionLevel::High);
    assert_eq!(m.top_sectors, vec!["Technology", "Consumer Electronics"]);
    assert!(m.note.is_none());
    assert_eq!(stock.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn free_tier_uses_market_cap_when_revenue_missing() {
    let stock: SharedProvider = Arc::new(FixedStock {
        calls: AtomicUsize::new(0),
        cap: 5.0e8,
    });
    let r = resolver(ProviderSet {
        stock_info: Some(Arc::new(Failing)),
        free_stock: Some(stock),
        ..ProviderSet::offline()
    });

    let m = r.resolve(&Subject::company("Nike"), &[]).await;
    assert_eq!(m.source_api, "yahoo_finance_free");
    assert_eq!(m.funding_volume, 50_000_000);
    assert_eq!(m.competition_level, CompetitionLevel::Medium);
}

#[tokio::test]
async fn unknown_company_skips_ticker_tiers() {
    let stock = Arc::new(FixedStock {
        calls: AtomicUsize::new(0),
        cap: 1.0e9,
    });
    let r = resolver(ProviderSet {
        stock_info: Some(stock.clone() as SharedProvider),
        ..ProviderSet::offline()
    });

    let m = r.resolve(&Subject::company("Acme Widgets"), &[]).await;
    assert_eq!(stock.calls.load(Ordering::SeqCst), 0);
    assert_eq!(m.source_api, baseline::SOURCE_DEFAULT);
    assert_eq!(m.data_source, DataSource::EstimatedFallback);
}

#[tokio::test]
async fn industry_tier_cleans_sectors_and_parses_competition() {
    let r = resolver(ProviderSet {
        industry: Some(Arc::new(IndustryFeed)),
        ..ProviderSet::offline()
    });

    let m = r.resolve(&Subject::industry("Technology"), &[]).await;
    assert_eq!(m.source_api, "market_data_rapid");
    assert_eq!(m.data_source, DataSource::RealTimeApi);
    assert_eq!(m.top_sectors, vec!["AI", "Cloud"]);
    assert_eq!(m.competition_level, CompetitionLevel::VeryHigh);
}

#[tokio::test]
async fn provider_errors_fall_through_to_baseline() {
    let r = resolver(ProviderSet {
        stock_info: Some(Arc::new(Failing)),
        industry: Some(Arc::new(Failing)),
        ..ProviderSet::offline()
    });

    let m = r.resolve(&Subject::new(Some("finance"), Some("Visa")), &[]).await;
    assert_eq!(m.source_api, baseline::SOURCE_BASELINE);
    assert_eq!(m.growth_rate, 9.2);
    assert_eq!(m.note.as_deref(), Some(baseline::NOTE_BASELINE));
}

#[tokio::test]
async fn news_volume_scales_the_baseline() {
    let quiet = AppState::offline();
    let (news, m) = quiet.metrics_for(&Subject::industry("Technology")).await;
    assert!(news.is_empty());
    assert_eq!(m.growth_rate, 12.5);
    assert_eq!(m.market_size, 8_500_000_000_000);

    let busy = AppState::new(
        resolver(ProviderSet {
            news: Some(Arc::new(Headlines(20))),
            ..ProviderSet::offline()
        }),
        quiet.text.clone(),
    );
    let (news, m) = busy.metrics_for(&Subject::industry("Technology")).await;
    assert_eq!(news.len(), 20);
    assert!((m.growth_rate - 18.75).abs() < 1e-9);
    assert_eq!(m.market_size, 12_750_000_000_000);
    assert_eq!(m.funding_volume, 67_500_000_000);
    assert_eq!(m.source_api, baseline::SOURCE_BASELINE_NEWS);
    assert_eq!(m.data_source, DataSource::EstimatedFallback);
}

#[tokio::test]
async fn every_estimated_record_carries_a_note() {
    let r = resolver(ProviderSet::offline());
    for subject in [
        Subject::default(),
        Subject::industry("Aerospace"),
        Subject::industry("Fashion"),
        Subject::company("Tesla"),
    ] {
        let m = r.resolve(&subject, &[]).await;
        assert_eq!(m.data_source, DataSource::EstimatedFallback, "{subject:?}");
        assert!(m.note.as_deref().is_some_and(|n| !n.is_empty()), "{subject:?}");
        assert!(m.top_sectors.len() <= 3);
    }
}
