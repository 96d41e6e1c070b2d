// src/services/mod.rs
//! The four operations and the shared state they run against.

pub mod forecast;
pub mod insight;
pub mod market;
pub mod prompts;
pub mod strategy;

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use crate::ai::text_client::DisabledClient;
use crate::ai::{build_text_client, DynTextClient};
use crate::config::{AiConfig, Heuristics, Settings};
use crate::forecast::TrendFitter;
use crate::market::{MarketMetrics, MetricResolver, Subject};
use crate::narrative::NarrativeOrigin;
use crate::providers::{http, NewsItem, ProviderSet};

pub const NEWS_LIMIT: usize = 10;
pub const NOTE_CANNED_TEXT: &str =
    "⚠️ Text generation unavailable; the narrative is sample content, not model output.";

/// Origin and note of a narrative. Canned text is never reported as model
/// output, whatever the parser made of it.
pub(crate) fn narrative_provenance(
    origin: NarrativeOrigin,
    note: Option<String>,
    canned: bool,
) -> (NarrativeOrigin, Option<String>) {
    if !canned {
        return (origin, note);
    }
    let note = match note {
        Some(n) if !n.trim().is_empty() => format!("{n} {NOTE_CANNED_TEXT}"),
        _ => NOTE_CANNED_TEXT.to_string(),
    };
    (NarrativeOrigin::Template, Some(note))
}

#[derive(Clone)]
pub struct AppState {
    pub resolver: MetricResolver,
    pub text: DynTextClient,
    pub fitter: Option<Arc<dyn TrendFitter>>,
}

impl AppState {
    pub fn new(resolver: MetricResolver, text: DynTextClient) -> Self {
        Self {
            resolver,
            text,
            fitter: None,
        }
    }

    /// Live wiring from process settings and the config files they point at.
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let heuristics = Heuristics::load(settings.heuristics_config_path.as_deref())
            .context("loading heuristics")?;
        let providers = ProviderSet::from_settings(settings).context("building provider clients")?;
        let ai = AiConfig::load_or_default(&settings.ai_config_path)
            .with_context(|| format!("loading {}", settings.ai_config_path))?;
        let http = http::build_client(settings.http_timeout_secs)?;
        let text = build_text_client(&ai, http);
        info!(
            text_provider = text.provider_name(),
            environment = %settings.environment,
            "application state ready"
        );
        Ok(Self::new(MetricResolver::new(providers, heuristics), text))
    }

    /// No network: every provider role empty, canned text.
    pub fn offline() -> Self {
        Self::new(
            MetricResolver::new(ProviderSet::offline(), Heuristics::default()),
            Arc::new(DisabledClient),
        )
    }

    pub fn with_text_client(mut self, text: DynTextClient) -> Self {
        self.text = text;
        self
    }

    pub fn with_fitter(mut self, fitter: Arc<dyn TrendFitter>) -> Self {
        self.fitter = Some(fitter);
        self
    }

    /// Headlines for the subject's label; any non-success is an empty list.
    pub async fn news_for(&self, subject: &Subject) -> Vec<NewsItem> {
        let query = subject.label();
        if query.is_empty() {
            return Vec::new();
        }
        let attempt = ProviderSet::attempt(&self.resolver.providers().news, |p| {
            p.news(query, NEWS_LIMIT)
        })
        .await;
        attempt.log_outcome("news", query);
        attempt.success().unwrap_or_default()
    }

    /// News first (it scales the baselines), then the metric tiers.
    pub async fn metrics_for(&self, subject: &Subject) -> (Vec<NewsItem>, MarketMetrics) {
        let news = self.news_for(subject).await;
        let metrics = self.resolver.resolve(subject, &news).await;
        (news, metrics)
    }
}
