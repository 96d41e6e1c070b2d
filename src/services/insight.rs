// src/services/insight.rs
//! GenerateInsight.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::market::{
    clean_sectors, to_amount, CompetitionLevel, DataSource, Figures, MarketMetrics, Subject,
    SOURCE_REQUEST,
};
use crate::narrative::{self, NarrativeOrigin};
use crate::services::{narrative_provenance, prompts, AppState};

pub const NOTE_SUPPLIED_METRICS: &str =
    "⚠️ Metrics supplied by the caller; not verified against providers.";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InsightRequest {
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    /// Caller-supplied metrics; an empty or unusable object means "resolve".
    #[serde(default)]
    pub data: Option<Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InsightResponse {
    pub summary: String,
    pub key_takeaways: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub data_source: DataSource,
    pub note: Option<String>,
    pub origin: NarrativeOrigin,
}

#[derive(Debug, Deserialize)]
struct SuppliedMetrics {
    #[serde(default)]
    growth_rate: f64,
    #[serde(default)]
    funding_volume: f64,
    #[serde(default)]
    market_size: f64,
    #[serde(default)]
    top_sectors: Vec<String>,
    #[serde(default)]
    competition_level: Option<String>,
}

/// Metrics from the request body, when it carries any.
pub fn supplied_metrics(data: Option<&Value>) -> Option<MarketMetrics> {
    const KNOWN: [&str; 5] = [
        "growth_rate",
        "funding_volume",
        "market_size",
        "top_sectors",
        "competition_level",
    ];
    let obj = data?
        .as_object()
        .filter(|o| KNOWN.iter().any(|k| o.contains_key(*k)))?;
    let s: SuppliedMetrics = match serde_json::from_value(Value::Object(obj.clone())) {
        Ok(s) => s,
        Err(e) => {
            warn!(error = %e, "request metrics unusable, resolving instead");
            return None;
        }
    };
    Some(MarketMetrics::estimated(
        Figures {
            growth_rate: s.growth_rate,
            funding_volume: to_amount(s.funding_volume),
            market_size: to_amount(s.market_size),
            top_sectors: clean_sectors(s.top_sectors.iter()),
            competition_level: s
                .competition_level
                .as_deref()
                .and_then(CompetitionLevel::parse_lenient)
                .unwrap_or(CompetitionLevel::Medium),
        },
        SOURCE_REQUEST,
        NOTE_SUPPLIED_METRICS,
    ))
}

pub async fn generate_insight(state: &AppState, req: InsightRequest) -> InsightResponse {
    let subject = Subject::new(req.industry.as_deref(), req.company.as_deref());
    let metrics = match supplied_metrics(req.data.as_ref()) {
        Some(m) => m,
        None => state.metrics_for(&subject).await.1,
    };

    let prompt = prompts::insight(&subject, &metrics);
    let generated = state.text.generate(&prompt).await;
    let (text, parsed) = narrative::parse_insight(&generated.text, subject.industry.as_deref());
    let (origin, note) = narrative_provenance(parsed, metrics.note, generated.canned);
    info!(
        subject = subject.label(),
        origin = ?origin,
        canned = generated.canned,
        takeaways = text.key_takeaways.len(),
        "insight generated"
    );

    InsightResponse {
        summary: text.summary,
        key_takeaways: text.key_takeaways,
        created_at: Utc::now(),
        data_source: metrics.data_source,
        note,
        origin,
    }
}
