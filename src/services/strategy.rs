// src/services/strategy.rs
//! GenerateStrategy: SWOT, PESTEL or growth plan.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::market::{DataSource, Subject};
use crate::narrative::{self, NarrativeOrigin, StrategyContent, StrategyKind};
use crate::services::{narrative_provenance, prompts, AppState};

fn default_analysis_type() -> String {
    "swot".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct StrategyRequest {
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    /// `swot`, `pestel` or `growth`; anything else is treated as `swot`.
    #[serde(default = "default_analysis_type")]
    pub analysis_type: String,
}

impl Default for StrategyRequest {
    fn default() -> Self {
        Self {
            industry: None,
            company: None,
            analysis_type: default_analysis_type(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StrategyResponse {
    #[serde(rename = "type")]
    pub kind: StrategyKind,
    pub content: StrategyContent,
    pub recommendations: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub data_source: DataSource,
    pub note: Option<String>,
    pub origin: NarrativeOrigin,
}

pub async fn generate_strategy(state: &AppState, req: StrategyRequest) -> StrategyResponse {
    let kind = StrategyKind::parse_lenient(&req.analysis_type);
    let subject = Subject::new(req.industry.as_deref(), req.company.as_deref());
    let (_, metrics) = state.metrics_for(&subject).await;

    let prompt = prompts::strategy(kind, &subject, &metrics);
    let generated = state.text.generate(&prompt).await;
    let (content, recommendations, parsed) =
        narrative::parse_strategy(&generated.text, kind, subject.industry.as_deref());
    let (origin, note) = narrative_provenance(parsed, metrics.note, generated.canned);
    info!(
        subject = subject.label(),
        kind = kind.as_str(),
        origin = ?origin,
        canned = generated.canned,
        "strategy generated"
    );

    StrategyResponse {
        kind,
        content,
        recommendations,
        created_at: Utc::now(),
        data_source: metrics.data_source,
        note,
        origin,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::ai::text_client::{FallbackClient, MockProvider};

    #[tokio::test]
    async fn unknown_kind_is_swot() {
        let resp = generate_strategy(
            &AppState::offline(),
            StrategyRequest {
                industry: Some("Retail".into()),
                analysis_type: "porter".into(),
                ..Default::default()
            },
        )
        .await;
        assert_eq!(resp.kind, StrategyKind::Swot);
        let StrategyContent::Swot(m) = resp.content else {
            panic!("expected swot");
        };
        assert_eq!(m.strengths[0], "Strong market position");
        // The sample carries three recommendations.
        assert_eq!(resp.recommendations.len(), 3);
        assert_eq!(resp.origin, NarrativeOrigin::Template);
        assert!(resp
            .note
            .is_some_and(|n| n.ends_with(crate::services::NOTE_CANNED_TEXT)));
    }

    #[tokio::test]
    async fn model_json_is_used_verbatim() {
        let text = r#"{"pestel": {"political": ["Subsidy schemes favour local producers"],
            "economic": ["Rates stay elevated through next year"]},
            "recommendations": ["Hedge input costs with longer contracts"]}"#;
        let state = AppState::offline().with_text_client(Arc::new(FallbackClient::new(vec![
            Box::new(MockProvider::new(text)),
        ])));
        let resp = generate_strategy(
            &state,
            StrategyRequest {
                industry: Some("Energy".into()),
                analysis_type: "pestel".into(),
                ..Default::default()
            },
        )
        .await;
        assert_eq!(resp.origin, NarrativeOrigin::Mixed);
        let StrategyContent::Pestel(f) = resp.content else {
            panic!("expected pestel");
        };
        assert_eq!(f.political, vec!["Subsidy schemes favour local producers"]);
        assert_eq!(f.legal, vec!["Compliance requirements", "Data privacy"]);
        assert_eq!(resp.recommendations, vec!["Hedge input costs with longer contracts"]);
    }
}
