// src/market/mod.rs
//! Normalized market snapshot and the machinery that produces it.

pub mod aggregator;
pub mod baseline;
pub mod resolver;
pub mod symbols;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use aggregator::IndustryAggregator;
pub use resolver::{MetricResolver, Subject};

pub const MAX_TOP_SECTORS: usize = 3;

/// `source_api` of figures taken from the request body. Never reported as live.
pub const SOURCE_REQUEST: &str = "request_payload";

/// Used when an estimated record somehow reaches the caller without a caveat.
const GENERIC_ESTIMATE_NOTE: &str =
    "⚠️ Estimated values. Live provider data was not available for this request.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompetitionLevel {
    Low,
    Medium,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl CompetitionLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            CompetitionLevel::Low => "Low",
            CompetitionLevel::Medium => "Medium",
            CompetitionLevel::High => "High",
            CompetitionLevel::VeryHigh => "Very High",
        }
    }

    /// Accepts provider spellings such as "very_high", "VERY HIGH", "high".
    pub fn parse_lenient(raw: &str) -> Option<Self> {
        let norm: String = raw
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .collect();
        match norm.as_str() {
            "low" => Some(CompetitionLevel::Low),
            "medium" | "moderate" => Some(CompetitionLevel::Medium),
            "high" => Some(CompetitionLevel::High),
            "veryhigh" => Some(CompetitionLevel::VeryHigh),
            _ => None,
        }
    }

    /// Two-threshold classification used by every cap-based tier.
    pub fn by_cap(cap: f64, very_high_above: f64, high_above: f64, otherwise: Self) -> Self {
        if cap > very_high_above {
            CompetitionLevel::VeryHigh
        } else if cap > high_above {
            CompetitionLevel::High
        } else {
            otherwise
        }
    }
}

impl fmt::Display for CompetitionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    RealTimeApi,
    AggregatedRealData,
    EstimatedFallback,
}

impl DataSource {
    pub fn as_str(self) -> &'static str {
        match self {
            DataSource::RealTimeApi => "real_time_api",
            DataSource::AggregatedRealData => "aggregated_real_data",
            DataSource::EstimatedFallback => "estimated_fallback",
        }
    }
}

/// The numbers of a snapshot, before provenance is attached.
#[derive(Debug, Clone, PartialEq)]
pub struct Figures {
    pub growth_rate: f64,
    pub funding_volume: u64,
    pub market_size: u64,
    pub top_sectors: Vec<String>,
    pub competition_level: CompetitionLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketMetrics {
    /// Percent; 0 means unknown.
    pub growth_rate: f64,
    pub funding_volume: u64,
    pub market_size: u64,
    pub top_sectors: Vec<String>,
    pub competition_level: CompetitionLevel,
    pub data_source: DataSource,
    pub source_api: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl MarketMetrics {
    fn build(figures: Figures, data_source: DataSource, source_api: &str, note: Option<String>) -> Self {
        let mut m = Self {
            growth_rate: if figures.growth_rate.is_finite() {
                figures.growth_rate
            } else {
                0.0
            },
            funding_volume: figures.funding_volume,
            market_size: figures.market_size,
            top_sectors: clean_sectors(figures.top_sectors),
            competition_level: figures.competition_level,
            data_source,
            source_api: source_api.to_string(),
            note,
        };
        m.ensure_provenance();
        m
    }

    /// Figures straight from a live provider.
    pub fn live(figures: Figures, source_api: &str) -> Self {
        Self::build(figures, DataSource::RealTimeApi, source_api, None)
    }

    /// Panel aggregate of live company figures.
    pub fn aggregated(figures: Figures, source_api: &str, note: impl Into<String>) -> Self {
        Self::build(
            figures,
            DataSource::AggregatedRealData,
            source_api,
            Some(note.into()),
        )
    }

    /// Baselines and anything else not read from a live provider.
    pub fn estimated(figures: Figures, source_api: &str, note: impl Into<String>) -> Self {
        Self::build(
            figures,
            DataSource::EstimatedFallback,
            source_api,
            Some(note.into()),
        )
    }

    pub fn is_live(&self) -> bool {
        self.data_source == DataSource::RealTimeApi
    }

    /// Non-live records always carry a non-empty caveat.
    pub fn ensure_provenance(&mut self) {
        if self.is_live() {
            return;
        }
        let blank = self.note.as_deref().map(str::trim).unwrap_or("").is_empty();
        if blank {
            self.note = Some(GENERIC_ESTIMATE_NOTE.to_string());
        }
    }
}

/// Drop blanks and duplicates, keep first-seen order, cap at three.
pub(crate) fn clean_sectors<I, S>(sectors: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::with_capacity(MAX_TOP_SECTORS);
    for s in sectors {
        let s = s.as_ref().trim();
        if s.is_empty() || out.iter().any(|o| o.eq_ignore_ascii_case(s)) {
            continue;
        }
        out.push(s.to_string());
        if out.len() == MAX_TOP_SECTORS {
            break;
        }
    }
    out
}

/// Currency amount from a float figure; negative and non-finite become 0.
pub(crate) fn to_amount(x: f64) -> u64 {
    if x.is_finite() && x > 0.0 {
        x.round() as u64
    } else {
        0
    }
}
