// src/narrative/mod.rs
//! Lenient parser from generated text to typed narrative records.
//!
//! Stages, first useful result wins:
//! 1. embedded JSON object carrying the shape's marker key ([`json`]);
//! 2. line state machine over section headers and bullets ([`sections`]);
//! 3. blank-line paragraph split (insight shape only);
//! 4. canned per-industry templates for every field still empty ([`templates`]).
//!
//! Stages 2 and 3 are skipped for non-substantive text. The result is never
//! empty and always within the shape's length caps.

pub mod json;
pub mod sections;
pub mod templates;

use std::collections::BTreeMap;

use metrics::counter;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const SUMMARY_MAX_CHARS: usize = 300;
pub const ITEM_MAX_CHARS: usize = 100;
pub const TAKEAWAYS_MAX: usize = 7;
pub const LIST_MAX: usize = 4;
/// Parsed items shorter than this are treated as noise.
pub const ITEM_MIN_CHARS: usize = 10;
/// Trimmed text shorter than this skips the text stages.
pub const SUBSTANTIVE_MIN_CHARS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NarrativeShape {
    Insight,
    Swot,
    Pestel,
    Growth,
}

impl NarrativeShape {
    pub const ALL: [NarrativeShape; 4] = [
        NarrativeShape::Insight,
        NarrativeShape::Swot,
        NarrativeShape::Pestel,
        NarrativeShape::Growth,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NarrativeShape::Insight => "insight",
            NarrativeShape::Swot => "swot",
            NarrativeShape::Pestel => "pestel",
            NarrativeShape::Growth => "growth",
        }
    }

    pub fn has_summary(self) -> bool {
        self == NarrativeShape::Insight
    }

    pub fn list_fields(self) -> &'static [&'static str] {
        match self {
            NarrativeShape::Insight => &["key_takeaways"],
            NarrativeShape::Swot => &[
                "strengths",
                "weaknesses",
                "opportunities",
                "threats",
                "recommendations",
            ],
            NarrativeShape::Pestel => &[
                "political",
                "economic",
                "social",
                "technological",
                "environmental",
                "legal",
                "recommendations",
            ],
            NarrativeShape::Growth => &["opportunities", "strategies", "risks", "recommendations"],
        }
    }

    pub fn list_cap(self, field: &str) -> usize {
        match (self, field) {
            (NarrativeShape::Insight, "key_takeaways") => TAKEAWAYS_MAX,
            _ => LIST_MAX,
        }
    }

    /// JSON key that must appear in an embedded object for this shape.
    pub(crate) fn marker(self) -> &'static str {
        match self {
            NarrativeShape::Insight => "summary",
            NarrativeShape::Swot => "swot",
            NarrativeShape::Pestel => "pestel",
            NarrativeShape::Growth => "growth",
        }
    }

    /// Where bullets outside any recognized section go.
    pub(crate) fn default_bucket(self) -> Option<&'static str> {
        match self {
            NarrativeShape::Insight => Some("key_takeaways"),
            NarrativeShape::Growth => Some("recommendations"),
            NarrativeShape::Swot | NarrativeShape::Pestel => None,
        }
    }
}

/// The three strategy analyses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Swot,
    Pestel,
    Growth,
}

impl StrategyKind {
    /// Anything unrecognized is SWOT.
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pestel" => StrategyKind::Pestel,
            "growth" => StrategyKind::Growth,
            _ => StrategyKind::Swot,
        }
    }

    pub fn as_str(self) -> &'static str {
        self.shape().as_str()
    }

    pub fn shape(self) -> NarrativeShape {
        match self {
            StrategyKind::Swot => NarrativeShape::Swot,
            StrategyKind::Pestel => NarrativeShape::Pestel,
            StrategyKind::Growth => NarrativeShape::Growth,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NarrativeOrigin {
    /// Every field came from the generated text.
    Model,
    /// Some fields were filled from templates.
    Mixed,
    /// Nothing usable was extracted.
    Template,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightText {
    pub summary: String,
    pub key_takeaways: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwotMatrix {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub opportunities: Vec<String>,
    pub threats: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PestelFactors {
    pub political: Vec<String>,
    pub economic: Vec<String>,
    pub social: Vec<String>,
    pub technological: Vec<String>,
    pub environmental: Vec<String>,
    pub legal: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthPlan {
    pub opportunities: Vec<String>,
    pub strategies: Vec<String>,
    pub risks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StrategyContent {
    Swot(SwotMatrix),
    Pestel(PestelFactors),
    Growth(GrowthPlan),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Narrative {
    Insight(InsightText),
    Strategy {
        content: StrategyContent,
        recommendations: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedNarrative {
    pub narrative: Narrative,
    pub origin: NarrativeOrigin,
}

/// Fields collected by a stage, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    pub summary: String,
    pub lists: BTreeMap<&'static str, Vec<String>>,
}

impl Draft {
    pub fn push(&mut self, field: &'static str, item: impl Into<String>) {
        self.lists.entry(field).or_default().push(item.into());
    }

    pub fn list(&self, field: &str) -> &[String] {
        self.lists.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.summary.trim().is_empty() && self.lists.values().all(Vec::is_empty)
    }

    fn take(&mut self, field: &str) -> Vec<String> {
        self.lists.remove(field).unwrap_or_default()
    }

    /// Drop blanks, cut items and the summary to their char limits, cap lists.
    fn normalize(&mut self, shape: NarrativeShape) {
        self.summary = truncate_chars(self.summary.trim(), SUMMARY_MAX_CHARS);
        for (field, items) in self.lists.iter_mut() {
            let cap = shape.list_cap(field);
            *items = items
                .iter()
                .map(|s| truncate_chars(s.trim(), ITEM_MAX_CHARS))
                .filter(|s| !s.is_empty())
                .take(cap)
                .collect();
        }
    }
}

/// Char-based (UTF-8 safe) cut, trailing whitespace removed.
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].trim_end().to_string(),
        None => s.to_string(),
    }
}

fn record_stage(shape: NarrativeShape, stage: &'static str) {
    counter!("narrative_stage_total", "shape" => shape.as_str(), "stage" => stage).increment(1);
}

/// Never fails; every field of the returned shape is populated.
pub fn parse(raw: &str, shape: NarrativeShape, industry: Option<&str>) -> ParsedNarrative {
    let (draft, origin) = prepare(raw, shape, industry);
    let narrative = match shape {
        NarrativeShape::Insight => Narrative::Insight(insight_from(draft)),
        NarrativeShape::Swot => strategy_narrative(draft, StrategyKind::Swot),
        NarrativeShape::Pestel => strategy_narrative(draft, StrategyKind::Pestel),
        NarrativeShape::Growth => strategy_narrative(draft, StrategyKind::Growth),
    };
    ParsedNarrative { narrative, origin }
}

pub fn parse_insight(raw: &str, industry: Option<&str>) -> (InsightText, NarrativeOrigin) {
    let (draft, origin) = prepare(raw, NarrativeShape::Insight, industry);
    (insight_from(draft), origin)
}

pub fn parse_strategy(
    raw: &str,
    kind: StrategyKind,
    industry: Option<&str>,
) -> (StrategyContent, Vec<String>, NarrativeOrigin) {
    let (draft, origin) = prepare(raw, kind.shape(), industry);
    let (content, recommendations) = strategy_from(draft, kind);
    (content, recommendations, origin)
}

fn prepare(raw: &str, shape: NarrativeShape, industry: Option<&str>) -> (Draft, NarrativeOrigin) {
    let text = raw.trim();
    let mut draft = match json::extract(text, shape) {
        Ok(d) => {
            record_stage(shape, "json");
            d
        }
        Err(e) => {
            debug!(shape = shape.as_str(), error = %e, "narrative stage yielded nothing");
            text_stages(text, shape)
        }
    };

    draft.normalize(shape);
    let origin = fill_from_templates(&mut draft, shape, industry);
    if origin != NarrativeOrigin::Model {
        record_stage(shape, "template");
    }
    draft.normalize(shape);
    (draft, origin)
}

fn text_stages(text: &str, shape: NarrativeShape) -> Draft {
    if text.chars().count() < SUBSTANTIVE_MIN_CHARS {
        debug!(
            shape = shape.as_str(),
            chars = text.chars().count(),
            "text too short to parse, using templates"
        );
        return Draft::default();
    }

    let mut draft = match sections::scan(text, shape) {
        Ok(d) => {
            record_stage(shape, "sections");
            d
        }
        Err(e) => {
            debug!(shape = shape.as_str(), error = %e, "narrative stage yielded nothing");
            Draft::default()
        }
    };

    if shape.has_summary() && draft.summary.trim().is_empty() {
        match sections::paragraphs(text) {
            Ok((summary, rest)) => {
                record_stage(shape, "paragraphs");
                draft.summary = summary;
                if draft.list("key_takeaways").is_empty() {
                    draft.lists.insert("key_takeaways", rest);
                }
            }
            Err(e) => debug!(shape = shape.as_str(), error = %e, "narrative stage yielded nothing"),
        }
    }
    draft
}

/// Fill each empty field independently; report how much came from templates.
fn fill_from_templates(draft: &mut Draft, shape: NarrativeShape, industry: Option<&str>) -> NarrativeOrigin {
    let mut total = 0usize;
    let mut filled = 0usize;

    if shape.has_summary() {
        total += 1;
        if draft.summary.is_empty() {
            draft.summary = templates::summary(industry).to_string();
            filled += 1;
        }
    }
    for &field in shape.list_fields() {
        total += 1;
        if draft.list(field).is_empty() {
            let canned = templates::items(shape, field, industry);
            draft
                .lists
                .insert(field, canned.iter().map(|s| s.to_string()).collect());
            filled += 1;
        }
    }

    match filled {
        0 => NarrativeOrigin::Model,
        n if n == total => NarrativeOrigin::Template,
        _ => NarrativeOrigin::Mixed,
    }
}

fn insight_from(mut d: Draft) -> InsightText {
    InsightText {
        key_takeaways: d.take("key_takeaways"),
        summary: d.summary,
    }
}

fn strategy_from(mut d: Draft, kind: StrategyKind) -> (StrategyContent, Vec<String>) {
    let content = match kind {
        StrategyKind::Swot => StrategyContent::Swot(SwotMatrix {
            strengths: d.take("strengths"),
            weaknesses: d.take("weaknesses"),
            opportunities: d.take("opportunities"),
            threats: d.take("threats"),
        }),
        StrategyKind::Pestel => StrategyContent::Pestel(PestelFactors {
            political: d.take("political"),
            economic: d.take("economic"),
            social: d.take("social"),
            technological: d.take("technological"),
            environmental: d.take("environmental"),
            legal: d.take("legal"),
        }),
        StrategyKind::Growth => StrategyContent::Growth(GrowthPlan {
            opportunities: d.take("opportunities"),
            strategies: d.take("strategies"),
            risks: d.take("risks"),
        }),
    };
    (content, d.take("recommendations"))
}

fn strategy_narrative(d: Draft, kind: StrategyKind) -> Narrative {
    let (content, recommendations) = strategy_from(d, kind);
    Narrative::Strategy {
        content,
        recommendations,
    }
}
