// src/config/heuristics.rs
//! Tunable constants of the metric resolver and the industry aggregator.
//! Loaded from `config/heuristics.toml`; every key is optional.

use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_HEURISTICS_CONFIG_PATH: &str = "config/heuristics.toml";
pub const ENV_HEURISTICS_PATH: &str = "HEURISTICS_CONFIG_PATH";
/// Panels list five tickers per industry.
pub const MAX_PANEL_SIZE: usize = 5;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Heuristics {
    /// Share of market cap (or revenue) reported as funding volume.
    pub funding_fraction: f64,
    pub panel_market_multiplier: f64,
    pub news_factor_divisor: f64,
    pub news_factor_cap: f64,
    pub panel_size: usize,
    pub panel_min_samples: usize,
    pub competition: CompetitionThresholds,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CompetitionThresholds {
    /// Single-company cap above which competition is "Very High".
    pub company_very_high_cap: f64,
    pub company_high_cap: f64,
    /// Free-tier quotes: cap above which competition is "High".
    pub free_tier_high_cap: f64,
    /// Panel total cap above which competition is "Very High".
    pub panel_very_high_cap: f64,
    pub panel_high_cap: f64,
}

impl Default for CompetitionThresholds {
    fn default() -> Self {
        Self {
            company_very_high_cap: 100e9,
            company_high_cap: 10e9,
            free_tier_high_cap: 1e9,
            panel_very_high_cap: 5e12,
            panel_high_cap: 1e12,
        }
    }
}

impl Default for Heuristics {
    fn default() -> Self {
        Self {
            funding_fraction: 0.1,
            panel_market_multiplier: 2.0,
            news_factor_divisor: 10.0,
            news_factor_cap: 1.5,
            panel_size: 5,
            panel_min_samples: 2,
            competition: CompetitionThresholds::default(),
        }
    }
}

impl Heuristics {
    pub fn from_toml_str(s: &str) -> anyhow::Result<Self> {
        let mut h: Heuristics = toml::from_str(s).context("parse heuristics TOML")?;
        h.sanitize();
        Ok(h)
    }

    /// Resolve the path (explicit, then `HEURISTICS_CONFIG_PATH`, then the default)
    /// and load it. A missing file yields defaults.
    pub fn load(explicit: Option<&str>) -> anyhow::Result<Self> {
        let path = explicit
            .map(PathBuf::from)
            .or_else(|| std::env::var(ENV_HEURISTICS_PATH).ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_HEURISTICS_CONFIG_PATH));
        Self::load_from_path(&path)
    }

    pub fn load_from_path(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("read heuristics config at {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    fn sanitize(&mut self) {
        let d = Self::default();
        if !(self.funding_fraction.is_finite() && self.funding_fraction > 0.0) {
            self.funding_fraction = d.funding_fraction;
        }
        if !(self.panel_market_multiplier.is_finite() && self.panel_market_multiplier > 0.0) {
            self.panel_market_multiplier = d.panel_market_multiplier;
        }
        if !(self.news_factor_divisor.is_finite() && self.news_factor_divisor > 0.0) {
            self.news_factor_divisor = d.news_factor_divisor;
        }
        if !(self.news_factor_cap.is_finite() && self.news_factor_cap > 0.0) {
            self.news_factor_cap = d.news_factor_cap;
        }
        if self.panel_size == 0 {
            self.panel_size = d.panel_size;
        }
        self.panel_size = self.panel_size.clamp(1, MAX_PANEL_SIZE);
        self.panel_min_samples = self.panel_min_samples.max(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let h = Heuristics::from_toml_str(
            r#"
            news_factor_cap = 2.0
            [competition]
            panel_high_cap = 2e12
            "#,
        )
        .unwrap();
        assert_eq!(h.news_factor_cap, 2.0);
        assert_eq!(h.funding_fraction, 0.1);
        assert_eq!(h.competition.panel_high_cap, 2e12);
        assert_eq!(h.competition.panel_very_high_cap, 5e12);
    }

    #[test]
    fn nonsense_values_fall_back() {
        let h = Heuristics::from_toml_str("funding_fraction = -1.0\npanel_size = 0").unwrap();
        assert_eq!(h.funding_fraction, 0.1);
        assert_eq!(h.panel_size, 5);
    }

    #[test]
    fn oversized_panel_is_capped() {
        let h = Heuristics::from_toml_str("panel_size = 9").unwrap();
        assert_eq!(h.panel_size, MAX_PANEL_SIZE);
        let h = Heuristics::from_toml_str("panel_size = 3").unwrap();
        assert_eq!(h.panel_size, 3);
    }

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let h = Heuristics::load_from_path(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(h, Heuristics::default());
    }
}
