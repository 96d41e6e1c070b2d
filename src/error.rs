// src/error.rs
//! Degradation taxonomy for the core.
//!
//! None of these reach the HTTP layer as an error status: each one marks the
//! point where a tier, parser stage, or aggregation gives way to the next.

use thiserror::Error;

/// Outcome of a provider call that did not produce data.
///
/// `Unavailable` is expected and silent (no credential or capability).
/// Every other variant is a provider failure: logged, counted, non-fatal.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{provider}: capability not configured")]
    Unavailable { provider: &'static str },

    #[error("{provider}: request failed: {source}")]
    Http {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider}: HTTP status {status}")]
    Status { provider: &'static str, status: u16 },

    #[error("{provider}: malformed payload: {detail}")]
    Malformed {
        provider: &'static str,
        detail: String,
    },

    #[error("{provider}: no usable data for '{query}'")]
    NoData {
        provider: &'static str,
        query: String,
    },
}

impl ProviderError {
    pub fn unavailable(provider: &'static str) -> Self {
        Self::Unavailable { provider }
    }

    pub fn malformed(provider: &'static str, detail: impl Into<String>) -> Self {
        Self::Malformed {
            provider,
            detail: detail.into(),
        }
    }

    pub fn no_data(provider: &'static str, query: impl Into<String>) -> Self {
        Self::NoData {
            provider,
            query: query.into(),
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }

    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unavailable { .. } => "unavailable",
            Self::Http { source, .. } if source.is_timeout() => "timeout",
            Self::Http { .. } => "http",
            Self::Status { .. } => "status",
            Self::Malformed { .. } => "malformed",
            Self::NoData { .. } => "no_data",
        }
    }
}

/// A narrative parser stage that produced nothing usable.
#[derive(Debug, Error)]
#[error("{stage} stage: {reason}")]
pub struct ParseFailure {
    pub stage: &'static str,
    pub reason: String,
}

impl ParseFailure {
    pub fn new(stage: &'static str, reason: impl Into<String>) -> Self {
        Self {
            stage,
            reason: reason.into(),
        }
    }
}

/// Industry aggregation collected too few panel samples.
#[derive(Debug, Error)]
#[error("industry '{industry}': {usable} usable panel samples, {required} required")]
pub struct InsufficientPanelData {
    pub industry: String,
    pub usable: usize,
    pub required: usize,
}
