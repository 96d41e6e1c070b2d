// src/providers/http.rs
//! Shared HTTP plumbing for provider bindings: one client with bounded
//! timeouts, a JSON GET helper, and lenient readers for provider payloads
//! (numbers arrive as numbers, numeric strings, or `{ "raw": n }` objects).

use std::time::Duration;

use anyhow::Context;
use reqwest::header::HeaderMap;
use serde_json::Value;

use crate::error::ProviderError;

const USER_AGENT: &str = "stratiq-backend/0.1";

pub fn build_client(timeout_secs: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .connect_timeout(Duration::from_secs(4))
        .timeout(Duration::from_secs(timeout_secs.max(1)))
        .build()
        .context("building reqwest client")
}

/// GET `url` and decode the body as JSON. Non-2xx statuses are failures.
pub async fn get_json(
    client: &reqwest::Client,
    provider: &'static str,
    url: &str,
    headers: HeaderMap,
    query: &[(&str, &str)],
) -> Result<Value, ProviderError> {
    let resp = client
        .get(url)
        .headers(headers)
        .query(query)
        .send()
        .await
        .map_err(|source| ProviderError::Http { provider, source })?;

    let status = resp.status();
    if !status.is_success() {
        return Err(ProviderError::Status {
            provider,
            status: status.as_u16(),
        });
    }

    resp.json::<Value>()
        .await
        .map_err(|e| ProviderError::malformed(provider, e.to_string()))
}

/// Read a number that may be encoded as a JSON number, a numeric string, or a
/// Yahoo-style `{ "raw": n, "fmt": "..." }` object. Placeholders such as
/// `"None"` or `"-"` read as absent.
pub fn lenient_f64(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').parse::<f64>().ok(),
        Value::Object(m) => m.get("raw").and_then(lenient_f64),
        _ => None,
    }
    .filter(|x| x.is_finite())
}

/// First JSON pointer in `paths` (checked in order) that reads as a number.
pub fn number_at(root: &Value, paths: &[&str]) -> Option<f64> {
    paths.iter().find_map(|p| root.pointer(p).and_then(lenient_f64))
}

pub fn string_at(root: &Value, paths: &[&str]) -> Option<String> {
    paths.iter().find_map(|p| {
        root.pointer(p)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty() && *s != "None")
            .map(str::to_string)
    })
}
