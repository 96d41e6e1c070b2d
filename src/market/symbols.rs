// src/market/symbols.rs
//! Company name to ticker lookup, and the representative panels used by the
//! industry aggregator.

const COMPANY_SYMBOLS: &[(&str, &str)] = &[
    ("apple", "AAPL"),
    ("microsoft", "MSFT"),
    ("google", "GOOGL"),
    ("amazon", "AMZN"),
    ("meta", "META"),
    ("tesla", "TSLA"),
    ("nvidia", "NVDA"),
    ("netflix", "NFLX"),
    ("salesforce", "CRM"),
    ("oracle", "ORCL"),
    ("ibm", "IBM"),
    ("intel", "INTC"),
    ("adobe", "ADBE"),
    ("paypal", "PYPL"),
    ("visa", "V"),
    ("mastercard", "MA"),
    ("jpmorgan", "JPM"),
    ("bank of america", "BAC"),
    ("walmart", "WMT"),
    ("target", "TGT"),
    ("nike", "NKE"),
    ("starbucks", "SBUX"),
];

const PANELS: &[(&str, &[&str])] = &[
    ("Technology", &["AAPL", "MSFT", "GOOGL", "AMZN", "META", "NVDA"]),
    ("Healthcare", &["JNJ", "UNH", "PFE", "ABBV", "TMO", "ABT"]),
    ("Finance", &["JPM", "BAC", "WFC", "GS", "MS", "C"]),
    ("Retail", &["WMT", "TGT", "HD", "COST", "LOW", "TJX"]),
    ("Manufacturing", &["CAT", "DE", "GE", "HON", "EMR", "ITW"]),
    ("Energy", &["XOM", "CVX", "COP", "SLB", "EOG", "MPC"]),
    ("Education", &["CHGG", "LRN", "GS", "TAL", "EDU"]),
    ("Real Estate", &["AMT", "PLD", "EQIX", "PSA", "WELL", "SPG"]),
    ("Fashion", &["NKE", "LULU", "RL", "PVH", "VFC", "HBI"]),
];

/// Shortest name allowed to take part in containment matching.
const MIN_PARTIAL_LEN: usize = 3;
const MAX_LITERAL_TICKER_LEN: usize = 5;

/// Exact table match, then containment either way, then an all-caps token
/// that already looks like a ticker.
pub fn company_to_ticker(company: &str) -> Option<String> {
    let raw = company.trim();
    let lower = raw.to_lowercase();
    if lower.is_empty() {
        return None;
    }

    if let Some((_, sym)) = COMPANY_SYMBOLS.iter().find(|(name, _)| *name == lower) {
        return Some(sym.to_string());
    }

    if lower.chars().count() >= MIN_PARTIAL_LEN {
        let hit = COMPANY_SYMBOLS
            .iter()
            .find(|(name, _)| lower.contains(name) || name.contains(lower.as_str()));
        if let Some((_, sym)) = hit {
            return Some(sym.to_string());
        }
    }

    let looks_like_ticker = raw.len() <= MAX_LITERAL_TICKER_LEN
        && raw.chars().all(|c| c.is_ascii_uppercase());
    looks_like_ticker.then(|| raw.to_string())
}

/// Representative tickers for a known industry (case-insensitive).
pub fn panel_tickers(industry: &str) -> Option<&'static [&'static str]> {
    let key = industry.trim();
    PANELS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(key))
        .map(|(_, tickers)| *tickers)
}
