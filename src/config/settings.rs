// src/config/settings.rs
//! Process settings read from the environment (a `.env` file is loaded by the
//! binary via dotenvy before this runs). Model API keys are resolved by
//! [`crate::config::AiConfig`].

use std::env;

pub const DEFAULT_ALPHA_VANTAGE_HOST: &str = "alpha-vantage.p.rapidapi.com";
pub const DEFAULT_YAHOO_FINANCE_HOST: &str = "yahoo-finance15.p.rapidapi.com";
pub const DEFAULT_CRUNCHBASE_HOST: &str = "crunchbase-crunchbase-com.p.rapidapi.com";
pub const DEFAULT_MARKET_DATA_HOST: &str = "market-data-api.p.rapidapi.com";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Settings {
    pub news_api_key: String,
    pub rapidapi_key: String,
    pub alpha_vantage_host: String,
    pub yahoo_finance_host: String,
    pub crunchbase_host: String,
    pub market_data_host: String,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub http_timeout_secs: u64,
    /// Public Yahoo endpoints need no key; this switch keeps tests and
    /// air-gapped deployments off the network.
    pub yahoo_free_enabled: bool,
    pub ai_config_path: String,
    pub heuristics_config_path: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            news_api_key: String::new(),
            rapidapi_key: String::new(),
            alpha_vantage_host: DEFAULT_ALPHA_VANTAGE_HOST.to_string(),
            yahoo_finance_host: DEFAULT_YAHOO_FINANCE_HOST.to_string(),
            crunchbase_host: DEFAULT_CRUNCHBASE_HOST.to_string(),
            market_data_host: DEFAULT_MARKET_DATA_HOST.to_string(),
            cors_origins: vec!["http://localhost:3000".to_string()],
            environment: "development".to_string(),
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            yahoo_free_enabled: true,
            ai_config_path: crate::config::ai::DEFAULT_AI_CONFIG_PATH.to_string(),
            heuristics_config_path: None,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            news_api_key: var_or("NEWS_API_KEY", d.news_api_key),
            rapidapi_key: var_or("RAPIDAPI_KEY", d.rapidapi_key),
            alpha_vantage_host: var_or("ALPHA_VANTAGE_HOST", d.alpha_vantage_host),
            yahoo_finance_host: var_or("YAHOO_FINANCE_HOST", d.yahoo_finance_host),
            crunchbase_host: var_or("CRUNCHBASE_HOST", d.crunchbase_host),
            market_data_host: var_or("MARKET_DATA_HOST", d.market_data_host),
            cors_origins: env::var("CORS_ORIGINS")
                .map(|s| parse_origins(&s))
                .unwrap_or(d.cors_origins),
            environment: var_or("ENVIRONMENT", d.environment),
            http_timeout_secs: env::var("HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.trim().parse::<u64>().ok())
                .filter(|s| *s > 0)
                .unwrap_or(d.http_timeout_secs),
            yahoo_free_enabled: env::var("YAHOO_FREE_ENABLED")
                .map(|v| !matches!(v.trim(), "0" | "false" | "off"))
                .unwrap_or(d.yahoo_free_enabled),
            ai_config_path: var_or("AI_CONFIG_PATH", d.ai_config_path),
            heuristics_config_path: env::var(crate::config::heuristics::ENV_HEURISTICS_PATH).ok(),
        }
    }
}

fn var_or(key: &str, default: String) -> String {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
}

pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
