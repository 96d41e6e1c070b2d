// src/config/ai.rs
use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path};

pub const DEFAULT_AI_CONFIG_PATH: &str = "config/ai.json";

fn default_enabled() -> bool {
    true
}
fn default_providers() -> Vec<String> {
    vec!["openai".to_string(), "groq".to_string()]
}
fn default_openai_model() -> String {
    "gpt-4o".to_string()
}
fn default_groq_model() -> String {
    "llama-3.3-70b-versatile".to_string()
}
fn default_temperature() -> f32 {
    0.7
}
fn default_max_tokens() -> u32 {
    1500
}
fn env_marker() -> String {
    "ENV".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Tried in order; "openai" | "groq" (case-insensitive). Unknown names are skipped.
    #[serde(default = "default_providers")]
    pub providers: Vec<String>,
    #[serde(default = "default_openai_model")]
    pub openai_model: String,
    #[serde(default = "default_groq_model")]
    pub groq_model: String,
    /// "ENV" means: read from OPENAI_API_KEY
    #[serde(default = "env_marker")]
    pub openai_api_key: String,
    /// "ENV" means: read from GROQ_API_KEY
    #[serde(default = "env_marker")]
    pub groq_api_key: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            providers: default_providers(),
            openai_model: default_openai_model(),
            groq_model: default_groq_model(),
            openai_api_key: env_marker(),
            groq_api_key: env_marker(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

impl AiConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let data = fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }

    pub fn from_json_str(data: &str) -> anyhow::Result<Self> {
        let mut cfg: AiConfig = serde_json::from_str(data)?;
        cfg.normalize();
        Ok(cfg)
    }

    /// Missing file means defaults; a file that exists but does not parse is an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            let mut cfg = Self::default();
            cfg.normalize();
            return Ok(cfg);
        }
        Self::load_from_file(path)
    }

    fn normalize(&mut self) {
        self.providers = self
            .providers
            .iter()
            .map(|p| p.trim().to_lowercase())
            .filter(|p| !p.is_empty())
            .collect();

        // Resolve api keys given as "ENV"; an unset variable leaves the key empty
        // and that provider is simply skipped at runtime.
        if self.openai_api_key.trim().eq_ignore_ascii_case("env") {
            self.openai_api_key = env::var("OPENAI_API_KEY").unwrap_or_default();
        }
        if self.groq_api_key.trim().eq_ignore_ascii_case("env") {
            self.groq_api_key = env::var("GROQ_API_KEY").unwrap_or_default();
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            self.temperature = default_temperature();
        }
        if self.max_tokens == 0 {
            self.max_tokens = default_max_tokens();
        }
    }

    pub fn api_key_for(&self, provider: &str) -> &str {
        match provider {
            "openai" => self.openai_api_key.trim(),
            "groq" => self.groq_api_key.trim(),
            _ => "",
        }
    }
}
