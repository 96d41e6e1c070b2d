// src/ai/text_client.rs
//! Text generation: provider abstraction, chat-completions providers for
//! OpenAI and Groq, and a client that walks the providers in order and ends
//! on a canned sample. Generation never fails from the caller's view.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use metrics::counter;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::ai::samples::sample_response;
use crate::config::ai::AiConfig;
use crate::error::ProviderError;

pub const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const GROQ_CHAT_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

const SYSTEM_PROMPT: &str = "You are a business strategy analyst. Answer with the requested \
structure, concrete and specific to the industry and metrics given.";

/// What a [`TextClient`] produced for one prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub text: String,
    /// True when `text` is a canned sample rather than a provider's answer.
    pub canned: bool,
}

impl Generated {
    pub fn answered(text: String) -> Self {
        Self { text, canned: false }
    }

    pub fn sample(prompt: &str) -> Self {
        Self {
            text: sample_response(prompt).to_string(),
            canned: true,
        }
    }
}

/// Trait object used by the services and tests.
pub trait TextClient: Send + Sync {
    /// Generated text, or a canned sample when no provider answered.
    fn generate<'a>(&'a self, prompt: &'a str) -> Pin<Box<dyn Future<Output = Generated> + Send + 'a>>;
    /// Provider name for diagnostics.
    fn provider_name(&self) -> &'static str;
}

pub type DynTextClient = Arc<dyn TextClient>;

/// Low-level provider: one remote call, no fallback.
pub trait Provider: Send + Sync + 'static {
    fn complete<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, ProviderError>> + Send + 'a>>;
    fn name(&self) -> &'static str;
}

/// Factory.
///
/// * `AI_TEST_MODE=mock` gives a deterministic client that answers with the samples.
/// * A disabled config, or one with no usable provider, gives [`DisabledClient`].
/// * Otherwise the configured providers are tried in order.
pub fn build_text_client(config: &AiConfig, http: reqwest::Client) -> DynTextClient {
    if std::env::var("AI_TEST_MODE")
        .map(|v| v == "mock")
        .unwrap_or(false)
    {
        return Arc::new(FallbackClient::new(vec![Box::new(MockProvider::samples())]));
    }

    if !config.enabled {
        info!("text generation disabled by config, serving samples");
        return Arc::new(DisabledClient);
    }

    let mut providers: Vec<Box<dyn Provider>> = Vec::new();
    for name in &config.providers {
        let key = config.api_key_for(name);
        if key.is_empty() && matches!(name.as_str(), "openai" | "groq") {
            debug!(provider = %name, "no api key, provider skipped");
            continue;
        }
        match name.as_str() {
            "openai" => providers.push(Box::new(ChatCompletionsProvider::openai(http.clone(), config))),
            "groq" => providers.push(Box::new(ChatCompletionsProvider::groq(http.clone(), config))),
            other => warn!(provider = other, "unknown text provider in config, skipped"),
        }
    }

    if providers.is_empty() {
        info!("no text provider configured, serving samples");
        return Arc::new(DisabledClient);
    }
    Arc::new(FallbackClient::new(providers))
}

/// OpenAI-compatible Chat Completions endpoint (OpenAI itself and Groq).
pub struct ChatCompletionsProvider {
    http: reqwest::Client,
    endpoint: &'static str,
    name: &'static str,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl ChatCompletionsProvider {
    pub fn openai(http: reqwest::Client, config: &AiConfig) -> Self {
        Self {
            http,
            endpoint: OPENAI_CHAT_URL,
            name: "openai",
            api_key: config.api_key_for("openai").to_string(),
            model: config.openai_model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }

    pub fn groq(http: reqwest::Client, config: &AiConfig) -> Self {
        Self {
            http,
            endpoint: GROQ_CHAT_URL,
            name: "groq",
            api_key: config.api_key_for("groq").to_string(),
            model: config.groq_model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Serialize)]
struct Msg<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Msg<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMsg,
}

#[derive(Deserialize)]
struct ChoiceMsg {
    #[serde(default)]
    content: Option<String>,
}

impl Provider for ChatCompletionsProvider {
    fn complete<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, ProviderError>> + Send + 'a>> {
        Box::pin(async move {
            if self.api_key.is_empty() {
                return Err(ProviderError::unavailable(self.name));
            }

            let req = ChatRequest {
                model: &self.model,
                messages: vec![
                    Msg {
                        role: "system",
                        content: SYSTEM_PROMPT,
                    },
                    Msg {
                        role: "user",
                        content: prompt,
                    },
                ],
                temperature: self.temperature,
                max_tokens: self.max_tokens,
            };

            let resp = self
                .http
                .post(self.endpoint)
                .bearer_auth(&self.api_key)
                .json(&req)
                .send()
                .await
                .map_err(|source| ProviderError::Http {
                    provider: self.name,
                    source,
                })?;

            let status = resp.status();
            if !status.is_success() {
                return Err(ProviderError::Status {
                    provider: self.name,
                    status: status.as_u16(),
                });
            }

            let body: ChatResponse = resp.json().await.map_err(|source| ProviderError::Http {
                provider: self.name,
                source,
            })?;
            body.choices
                .into_iter()
                .next()
                .and_then(|c| c.message.content)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .ok_or_else(|| ProviderError::malformed(self.name, "empty completion"))
        })
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

/// Tries each provider in order; the first non-empty answer wins.
pub struct FallbackClient {
    providers: Vec<Box<dyn Provider>>,
}

impl FallbackClient {
    pub fn new(providers: Vec<Box<dyn Provider>>) -> Self {
        Self { providers }
    }

    async fn generate_impl(&self, prompt: &str) -> Generated {
        for p in &self.providers {
            match p.complete(prompt).await {
                Ok(text) => {
                    counter!("text_generation_total", "provider" => p.name(), "outcome" => "success")
                        .increment(1);
                    info!(provider = p.name(), chars = text.len(), "text generated");
                    return Generated::answered(text);
                }
                Err(e) if e.is_unavailable() => {
                    debug!(provider = p.name(), "text provider unavailable");
                }
                Err(e) => {
                    counter!("text_generation_total", "provider" => p.name(), "outcome" => "failure")
                        .increment(1);
                    warn!(provider = p.name(), error = %e, "text provider failed, trying next");
                }
            }
        }
        counter!("text_generation_total", "provider" => "sample", "outcome" => "fallback").increment(1);
        warn!("no text provider answered, serving sample response");
        Generated::sample(prompt)
    }
}

impl TextClient for FallbackClient {
    fn generate<'a>(&'a self, prompt: &'a str) -> Pin<Box<dyn Future<Output = Generated> + Send + 'a>> {
        Box::pin(self.generate_impl(prompt))
    }

    fn provider_name(&self) -> &'static str {
        self.providers.first().map_or("sample", |p| p.name())
    }
}

/// Serves the canned samples; used when generation is disabled.
pub struct DisabledClient;

impl TextClient for DisabledClient {
    fn generate<'a>(&'a self, prompt: &'a str) -> Pin<Box<dyn Future<Output = Generated> + Send + 'a>> {
        Box::pin(async move {
            counter!("text_generation_total", "provider" => "sample", "outcome" => "disabled").increment(1);
            Generated::sample(prompt)
        })
    }

    fn provider_name(&self) -> &'static str {
        "disabled"
    }
}

/// Deterministic provider for tests and local runs.
#[derive(Clone)]
pub struct MockProvider {
    fixed: Option<String>,
}

impl MockProvider {
    /// Always answers with `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            fixed: Some(text.into()),
        }
    }

    /// Answers with the sample matching the prompt.
    pub fn samples() -> Self {
        Self { fixed: None }
    }
}

impl Provider for MockProvider {
    fn complete<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, ProviderError>> + Send + 'a>> {
        let out = self
            .fixed
            .clone()
            .unwrap_or_else(|| sample_response(prompt).to_string());
        Box::pin(async move { Ok(out) })
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
