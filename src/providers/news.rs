// src/providers/news.rs
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use serde::Deserialize;

use crate::error::ProviderError;
use crate::providers::http::get_json;
use crate::providers::{DataProvider, NewsItem, ProviderResult};

const NEWS_API_URL: &str = "https://newsapi.org/v2/everything";

/// NewsAPI `everything` search, newest first.
pub struct NewsApiClient {
    http: reqwest::Client,
    api_key: String,
}

impl NewsApiClient {
    pub fn new(http: reqwest::Client, api_key: String) -> Self {
        Self {
            http,
            api_key: api_key.trim().to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
struct Article {
    title: Option<String>,
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
    source: Option<ArticleSource>,
    url: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ArticleSource {
    name: Option<String>,
}

#[async_trait]
impl DataProvider for NewsApiClient {
    fn name(&self) -> &'static str {
        "newsapi"
    }

    async fn news(&self, query: &str, limit: usize) -> ProviderResult<Vec<NewsItem>> {
        if self.api_key.is_empty() {
            return Err(ProviderError::unavailable(self.name()));
        }
        let page_size = limit.clamp(1, 100).to_string();
        let body = get_json(
            &self.http,
            self.name(),
            NEWS_API_URL,
            HeaderMap::new(),
            &[
                ("q", query),
                ("apiKey", self.api_key.as_str()),
                ("sortBy", "publishedAt"),
                ("pageSize", page_size.as_str()),
            ],
        )
        .await?;
        let env: Envelope = serde_json::from_value(body)
            .map_err(|e| ProviderError::malformed(self.name(), e.to_string()))?;
        Ok(into_items(env, limit))
    }
}

fn into_items(env: Envelope, limit: usize) -> Vec<NewsItem> {
    env.articles
        .into_iter()
        .filter_map(|a| {
            let title = a.title?.trim().to_string();
            // NewsAPI marks withdrawn articles with this placeholder title.
            if title.is_empty() || title == "[Removed]" {
                return None;
            }
            Some(NewsItem {
                title,
                published_at: a.published_at,
                source: a.source.and_then(|s| s.name),
                url: a.url,
                description: a.description,
            })
        })
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removed_and_untitled_articles_are_dropped() {
        let env: Envelope = serde_json::from_str(
            r#"{"status":"ok","articles":[
                {"title":"Chipmakers rally","publishedAt":"2025-01-02T10:00:00Z","source":{"name":"Reuters"}},
                {"title":"[Removed]"},
                {"title":null},
                {"title":"Cloud spend climbs","url":"https://example.test/a"}
            ]}"#,
        )
        .unwrap();
        let items = into_items(env, 10);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].source.as_deref(), Some("Reuters"));
        assert_eq!(items[1].title, "Cloud spend climbs");
    }

    #[tokio::test]
    async fn no_key_is_unavailable() {
        let c = NewsApiClient::new(reqwest::Client::new(), "  ".into());
        assert!(c.news("Energy", 10).await.unwrap_err().is_unavailable());
    }
}
