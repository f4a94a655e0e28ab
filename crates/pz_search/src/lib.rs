//! Resolves a business name to its review page through the partner search API.

use async_trait::async_trait;
use pz_core::error::error_body;
use pz_core::{Business, Error, Result};
use reqwest::StatusCode;
use serde::Deserialize;
use tokio::sync::Mutex;

pub mod config;
pub mod token;

pub use config::SearchConfig;
pub use token::{AccessToken, TokenHolder};

#[async_trait]
pub trait BusinessSearch: Send + Sync {
    /// Best match for `term`, if the directory has one.
    async fn find_business(&self, term: &str) -> Result<Option<Business>>;

    async fn find_document_url(&self, term: &str) -> Result<Option<String>> {
        Ok(self.find_business(term).await?.map(|business| business.url))
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    businesses: Vec<Business>,
}

pub struct SearchClient {
    http: reqwest::Client,
    config: SearchConfig,
    tokens: Mutex<TokenHolder>,
}

impl SearchClient {
    pub fn new(config: SearchConfig) -> Self {
        Self::with_tokens(config, TokenHolder::new())
    }

    pub fn with_tokens(config: SearchConfig, tokens: TokenHolder) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            tokens: Mutex::new(tokens),
        }
    }

    async fn search(&self, term: &str, token: &str) -> Result<reqwest::Response> {
        let url = self.config.endpoint("v3/businesses/search")?;
        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .query(&[
                ("term", term),
                ("location", self.config.location.as_str()),
                ("categories", self.config.category.as_str()),
                ("limit", "1"),
            ])
            .send()
            .await?;
        Ok(response)
    }
}

#[async_trait]
impl BusinessSearch for SearchClient {
    async fn find_business(&self, term: &str) -> Result<Option<Business>> {
        let token = self.tokens.lock().await.bearer(&self.http, &self.config).await?;
        let mut response = self.search(term, &token).await?;

        if response.status().is_client_error() {
            tracing::warn!(status = %response.status(), "search rejected, retrying with a new token");
            let token = {
                let mut tokens = self.tokens.lock().await;
                tokens.invalidate();
                tokens.refresh(&self.http, &self.config).await?
            };
            response = self.search(term, &token).await?;
        }

        let status = response.status();
        if status != StatusCode::OK {
            let body = error_body(response).await;
            return Err(Error::upstream(status.as_u16(), body));
        }

        let results: SearchResponse = response.json().await?;
        let business = results.businesses.into_iter().next();
        match &business {
            Some(b) => tracing::info!(term, name = %b.name, "found business"),
            None => tracing::info!(term, "no business matched"),
        }
        Ok(business)
    }
}
