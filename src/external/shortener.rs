//! URL shortening for deep links embedded in SMS.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use serde_json::json;

use super::client::HTTP_CLIENT;
use crate::error::{AppError, AppResult};

#[async_trait]
pub trait UrlShortener: Send + Sync {
    async fn shorten(&self, url: &str) -> anyhow::Result<String>;
}

/// Returns links unchanged; used when no shortener is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughUrlShortener;

#[async_trait]
impl UrlShortener for PassthroughUrlShortener {
    async fn shorten(&self, url: &str) -> anyhow::Result<String> {
        Ok(url.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct ShortenResponse {
    short_url: String,
}

/// Shortener service reached over HTTP
///
/// Sends `POST {endpoint}` with `{"url": "..."}` and expects
/// `{"short_url": "..."}` back.
#[derive(Debug, Clone)]
pub struct HttpUrlShortener {
    endpoint: Url,
    timeout: Duration,
}

impl HttpUrlShortener {
    pub fn new(endpoint: &str, timeout_seconds: u64) -> AppResult<Self> {
        let endpoint = Url::parse(endpoint).map_err(|_| {
            AppError::validation("url_shortener.endpoint", "Invalid URL format")
        })?;

        if endpoint.scheme() != "https" && endpoint.scheme() != "http" {
            return Err(AppError::validation(
                "url_shortener.endpoint",
                "URL must use http or https protocol",
            ));
        }

        Ok(Self {
            endpoint,
            timeout: Duration::from_secs(timeout_seconds),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl UrlShortener for HttpUrlShortener {
    async fn shorten(&self, url: &str) -> anyhow::Result<String> {
        let response = HTTP_CLIENT
            .post(self.endpoint.clone())
            .timeout(self.timeout)
            .json(&json!({ "url": url }))
            .send()
            .await
            .context("URL shortener request failed")?
            .error_for_status()
            .context("URL shortener rejected the request")?;

        let body: ShortenResponse = response
            .json()
            .await
            .context("URL shortener returned an unexpected body")?;

        Ok(body.short_url)
    }
}
