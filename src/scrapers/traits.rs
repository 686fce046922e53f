use crate::config::ScrapeConfig;
use crate::error::ScrapeError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

/// Retrieves raw markup for a URL
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, ScrapeError>;
}

/// Build the HTTP client shared by page fetching and geocoding
pub fn build_client(config: &ScrapeConfig) -> Result<Client> {
    Client::builder()
        .timeout(config.request_timeout)
        .user_agent(&config.user_agent)
        .build()
        .context("Failed to create HTTP client")
}

/// `PageFetcher` over a reqwest client. Non-success statuses count as failures.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ScrapeError::transport(url, e))?;

        if !response.status().is_success() {
            return Err(ScrapeError::transport(
                url,
                format!("status {}", response.status()),
            ));
        }

        let html = response
            .text()
            .await
            .map_err(|e| ScrapeError::transport(url, e))?;

        debug!("Downloaded {} bytes from {}", html.len(), url);
        Ok(html)
    }
}
