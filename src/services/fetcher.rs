use crate::error::{Result, ScraperError};
use async_trait::async_trait;
use tracing::{debug, info};
use url::Url;

/// Retrieves the raw markup of a page.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Fetcher backed by a shared `reqwest` client. No retries, no caching.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        info!("Fetching page: {}", url);

        let parsed_url = Url::parse(url)?;
        let response = self.client.get(parsed_url).send().await?;

        if !response.status().is_success() {
            return Err(ScraperError::HttpStatus {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        debug!("Received {} bytes from {}", body.len(), url);

        Ok(body)
    }
}
