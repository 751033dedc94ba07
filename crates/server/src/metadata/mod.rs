use async_trait::async_trait;
use reqwest::{header, Client, Response, Url};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::ServerConfig;

mod title;

pub use title::extract_title;

/// Pages larger than this are not scanned for a title.
const MAX_BODY_BYTES: usize = 1024 * 1024;

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Unexpected status: {0}")]
    Status(reqwest::StatusCode),
    #[error("Response body too large")]
    TooLarge,
}

/// Best-effort lookup of page metadata. Implementations never fail the
/// caller: any problem degrades to `None`.
#[async_trait]
pub trait MetadataFetcher: Send + Sync {
    async fn fetch_title(&self, url: &Url) -> Option<String>;
}

/// Fetches the page over HTTP with a fixed timeout and scrapes its `<title>`.
pub struct HttpMetadataFetcher {
    client: Client,
}

impl HttpMetadataFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, MetadataError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;
        Ok(Self { client })
    }

    pub fn from_config(config: &ServerConfig) -> Result<Self, MetadataError> {
        Self::new(
            Duration::from_secs(config.metadata_timeout_secs),
            &config.metadata_user_agent,
        )
    }

    async fn try_fetch_title(&self, url: &Url) -> Result<Option<String>, MetadataError> {
        if !matches!(url.scheme(), "http" | "https") {
            return Err(MetadataError::UnsupportedScheme(url.scheme().to_string()));
        }

        let response = self
            .client
            .get(url.clone())
            .header(header::ACCEPT, "text/html,application/xhtml+xml")
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(MetadataError::Status(response.status()));
        }
        if response
            .content_length()
            .is_some_and(|len| len > MAX_BODY_BYTES as u64)
        {
            return Err(MetadataError::TooLarge);
        }

        let body = read_body_capped(response).await?;
        Ok(extract_title(&String::from_utf8_lossy(&body)))
    }
}

/// Reads the body chunk by chunk and gives up as soon as it passes `MAX_BODY_BYTES`.
async fn read_body_capped(mut response: Response) -> Result<Vec<u8>, MetadataError> {
    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        if body.len() + chunk.len() > MAX_BODY_BYTES {
            return Err(MetadataError::TooLarge);
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

#[async_trait]
impl MetadataFetcher for HttpMetadataFetcher {
    async fn fetch_title(&self, url: &Url) -> Option<String> {
        match self.try_fetch_title(url).await {
            Ok(title) => {
                debug!(url = %url, found = title.is_some(), "Fetched page metadata.");
                title
            }
            Err(e) => {
                warn!(url = %url, error = %e, "Failed to fetch page metadata.");
                None
            }
        }
    }
}
