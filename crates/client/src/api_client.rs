use async_trait::async_trait;
use linkshelf_common::{ApiResponse, Bookmark, BookmarkPayload, MetadataResponse};
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::error::ClientError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Remote bookmark operations as seen by the client.
#[async_trait]
pub trait BookmarkApi: Send + Sync {
    async fn list(&self, tag: Option<&str>) -> Result<Vec<Bookmark>, ClientError>;

    async fn create(&self, payload: &BookmarkPayload) -> Result<Bookmark, ClientError>;

    async fn update(&self, id: &str, payload: &BookmarkPayload) -> Result<Bookmark, ClientError>;

    /// Returns the removed record.
    async fn delete(&self, id: &str) -> Result<Bookmark, ClientError>;

    /// Best-effort page title for `url`; `Ok(None)` when the server found none.
    async fn fetch_title(&self, url: &str) -> Result<Option<String>, ClientError>;
}

/// `BookmarkApi` over the server's JSON routes.
pub struct HttpBookmarkApi {
    client: Client,
    base_url: Url,
}

impl HttpBookmarkApi {
    /// `base_url` is the server root, e.g. `http://localhost:3001` or `http://host/api`.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base_url =
            Url::parse(base_url).map_err(|e| ClientError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(base_url.to_string()));
        }
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // `new` rejected cannot-be-a-base URLs, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

async fn read_envelope<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    let bytes = response.bytes().await?;
    decode_envelope(status, &bytes)
}

/// Unwraps a `{success, data, error}` body. Anything else is an unexpected response.
fn decode_envelope<T: DeserializeOwned>(status: StatusCode, bytes: &[u8]) -> Result<T, ClientError> {
    let envelope: ApiResponse<T> = serde_json::from_slice(bytes).map_err(|e| {
        debug!(status = %status, error = %e, "Response was not a bookmark API envelope.");
        ClientError::UnexpectedResponse {
            status: status.as_u16(),
            body: String::from_utf8_lossy(bytes)
                .chars()
                .take(MAX_ERROR_BODY_CHARS)
                .collect(),
        }
    })?;
    envelope.into_result().map_err(ClientError::Api)
}

#[async_trait]
impl BookmarkApi for HttpBookmarkApi {
    async fn list(&self, tag: Option<&str>) -> Result<Vec<Bookmark>, ClientError> {
        let mut request = self.client.get(self.endpoint(&["bookmarks"]));
        if let Some(tag) = tag {
            request = request.query(&[("tag", tag)]);
        }
        read_envelope(request.send().await?).await
    }

    async fn create(&self, payload: &BookmarkPayload) -> Result<Bookmark, ClientError> {
        let response = self
            .client
            .post(self.endpoint(&["bookmarks"]))
            .json(payload)
            .send()
            .await?;
        read_envelope(response).await
    }

    async fn update(&self, id: &str, payload: &BookmarkPayload) -> Result<Bookmark, ClientError> {
        let response = self
            .client
            .put(self.endpoint(&["bookmarks", id]))
            .json(payload)
            .send()
            .await?;
        read_envelope(response).await
    }

    async fn delete(&self, id: &str) -> Result<Bookmark, ClientError> {
        let response = self
            .client
            .delete(self.endpoint(&["bookmarks", id]))
            .send()
            .await?;
        read_envelope(response).await
    }

    async fn fetch_title(&self, url: &str) -> Result<Option<String>, ClientError> {
        let response = self
            .client
            .get(self.endpoint(&["bookmarks", "metadata"]))
            .query(&[("url", url)])
            .send()
            .await?;
        let metadata: MetadataResponse = read_envelope(response).await?;
        Ok(metadata.title)
    }
}
