use serde::{Deserialize, Serialize};

/// Envelope shared by every HTTP response: `{success, data}` on success,
/// `{success, error}` on failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    /// Collapses the envelope into a `Result`, using the server message on failure.
    pub fn into_result(self) -> Result<T, String> {
        match (self.success, self.data, self.error) {
            (true, Some(data), _) => Ok(data),
            (true, None, _) => Err("Response is missing data".to_string()),
            (false, _, Some(error)) => Err(error),
            (false, _, None) => Err("Request failed".to_string()),
        }
    }
}

/// Payload of `GET /bookmarks/metadata`. `title` is `null` when nothing could be scraped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataResponse {
    pub title: Option<String>,
}
