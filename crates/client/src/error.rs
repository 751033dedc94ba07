use linkshelf_common::ValidationErrors;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    /// Failure reported by the server; the message is shown verbatim.
    #[error("{0}")]
    Api(String),
    /// Rejected locally before any request was sent.
    #[error("{0}")]
    Validation(#[from] ValidationErrors),
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Unexpected response ({status}): {body}")]
    UnexpectedResponse { status: u16, body: String },
    #[error("Invalid server address: {0}")]
    InvalidBaseUrl(String),
}

#[derive(Error, Debug)]
pub enum PreferencesError {
    #[error("Failed to read preferences at {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to write preferences at {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse preferences: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Failed to serialize preferences: {0}")]
    Serialize(#[from] toml::ser::Error),
}
