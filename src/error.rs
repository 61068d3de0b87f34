use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Index day must be between 0 and 10.")]
    DayOffsetOutOfRange(i64),
}

/// Failure talking to the provider. Always carries the requested url.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Error status: {status} for {url}")]
    Status { status: StatusCode, url: String },
    #[error("Connection error: {url}: {source}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Malformed response body from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    pub fn url(&self) -> &str {
        match self {
            FetchError::Status { url, .. }
            | FetchError::Connection { url, .. }
            | FetchError::Decode { url, .. } => url,
        }
    }
}
