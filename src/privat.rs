use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::error::FetchError;

/// Anything able to return the raw provider payload for a `DD.MM.YYYY` date.
#[allow(async_fn_in_trait)]
pub trait RateSource {
    async fn fetch(&self, date: &str) -> Result<Value, FetchError>;
}

/// PrivatBank archive endpoint client.
#[derive(Debug, Clone)]
pub struct PrivatBankApi {
    base_url: String,
}

impl PrivatBankApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn get_url(&self, date: &str) -> String {
        format!("{}?date={}", self.base_url, date)
    }
}

impl RateSource for PrivatBankApi {
    async fn fetch(&self, date: &str) -> Result<Value, FetchError> {
        let url = self.get_url(date);
        log::debug!("Requesting {url}");

        let client = Client::new();
        let text = load_json(&client, &url).await?;

        serde_json::from_str(&text).map_err(|source| FetchError::Decode { url, source })
    }
}

async fn load_json(client: &Client, url: &str) -> Result<String, FetchError> {
    let connection_error = |source| FetchError::Connection {
        url: url.to_string(),
        source,
    };

    let resp = client.get(url).send().await.map_err(connection_error)?;
    if resp.status() != StatusCode::OK {
        return Err(FetchError::Status {
            status: resp.status(),
            url: url.to_string(),
        });
    }

    resp.text().await.map_err(connection_error)
}
