//! Catalog transport: issues GETs against the remote catalog and
//! classifies failures. Holds no state beyond the HTTP client and
//! never retries; callers decide what a failure means.

use std::time::Duration;

use async_trait::async_trait;

pub const API_BASE: &str = "https://pokeapi.co/api/v2";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Transport-layer failure taxonomy.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected status {0}")]
    HttpStatus(u16),
    #[error("malformed response body: {0}")]
    Decode(String),
}

/// Seam between the assembly layer and the network, so tests can
/// substitute a canned catalog.
#[async_trait]
pub trait CatalogFetch: Send + Sync {
    async fn get(&self, url: &str) -> Result<serde_json::Value, FetchError>;
}

/// Live catalog client over reqwest.
pub struct CatalogClient {
    client: reqwest::Client,
}

impl CatalogClient {
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| FetchError::Network(err.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl CatalogFetch for CatalogClient {
    async fn get(&self, url: &str) -> Result<serde_json::Value, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| FetchError::Network(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        response
            .json()
            .await
            .map_err(|err| FetchError::Decode(err.to_string()))
    }
}
