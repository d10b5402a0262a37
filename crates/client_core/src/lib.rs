use std::time::Instant;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use shared::{domain::User, endpoint::Endpoint, error::FetchError};
use tracing::{debug, info, warn};
use url::Url;

pub mod config;
pub mod decode;

pub use config::{load_settings, Settings, SettingsError};
pub use decode::decode_records;

/// Raw HTTP access used by both presentation variants.
///
/// Implementations return the response body of a successful GET. Anything
/// that is not a 2xx response must surface as an error.
#[async_trait]
pub trait ApiService: Send + Sync {
    async fn get(&self, url: &Url) -> Result<Vec<u8>, FetchError>;
}

/// reqwest-backed [`ApiService`]. Construct one and hand it to whoever needs it.
#[derive(Debug, Clone, Default)]
pub struct ApiClient {
    http: Client,
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            http: Client::new(),
        }
    }

    pub fn with_http(http: Client) -> Self {
        Self { http }
    }
}

fn transport_error(err: reqwest::Error) -> FetchError {
    if err.is_connect() {
        FetchError::Transport(format!("failed to connect: {err}"))
    } else if err.is_timeout() {
        FetchError::Transport(format!("request timed out: {err}"))
    } else {
        FetchError::Transport(err.to_string())
    }
}

#[async_trait]
impl ApiService for ApiClient {
    async fn get(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        debug!(url = %url, "sending GET");
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "non-success response");
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(transport_error)?;
        Ok(body.to_vec())
    }
}

/// Performs one GET against `url` and decodes the body as a JSON array of `T`.
pub async fn fetch_items<T: DeserializeOwned>(
    api: &dyn ApiService,
    url: &Url,
) -> Result<Vec<T>, FetchError> {
    let started = Instant::now();
    let body = api.get(url).await?;
    let items = decode_records::<T>(&body)?;
    info!(
        url = %url,
        count = items.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "fetched records"
    );
    Ok(items)
}

pub async fn fetch_users(
    api: &dyn ApiService,
    endpoint: Endpoint,
    base_url: &str,
) -> Result<Vec<User>, FetchError> {
    let url = endpoint.url(base_url)?;
    fetch_items::<User>(api, &url).await
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
