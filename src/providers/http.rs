use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use tracing::debug;

use crate::error::{ProviderError, ProviderResult};

use super::{ImageDownloader, ProviderResponse};

/// Build the shared HTTP client every provider sends through
pub(crate) fn build_client(user_agent: &str) -> ProviderResult<HttpClient> {
    HttpClient::builder()
        .user_agent(user_agent)
        .connect_timeout(Duration::from_secs(10))
        .build()
        .map_err(|e| ProviderError::Connection {
            provider: "http".to_string(),
            reason: e.to_string(),
        })
}

/// Map a transport failure into the provider taxonomy
pub(crate) fn classify(provider: &str, err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::Timeout { provider: provider.to_string() }
    } else if let Some(status) = err.status() {
        ProviderError::Status { provider: provider.to_string(), status: status.as_u16() }
    } else if err.is_decode() || err.is_body() {
        ProviderError::MalformedResponse { provider: provider.to_string(), reason: err.to_string() }
    } else {
        ProviderError::Connection { provider: provider.to_string(), reason: err.to_string() }
    }
}

/// GET `url` and collect the body regardless of status
pub(crate) async fn get_bytes(
    http: &HttpClient,
    provider: &str,
    url: &str,
    timeout: Duration,
) -> ProviderResult<ProviderResponse> {
    debug!("GET {} ({}s timeout)", url, timeout.as_secs());

    let response = http
        .get(url)
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| classify(provider, e))?;

    let status = response.status().as_u16();
    let bytes = response.bytes().await.map_err(|e| classify(provider, e))?;

    Ok(ProviderResponse { status, bytes: bytes.to_vec() })
}

/// Plain HTTP download of an explicit image URL
#[derive(Clone)]
pub struct HttpDownloader {
    http: HttpClient,
    timeout: Duration,
}

impl HttpDownloader {
    pub fn new(user_agent: &str, timeout: Duration) -> ProviderResult<Self> {
        Ok(Self { http: build_client(user_agent)?, timeout })
    }
}

#[async_trait]
impl ImageDownloader for HttpDownloader {
    async fn download(&self, url: &str) -> ProviderResult<ProviderResponse> {
        let parsed = url::Url::parse(url).map_err(|e| ProviderError::MalformedResponse {
            provider: "download".to_string(),
            reason: format!("invalid url {url}: {e}"),
        })?;
        get_bytes(&self.http, "download", parsed.as_str(), self.timeout).await
    }
}
