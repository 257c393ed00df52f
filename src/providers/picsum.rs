use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;

use crate::{config::ProviderConfig, error::ProviderResult};

use super::{http, ProviderResponse, StockImageSource};

const PROVIDER: &str = "picsum";

/// Random stock photo client (Lorem Picsum)
#[derive(Clone)]
pub struct PicsumClient {
    http: HttpClient,
    endpoint: String,
    timeout: Duration,
}

impl PicsumClient {
    pub fn new(config: &ProviderConfig) -> ProviderResult<Self> {
        Ok(Self {
            http: http::build_client(&config.user_agent)?,
            endpoint: config.stock_endpoint.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(config.stock_timeout_secs),
        })
    }

    fn request_url(&self, width: u32, height: u32, seed: u64) -> String {
        format!("{}/{}/{}?random={}", self.endpoint, width, height, seed)
    }
}

#[async_trait]
impl StockImageSource for PicsumClient {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn random_image(&self, width: u32, height: u32, seed: u64) -> ProviderResult<ProviderResponse> {
        let url = self.request_url(width, height, seed);
        http::get_bytes(&self.http, PROVIDER, &url, self.timeout).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_url() {
        let mut config = ProviderConfig::default();
        config.stock_endpoint = "https://picsum.photos/".to_string();
        let client = PicsumClient::new(&config).unwrap();

        assert_eq!(client.request_url(1000, 1500, 7), "https://picsum.photos/1000/1500?random=7");
    }
}
