use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use url::Url;

use crate::{
    config::ProviderConfig,
    error::{ProviderError, ProviderResult},
};

use super::{http, ImageGenerator, ImageRequest, ProviderResponse};

const PROVIDER: &str = "pollinations";

/// Generative-image client for the free Pollinations endpoint
///
/// The endpoint takes the prompt as a path segment and size, model and seed
/// as query parameters. When rate limited it still answers 200 with a
/// placeholder picture.
#[derive(Clone)]
pub struct PollinationsClient {
    http: HttpClient,
    endpoint: String,
    timeout: Duration,
}

impl PollinationsClient {
    pub fn new(config: &ProviderConfig) -> ProviderResult<Self> {
        Ok(Self {
            http: http::build_client(&config.user_agent)?,
            endpoint: config.image_endpoint.clone(),
            timeout: Duration::from_secs(config.image_timeout_secs),
        })
    }

    fn request_url(&self, request: &ImageRequest<'_>) -> ProviderResult<Url> {
        build_url(&self.endpoint, request)
    }
}

fn build_url(endpoint: &str, request: &ImageRequest<'_>) -> ProviderResult<Url> {
    let mut url = Url::parse(endpoint).map_err(|e| ProviderError::MalformedResponse {
        provider: PROVIDER.to_string(),
        reason: format!("invalid endpoint {endpoint}: {e}"),
    })?;

    url.path_segments_mut()
        .map_err(|_| ProviderError::MalformedResponse {
            provider: PROVIDER.to_string(),
            reason: format!("endpoint cannot take a path: {endpoint}"),
        })?
        .pop_if_empty()
        .push(request.prompt);

    url.query_pairs_mut()
        .append_pair("width", &request.width.to_string())
        .append_pair("height", &request.height.to_string())
        .append_pair("model", request.model)
        .append_pair("seed", &request.seed.to_string())
        .append_pair("nologo", "true")
        .append_pair("enhance", "false");

    Ok(url)
}

#[async_trait]
impl ImageGenerator for PollinationsClient {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn generate(&self, request: &ImageRequest<'_>) -> ProviderResult<ProviderResponse> {
        let url = self.request_url(request)?;
        http::get_bytes(&self.http, PROVIDER, url.as_str(), self.timeout).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_is_path_encoded() {
        let request = ImageRequest {
            prompt: "gold coins / neon lights?",
            width: 1000,
            height: 1500,
            model: "flux",
            seed: 42,
        };
        let url = build_url("https://image.pollinations.ai/prompt", &request).unwrap();

        assert!(url.path().starts_with("/prompt/gold%20coins%20%2F%20neon%20lights%3F"));
        let query: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(query.contains(&("width".to_string(), "1000".to_string())));
        assert!(query.contains(&("model".to_string(), "flux".to_string())));
        assert!(query.contains(&("seed".to_string(), "42".to_string())));
    }

    #[test]
    fn test_trailing_slash_endpoint() {
        let request = ImageRequest { prompt: "sky", width: 10, height: 10, model: "turbo", seed: 1 };
        let url = build_url("https://example.com/prompt/", &request).unwrap();
        assert_eq!(url.path(), "/prompt/sky");
    }
}
