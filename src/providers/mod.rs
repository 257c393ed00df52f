//! # External Providers
//!
//! The composition engine consumes three kinds of services, each behind a
//! trait so the composition root decides which concrete client is used:
//!
//! - [`ImageGenerator`]: prompt-to-image service. Degraded responses can come
//!   back as HTTP 200 with a placeholder graphic, so callers must inspect pixels.
//! - [`StockImageSource`]: random stock photo, used once as a fallback.
//! - [`TextGenerator`]: free-form text completion for prompt refinement, hooks
//!   and design briefs.
//!
//! [`ImageDownloader`] fetches an explicit image URL (a product photo, say).

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use tracing::info;

use crate::{config::ProviderConfig, error::ProviderResult};

mod http;
pub mod gemini;
pub mod picsum;
pub mod pollinations;

#[cfg(test)]
pub(crate) mod mock;

pub use gemini::GeminiClient;
pub use http::HttpDownloader;
pub use picsum::PicsumClient;
pub use pollinations::PollinationsClient;

/// Raw answer of an image endpoint
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    pub status: u16,
    pub bytes: Vec<u8>,
}

impl ProviderResponse {
    pub fn ok(bytes: Vec<u8>) -> Self {
        Self { status: 200, bytes }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Parameters of one generation attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest<'a> {
    pub prompt: &'a str,
    pub width: u32,
    pub height: u32,
    pub model: &'a str,
    pub seed: u64,
}

#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Provider name used in logs and errors
    fn name(&self) -> &str;

    async fn generate(&self, request: &ImageRequest<'_>) -> ProviderResult<ProviderResponse>;
}

#[async_trait]
pub trait StockImageSource: Send + Sync {
    fn name(&self) -> &str;

    async fn random_image(&self, width: u32, height: u32, seed: u64) -> ProviderResult<ProviderResponse>;
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    fn name(&self) -> &str;

    async fn generate(&self, prompt: &str) -> ProviderResult<String>;
}

#[async_trait]
pub trait ImageDownloader: Send + Sync {
    async fn download(&self, url: &str) -> ProviderResult<ProviderResponse>;
}

/// The service clients handed to the engine; absent ones are skipped
#[derive(Clone, Default)]
pub struct Providers {
    pub text: Option<Arc<dyn TextGenerator>>,
    pub images: Option<Arc<dyn ImageGenerator>>,
    pub stock: Option<Arc<dyn StockImageSource>>,
    pub downloader: Option<Arc<dyn ImageDownloader>>,
}

impl Providers {
    /// No services at all: templates, default briefs and gradients only
    pub fn offline() -> Self {
        Self::default()
    }

    /// Real HTTP clients for every service
    ///
    /// The text service is left out when its API key is not set.
    pub fn from_config(config: &ProviderConfig) -> ProviderResult<Self> {
        let text = GeminiClient::from_env(config)?.map(|client| Arc::new(client) as Arc<dyn TextGenerator>);
        if text.is_none() {
            info!("{} not set; prompts, hooks and briefs use templates", config.text_api_key_env);
        }

        let downloader = HttpDownloader::new(&config.user_agent, Duration::from_secs(config.stock_timeout_secs))?;
        Ok(Self {
            text,
            images: Some(Arc::new(PollinationsClient::new(config)?)),
            stock: Some(Arc::new(PicsumClient::new(config)?)),
            downloader: Some(Arc::new(downloader)),
        })
    }
}
