//! # Background Acquisition
//!
//! Produces the background image of a pin through a chain of fallbacks:
//!
//! 1. Up to `max_retries` generative attempts, each with the next model in the
//!    rotation and a fresh seed. Responses are decoded, size-checked and run
//!    through the [`PlaceholderDetector`]; the first good image wins.
//! 2. One stock-photo request.
//! 3. A procedural gradient in the caller's brand colors.
//!
//! [`BackgroundAcquirer::acquire`] never fails. Retries are strictly
//! sequential so a struggling provider is not hit with parallel requests.

use std::sync::Arc;

use image::RgbImage;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::{
    config::AcquisitionConfig,
    error::{AcquisitionError, CompositorError, ProviderError, Result},
    palette::Color,
    providers::{ImageDownloader, ImageGenerator, ImageRequest, ProviderResponse, StockImageSource},
};

mod gradient;
mod placeholder;

pub use gradient::vertical_gradient;
pub use placeholder::PlaceholderDetector;

/// What to acquire
#[derive(Debug, Clone)]
pub struct BackgroundRequest<'a> {
    pub prompt: &'a str,
    pub width: u32,
    pub height: u32,
    /// Gradient colors used when every provider fails
    pub top_color: Color,
    pub bottom_color: Color,
}

/// Where an acquired image came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackgroundSource {
    Generated { model: String, attempt: u32 },
    Stock,
    Download,
    Gradient,
}

/// A decoded background and its provenance
///
/// The image keeps the provider's native size; the compositor fits it to the canvas.
#[derive(Debug, Clone)]
pub struct AcquiredImage {
    pub image: RgbImage,
    pub source: BackgroundSource,
}

impl AcquiredImage {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

pub struct BackgroundAcquirer {
    generator: Option<Arc<dyn ImageGenerator>>,
    stock: Option<Arc<dyn StockImageSource>>,
    downloader: Option<Arc<dyn ImageDownloader>>,
    models: Vec<String>,
    config: AcquisitionConfig,
    detector: PlaceholderDetector,
}

impl BackgroundAcquirer {
    /// Create an acquirer with no providers; it will only ever draw gradients
    pub fn new(config: &AcquisitionConfig, models: Vec<String>) -> Self {
        Self {
            generator: None,
            stock: None,
            downloader: None,
            models,
            config: config.clone(),
            detector: PlaceholderDetector::new(config.placeholder.clone()),
        }
    }

    pub fn with_generator(mut self, generator: Arc<dyn ImageGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn with_stock(mut self, stock: Arc<dyn StockImageSource>) -> Self {
        self.stock = Some(stock);
        self
    }

    pub fn with_downloader(mut self, downloader: Arc<dyn ImageDownloader>) -> Self {
        self.downloader = Some(downloader);
        self
    }

    /// Acquire a background using the configured retry budget
    pub async fn acquire(&self, request: &BackgroundRequest<'_>) -> AcquiredImage {
        self.acquire_with_retries(request, self.config.max_retries).await
    }

    /// Acquire a background, trying the generator at most `max_retries` times
    pub async fn acquire_with_retries(&self, request: &BackgroundRequest<'_>, max_retries: u32) -> AcquiredImage {
        if let Some(generator) = &self.generator {
            for attempt in 0..max_retries {
                match self.try_generate(generator.as_ref(), request, attempt).await {
                    Ok(acquired) => return acquired,
                    Err(e) => warn!(
                        "Generation attempt {}/{} via {} rejected: {}",
                        attempt + 1, max_retries, generator.name(), e
                    ),
                }
            }
            warn!("{}", AcquisitionError::Exhausted { attempts: max_retries });
        }

        if let Some(stock) = &self.stock {
            match self.try_stock(stock.as_ref(), request).await {
                Ok(image) => {
                    info!("Using stock photo from {} ({}x{})", stock.name(), image.width(), image.height());
                    return AcquiredImage { image, source: BackgroundSource::Stock };
                }
                Err(e) => warn!("Stock fallback via {} failed: {}", stock.name(), e),
            }
        }

        info!("Falling back to procedural gradient {} -> {}", request.top_color, request.bottom_color);
        AcquiredImage {
            image: vertical_gradient(request.width, request.height, request.top_color, request.bottom_color),
            source: BackgroundSource::Gradient,
        }
    }

    /// Use the image at `url` when it downloads cleanly, otherwise run the normal chain
    pub async fn acquire_from_url(&self, url: &str, request: &BackgroundRequest<'_>) -> AcquiredImage {
        if let Some(downloader) = &self.downloader {
            let result = match downloader.download(url).await {
                Ok(response) => self.validate("download", response, true),
                Err(e) => Err(e.into()),
            };

            match result {
                Ok(image) => {
                    info!("Using supplied base image {} ({}x{})", url, image.width(), image.height());
                    return AcquiredImage { image, source: BackgroundSource::Download };
                }
                Err(e) => warn!("Base image {} unusable, generating instead: {}", url, e),
            }
        }

        self.acquire(request).await
    }

    async fn try_generate(
        &self,
        generator: &dyn ImageGenerator,
        request: &BackgroundRequest<'_>,
        attempt: u32,
    ) -> Result<AcquiredImage> {
        let model = self.model_for(attempt);
        let seed: u64 = rand::thread_rng().gen_range(0..1_000_000_000);

        debug!("Attempt {} with model {} seed {}", attempt + 1, model, seed);
        let response = generator
            .generate(&ImageRequest {
                prompt: request.prompt,
                width: request.width,
                height: request.height,
                model,
                seed,
            })
            .await?;

        let image = self.validate(generator.name(), response, true)?;
        info!("Generated background with {} on attempt {}", model, attempt + 1);
        Ok(AcquiredImage {
            image,
            source: BackgroundSource::Generated { model: model.to_string(), attempt },
        })
    }

    async fn try_stock(&self, stock: &dyn StockImageSource, request: &BackgroundRequest<'_>) -> Result<RgbImage> {
        let seed: u64 = rand::thread_rng().gen_range(0..1_000_000);
        let response = stock.random_image(request.width, request.height, seed).await?;
        self.validate(stock.name(), response, false)
    }

    fn model_for(&self, attempt: u32) -> &str {
        if self.models.is_empty() {
            return "flux";
        }
        &self.models[attempt as usize % self.models.len()]
    }

    /// Turn a raw response into an image, or say why it is unusable
    fn validate(&self, provider: &str, response: ProviderResponse, check_placeholder: bool) -> Result<RgbImage> {
        if !response.is_success() {
            return Err(ProviderError::Status { provider: provider.to_string(), status: response.status }.into());
        }

        let image = image::load_from_memory(&response.bytes)
            .map_err(|e| AcquisitionError::DecodeFailed { reason: e.to_string() })?
            .to_rgb8();

        let min = self.config.min_dimension;
        if image.width() < min || image.height() < min {
            return Err(AcquisitionError::TooSmall { width: image.width(), height: image.height() }.into());
        }

        if check_placeholder {
            self.detector.check(&image).map_err(CompositorError::from)?;
        }

        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::mock::{image_ok, status, timeout, ScriptedImages};
    use image::Rgb;

    fn request(prompt: &str) -> BackgroundRequest<'_> {
        BackgroundRequest {
            prompt,
            width: 1000,
            height: 1500,
            top_color: Color::rgb(15, 23, 42),
            bottom_color: Color::rgb(56, 189, 248),
        }
    }

    fn acquirer() -> BackgroundAcquirer {
        BackgroundAcquirer::new(&AcquisitionConfig::default(), vec!["flux".into(), "turbo".into()])
    }

    fn photo(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| Rgb([(x % 200) as u8, (y % 120) as u8, 140]))
    }

    #[tokio::test]
    async fn test_first_success_wins() {
        let generator = Arc::new(ScriptedImages::new(vec![image_ok(&photo(400, 600)), image_ok(&photo(10, 10))]));
        let acquirer = acquirer().with_generator(generator.clone());

        let acquired = acquirer.acquire(&request("city at dusk")).await;
        assert_eq!(acquired.source, BackgroundSource::Generated { model: "flux".into(), attempt: 0 });
        assert_eq!(acquired.image.dimensions(), (400, 600));
        assert_eq!(generator.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_placeholder_triggers_retry_with_next_model() {
        let placeholder = RgbImage::from_pixel(1000, 1500, Rgb([250, 220, 120]));
        let generator = Arc::new(ScriptedImages::new(vec![image_ok(&placeholder), image_ok(&photo(500, 750))]));
        let acquirer = acquirer().with_generator(generator.clone());

        let acquired = acquirer.acquire(&request("ocean")).await;
        assert_eq!(acquired.source, BackgroundSource::Generated { model: "turbo".into(), attempt: 1 });

        let calls = generator.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].0, "flux");
        assert_eq!(calls[1].0, "turbo");
    }

    #[tokio::test]
    async fn test_stock_used_after_server_errors() {
        let generator = Arc::new(ScriptedImages::new(vec![status(500), status(500)]));
        let stock_image = photo(800, 1200);
        let stock = Arc::new(ScriptedImages::new(vec![image_ok(&stock_image)]));
        let acquirer = acquirer().with_generator(generator.clone()).with_stock(stock);

        let acquired = acquirer.acquire(&request("AI Automation")).await;
        assert_eq!(acquired.source, BackgroundSource::Stock);
        assert_eq!(acquired.image, stock_image);
        assert_eq!(generator.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_gradient_when_everything_fails() {
        let generator = Arc::new(ScriptedImages::new(vec![timeout("gen"), status(503)]));
        let stock = Arc::new(ScriptedImages::new(vec![status(502)]));
        let acquirer = acquirer().with_generator(generator).with_stock(stock);

        let acquired = acquirer.acquire(&request("anything")).await;
        assert_eq!(acquired.source, BackgroundSource::Gradient);
        assert_eq!(acquired.image.dimensions(), (1000, 1500));
        assert_eq!(acquired.image.get_pixel(0, 0).0, [15, 23, 42]);
    }

    #[tokio::test]
    async fn test_no_providers_yields_gradient() {
        let acquired = acquirer().acquire(&request("offline")).await;
        assert_eq!(acquired.source, BackgroundSource::Gradient);
        assert_eq!((acquired.width(), acquired.height()), (1000, 1500));
    }

    #[tokio::test]
    async fn test_undecodable_and_tiny_images_rejected() {
        let generator = Arc::new(ScriptedImages::new(vec![
            Ok(ProviderResponse::ok(b"<html>slow down</html>".to_vec())),
            image_ok(&photo(20, 20)),
        ]));
        let acquirer = acquirer().with_generator(generator);

        let acquired = acquirer.acquire(&request("forest")).await;
        assert_eq!(acquired.source, BackgroundSource::Gradient);
    }

    #[tokio::test]
    async fn test_retry_budget_is_respected() {
        let generator = Arc::new(ScriptedImages::new(vec![status(500), status(500), status(500), status(500)]));
        let acquirer = acquirer().with_generator(generator.clone());

        acquirer.acquire_with_retries(&request("x"), 3).await;
        assert_eq!(generator.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_base_url_download_preferred() {
        let downloader = Arc::new(ScriptedImages::new(vec![image_ok(&photo(640, 960))]));
        let generator = Arc::new(ScriptedImages::new(vec![]));
        let acquirer = acquirer().with_generator(generator.clone()).with_downloader(downloader);

        let acquired = acquirer.acquire_from_url("https://cdn.example.com/p.jpg", &request("x")).await;
        assert_eq!(acquired.source, BackgroundSource::Download);
        assert!(generator.calls().is_empty());
    }

    #[tokio::test]
    async fn test_failed_download_falls_through() {
        let downloader = Arc::new(ScriptedImages::new(vec![status(404)]));
        let generator = Arc::new(ScriptedImages::new(vec![image_ok(&photo(300, 450))]));
        let acquirer = acquirer().with_generator(generator).with_downloader(downloader);

        let acquired = acquirer.acquire_from_url("https://cdn.example.com/gone.jpg", &request("x")).await;
        assert!(matches!(acquired.source, BackgroundSource::Generated { .. }));
    }
}
