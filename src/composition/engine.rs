use std::io::Cursor;
use std::path::{Path, PathBuf};

use chrono::Utc;
use image::{
    codecs::{jpeg::JpegEncoder, png::PngEncoder},
    ColorType, ImageEncoder, RgbImage,
};
use tracing::{debug, info, warn};

use crate::{
    acquisition::{BackgroundAcquirer, BackgroundRequest},
    brief::{BriefGenerator, DesignBrief},
    canvas::{Canvas, PIN_HEIGHT, PIN_WIDTH},
    config::Config,
    error::{Result, StyleError},
    filters,
    palette::{self, Palette},
    prompt::PromptSynthesizer,
    providers::Providers,
    styles::{PinContent, PinStyle, StyleContext, StyleRegistry},
    typography::Typesetter,
};

use super::sidecar::{sidecar_path, SeoSidecar};

/// Everything needed to render one pin
#[derive(Debug, Clone, PartialEq)]
pub struct PinRequest {
    pub title: String,
    pub description: String,
    pub output_path: PathBuf,
    pub niche: String,
    pub style: String,
    pub aesthetic: Option<String>,
    pub base_image_url: Option<String>,
}

impl PinRequest {
    pub fn new(title: impl Into<String>, description: impl Into<String>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            output_path: output_path.into(),
            niche: "Wealth".to_string(),
            style: crate::styles::DEFAULT_STYLE.to_string(),
            aesthetic: None,
            base_image_url: None,
        }
    }

    pub fn niche(mut self, niche: impl Into<String>) -> Self {
        self.niche = niche.into();
        self
    }

    pub fn style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    pub fn aesthetic(mut self, aesthetic: impl Into<String>) -> Self {
        self.aesthetic = Some(aesthetic.into());
        self
    }

    pub fn base_image_url(mut self, url: impl Into<String>) -> Self {
        self.base_image_url = Some(url.into());
        self
    }
}

/// Composition root that renders pins
///
/// The pipeline for every render:
/// 1. Design brief - only for brief-driven styles
/// 2. Background plan and prompt synthesis
/// 3. Background acquisition (plus a second image for double exposures)
/// 4. Canvas fitting and editorial filters
/// 5. Style composition
/// 6. Export, plus the SEO sidecar for brief-driven styles
///
/// Each render builds its own canvas and brief; the engine holds no
/// per-render state and can serve independent renders concurrently.
pub struct PinEngine {
    config: Config,
    prompts: PromptSynthesizer,
    briefs: BriefGenerator,
    acquirer: BackgroundAcquirer,
    typesetter: Typesetter,
    registry: StyleRegistry,
}

impl PinEngine {
    /// Create an engine from configuration and injected service clients
    pub fn new(config: Config, providers: Providers) -> Result<Self> {
        config.validate()?;
        let typesetter = Typesetter::load(&config.typography);
        Ok(Self::assemble(config, providers, typesetter))
    }

    /// Create an engine with the built-in bitmap font, skipping font discovery
    pub fn with_builtin_font(config: Config, providers: Providers) -> Result<Self> {
        config.validate()?;
        let typesetter = Typesetter::builtin(&config.typography);
        Ok(Self::assemble(config, providers, typesetter))
    }

    fn assemble(config: Config, providers: Providers, typesetter: Typesetter) -> Self {
        let mut acquirer = BackgroundAcquirer::new(&config.acquisition, config.providers.image_models.clone());
        if let Some(images) = providers.images {
            acquirer = acquirer.with_generator(images);
        }
        if let Some(stock) = providers.stock {
            acquirer = acquirer.with_stock(stock);
        }
        if let Some(downloader) = providers.downloader {
            acquirer = acquirer.with_downloader(downloader);
        }

        Self {
            prompts: PromptSynthesizer::new(providers.text.clone()),
            briefs: BriefGenerator::new(providers.text),
            acquirer,
            typesetter,
            registry: StyleRegistry::new(),
            config,
        }
    }

    pub fn registry(&self) -> &StyleRegistry {
        &self.registry
    }

    pub fn prompts(&self) -> &PromptSynthesizer {
        &self.prompts
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Render one pin and return the path it was written to
    ///
    /// Provider failures never surface here; the only errors are local
    /// export failures.
    pub async fn render_pin(&self, request: &PinRequest) -> Result<PathBuf> {
        let style = self.registry.resolve(&request.style);
        style.validate_config(&self.config.style)?;

        info!("🎨 Rendering '{}' pin: {}", style.name(), request.title);
        let content = PinContent {
            title: &request.title,
            description: &request.description,
            niche: &request.niche,
            aesthetic: request.aesthetic.as_deref(),
        };

        // Step 1: design brief
        let brief = if style.uses_brief() {
            Some(self.briefs.conceptualize(&request.title, &request.description, &request.niche).await)
        } else {
            None
        };
        let palette = match &brief {
            Some(brief) => brief.resolved_palette(),
            None => palette::resolve(&request.niche, request.aesthetic.as_deref()),
        };

        // Steps 2-3: plan, prompt, backgrounds
        let plan = style.plan(&content, brief.as_ref(), &self.config.style);
        let background = self
            .background(&content, &plan.subject, plan.creative_style.as_deref(), palette, request.base_image_url.as_deref())
            .await;
        let secondary = match &plan.secondary_subject {
            Some(subject) => {
                debug!("Acquiring secondary background: {}", subject);
                Some(self.background(&content, subject, plan.creative_style.as_deref(), palette, None).await)
            }
            None => None,
        };

        // Step 4: canvas
        let fitted = Canvas::cover(&background, PIN_WIDTH, PIN_HEIGHT);
        let mut canvas = Canvas::new(filters::apply_filters(fitted.as_image()));

        // Step 5: composition
        let context = StyleContext {
            content,
            brief: brief.as_ref(),
            palette,
            typesetter: &self.typesetter,
            config: &self.config.style,
            secondary: secondary.as_ref(),
        };
        self.compose(style.as_ref(), &mut canvas, &context)?;

        // Step 6: export
        let output = request.output_path.clone();
        self.export(canvas.as_image(), &output).await?;
        if let Some(brief) = &brief {
            self.write_sidecar(&request.title, brief, &output).await?;
        }

        info!("✅ Pin saved to {}", output.display());
        Ok(output)
    }

    async fn background(
        &self,
        content: &PinContent<'_>,
        subject: &str,
        creative_style: Option<&str>,
        palette: Palette,
        base_image_url: Option<&str>,
    ) -> RgbImage {
        let prompt = self
            .prompts
            .synthesize(content.niche, subject, content.aesthetic, creative_style)
            .await;

        let request = BackgroundRequest {
            prompt: &prompt,
            width: PIN_WIDTH,
            height: PIN_HEIGHT,
            top_color: palette.background,
            bottom_color: palette.accent.darken(0.4),
        };

        let acquired = match base_image_url {
            Some(url) => self.acquirer.acquire_from_url(url, &request).await,
            None => self.acquirer.acquire(&request).await,
        };
        debug!("Background from {:?} ({}x{})", acquired.source, acquired.width(), acquired.height());
        acquired.image
    }

    fn compose(&self, style: &dyn PinStyle, canvas: &mut Canvas, context: &StyleContext<'_>) -> Result<()> {
        style.compose(canvas, context).map_err(|e| {
            warn!("Style {} failed: {}", style.name(), e);
            StyleError::ComposeFailed {
                style: style.name().to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Encode by extension (JPEG for .jpg/.jpeg, PNG otherwise) and write, creating parent directories
    async fn export(&self, image: &RgbImage, path: &Path) -> Result<()> {
        let export_failed = |reason: String| StyleError::ExportFailed {
            path: path.display().to_string(),
            reason,
        };

        let bytes = encode(image, path, self.config.output.jpeg_quality).map_err(|e| export_failed(e.to_string()))?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| export_failed(e.to_string()))?;
        }
        tokio::fs::write(path, bytes)
            .await
            .map_err(|e| export_failed(e.to_string()))?;
        Ok(())
    }

    async fn write_sidecar(&self, title: &str, brief: &DesignBrief, output: &Path) -> Result<()> {
        let path = sidecar_path(output);
        let record = SeoSidecar::from_brief(title, brief, Utc::now());
        tokio::fs::write(&path, record.render()).await?;
        debug!("SEO sidecar written to {}", path.display());
        Ok(())
    }
}

fn encode(image: &RgbImage, path: &Path, jpeg_quality: u8) -> image::ImageResult<Vec<u8>> {
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    let mut bytes = Cursor::new(Vec::new());
    match extension.as_str() {
        "jpg" | "jpeg" => {
            JpegEncoder::new_with_quality(&mut bytes, jpeg_quality).write_image(
                image.as_raw(),
                image.width(),
                image.height(),
                ColorType::Rgb8,
            )?;
        }
        _ => {
            PngEncoder::new(&mut bytes).write_image(image.as_raw(), image.width(), image.height(), ColorType::Rgb8)?;
        }
    }
    Ok(bytes.into_inner())
}
