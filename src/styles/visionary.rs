use tracing::debug;

use crate::{
    brief::DesignBrief,
    canvas::{Canvas, Rect},
    error::Result,
    filters,
    styles::{
        decor,
        traits::{BackgroundPlan, DepthTreatment, PinContent, StyleMetadata},
        PinStyle, StyleConfig, StyleContext,
    },
    typography::{FontFamily, TextBlock},
};

/// Surreal double exposure of a silhouette and a dreamscape
pub struct VisionaryStyle;

impl VisionaryStyle {
    pub fn new() -> Self {
        Self
    }
}

impl Default for VisionaryStyle {
    fn default() -> Self {
        Self::new()
    }
}

impl PinStyle for VisionaryStyle {
    fn name(&self) -> &str {
        "visionary"
    }

    fn description(&self) -> &str {
        "Surreal double exposure with a headline floating in the sky"
    }

    fn plan(&self, content: &PinContent<'_>, _brief: Option<&DesignBrief>, _config: &StyleConfig) -> BackgroundPlan {
        BackgroundPlan::new(format!(
            "a lone silhouette in profile contemplating \"{}\", high contrast against a bright sky",
            content.title.trim()
        ))
        .creative_style("surreal fine-art")
        .secondary(format!(
            "a dreamlike {} landscape at dusk, layered mist and glowing city lights",
            content.niche.trim()
        ))
    }

    fn compose(&self, canvas: &mut Canvas, context: &StyleContext<'_>) -> Result<()> {
        match context.secondary {
            Some(overlay) => {
                *canvas = Canvas::new(filters::blend_double_exposure(canvas.as_image(), overlay));
            }
            None => debug!("No secondary background; visionary renders single exposure"),
        }

        let (width, height) = (canvas.width(), canvas.height());
        let palette = context.palette;
        decor::top_fade(canvas, palette.background, 0.35, 0.8 * context.config.intensity);
        decor::vignette(canvas, palette.background, 0.75, 0.7 * context.config.intensity);

        let center = (width / 2) as i32;
        let headline = TextBlock::centered(context.headline(), (center, (height * 7 / 100) as i32), 90.0, width * 84 / 100, palette.text)
            .shadow(true);
        let next = context.typesetter.layout_text(canvas, &headline);

        canvas.fill_rect(Rect::centered(width, (next + 18).max(0) as u32, 160, 3), palette.accent, 0.9);

        let subtitle = TextBlock::centered(context.content.description, (center, next + 40), 38.0, width * 7 / 10, palette.glow())
            .family(FontFamily::Body)
            .shadow(true);
        context.typesetter.layout_text(canvas, &subtitle);
        Ok(())
    }

    fn metadata(&self) -> StyleMetadata {
        StyleMetadata {
            uses_brief: false,
            depth: DepthTreatment::DoubleExposure,
            call_to_action: None,
            optional_parameters: vec![],
        }
    }
}
