use crate::{
    brief::DesignBrief,
    canvas::{Canvas, Rect},
    error::Result,
    styles::{
        decor,
        traits::{BackgroundPlan, DepthTreatment, PinContent, StyleMetadata},
        PinStyle, StyleConfig, StyleContext,
    },
    typography::{Align, FontFamily, TextBlock},
};

/// Where the photo ends and the solid text block begins
const SPLIT: f32 = 0.62;

/// Full-bleed lifestyle photo fading into a solid block with the headline
pub struct AspirationStyle;

impl AspirationStyle {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AspirationStyle {
    fn default() -> Self {
        Self::new()
    }
}

impl PinStyle for AspirationStyle {
    fn name(&self) -> &str {
        "aspiration"
    }

    fn description(&self) -> &str {
        "Aspirational lifestyle photo split above a solid headline block"
    }

    fn plan(&self, content: &PinContent<'_>, _brief: Option<&DesignBrief>, _config: &StyleConfig) -> BackgroundPlan {
        BackgroundPlan::new(format!(
            "an aspirational dream lifestyle moment that embodies \"{}\"",
            content.title.trim()
        ))
        .creative_style("luxury lifestyle")
    }

    fn compose(&self, canvas: &mut Canvas, context: &StyleContext<'_>) -> Result<()> {
        let (width, height) = (canvas.width(), canvas.height());
        let palette = context.palette;
        let split = (height as f32 * SPLIT) as u32;

        decor::top_fade(canvas, palette.background, 0.12, 0.4 * context.config.intensity);
        decor::vignette(canvas, palette.background, SPLIT - 0.12, 1.0);
        canvas.fill_rect(Rect::new(0, split, width, height - split), palette.background, 1.0);

        let left = (width * 8 / 100) as i32;
        let text_width = width * 84 / 100;
        canvas.fill_rect(Rect::new(left as u32, split + 10, 70, 6), palette.accent, 1.0);

        let headline = TextBlock::centered(context.headline(), (left, split as i32 + 40), 78.0, text_width, palette.text)
            .align(Align::Left);
        let next = context.typesetter.layout_text(canvas, &headline);

        let subtitle = TextBlock::centered(context.content.description, (left, next + 20), 36.0, text_width, palette.accent)
            .family(FontFamily::Body)
            .align(Align::Left);
        let next = context.typesetter.layout_text(canvas, &subtitle);

        let label = context.config.get_string_or("cta", "SEE HOW");
        let top = (next + 40).max(0) as u32;
        if top + 100 < height {
            decor::call_to_action(canvas, context.typesetter, label, top, palette.accent, decor::contrasting(palette.accent));
        }
        Ok(())
    }

    fn metadata(&self) -> StyleMetadata {
        StyleMetadata {
            uses_brief: false,
            depth: DepthTreatment::Vignette,
            call_to_action: Some("SEE HOW"),
            optional_parameters: vec![("cta".to_string(), "Button label".to_string())],
        }
    }
}
