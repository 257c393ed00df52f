use crate::{
    canvas::{Canvas, Rect},
    error::Result,
    styles::{
        decor::{self, GlassPanel},
        traits::{DepthTreatment, StyleMetadata},
        PinStyle, StyleContext,
    },
    typography::{FontFamily, TextBlock},
};

/// Glassmorphic card: a frosted panel carrying headline, subtitle and a button
pub struct DesignerStyle;

impl DesignerStyle {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DesignerStyle {
    fn default() -> Self {
        Self::new()
    }
}

impl PinStyle for DesignerStyle {
    fn name(&self) -> &str {
        "designer"
    }

    fn description(&self) -> &str {
        "Frosted glass card centered over a softly vignetted background"
    }

    fn compose(&self, canvas: &mut Canvas, context: &StyleContext<'_>) -> Result<()> {
        let (width, height) = (canvas.width(), canvas.height());
        let palette = context.palette;
        let intensity = context.config.intensity;

        decor::top_fade(canvas, palette.background, 0.2, 0.5 * intensity);
        decor::vignette(canvas, palette.background, 0.45, 0.85 * intensity);

        let panel = Rect::new(width * 8 / 100, height * 30 / 100, width * 84 / 100, height * 42 / 100);
        GlassPanel::new(panel, palette.background)
            .tint_alpha(context.config.get_f32_or("panel_opacity", 0.45))
            .border(palette.accent, 0.6)
            .draw(canvas);

        canvas.fill_rounded_rect(Rect::centered(width, panel.y + 40, 120, 8), 4, palette.accent, 1.0);

        let center = (width / 2) as i32;
        let headline = TextBlock::centered(context.headline(), (center, panel.y as i32 + 80), 88.0, panel.width.saturating_sub(100), palette.text)
            .shadow(true);
        let next = context.typesetter.layout_text(canvas, &headline);

        let subtitle = TextBlock::centered(context.content.description, (center, next + 30), 40.0, panel.width.saturating_sub(120), palette.glow())
            .family(FontFamily::Body);
        context.typesetter.layout_text(canvas, &subtitle);

        let label = context.config.get_string_or("cta", "LEARN MORE");
        decor::call_to_action(canvas, context.typesetter, label, panel.bottom() + 60, palette.accent, decor::contrasting(palette.accent));
        Ok(())
    }

    fn metadata(&self) -> StyleMetadata {
        StyleMetadata {
            uses_brief: false,
            depth: DepthTreatment::GlassPanel,
            call_to_action: Some("LEARN MORE"),
            optional_parameters: vec![
                ("panel_opacity".to_string(), "Tint strength of the glass card (0.0-1.0)".to_string()),
                ("cta".to_string(), "Button label".to_string()),
            ],
        }
    }
}
