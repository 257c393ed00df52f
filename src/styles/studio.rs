use crate::{
    brief::Tone,
    canvas::{Canvas, Rect},
    error::Result,
    styles::{
        decor::{self, GlassPanel},
        traits::{DepthTreatment, StyleMetadata},
        PinStyle, StyleContext,
    },
    typography::{FontFamily, TextBlock},
};

/// Brief-driven layout: the design brief picks the photo, palette, headline and button
pub struct StudioStyle;

impl StudioStyle {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StudioStyle {
    fn default() -> Self {
        Self::new()
    }
}

/// Glass tint strength per tone
fn tint_for(tone: Tone) -> f32 {
    match tone {
        Tone::Minimal => 0.25,
        Tone::Fun => 0.3,
        Tone::Elegant => 0.4,
        Tone::Professional => 0.45,
        Tone::Bold => 0.55,
    }
}

fn cta_for(tone: Tone) -> &'static str {
    match tone {
        Tone::Fun => "TRY IT NOW",
        Tone::Elegant => "DISCOVER MORE",
        Tone::Bold => "GET IT NOW",
        Tone::Minimal => "LEARN MORE",
        Tone::Professional => "READ THE GUIDE",
    }
}

impl PinStyle for StudioStyle {
    fn name(&self) -> &str {
        "studio"
    }

    fn description(&self) -> &str {
        "Art-directed pin built from a generated design brief, with SEO sidecar"
    }

    fn compose(&self, canvas: &mut Canvas, context: &StyleContext<'_>) -> Result<()> {
        let (width, height) = (canvas.width(), canvas.height());
        let palette = context.palette;
        let tone = context.brief.map(|b| b.tone).unwrap_or(Tone::Professional);

        decor::vignette(canvas, palette.background, 0.5, 0.9 * context.config.intensity);

        let center = (width / 2) as i32;
        let label = context.content.niche.to_uppercase();
        let kicker = TextBlock::centered(&label, (center, (height * 6 / 100) as i32), 30.0, width * 8 / 10, palette.accent)
            .family(FontFamily::Body)
            .shadow(true);
        context.typesetter.layout_text(canvas, &kicker);

        let panel = Rect::new(width * 6 / 100, height * 55 / 100, width * 88 / 100, height * 30 / 100);
        GlassPanel::new(panel, palette.background).tint_alpha(tint_for(tone)).draw(canvas);

        let headline = TextBlock::centered(context.headline(), (center, panel.y as i32 + 50), 84.0, panel.width.saturating_sub(90), palette.text)
            .shadow(true);
        let next = context.typesetter.layout_text(canvas, &headline);

        let subtitle = TextBlock::centered(context.content.description, (center, next + 24), 36.0, panel.width.saturating_sub(110), palette.glow())
            .family(FontFamily::Body);
        context.typesetter.layout_text(canvas, &subtitle);

        let cta = context.config.get_string_or("cta", cta_for(tone));
        decor::call_to_action(canvas, context.typesetter, cta, panel.bottom() + 30, palette.accent, decor::contrasting(palette.accent));
        Ok(())
    }

    fn metadata(&self) -> StyleMetadata {
        StyleMetadata {
            uses_brief: true,
            depth: DepthTreatment::GlassPanel,
            call_to_action: Some(cta_for(Tone::Professional)),
            optional_parameters: vec![("cta".to_string(), "Button label overriding the tone default".to_string())],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_controls_button_and_tint() {
        assert_eq!(cta_for(Tone::Fun), "TRY IT NOW");
        assert!(tint_for(Tone::Bold) > tint_for(Tone::Minimal));
    }

    #[test]
    fn test_studio_needs_brief() {
        assert!(StudioStyle::new().uses_brief());
    }
}
