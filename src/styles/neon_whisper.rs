use crate::{
    brief::DesignBrief,
    canvas::{Canvas, Rect},
    error::Result,
    palette::Color,
    styles::{
        decor,
        traits::{BackgroundPlan, DepthTreatment, PinContent, StyleMetadata},
        PinStyle, StyleConfig, StyleContext,
    },
    typography::{FontFamily, TextBlock},
};

/// Horizon line as a fraction of the canvas height
const HORIZON: f32 = 0.58;

/// Night scene mirrored into a wet reflection under a neon headline
pub struct NeonWhisperStyle;

impl NeonWhisperStyle {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NeonWhisperStyle {
    fn default() -> Self {
        Self::new()
    }
}

/// Mirror the rows above `horizon` below it, fading out toward the bottom
pub(crate) fn reflect(canvas: &mut Canvas, horizon: u32, strength: f32) {
    let height = canvas.height();
    let span = height.saturating_sub(horizon).max(1) as f32;

    for y in horizon..height {
        let distance = y - horizon;
        let Some(source) = horizon.checked_sub(distance + 1) else {
            break;
        };
        let alpha = strength * (1.0 - distance as f32 / span);
        for x in 0..canvas.width() {
            let mirrored = canvas.get_pixel(x, source).darken(0.3);
            canvas.blend_pixel(x as i64, y as i64, mirrored, alpha);
        }
    }
}

impl PinStyle for NeonWhisperStyle {
    fn name(&self) -> &str {
        "neon_whisper"
    }

    fn description(&self) -> &str {
        "Neon-lit night scene with a mirrored reflection and glowing headline"
    }

    fn plan(&self, content: &PinContent<'_>, _brief: Option<&DesignBrief>, _config: &StyleConfig) -> BackgroundPlan {
        BackgroundPlan::new(format!(
            "a rain-soaked midnight street glowing with neon signs, evoking \"{}\"",
            content.title.trim()
        ))
        .creative_style("cinematic neon noir")
    }

    fn compose(&self, canvas: &mut Canvas, context: &StyleContext<'_>) -> Result<()> {
        let (width, height) = (canvas.width(), canvas.height());
        let palette = context.palette;
        let glow = palette.glow();
        let horizon = (height as f32 * HORIZON) as u32;

        decor::top_fade(canvas, Color::BLACK, 0.5, 0.6 * context.config.intensity);
        if context.config.get_bool_or("reflection", true) {
            reflect(canvas, horizon, 0.85);
        }
        decor::vignette(canvas, Color::BLACK, 0.7, 0.8 * context.config.intensity);

        for offset in 1..=12u32 {
            let alpha = 0.35 * (1.0 - offset as f32 / 13.0);
            canvas.fill_rect(Rect::new(0, horizon.saturating_sub(offset), width, 1), glow, alpha);
            canvas.fill_rect(Rect::new(0, (horizon + offset).min(height.saturating_sub(1)), width, 1), glow, alpha);
        }
        canvas.fill_rect(Rect::new(0, horizon.saturating_sub(1), width, 3), glow, 0.95);

        let center = (width / 2) as i32;
        let headline = TextBlock::centered(context.headline(), (center, (height * 18 / 100) as i32), 92.0, width * 82 / 100, Color::WHITE);
        let next = decor::neon_text(canvas, context.typesetter, &headline, glow, 10.0);

        let subtitle = TextBlock::centered(context.content.description, (center, next + 30), 36.0, width * 7 / 10, glow)
            .family(FontFamily::Body)
            .shadow(true);
        context.typesetter.layout_text(canvas, &subtitle);
        Ok(())
    }

    fn metadata(&self) -> StyleMetadata {
        StyleMetadata {
            uses_brief: false,
            depth: DepthTreatment::Vignette,
            call_to_action: None,
            optional_parameters: vec![("reflection".to_string(), "Mirror the scene below the horizon".to_string())],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_reflection_mirrors_rows_above_horizon() {
        let image = RgbImage::from_fn(4, 20, |_, y| if y == 9 { Rgb([200, 200, 200]) } else { Rgb([0, 0, 0]) });
        let mut canvas = Canvas::new(image);
        reflect(&mut canvas, 10, 1.0);

        // Row 9 mirrors to row 10 at full strength
        assert!(canvas.get_pixel(0, 10).luma() > 100);
        assert_eq!(canvas.get_pixel(0, 15), Color::BLACK);
        assert_eq!(canvas.get_pixel(0, 9), Color::rgb(200, 200, 200));
    }
}
