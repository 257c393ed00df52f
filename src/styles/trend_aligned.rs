use crate::{
    brief::DesignBrief,
    canvas::{Canvas, Rect},
    error::Result,
    palette,
    styles::{
        decor,
        traits::{BackgroundPlan, DepthTreatment, PinContent, StyleMetadata},
        PinStyle, StyleConfig, StyleContext,
    },
    typography::{Align, FontFamily, TextBlock},
};

/// Brief-driven layout that leans on a trending aesthetic
///
/// The aesthetic's palette replaces the brief's and its vibe is printed as a
/// badge above a left-aligned lower-third headline.
pub struct TrendAlignedStyle;

impl TrendAlignedStyle {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TrendAlignedStyle {
    fn default() -> Self {
        Self::new()
    }
}

impl PinStyle for TrendAlignedStyle {
    fn name(&self) -> &str {
        "trend_aligned"
    }

    fn description(&self) -> &str {
        "Trend badge and lower-third headline in the colors of a viral aesthetic"
    }

    fn plan(&self, content: &PinContent<'_>, brief: Option<&DesignBrief>, _config: &StyleConfig) -> BackgroundPlan {
        let subject = brief.map(|b| b.image_specs.as_str()).unwrap_or(content.title);
        let plan = BackgroundPlan::new(subject);
        match content.aesthetic.and_then(palette::aesthetic) {
            Some(aesthetic) => plan.creative_style(format!("{} trend", aesthetic.vibe.to_lowercase())),
            None => plan.creative_style("trending lifestyle"),
        }
    }

    fn compose(&self, canvas: &mut Canvas, context: &StyleContext<'_>) -> Result<()> {
        let (width, height) = (canvas.width(), canvas.height());
        let aesthetic = context.content.aesthetic.and_then(palette::aesthetic);
        let palette = aesthetic.map(|a| a.palette).unwrap_or(context.palette);
        let intensity = context.config.intensity;

        decor::top_fade(canvas, palette.background, 0.25, 0.6 * intensity);
        decor::vignette(canvas, palette.background, 0.4, intensity);

        let badge_text = aesthetic
            .map(|a| a.vibe.to_uppercase())
            .unwrap_or_else(|| "TRENDING NOW".to_string());
        let badge_layout = context.typesetter.fit(&badge_text, FontFamily::Body, 28.0, width * 6 / 10);
        let badge = Rect::new(
            width * 8 / 100,
            height * 6 / 100,
            badge_layout.width.ceil() as u32 + 48,
            badge_layout.height().ceil() as u32 + 24,
        );
        canvas.fill_rounded_rect(badge, badge.height / 2, palette.accent, 0.9);
        let badge_block = TextBlock::centered(&badge_text, ((badge.x + 24) as i32, (badge.y + 12) as i32), 28.0, width * 6 / 10, decor::contrasting(palette.accent))
            .family(FontFamily::Body)
            .align(Align::Left);
        context.typesetter.draw_layout(canvas, &badge_layout, &badge_block);

        let left = (width * 8 / 100) as i32;
        let text_width = width * 84 / 100;
        let top = (height * 62 / 100) as i32;
        canvas.fill_rect(Rect::new(left as u32, (top as u32).saturating_sub(24), 90, 6), palette.accent, 1.0);

        let headline = TextBlock::centered(context.headline(), (left, top), 86.0, text_width, palette.text)
            .align(Align::Left)
            .shadow(true);
        let next = context.typesetter.layout_text(canvas, &headline);

        let subtitle = TextBlock::centered(context.content.description, (left, next + 20), 38.0, text_width, palette.glow())
            .family(FontFamily::Body)
            .align(Align::Left)
            .shadow(true);
        context.typesetter.layout_text(canvas, &subtitle);
        Ok(())
    }

    fn metadata(&self) -> StyleMetadata {
        StyleMetadata {
            uses_brief: true,
            depth: DepthTreatment::Vignette,
            call_to_action: None,
            optional_parameters: vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(aesthetic: Option<&str>) -> PinContent<'_> {
        PinContent {
            title: "Gut health secrets",
            description: "Verified in Health",
            niche: "Health",
            aesthetic,
        }
    }

    #[test]
    fn test_plan_uses_brief_specs_and_vibe() {
        let brief = DesignBrief::fallback("Gut health secrets", "Verified", "Health");
        let plan = TrendAlignedStyle::new().plan(&content(Some("poetcore")), Some(&brief), &StyleConfig::default());

        assert_eq!(plan.subject, brief.image_specs);
        assert_eq!(plan.creative_style.as_deref(), Some("intellectual & nostalgic trend"));
    }

    #[test]
    fn test_plan_without_aesthetic() {
        let plan = TrendAlignedStyle::new().plan(&content(Some("NONE")), None, &StyleConfig::default());
        assert_eq!(plan.subject, "Gut health secrets");
        assert_eq!(plan.creative_style.as_deref(), Some("trending lifestyle"));
    }
}
