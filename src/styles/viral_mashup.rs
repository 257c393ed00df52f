use crate::{
    brief::DesignBrief,
    canvas::{Canvas, Rect},
    error::Result,
    prompt::{PromptSynthesizer, DEFAULT_MASHUP_TREND},
    styles::{
        decor::{self, GlassPanel},
        traits::{BackgroundPlan, DepthTreatment, PinContent, StyleMetadata},
        PinStyle, StyleConfig, StyleContext,
    },
    typography::{FontFamily, TextBlock},
};

/// Pop-culture mashup: "How {trend} would solve this" over the product pitch
pub struct ViralMashupStyle;

impl ViralMashupStyle {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ViralMashupStyle {
    fn default() -> Self {
        Self::new()
    }
}

fn trend(config: &StyleConfig) -> &str {
    config.get_string_or("trend", DEFAULT_MASHUP_TREND)
}

impl PinStyle for ViralMashupStyle {
    fn name(&self) -> &str {
        "viral_mashup"
    }

    fn description(&self) -> &str {
        "Pop-culture mashup banner above the headline on a glass card"
    }

    fn plan(&self, content: &PinContent<'_>, _brief: Option<&DesignBrief>, config: &StyleConfig) -> BackgroundPlan {
        let idea = PromptSynthesizer::mashup_idea(Some(trend(config)));
        BackgroundPlan::new(format!("{}{}", idea, content.title.trim())).creative_style("comic-inspired cinematic")
    }

    fn compose(&self, canvas: &mut Canvas, context: &StyleContext<'_>) -> Result<()> {
        let (width, height) = (canvas.width(), canvas.height());
        let palette = context.palette;

        decor::vignette(canvas, palette.background, 0.3, context.config.intensity);

        let banner = Rect::new(0, height * 10 / 100, width, height * 9 / 100);
        canvas.fill_rect(banner, palette.accent, 0.92);

        let center = (width / 2) as i32;
        let idea = PromptSynthesizer::mashup_idea(Some(trend(context.config)));
        let idea = idea.trim_end().trim_end_matches(':').to_uppercase();
        let kicker = TextBlock::centered(&idea, (center, banner.y as i32 + 28), 48.0, width * 88 / 100, decor::contrasting(palette.accent));
        context.typesetter.layout_text(canvas, &kicker);

        let panel = Rect::new(width * 7 / 100, height * 40 / 100, width * 86 / 100, height * 36 / 100);
        GlassPanel::new(panel, palette.background).tint_alpha(0.5).draw(canvas);

        let headline = TextBlock::centered(context.headline(), (center, panel.y as i32 + 60), 86.0, panel.width.saturating_sub(90), palette.text)
            .shadow(true);
        let next = context.typesetter.layout_text(canvas, &headline);

        let subtitle = TextBlock::centered(context.content.description, (center, next + 24), 38.0, panel.width.saturating_sub(110), palette.glow())
            .family(FontFamily::Body);
        context.typesetter.layout_text(canvas, &subtitle);

        let label = context.config.get_string_or("cta", "SEE THE PLAN");
        decor::call_to_action(canvas, context.typesetter, label, panel.bottom() + 50, palette.accent, decor::contrasting(palette.accent));
        Ok(())
    }

    fn metadata(&self) -> StyleMetadata {
        StyleMetadata {
            uses_brief: false,
            depth: DepthTreatment::GlassPanel,
            call_to_action: Some("SEE THE PLAN"),
            optional_parameters: vec![
                ("trend".to_string(), "Pop-culture icon to mash up with the product".to_string()),
                ("cta".to_string(), "Button label".to_string()),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_prefixes_mashup_idea() {
        let content = PinContent {
            title: "Pinterest automation",
            description: "Zero experience needed",
            niche: "Wealth",
            aesthetic: None,
        };

        let plan = ViralMashupStyle::new().plan(&content, None, &StyleConfig::default());
        assert_eq!(plan.subject, "How Spiderman would solve this: Pinterest automation");

        let config = StyleConfig::default().set("trend", "Batman");
        let plan = ViralMashupStyle::new().plan(&content, None, &config);
        assert!(plan.subject.starts_with("How Batman would solve this: "));
    }
}
