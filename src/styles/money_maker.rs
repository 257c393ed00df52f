use crate::{
    brief::DesignBrief,
    canvas::{Canvas, Rect},
    error::Result,
    styles::{
        decor,
        traits::{BackgroundPlan, DepthTreatment, PinContent, StyleMetadata},
        PinStyle, StyleConfig, StyleContext,
    },
    typography::{FontFamily, TextBlock},
};

/// Callout shown when the title carries no amount
const DEFAULT_CALLOUT: &str = "PROVEN";

/// Income-proof layout: a giant dollar figure pulled from the title
pub struct MoneyMakerStyle;

impl MoneyMakerStyle {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MoneyMakerStyle {
    fn default() -> Self {
        Self::new()
    }
}

/// First currency amount in `text`, e.g. `$3,800` or `$10k`
pub(crate) fn money_callout(text: &str) -> Option<String> {
    let start = text.find('$')?;
    let amount: String = text[start + 1..]
        .chars()
        .take_while(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | 'k' | 'K' | 'm' | 'M'))
        .collect();
    let amount = amount.trim_end_matches([',', '.']);

    if amount.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        Some(format!("${}", amount.to_uppercase()))
    } else {
        None
    }
}

impl PinStyle for MoneyMakerStyle {
    fn name(&self) -> &str {
        "money_maker"
    }

    fn description(&self) -> &str {
        "Bold income callout badge over a darkened workspace photo"
    }

    fn plan(&self, content: &PinContent<'_>, _brief: Option<&DesignBrief>, _config: &StyleConfig) -> BackgroundPlan {
        BackgroundPlan::new(format!(
            "a sleek laptop workspace with stacks of cash and a rising revenue dashboard for {}",
            content.niche.trim()
        ))
        .creative_style("high-contrast commercial")
    }

    fn compose(&self, canvas: &mut Canvas, context: &StyleContext<'_>) -> Result<()> {
        let (width, height) = (canvas.width(), canvas.height());
        let palette = context.palette;
        let intensity = context.config.intensity;

        decor::top_fade(canvas, palette.background, 0.4, 0.7 * intensity);
        decor::vignette(canvas, palette.background, 0.35, intensity);

        let callout = money_callout(context.content.title)
            .unwrap_or_else(|| context.config.get_string_or("callout", DEFAULT_CALLOUT).to_string());
        let callout_width = width * 76 / 100;
        let layout = context.typesetter.fit(&callout, FontFamily::Display, 170.0, callout_width.saturating_sub(80));
        let badge = Rect::centered(
            width,
            height * 8 / 100,
            (layout.width.ceil() as u32 + 80).min(callout_width),
            layout.height().ceil() as u32 + 50,
        );
        canvas.fill_rounded_rect(badge, 28, palette.accent, 1.0);
        canvas.stroke_rounded_rect(badge, 28, 4, palette.text, 0.8);

        let center = (width / 2) as i32;
        let block = TextBlock::centered(&callout, (center, badge.y as i32 + 25), 170.0, callout_width.saturating_sub(80), decor::contrasting(palette.accent));
        context.typesetter.draw_layout(canvas, &layout, &block);

        let headline = TextBlock::centered(context.headline(), (center, badge.bottom() as i32 + 60), 76.0, width * 84 / 100, palette.text)
            .shadow(true);
        let next = context.typesetter.layout_text(canvas, &headline);

        let subtitle = TextBlock::centered(context.content.description, (center, next + 24), 40.0, width * 3 / 4, palette.accent)
            .family(FontFamily::Body)
            .shadow(true);
        context.typesetter.layout_text(canvas, &subtitle);

        let label = context.config.get_string_or("cta", "START NOW");
        decor::call_to_action(canvas, context.typesetter, label, height * 84 / 100, palette.accent, decor::contrasting(palette.accent));
        Ok(())
    }

    fn metadata(&self) -> StyleMetadata {
        StyleMetadata {
            uses_brief: false,
            depth: DepthTreatment::Vignette,
            call_to_action: Some("START NOW"),
            optional_parameters: vec![
                ("callout".to_string(), "Badge text when the title has no amount".to_string()),
                ("cta".to_string(), "Button label".to_string()),
            ],
        }
    }
}
