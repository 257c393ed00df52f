//! # Design Brief
//!
//! A structured creative brief requested from the text service before
//! rendering brief-driven styles. Any failure (no credential, network error,
//! invalid JSON, missing keys) yields a complete default brief derived from
//! the inputs, so the compositor never checks for absent fields.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    error::BriefError,
    palette::{Color, Palette},
    providers::TextGenerator,
};

pub const MAX_HEADLINE_WORDS: usize = 8;
pub const MAX_PALETTE_COLORS: usize = 3;
pub const MAX_HASHTAGS: usize = 5;
pub const SEO_DESCRIPTION_MIN: usize = 300;
pub const SEO_DESCRIPTION_MAX: usize = 500;

/// Fallback palette of the default brief: navy, sky, near-white
pub const FALLBACK_PALETTE: [&str; 3] = ["#0F172A", "#38BDF8", "#F8FAFC"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Tone {
    Fun,
    Elegant,
    Bold,
    Minimal,
    Professional,
}

impl FromStr for Tone {
    type Err = BriefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fun" => Ok(Self::Fun),
            "elegant" => Ok(Self::Elegant),
            "bold" => Ok(Self::Bold),
            "minimal" => Ok(Self::Minimal),
            "professional" => Ok(Self::Professional),
            _ => Err(BriefError::MissingField { field: format!("tone ({s})") }),
        }
    }
}

impl TryFrom<String> for Tone {
    type Error = BriefError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Fun => "fun",
            Self::Elegant => "elegant",
            Self::Bold => "bold",
            Self::Minimal => "minimal",
            Self::Professional => "professional",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum GraphicStyle {
    Modern,
    Minimal,
    Bright,
    Soft,
}

impl FromStr for GraphicStyle {
    type Err = BriefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "modern" => Ok(Self::Modern),
            "minimal" => Ok(Self::Minimal),
            "bright" => Ok(Self::Bright),
            "soft" => Ok(Self::Soft),
            _ => Err(BriefError::MissingField { field: format!("graphic_style ({s})") }),
        }
    }
}

impl TryFrom<String> for GraphicStyle {
    type Error = BriefError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl GraphicStyle {
    /// Adjective handed to the prompt synthesizer as the creative style
    pub fn as_creative_style(&self) -> &'static str {
        match self {
            Self::Modern => "modern editorial",
            Self::Minimal => "minimalist",
            Self::Bright => "bright airy",
            Self::Soft => "soft pastel",
        }
    }
}

/// Creative specification for one pin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignBrief {
    pub audience: String,
    pub tone: Tone,
    pub headline: String,
    pub graphic_style: GraphicStyle,
    /// Visual prompt for the background; no embedded text or faces
    pub image_specs: String,
    /// Up to three hex colors: background, accent, text
    pub palette: Vec<String>,
    pub fonts: String,
    pub seo_description: String,
    pub hashtags: Vec<String>,
    pub alt_text: String,
}

impl DesignBrief {
    /// Parse a service reply, tolerating code fences and chatter around the JSON
    pub fn parse(reply: &str) -> Result<Self, BriefError> {
        let json = extract_json(reply).ok_or_else(|| BriefError::InvalidJson {
            reason: "no JSON object in reply".to_string(),
        })?;

        let brief: DesignBrief = serde_json::from_str(json)
            .map_err(|e| BriefError::InvalidJson { reason: e.to_string() })?;
        brief.normalized()
    }

    /// Brief used whenever the service cannot produce one
    pub fn fallback(title: &str, description: &str, niche: &str) -> Self {
        let niche = non_empty(niche, "Lifestyle");
        let headline = first_words(&title.to_uppercase(), MAX_HEADLINE_WORDS);
        let headline = if headline.is_empty() { format!("DISCOVER {}", niche.to_uppercase()) } else { headline };
        let description = non_empty(description, "Save this pin for later");

        let seo_description = fit_seo_description(&format!(
            "{title}: {description}. Discover practical {niche} ideas, proven strategies and \
             inspiration you can put to work today. This guide breaks down what actually moves \
             the needle in {niche}, with clear steps for beginners and advanced readers alike. \
             Save this pin to revisit the essentials whenever you plan your next move.",
            title = non_empty(title, &headline),
        ));

        Self {
            audience: format!("People interested in {niche}"),
            tone: Tone::Professional,
            headline,
            graphic_style: GraphicStyle::Modern,
            image_specs: format!(
                "A high-end cinematic {niche} themed backdrop, soft depth of field, premium lighting, \
                 no text, no faces"
            ),
            palette: FALLBACK_PALETTE.iter().map(|c| c.to_string()).collect(),
            fonts: "Montserrat Bold, Inter".to_string(),
            seo_description,
            hashtags: vec![hashtag(niche), "#PinterestTips".to_string(), "#Inspiration".to_string()],
            alt_text: format!("{} pin about {}", niche, non_empty(title, niche)),
        }
    }

    /// Palette resolved from the hex list
    pub fn resolved_palette(&self) -> Palette {
        Palette::from_hex_list(&self.palette)
    }

    /// Enforce the field constraints, trimming overlong lists
    fn normalized(mut self) -> Result<Self, BriefError> {
        for (field, value) in [
            ("audience", &self.audience),
            ("headline", &self.headline),
            ("image_specs", &self.image_specs),
            ("fonts", &self.fonts),
            ("seo_description", &self.seo_description),
            ("alt_text", &self.alt_text),
        ] {
            if value.trim().is_empty() {
                return Err(BriefError::MissingField { field: field.to_string() });
            }
        }

        self.headline = first_words(&self.headline, MAX_HEADLINE_WORDS);

        self.palette.retain(|hex| Color::from_hex(hex).is_some());
        self.palette.truncate(MAX_PALETTE_COLORS);
        if self.palette.is_empty() {
            return Err(BriefError::MissingField { field: "palette".to_string() });
        }

        self.hashtags = self
            .hashtags
            .iter()
            .map(|tag| tag.trim())
            .filter(|tag| !tag.trim_start_matches('#').is_empty())
            .map(hashtag)
            .take(MAX_HASHTAGS)
            .collect();
        if self.hashtags.is_empty() {
            return Err(BriefError::MissingField { field: "hashtags".to_string() });
        }

        self.seo_description = fit_seo_description(&self.seo_description);
        Ok(self)
    }
}

/// Asks the text service to act as a creative director
pub struct BriefGenerator {
    text: Option<Arc<dyn TextGenerator>>,
}

impl BriefGenerator {
    pub fn new(text: Option<Arc<dyn TextGenerator>>) -> Self {
        Self { text }
    }

    /// Produce a brief for a pin; always returns a complete brief
    pub async fn conceptualize(&self, title: &str, description: &str, niche: &str) -> DesignBrief {
        match self.request(title, description, niche).await {
            Ok(brief) => {
                info!("Design brief: {} tone, {:?} style", brief.tone, brief.graphic_style);
                brief
            }
            Err(e) => {
                warn!("Using default design brief: {}", e);
                DesignBrief::fallback(title, description, niche)
            }
        }
    }

    async fn request(&self, title: &str, description: &str, niche: &str) -> Result<DesignBrief, BriefError> {
        let text = self.text.as_ref().ok_or_else(|| BriefError::Unavailable {
            reason: "no text service configured".to_string(),
        })?;

        let reply = text
            .generate(&brief_instruction(title, description, niche))
            .await
            .map_err(|e| BriefError::Unavailable { reason: e.to_string() })?;

        debug!("Brief reply: {} chars", reply.len());
        DesignBrief::parse(&reply)
    }
}

fn brief_instruction(title: &str, description: &str, niche: &str) -> String {
    format!(
        "You are an award-winning creative director designing a vertical Pinterest pin.\n\
         Title: {title}\nDescription: {description}\nNiche: {niche}\n\n\
         Return ONLY a JSON object with exactly these keys:\n\
         - \"audience\": who the pin is for\n\
         - \"tone\": one of \"fun\", \"elegant\", \"bold\", \"minimal\", \"professional\"\n\
         - \"headline\": at most {MAX_HEADLINE_WORDS} words\n\
         - \"graphic_style\": one of \"modern\", \"minimal\", \"bright\", \"soft\"\n\
         - \"image_specs\": a visual prompt for the background photo with no text and no faces\n\
         - \"palette\": up to {MAX_PALETTE_COLORS} hex colors (background, accent, text)\n\
         - \"fonts\": font pairing\n\
         - \"seo_description\": {SEO_DESCRIPTION_MIN}-{SEO_DESCRIPTION_MAX} characters\n\
         - \"hashtags\": up to {MAX_HASHTAGS} hashtags\n\
         - \"alt_text\": accessible description of the finished pin"
    )
}

/// Slice from the first `{` to the last `}`; fences and chatter around the object fall outside it
fn extract_json(reply: &str) -> Option<&str> {
    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    (end > start).then(|| &reply[start..=end])
}

fn non_empty<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() { fallback } else { trimmed }
}

fn first_words(text: &str, max: usize) -> String {
    text.split_whitespace().take(max).collect::<Vec<_>>().join(" ")
}

fn hashtag(tag: &str) -> String {
    let body: String = tag
        .trim()
        .trim_start_matches('#')
        .split_whitespace()
        .collect();
    format!("#{body}")
}

fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max).collect();
    match cut.rfind(' ') {
        Some(space) if space > max / 2 => cut[..space].trim_end().to_string(),
        _ => cut,
    }
}

/// Clamp a generated description into the SEO length window
fn fit_seo_description(text: &str) -> String {
    let mut text = text.trim().to_string();
    while text.chars().count() < SEO_DESCRIPTION_MIN {
        text.push_str(" Follow for more ideas like this.");
    }
    truncate_chars(&text, SEO_DESCRIPTION_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::mock::ScriptedText;

    const GOOD_BRIEF: &str = r##"```json
{
  "audience": "Remote founders",
  "tone": "Bold",
  "headline": "Automate your entire business while you sleep tonight please",
  "graphic_style": "modern",
  "image_specs": "Minimal desk at night with glowing monitors, no text, no faces",
  "palette": ["#101010", "#FFD700", "not-a-color", "#FFFFFF", "#000000"],
  "fonts": "Bebas Neue / Inter",
  "seo_description": "Automation guide.",
  "hashtags": ["ai", "#automation", "side hustle", "#growth", "#tools", "#extra"],
  "alt_text": "Dark desk with monitors"
}
```"##;

    fn assert_complete(brief: &DesignBrief) {
        assert!(!brief.audience.is_empty());
        assert!(!brief.headline.is_empty());
        assert!(!brief.image_specs.is_empty());
        assert!(!brief.palette.is_empty());
        assert!(!brief.fonts.is_empty());
        assert!(!brief.seo_description.is_empty());
        assert!(!brief.hashtags.is_empty());
        assert!(!brief.alt_text.is_empty());
    }

    #[test]
    fn test_parse_fenced_brief() {
        let brief = DesignBrief::parse(GOOD_BRIEF).unwrap();

        assert_eq!(brief.tone, Tone::Bold);
        assert_eq!(brief.graphic_style, GraphicStyle::Modern);
        assert_eq!(brief.headline.split_whitespace().count(), MAX_HEADLINE_WORDS);
        assert_eq!(brief.palette, vec!["#101010", "#FFD700", "#FFFFFF"]);
        assert_eq!(brief.hashtags, vec!["#ai", "#automation", "#sidehustle", "#growth", "#tools"]);
        assert_eq!(brief.resolved_palette().accent, Color::rgb(255, 215, 0));
    }

    #[test]
    fn test_parse_rejects_missing_keys() {
        let err = DesignBrief::parse(r#"{"audience": "x", "tone": "fun"}"#).unwrap_err();
        assert!(matches!(err, BriefError::InvalidJson { .. }));
    }

    #[test]
    fn test_parse_rejects_unknown_tone() {
        let json = GOOD_BRIEF.replace("\"Bold\"", "\"sarcastic\"");
        assert!(DesignBrief::parse(&json).is_err());
    }

    #[test]
    fn test_parse_rejects_blank_field() {
        let json = GOOD_BRIEF.replace("\"Dark desk with monitors\"", "\"   \"");
        assert_eq!(
            DesignBrief::parse(&json).unwrap_err(),
            BriefError::MissingField { field: "alt_text".to_string() }
        );
    }

    #[test]
    fn test_fallback_is_complete() {
        let brief = DesignBrief::fallback("Secret Hack", "Verified in AI Automation", "AI Automation");

        assert_complete(&brief);
        assert_eq!(brief.headline, "SECRET HACK");
        assert_eq!(brief.tone, Tone::Professional);
        assert_eq!(brief.palette, FALLBACK_PALETTE.to_vec());
        assert!(brief.image_specs.contains("AI Automation"));
        assert!(brief.hashtags.contains(&"#AIAutomation".to_string()));

        let len = brief.seo_description.chars().count();
        assert!((SEO_DESCRIPTION_MIN..=SEO_DESCRIPTION_MAX).contains(&len), "length {len}");
    }

    #[test]
    fn test_short_service_seo_is_padded() {
        let brief = DesignBrief::parse(GOOD_BRIEF).unwrap();
        let len = brief.seo_description.chars().count();

        assert!(brief.seo_description.starts_with("Automation guide."));
        assert!((SEO_DESCRIPTION_MIN..=SEO_DESCRIPTION_MAX).contains(&len), "length {len}");
    }

    #[test]
    fn test_long_service_seo_is_truncated() {
        let long = "word ".repeat(200);
        let json = GOOD_BRIEF.replace("\"Automation guide.\"", &format!("\"{long}\""));
        let brief = DesignBrief::parse(&json).unwrap();
        assert!(brief.seo_description.chars().count() <= SEO_DESCRIPTION_MAX);
    }

    #[test]
    fn test_fallback_headline_is_capped() {
        let title = "How To Build A Profitable Side Hustle In Twelve Weeks Flat Starting Today";
        let brief = DesignBrief::fallback(title, "", "Wealth");

        assert_eq!(brief.headline, "HOW TO BUILD A PROFITABLE SIDE HUSTLE IN");
        assert_eq!(brief.headline.split_whitespace().count(), MAX_HEADLINE_WORDS);
        assert!(brief.alt_text.contains("Starting Today"));
    }

    #[test]
    fn test_fallback_with_empty_inputs() {
        let brief = DesignBrief::fallback("", "", "");
        assert_complete(&brief);
        assert_eq!(brief.headline, "DISCOVER LIFESTYLE");
    }

    #[tokio::test]
    async fn test_malformed_replies_fall_back() {
        for reply in ["", "I cannot help with that.", "{not json}", "```json\n{\"tone\": 3}\n```"] {
            let generator = BriefGenerator::new(Some(Arc::new(ScriptedText::replying(reply))));
            let brief = generator.conceptualize("Title", "Desc", "Health").await;
            assert_complete(&brief);
            assert_eq!(brief, DesignBrief::fallback("Title", "Desc", "Health"));
        }
    }

    #[tokio::test]
    async fn test_no_service_falls_back() {
        let brief = BriefGenerator::new(None).conceptualize("Secret Hack", "", "Wealth").await;
        assert_eq!(brief.headline, "SECRET HACK");
    }

    #[tokio::test]
    async fn test_service_brief_used() {
        let text = Arc::new(ScriptedText::replying(GOOD_BRIEF));
        let brief = BriefGenerator::new(Some(text.clone())).conceptualize("T", "D", "Wealth").await;

        assert_eq!(brief.audience, "Remote founders");
        assert!(text.prompts()[0].contains("creative director"));
    }
}
