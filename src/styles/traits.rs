use image::RgbImage;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::{
    brief::DesignBrief,
    canvas::Canvas,
    error::Result,
    palette::Palette,
    typography::Typesetter,
};

/// Core trait that all pin layouts implement
///
/// A style is a one-shot strategy: the engine asks it what background to
/// fetch, prepares the canvas, then hands it over for decoration and text.
pub trait PinStyle: Send + Sync {
    /// Returns the unique name of this style
    fn name(&self) -> &str;

    /// Returns a human-readable description of this style
    fn description(&self) -> &str;

    /// Whether the style needs a design brief before rendering
    fn uses_brief(&self) -> bool {
        self.metadata().uses_brief
    }

    /// Describe the background to acquire
    ///
    /// The default uses the title as the subject and, when a brief is
    /// present, its image specification and graphic style.
    fn plan(&self, content: &PinContent<'_>, brief: Option<&DesignBrief>, config: &StyleConfig) -> BackgroundPlan {
        let _ = config;
        match brief {
            Some(brief) => BackgroundPlan::new(&brief.image_specs)
                .creative_style(brief.graphic_style.as_creative_style()),
            None => BackgroundPlan::new(content.title),
        }
    }

    /// Draw the depth treatment, text and decoration onto the prepared canvas
    ///
    /// # Arguments
    ///
    /// * `canvas` - Background already fitted to the output size and filtered
    /// * `context` - Text, palette, collaborators and configuration for this render
    fn compose(&self, canvas: &mut Canvas, context: &StyleContext<'_>) -> Result<()>;

    /// Validate that the given configuration is valid for this style
    fn validate_config(&self, config: &StyleConfig) -> Result<()> {
        let _ = config;
        Ok(())
    }

    /// Get style-specific metadata
    fn metadata(&self) -> StyleMetadata {
        StyleMetadata::default()
    }
}

/// The words on a pin
#[derive(Debug, Clone, Copy)]
pub struct PinContent<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub niche: &'a str,
    pub aesthetic: Option<&'a str>,
}

/// What background a style wants
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundPlan {
    pub subject: String,
    pub creative_style: Option<String>,
    /// Second image blended into the first (double exposure)
    pub secondary_subject: Option<String>,
}

impl BackgroundPlan {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            creative_style: None,
            secondary_subject: None,
        }
    }

    pub fn creative_style(mut self, style: impl Into<String>) -> Self {
        self.creative_style = Some(style.into());
        self
    }

    pub fn secondary(mut self, subject: impl Into<String>) -> Self {
        self.secondary_subject = Some(subject.into());
        self
    }
}

/// Everything a style may draw with
pub struct StyleContext<'a> {
    pub content: PinContent<'a>,
    pub brief: Option<&'a DesignBrief>,
    pub palette: Palette,
    pub typesetter: &'a Typesetter,
    pub config: &'a StyleConfig,
    /// Second background, present when the plan asked for one
    pub secondary: Option<&'a RgbImage>,
}

impl StyleContext<'_> {
    /// Headline text: the brief's headline when one exists, else the title
    pub fn headline(&self) -> &str {
        self.brief.map(|b| b.headline.as_str()).unwrap_or(self.content.title)
    }
}

/// Configuration for style effects
///
/// Each style reads its own optional parameters; the intensity scales
/// vignettes and tints across all of them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleConfig {
    /// Intensity of the depth treatment (0.0 = none, 1.0 = full)
    pub intensity: f32,

    /// Style-specific parameters
    #[serde(default)]
    pub parameters: HashMap<String, ConfigValue>,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            intensity: 0.8,
            parameters: HashMap::new(),
        }
    }
}

impl StyleConfig {
    /// Create a new config with the given intensity
    pub fn with_intensity(intensity: f32) -> Self {
        Self {
            intensity: intensity.clamp(0.0, 1.0),
            parameters: HashMap::new(),
        }
    }

    /// Set a parameter value
    pub fn set<K: Into<String>, V: Into<ConfigValue>>(mut self, key: K, value: V) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    pub fn get_f32(&self, key: &str) -> Option<f32> {
        self.parameters.get(key).and_then(|v| v.as_f32())
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.parameters.get(key).and_then(|v| v.as_bool())
    }

    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.parameters.get(key).and_then(|v| v.as_string())
    }

    /// Get a parameter value with a default
    pub fn get_f32_or(&self, key: &str, default: f32) -> f32 {
        self.get_f32(key).unwrap_or(default)
    }

    /// Get a parameter value with a default
    pub fn get_bool_or(&self, key: &str, default: bool) -> bool {
        self.get_bool(key).unwrap_or(default)
    }

    /// Get a string parameter with a default
    pub fn get_string_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get_string(key).unwrap_or(default)
    }
}

/// Flexible configuration value that can hold different types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Bool(bool),
    Integer(i32),
    Float(f32),
    String(String),
}

impl ConfigValue {
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            ConfigValue::Float(f) => Some(*f),
            ConfigValue::Integer(i) => Some(*i as f32),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<f32> for ConfigValue {
    fn from(value: f32) -> Self {
        ConfigValue::Float(value)
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Bool(value)
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::String(value)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::String(value.to_string())
    }
}

impl From<i32> for ConfigValue {
    fn from(value: i32) -> Self {
        ConfigValue::Integer(value)
    }
}

/// How a style separates text from the background
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DepthTreatment {
    /// Top-to-bottom alpha gradient
    #[default]
    Vignette,
    /// Blurred, tinted, rounded panel behind the text
    GlassPanel,
    /// Two backgrounds merged through a luminance mask
    DoubleExposure,
}

impl fmt::Display for DepthTreatment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Vignette => "vignette",
            Self::GlassPanel => "glass panel",
            Self::DoubleExposure => "double exposure",
        };
        f.write_str(name)
    }
}

/// Metadata about a style's inputs and look
#[derive(Debug, Clone, Default)]
pub struct StyleMetadata {
    /// Whether a design brief is generated first and a sidecar written after
    pub uses_brief: bool,

    /// How text is separated from the background
    pub depth: DepthTreatment,

    /// Default call-to-action label, if the style draws a button
    pub call_to_action: Option<&'static str>,

    /// List of optional parameters with descriptions
    pub optional_parameters: Vec<(String, String)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_config_parameters() {
        let config = StyleConfig::with_intensity(1.5)
            .set("panel_opacity", 0.4_f32)
            .set("cta", "GET IT")
            .set("shadow", false)
            .set("margin", 12);

        assert_eq!(config.intensity, 1.0);
        assert_eq!(config.get_f32_or("panel_opacity", 0.0), 0.4);
        assert_eq!(config.get_f32("margin"), Some(12.0));
        assert_eq!(config.get_string_or("cta", "LEARN MORE"), "GET IT");
        assert_eq!(config.get_string_or("missing", "LEARN MORE"), "LEARN MORE");
        assert!(!config.get_bool_or("shadow", true));
    }

    #[test]
    fn test_style_config_from_toml() {
        let config: StyleConfig = toml::from_str(
            "intensity = 0.5\n[parameters]\ncta = \"TAP HERE\"\npanel_opacity = 0.3\nreflection = true\n",
        )
        .unwrap();

        assert_eq!(config.intensity, 0.5);
        assert_eq!(config.get_string("cta"), Some("TAP HERE"));
        assert_eq!(config.get_f32("panel_opacity"), Some(0.3));
        assert_eq!(config.get_bool("reflection"), Some(true));
    }

    #[test]
    fn test_flag_parameters_need_bool_values() {
        let numeric = StyleConfig::default().set("reflection", 0.5_f32);
        assert_eq!(numeric.get_bool("reflection"), None);
        assert!(!numeric.get_bool_or("reflection", false));

        let flag = StyleConfig::default().set("reflection", false);
        assert!(!flag.get_bool_or("reflection", true));
    }

    #[test]
    fn test_background_plan_builder() {
        let plan = BackgroundPlan::new("a desk")
            .creative_style("minimalist")
            .secondary("a skyline");
        assert_eq!(plan.subject, "a desk");
        assert_eq!(plan.creative_style.as_deref(), Some("minimalist"));
        assert_eq!(plan.secondary_subject.as_deref(), Some("a skyline"));
    }
}
