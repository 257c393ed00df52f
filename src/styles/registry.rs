use std::collections::HashMap;

use tracing::warn;

use crate::styles::{
    AspirationStyle, DesignerStyle, MoneyMakerStyle, NeonWhisperStyle, PinStyle, StudioStyle,
    TrendAlignedStyle, VisionaryStyle, ViralMashupStyle,
};

/// Style rendered when a requested name is unknown
pub const DEFAULT_STYLE: &str = "designer";

type StyleFactory = Box<dyn Fn() -> Box<dyn PinStyle> + Send + Sync>;

/// Registry for managing available pin styles
///
/// Styles are registered by name and instantiated on demand. Aliases map
/// alternative names onto registered styles.
pub struct StyleRegistry {
    styles: HashMap<String, StyleFactory>,
    aliases: HashMap<String, String>,
}

impl StyleRegistry {
    /// Create a new style registry with all built-in styles
    pub fn new() -> Self {
        let mut registry = Self {
            styles: HashMap::new(),
            aliases: HashMap::new(),
        };

        registry.register_builtin_styles();
        registry
    }

    fn register_builtin_styles(&mut self) {
        self.register("designer", || Box::new(DesignerStyle::new()));
        self.register("studio", || Box::new(StudioStyle::new()));
        self.register("trend_aligned", || Box::new(TrendAlignedStyle::new()));
        self.register("aspiration", || Box::new(AspirationStyle::new()));
        self.register("visionary", || Box::new(VisionaryStyle::new()));
        self.register("neon_whisper", || Box::new(NeonWhisperStyle::new()));
        self.register("money_maker", || Box::new(MoneyMakerStyle::new()));
        self.register("viral_mashup", || Box::new(ViralMashupStyle::new()));

        self.alias("viral_lifestyle", "aspiration");
        self.alias("brief", "studio");
    }

    /// Register a style factory under `name`
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn PinStyle> + Send + Sync + 'static,
    {
        self.styles.insert(name.into(), Box::new(factory));
    }

    /// Make `alias` resolve to the style registered as `target`
    pub fn alias(&mut self, alias: impl Into<String>, target: impl Into<String>) {
        self.aliases.insert(alias.into(), target.into());
    }

    /// Get a style by name or alias
    ///
    /// Names are matched case-insensitively with `-` and spaces read as `_`.
    pub fn get_style(&self, name: &str) -> Option<Box<dyn PinStyle>> {
        let key = canonical(name);
        let key = self.aliases.get(&key).cloned().unwrap_or(key);
        self.styles.get(&key).map(|factory| factory())
    }

    /// Get a style by name, falling back to the default style
    pub fn resolve(&self, name: &str) -> Box<dyn PinStyle> {
        if let Some(style) = self.get_style(name) {
            return style;
        }

        warn!("Unknown style '{}', rendering '{}' instead", name, DEFAULT_STYLE);
        match self.get_style(DEFAULT_STYLE) {
            Some(style) => style,
            None => Box::new(DesignerStyle::new()),
        }
    }

    /// One-paragraph summary of a style for listings
    pub fn describe(&self, name: &str) -> Option<String> {
        let style = self.get_style(name)?;
        let metadata = style.metadata();

        let mut text = format!("{} - {}\n  depth: {}", style.name(), style.description(), metadata.depth);
        if let Some(label) = metadata.call_to_action {
            text.push_str(&format!(", button: {label}"));
        }
        if metadata.uses_brief {
            text.push_str(", design brief + SEO sidecar");
        }
        for (key, about) in &metadata.optional_parameters {
            text.push_str(&format!("\n  {key}: {about}"));
        }
        Some(text)
    }

    /// Get all available style names, sorted
    pub fn available_styles(&self) -> Vec<String> {
        let mut names: Vec<String> = self.styles.keys().cloned().collect();
        names.sort();
        names
    }

    /// Check if a style or alias is available
    pub fn has_style(&self, name: &str) -> bool {
        let key = canonical(name);
        self.styles.contains_key(&key) || self.aliases.contains_key(&key)
    }

    /// Get the number of registered styles, not counting aliases
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn canonical(name: &str) -> String {
    name.trim().to_lowercase().replace(['-', ' '], "_")
}
