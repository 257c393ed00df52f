use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};

use crate::{
    error::{ConfigError, Result},
    styles::StyleConfig,
};

/// Main configuration for the pin compositor
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// External service endpoints and timeouts
    pub providers: ProviderConfig,

    /// Background acquisition settings
    pub acquisition: AcquisitionConfig,

    /// Text fitting settings
    pub typography: TypographyConfig,

    /// Export settings
    pub output: OutputConfig,

    /// Default style configuration
    pub style: StyleConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound { path: path.display().to_string() })?;

        let config: Config = toml::from_str(&content)
            .map_err(|_| ConfigError::ParseFailed { path: path.display().to_string() })?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::InvalidValue {
                key: "config".to_string(),
                value: e.to_string()
            })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.providers.validate()?;
        self.acquisition.validate()?;
        self.typography.validate()?;
        self.output.validate()?;
        Ok(())
    }
}

/// Endpoints, model names and timeouts of the consumed services
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Base URL of the generative-image service; the prompt is appended as a path segment
    pub image_endpoint: String,

    /// Model variants rotated across generation attempts
    pub image_models: Vec<String>,

    /// Timeout for a single generation request (seconds)
    pub image_timeout_secs: u64,

    /// Base URL of the stock-photo fallback service
    pub stock_endpoint: String,

    /// Timeout for the stock-photo request (seconds)
    pub stock_timeout_secs: u64,

    /// Base URL of the text-generation API
    pub text_endpoint: String,

    /// Text-generation model
    pub text_model: String,

    /// Environment variable holding the text-generation API key
    pub text_api_key_env: String,

    /// Timeout for a text-generation request (seconds)
    pub text_timeout_secs: u64,

    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            image_endpoint: "https://image.pollinations.ai/prompt".to_string(),
            image_models: vec!["flux".to_string(), "turbo".to_string()],
            image_timeout_secs: 35,
            stock_endpoint: "https://picsum.photos".to_string(),
            stock_timeout_secs: 15,
            text_endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            text_model: "gemini-1.5-flash".to_string(),
            text_api_key_env: "GEMINI_API_KEY".to_string(),
            text_timeout_secs: 20,
            user_agent: format!("pin-compositor/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ProviderConfig {
    fn validate(&self) -> Result<()> {
        if self.image_models.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "providers.image_models".to_string(),
                value: "[]".to_string()
            }.into());
        }

        for (key, secs) in [
            ("providers.image_timeout_secs", self.image_timeout_secs),
            ("providers.stock_timeout_secs", self.stock_timeout_secs),
            ("providers.text_timeout_secs", self.text_timeout_secs),
        ] {
            if secs == 0 {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: secs.to_string()
                }.into());
            }
        }

        Ok(())
    }
}

/// Background acquisition configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AcquisitionConfig {
    /// Number of generation attempts before falling back to stock photos
    pub max_retries: u32,

    /// Smallest width or height accepted from a provider
    pub min_dimension: u32,

    /// Rate-limit placeholder detection thresholds
    pub placeholder: PlaceholderConfig,
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            min_dimension: 64,
            placeholder: PlaceholderConfig::default(),
        }
    }
}

impl AcquisitionConfig {
    fn validate(&self) -> Result<()> {
        if self.max_retries == 0 {
            return Err(ConfigError::InvalidValue {
                key: "acquisition.max_retries".to_string(),
                value: self.max_retries.to_string()
            }.into());
        }

        if self.placeholder.grid == 0 {
            return Err(ConfigError::InvalidValue {
                key: "acquisition.placeholder.grid".to_string(),
                value: self.placeholder.grid.to_string()
            }.into());
        }

        Ok(())
    }
}

/// Color band of the provider's "slow down" graphic (light warm yellow)
///
/// These were tuned by eye against real placeholder responses and are kept
/// configurable because the provider may restyle its placeholder.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaceholderConfig {
    /// Samples per axis; the grid skips the outer edges
    pub grid: u32,

    pub red_min: u8,
    pub green_min: u8,
    pub blue_max: u8,

    /// Required lead of the red channel over blue
    pub red_blue_margin: u8,

    /// Images with more matching samples than this are rejected
    pub max_matches: usize,
}

impl Default for PlaceholderConfig {
    fn default() -> Self {
        Self {
            grid: 9,
            red_min: 200,
            green_min: 180,
            blue_max: 150,
            red_blue_margin: 60,
            max_matches: 2,
        }
    }
}

/// Typography configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TypographyConfig {
    /// TrueType font for headlines; system fonts and then the built-in bitmap font are tried when unset or unreadable
    pub display_font: Option<PathBuf>,

    /// TrueType font for subtitles and labels
    pub body_font: Option<PathBuf>,

    /// Smallest font size the fitter will shrink to
    pub min_font_size: f32,

    /// Amount subtracted from the font size on each fitting pass
    pub shrink_step: f32,

    /// Approximate glyph advance as a fraction of the font size, used for wrapping
    pub char_width_ratio: f32,

    /// Line advance as a multiple of the font size
    pub line_height: f32,
}

impl Default for TypographyConfig {
    fn default() -> Self {
        Self {
            display_font: None,
            body_font: None,
            min_font_size: 18.0,
            shrink_step: 2.0,
            char_width_ratio: 0.55,
            line_height: 1.2,
        }
    }
}

impl TypographyConfig {
    fn validate(&self) -> Result<()> {
        if self.min_font_size <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "typography.min_font_size".to_string(),
                value: self.min_font_size.to_string()
            }.into());
        }

        if self.shrink_step <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "typography.shrink_step".to_string(),
                value: self.shrink_step.to_string()
            }.into());
        }

        if self.char_width_ratio <= 0.0 || self.line_height <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "typography.metrics".to_string(),
                value: format!("{}/{}", self.char_width_ratio, self.line_height)
            }.into());
        }

        Ok(())
    }
}

/// Export configuration
///
/// The canvas is always `PIN_WIDTH`x`PIN_HEIGHT`; only the encoding is configurable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// JPEG quality (1-100) when exporting to .jpg
    pub jpeg_quality: u8,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { jpeg_quality: 95 }
    }
}

impl OutputConfig {
    fn validate(&self) -> Result<()> {
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(ConfigError::InvalidValue {
                key: "output.jpeg_quality".to_string(),
                value: self.jpeg_quality.to_string()
            }.into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_roundtrip() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("pins.toml");

        let mut original_config = Config::default();
        original_config.acquisition.placeholder.max_matches = 4;

        original_config.save_to_file(&file_path).unwrap();
        let loaded_config = Config::from_file(&file_path).unwrap();

        assert_eq!(loaded_config.acquisition.placeholder.max_matches, 4);
        assert_eq!(loaded_config.output.jpeg_quality, 95);
        assert_eq!(loaded_config.providers.image_models, vec!["flux", "turbo"]);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("partial.toml");
        std::fs::write(&file_path, "[output]\njpeg_quality = 80\n").unwrap();

        let config = Config::from_file(&file_path).unwrap();
        assert_eq!(config.output.jpeg_quality, 80);
        assert_eq!(config.typography.min_font_size, 18.0);
        assert_eq!(config.acquisition.max_retries, 2);
    }

    #[test]
    fn test_legacy_canvas_size_is_ignored() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("legacy.toml");
        std::fs::write(&file_path, "[output]\nwidth = 100\nheight = 150\njpeg_quality = 90\n").unwrap();

        let config = Config::from_file(&file_path).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.output.jpeg_quality, 90);
    }

    #[test]
    fn test_missing_file() {
        assert!(Config::from_file("/definitely/not/here.toml").is_err());
    }

    #[test]
    fn test_invalid_values() {
        let mut config = Config::default();
        config.providers.image_models.clear();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.output.jpeg_quality = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.acquisition.max_retries = 0;
        assert!(config.validate().is_err());
    }
}
