use thiserror::Error;

/// Main error type for the pin compositor library
#[derive(Error, Debug)]
pub enum CompositorError {
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Background acquisition error: {0}")]
    Acquisition(#[from] AcquisitionError),

    #[error("Design brief error: {0}")]
    Brief(#[from] BriefError),

    #[error("Typography error: {0}")]
    Typography(#[from] TypographyError),

    #[error("Style rendering error: {0}")]
    Style(#[from] StyleError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Failures reported by the external image and text services
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Request to {provider} timed out")]
    Timeout { provider: String },

    #[error("Could not reach {provider}: {reason}")]
    Connection { provider: String, reason: String },

    #[error("{provider} answered with HTTP {status}")]
    Status { provider: String, status: u16 },

    #[error("Malformed response from {provider}: {reason}")]
    MalformedResponse { provider: String, reason: String },

    #[error("No credential configured for {provider}")]
    MissingCredential { provider: String },
}

/// Reasons a single background candidate was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AcquisitionError {
    #[error("Image looks like a rate-limit placeholder ({matches} of {samples} samples matched)")]
    Placeholder { matches: usize, samples: usize },

    #[error("Image too small: {width}x{height}")]
    TooSmall { width: u32, height: u32 },

    #[error("Could not decode image: {reason}")]
    DecodeFailed { reason: String },

    #[error("All {attempts} generation attempts failed")]
    Exhausted { attempts: u32 },
}

/// Design brief generation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BriefError {
    #[error("Brief service unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("Brief is not valid JSON: {reason}")]
    InvalidJson { reason: String },

    #[error("Brief field is missing or empty: {field}")]
    MissingField { field: String },
}

/// Typography errors
#[derive(Error, Debug)]
pub enum TypographyError {
    #[error("Failed to load font: {path}")]
    FontLoadFailed { path: String },

    #[error("Font data is not a usable TrueType font: {path}")]
    InvalidFont { path: String },
}

/// Style-specific errors
#[derive(Error, Debug)]
pub enum StyleError {
    #[error("Style {style} failed to compose: {reason}")]
    ComposeFailed { style: String, reason: String },

    #[error("Failed to export pin to {path}: {reason}")]
    ExportFailed { path: String, reason: String },
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration file: {path}")]
    ParseFailed { path: String },

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },
}

/// Convenience type alias for Results using CompositorError
pub type Result<T> = std::result::Result<T, CompositorError>;

/// Result type used by provider clients
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

impl CompositorError {
    /// Check if this error is recoverable (can be retried)
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Provider(err) => err.is_transient(),
            Self::Acquisition(AcquisitionError::Placeholder { .. }) => true,
            Self::Io(_) => true,
            _ => false,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Style(StyleError::ExportFailed { path, .. }) => {
                format!("Could not write the pin to '{}'. Check that the directory is writable.", path)
            }
            Self::Config(ConfigError::FileNotFound { path }) => {
                format!("Configuration file '{}' not found.", path)
            }
            _ => self.to_string(),
        }
    }
}

impl ProviderError {
    /// Timeouts, connection drops, rate limits and 5xx answers may succeed on another try
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Timeout { .. } | Self::Connection { .. } => true,
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::MalformedResponse { .. } | Self::MissingCredential { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_statuses() {
        let rate_limited = ProviderError::Status { provider: "pollinations".into(), status: 429 };
        let server = ProviderError::Status { provider: "pollinations".into(), status: 503 };
        let not_found = ProviderError::Status { provider: "pollinations".into(), status: 404 };

        assert!(rate_limited.is_transient());
        assert!(server.is_transient());
        assert!(!not_found.is_transient());
        assert!(!ProviderError::MissingCredential { provider: "gemini".into() }.is_transient());
    }

    #[test]
    fn test_export_failure_is_not_recoverable() {
        let err: CompositorError = StyleError::ExportFailed {
            path: "/readonly/pin.png".into(),
            reason: "permission denied".into(),
        }
        .into();

        assert!(!err.is_recoverable());
        assert!(err.user_message().contains("/readonly/pin.png"));
    }

    #[test]
    fn test_missing_config_message() {
        let err: CompositorError = ConfigError::FileNotFound { path: "pins.toml".into() }.into();
        assert_eq!(err.user_message(), "Configuration file 'pins.toml' not found.");
    }
}
