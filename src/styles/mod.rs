//! # Pin Style System
//!
//! Each style is a self-contained layout strategy sharing the canvas,
//! typography and filter primitives. The engine asks a style for its
//! background plan, prepares the canvas, then lets it compose.
//!
//! ## Built-in Styles
//!
//! - **designer**: Frosted glass card with headline, subtitle and button
//! - **studio**: Brief-driven card; writes an SEO sidecar
//! - **trend_aligned**: Brief-driven lower-third in a trending aesthetic
//! - **aspiration**: Lifestyle photo split above a solid text block
//! - **visionary**: Double exposure of two generated backgrounds
//! - **neon_whisper**: Mirrored reflection under a glowing headline
//! - **money_maker**: Giant income callout badge
//! - **viral_mashup**: "How {trend} would solve this" banner
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pin_compositor::styles::StyleRegistry;
//!
//! let registry = StyleRegistry::new();
//! let style = registry.resolve("viral_lifestyle");
//! assert_eq!(style.name(), "aspiration");
//! ```

pub mod decor;
pub mod registry;
pub mod traits;

mod aspiration;
mod designer;
mod money_maker;
mod neon_whisper;
mod studio;
mod trend_aligned;
mod viral_mashup;
mod visionary;

pub use registry::{StyleRegistry, DEFAULT_STYLE};
pub use traits::{
    BackgroundPlan, ConfigValue, DepthTreatment, PinContent, PinStyle, StyleConfig, StyleContext,
    StyleMetadata,
};

pub use aspiration::AspirationStyle;
pub use designer::DesignerStyle;
pub use money_maker::MoneyMakerStyle;
pub use neon_whisper::NeonWhisperStyle;
pub use studio::StudioStyle;
pub use trend_aligned::TrendAlignedStyle;
pub use viral_mashup::ViralMashupStyle;
pub use visionary::VisionaryStyle;
