//! # Pin-Compositor
//!
//! Compose vertical marketing pins from a title, a description and a niche.
//!
//! A render synthesizes a background prompt (optionally refined and briefed by a
//! text-generation service), acquires a background image with retries and
//! fallbacks, applies editorial filters and lays out auto-fitted typography in
//! one of several named styles.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pin_compositor::{
//!     composition::{PinEngine, PinRequest},
//!     config::Config,
//!     providers::Providers,
//! };
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let config = Config::default();
//! let providers = Providers::from_config(&config.providers)?;
//! let engine = PinEngine::new(config, providers)?;
//!
//! let request = PinRequest::new("The 5-minute morning routine", "Start every day focused", "pins/routine.png")
//!     .niche("Health")
//!     .style("neon_whisper");
//! engine.render_pin(&request).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`providers`] - Clients for the text, image, stock-photo and download services
//! - [`prompt`] - Background prompt synthesis and viral hooks
//! - [`brief`] - Design briefs for brief-driven styles
//! - [`acquisition`] - Background retrieval with placeholder rejection and fallbacks
//! - [`canvas`], [`filters`], [`typography`] - Raster primitives
//! - [`styles`] - Named layout strategies
//! - [`composition`] - Main render pipeline
//! - [`config`] - Configuration management
//!
//! ## Creating Custom Styles
//!
//! Custom layouts implement the [`PinStyle`](styles::PinStyle) trait:
//!
//! ```rust,no_run
//! use pin_compositor::canvas::Canvas;
//! use pin_compositor::styles::{PinStyle, StyleContext, StyleRegistry};
//! use pin_compositor::typography::TextBlock;
//! use pin_compositor::Result;
//!
//! struct Headline;
//!
//! impl PinStyle for Headline {
//!     fn name(&self) -> &str {
//!         "headline"
//!     }
//!
//!     fn description(&self) -> &str {
//!         "Just the headline"
//!     }
//!
//!     fn compose(&self, canvas: &mut Canvas, context: &StyleContext<'_>) -> Result<()> {
//!         let center = (canvas.width() / 2) as i32;
//!         let block = TextBlock::centered(context.headline(), (center, 200), 90.0, 900, context.palette.text);
//!         context.typesetter.layout_text(canvas, &block);
//!         Ok(())
//!     }
//! }
//!
//! let mut registry = StyleRegistry::new();
//! registry.register("headline", || Box::new(Headline));
//! ```

pub mod acquisition;
pub mod brief;
pub mod canvas;
pub mod composition;
pub mod config;
pub mod error;
pub mod filters;
pub mod palette;
pub mod prompt;
pub mod providers;
pub mod styles;
pub mod typography;

// Re-export commonly used types for convenience
pub use crate::{
    composition::{PinEngine, PinRequest},
    config::Config,
    error::{CompositorError, Result},
    providers::Providers,
    styles::{PinStyle, StyleRegistry},
};
