//! # Composition Engine
//!
//! The composition engine coordinates brief generation, background acquisition,
//! filtering and style application to produce a finished pin on disk.

pub mod engine;
pub mod sidecar;

// Re-exports for convenience
pub use engine::{PinEngine, PinRequest};
pub use sidecar::{sidecar_path, SeoSidecar};
