//! Parameter definitions with units and documented semantics.
//!
//! All tunables of the drift animation live here with:
//! - Units (pixels, pixels per frame, noise-space units)
//! - Defaults matching the stock landing page
//! - Validation for values loaded from scene files

mod drift;
mod render;
mod scene;

// Re-export all types
pub use drift::{random_seed, DriftParams, RANDOM_SEED_RANGE};
pub use render::{RecordingConfig, RenderConfig};
pub use scene::{landing_bubbles, EntitySpec, SceneConfig};
