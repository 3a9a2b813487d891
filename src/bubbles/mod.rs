//! Horizontally drifting bubbles with simplex-noise jitter.

mod entity;
mod field;

// Re-export public types
pub use entity::Bubble;
pub use field::BubbleField;
