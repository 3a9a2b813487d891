//! Bubbledrift library - noise-driven drifting bubble animation

pub mod animation;
pub mod bubbles;
pub mod cli;
pub mod error;
pub mod noise;
pub mod params;
pub mod render;
pub mod sink;

pub use animation::{AnimationHandle, FrameLoop};
pub use bubbles::{Bubble, BubbleField};
pub use error::{DriftError, SinkError};
pub use crate::noise::{build_tables, NoiseEngine, NoiseKind, NoiseTables};
pub use params::{DriftParams, EntitySpec, SceneConfig};
pub use sink::{EntityTransform, InstanceBuffer, StyleSink, TransformSink};
