//! Error types for bubbledrift.
//!
//! Noise sampling and simulation steps cannot fail. Errors come from writing
//! transforms to a visual target, loading configuration, and rendering I/O.

use std::fmt;

/// Errors raised by a [`TransformSink`](crate::sink::TransformSink).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkError {
    /// The entity's visual target was removed.
    Detached(usize),
    /// The sink has no slot for this entity.
    UnknownEntity(usize),
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkError::Detached(index) => write!(f, "Visual target of bubble {} is detached", index),
            SinkError::UnknownEntity(index) => write!(f, "No visual target for bubble {}", index),
        }
    }
}

impl std::error::Error for SinkError {}

/// Top-level error type.
#[derive(Debug)]
pub enum DriftError {
    /// Writing a transform failed.
    Sink(SinkError),
    /// Configuration is invalid.
    Config(String),
    /// File or thread I/O failed.
    Io(std::io::Error),
    /// Scene file is not valid JSON.
    Json(serde_json::Error),
    /// Encoding or saving an image failed.
    Image(image::ImageError),
    /// The frame loop thread panicked.
    LoopPanicked,
}

impl fmt::Display for DriftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriftError::Sink(e) => write!(f, "Failed to write transform: {}", e),
            DriftError::Config(msg) => write!(f, "Invalid configuration: {}", msg),
            DriftError::Io(e) => write!(f, "I/O error: {}", e),
            DriftError::Json(e) => write!(f, "Failed to parse scene file: {}", e),
            DriftError::Image(e) => write!(f, "Failed to write image: {}", e),
            DriftError::LoopPanicked => write!(f, "Frame loop thread panicked"),
        }
    }
}

impl std::error::Error for DriftError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DriftError::Sink(e) => Some(e),
            DriftError::Io(e) => Some(e),
            DriftError::Json(e) => Some(e),
            DriftError::Image(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SinkError> for DriftError {
    fn from(e: SinkError) -> Self {
        DriftError::Sink(e)
    }
}

impl From<std::io::Error> for DriftError {
    fn from(e: std::io::Error) -> Self {
        DriftError::Io(e)
    }
}

impl From<serde_json::Error> for DriftError {
    fn from(e: serde_json::Error) -> Self {
        DriftError::Json(e)
    }
}

impl From<image::ImageError> for DriftError {
    fn from(e: image::ImageError) -> Self {
        DriftError::Image(e)
    }
}
