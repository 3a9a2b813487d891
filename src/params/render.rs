//! Rendering and recording configuration.

use std::path::PathBuf;

/// Software rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Image width (pixels)
    pub width: u32,

    /// Image height (pixels)
    pub height: u32,

    /// Radius of a bubble at scale 1.0 (pixels)
    pub bubble_radius_px: f32,

    /// Background fill (RGBA)
    pub background: [u8; 4],

    /// Bubble fill (RGBA, alpha blended over the background)
    pub bubble_color: [u8; 4],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 480,
            bubble_radius_px: 38.0,
            background: [246, 248, 252, 255],
            bubble_color: [80, 102, 240, 96], // Translucent brand blue
        }
    }
}

/// Recording mode configuration
#[derive(Debug, Clone)]
pub struct RecordingConfig {
    /// Duration to record (seconds)
    pub duration_secs: f32,

    /// Output directory for frames and instance dump
    pub output_dir: PathBuf,

    /// Frame rate (FPS)
    pub fps: u32,
}

impl RecordingConfig {
    pub fn new(duration_secs: f32) -> Self {
        Self {
            duration_secs,
            output_dir: PathBuf::from("recording"),
            fps: 60,
        }
    }

    /// Total number of frames to capture
    pub fn total_frames(&self) -> usize {
        (self.duration_secs * self.fps as f32).ceil() as usize
    }

    /// Frame directory path
    pub fn frames_dir(&self) -> PathBuf {
        self.output_dir.join("frames")
    }

    /// Path of a single numbered frame
    pub fn frame_path(&self, frame: usize) -> PathBuf {
        self.frames_dir().join(format!("frame_{:05}.png", frame))
    }

    /// Raw instance dump path
    pub fn instances_path(&self) -> PathBuf {
        self.output_dir.join("instances.bin")
    }
}
