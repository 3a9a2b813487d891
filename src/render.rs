//! Software rendering of bubble frames and noise heightmaps.

use std::fs::{self, File};
use std::io::{BufWriter, Write};

use image::{GrayImage, Luma, Rgba, RgbaImage};
use log::info;

use crate::bubbles::BubbleField;
use crate::error::DriftError;
use crate::noise::{NoiseEngine, NoiseKind};
use crate::params::{RecordingConfig, RenderConfig};
use crate::sink::{EntityTransform, InstanceBuffer};

/// Rasterizes bubble transforms into RGBA frames
pub struct FrameRenderer {
    config: RenderConfig,
}

impl FrameRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render the field's current transforms, back to front
    pub fn render(&self, field: &BubbleField) -> RgbaImage {
        let mut img = RgbaImage::from_pixel(
            self.config.width,
            self.config.height,
            Rgba(self.config.background),
        );
        for transform in field.transforms() {
            self.draw_bubble(&mut img, &transform);
        }
        img
    }

    /// Draw one bubble as an anti-aliased disc
    ///
    /// The translate moves the element's top-left corner and scaling happens
    /// about the element center, so the disc is centered one unscaled radius
    /// in from the translate.
    fn draw_bubble(&self, img: &mut RgbaImage, transform: &EntityTransform) {
        let base_radius = self.config.bubble_radius_px;
        let radius = base_radius * transform.scale as f32;
        if radius <= 0.0 {
            return;
        }
        let cx = transform.translate.x as f32 + base_radius;
        let cy = transform.translate.y as f32 + base_radius;

        let (width, height) = img.dimensions();
        let x_min = (cx - radius - 1.0).floor().max(0.0) as u32;
        let y_min = (cy - radius - 1.0).floor().max(0.0) as u32;
        let x_max = ((cx + radius + 1.0).ceil().max(0.0) as u32).min(width);
        let y_max = ((cy + radius + 1.0).ceil().max(0.0) as u32).min(height);

        let [r, g, b, a] = self.config.bubble_color;
        let alpha = a as f32 / 255.0;

        for y in y_min..y_max {
            for x in x_min..x_max {
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                let distance = (dx * dx + dy * dy).sqrt();

                // Coverage ramps over one pixel at the rim
                let coverage = (radius + 0.5 - distance).clamp(0.0, 1.0);
                if coverage <= 0.0 {
                    continue;
                }
                let weight = coverage * alpha;
                let pixel = img.get_pixel_mut(x, y);
                for (channel, source) in pixel.0.iter_mut().take(3).zip([r, g, b]) {
                    *channel = blend(*channel, source, weight);
                }
                pixel.0[3] = pixel.0[3].max((weight * 255.0).round() as u8);
            }
        }
    }
}

fn blend(dst: u8, src: u8, weight: f32) -> u8 {
    (dst as f32 * (1.0 - weight) + src as f32 * weight).round() as u8
}

/// Summary of a finished recording
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingSummary {
    pub frames: usize,
    pub instance_bytes: u64,
}

/// Step `field` for the configured duration, saving every frame as PNG
///
/// Every frame's instance records are appended to `instances.bin`.
pub fn record(
    field: &mut BubbleField,
    renderer: &FrameRenderer,
    recording: &RecordingConfig,
) -> Result<RecordingSummary, DriftError> {
    fs::create_dir_all(recording.frames_dir())?;
    let mut dump = BufWriter::new(File::create(recording.instances_path())?);
    let mut instances = InstanceBuffer::new();

    let total = recording.total_frames();
    let mut instance_bytes = 0u64;
    info!(
        "Recording {} frames to {}",
        total,
        recording.output_dir.display()
    );

    for frame in 0..total {
        field.update(&mut instances)?;
        renderer.render(field).save(recording.frame_path(frame))?;

        let bytes = instances.as_bytes();
        dump.write_all(bytes)?;
        instance_bytes += bytes.len() as u64;

        if (frame + 1) % recording.fps.max(1) as usize == 0 {
            info!("Recorded {}/{} frames", frame + 1, total);
        }
    }
    dump.flush()?;

    Ok(RecordingSummary {
        frames: total,
        instance_bytes,
    })
}

/// Grayscale heightmap of `kind`, mapping [-1, 1] to 0..=255
pub fn noise_map(engine: &NoiseEngine, kind: NoiseKind, frequency: f64, size: u32) -> GrayImage {
    let mut img = GrayImage::new(size, size);
    for y in 0..size {
        for x in 0..size {
            let value = kind.sample(engine, x as f64 * frequency, y as f64 * frequency);
            let gray = ((value + 1.0) * 127.5).clamp(0.0, 255.0) as u8;
            img.put_pixel(x, y, Luma([gray]));
        }
    }
    img
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{DriftParams, EntitySpec};
    use glam::DVec2;

    fn still_params() -> DriftParams {
        DriftParams {
            scroll_speed: 0.0,
            noise_amount: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_render_draws_bubble_center() {
        let config = RenderConfig {
            width: 200,
            height: 100,
            ..Default::default()
        };
        let background = config.background;
        let radius = config.bubble_radius_px;
        let renderer = FrameRenderer::new(config);

        let mut field = BubbleField::new(
            &[EntitySpec::new(20.0, 10.0)],
            still_params(),
            NoiseEngine::default(),
        );
        field.step();
        let img = renderer.render(&field);

        let center = (20.0 + radius) as u32;
        assert_ne!(img.get_pixel(center, (10.0 + radius) as u32).0, background);
        assert_eq!(img.get_pixel(199, 99).0, background);
    }

    #[test]
    fn test_render_clips_offscreen_bubbles() {
        let renderer = FrameRenderer::new(RenderConfig::default());
        let mut field = BubbleField::new(
            &[EntitySpec::new(-500.0, -500.0), EntitySpec::new(5000.0, 10.0)],
            still_params(),
            NoiseEngine::default(),
        );
        field.step();
        let img = renderer.render(&field);
        let background = renderer.config().background;
        assert!(img.pixels().all(|p| p.0 == background));
    }

    #[test]
    fn test_zero_scale_draws_nothing() {
        let renderer = FrameRenderer::new(RenderConfig::default());
        let mut img = RgbaImage::from_pixel(64, 64, Rgba(renderer.config().background));
        let transform = EntityTransform {
            translate: DVec2::new(10.0, 10.0),
            scale: 0.0,
        };
        renderer.draw_bubble(&mut img, &transform);
        let background = renderer.config().background;
        assert!(img.pixels().all(|p| p.0 == background));
    }

    #[test]
    fn test_noise_map_matches_engine() {
        let engine = NoiseEngine::new(42.0);
        let img = noise_map(&engine, NoiseKind::Perlin2, 0.5, 8);
        assert_eq!(img.dimensions(), (8, 8));
        // perlin2 is zero on lattice points, which maps to mid gray
        assert_eq!(img.get_pixel(0, 0).0, [127]);
        assert_eq!(img.get_pixel(2, 4).0, [127]);
    }

    #[test]
    fn test_record_writes_frames_and_instances() {
        let mut recording = RecordingConfig::new(0.05);
        recording.fps = 40;
        recording.output_dir =
            std::env::temp_dir().join(format!("bubbledrift-record-{}", std::process::id()));
        let renderer = FrameRenderer::new(RenderConfig {
            width: 64,
            height: 32,
            ..Default::default()
        });
        let mut field = BubbleField::new(
            &[EntitySpec::new(10.0, 5.0), EntitySpec::scaled(30.0, 5.0, 0.5)],
            DriftParams::default(),
            NoiseEngine::new(1.0),
        );

        let summary = record(&mut field, &renderer, &recording).unwrap();
        assert_eq!(summary.frames, 2);
        assert_eq!(summary.instance_bytes, 2 * 2 * 16);
        assert!(recording.frame_path(1).exists());
        let dump = fs::metadata(recording.instances_path()).unwrap();
        assert_eq!(dump.len(), summary.instance_bytes);

        let _ = fs::remove_dir_all(&recording.output_dir);
    }
}
