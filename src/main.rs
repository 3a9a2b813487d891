//! Bubbledrift - drifting bubbles with simplex-noise jitter
//!
//! Bubbles scroll slowly to the left, wobble on two independent noise
//! phases, and wrap back to the right edge of the canvas.

use std::thread;
use std::time::Duration;

use clap::Parser;

use bubbledrift::cli::{Args, Command};
use bubbledrift::params::RenderConfig;
use bubbledrift::render::{self, FrameRenderer};
use bubbledrift::{BubbleField, FrameLoop, NoiseEngine, StyleSink};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    match &args.command {
        Command::Run { seconds, fps } => {
            let scene = args.load_scene()?;
            let field = BubbleField::from_scene(&scene);
            println!(
                "Animating {} bubbles (seed {}) for {}s",
                field.len(),
                field.engine().seed(),
                seconds
            );

            let sink = StyleSink::new(field.len());
            let handle = FrameLoop::new(*fps).start(field, sink)?;

            let mut remaining = Duration::try_from_secs_f32(*seconds).unwrap_or(Duration::ZERO);
            while !remaining.is_zero() && handle.is_running() {
                let nap = remaining.min(Duration::from_secs(1));
                thread::sleep(nap);
                remaining -= nap;
                println!("  {} frames", handle.frames());
            }

            let (field, sink) = handle.stop()?;
            println!("\nFinal transforms after {} frames:", field.frame());
            for bubble in field.bubbles() {
                if let Some(style) = sink.style(bubble.index()) {
                    println!("  bubble-{:<2} {}", bubble.index() + 1, style);
                }
            }
        }
        Command::Record { .. } => {
            let scene = args.load_scene()?;
            let Some(recording) = args.create_recording_config() else {
                return Ok(());
            };
            let mut field = BubbleField::from_scene(&scene);
            let renderer = FrameRenderer::new(RenderConfig::default());

            println!(
                "Recording {} frames ({}s @ {} fps)",
                recording.total_frames(),
                recording.duration_secs,
                recording.fps
            );
            let summary = render::record(&mut field, &renderer, &recording)?;
            println!(
                "  Output: {} ({} frames, {} instance bytes)",
                recording.output_dir.display(),
                summary.frames,
                summary.instance_bytes
            );
        }
        Command::NoiseMap {
            kind,
            frequency,
            size,
            output,
        } => {
            let seed = args.noise_seed()?;
            println!("Noise map");
            println!("  Kind: {:?}", kind);
            println!("  Seed: {}", seed);
            println!("  Frequency: {}", frequency);
            println!("  Size: {}x{}", size, size);

            let engine = NoiseEngine::new(seed);
            render::noise_map(&engine, *kind, *frequency, *size).save(output)?;
            println!("  Output: {}", output.display());
        }
    }

    Ok(())
}
