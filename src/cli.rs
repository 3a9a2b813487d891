//! Command-line argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::error::DriftError;
use crate::noise::NoiseKind;
use crate::params::{random_seed, RecordingConfig, SceneConfig};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "bubbledrift")]
#[command(about = "Noise-driven drifting bubble animation", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Scene file (JSON) with drift parameters, seed, and bubble layout
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Noise seed, overriding the scene file (any real number)
    #[arg(long, value_name = "SEED", global = true, allow_negative_numbers = true)]
    pub seed: Option<f64>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Animate live and print the final transforms
    Run {
        /// How long to animate (seconds)
        #[arg(long, value_name = "SECONDS", default_value_t = 3.0)]
        seconds: f32,

        /// Target frame rate
        #[arg(long, default_value_t = 60.0)]
        fps: f64,
    },

    /// Render frames to PNG plus a raw instance dump
    Record {
        /// Duration to record (seconds)
        #[arg(long, value_name = "SECONDS")]
        seconds: f32,

        /// Frames per recorded second
        #[arg(long, default_value_t = 60)]
        fps: u32,

        /// Output directory
        #[arg(long, value_name = "DIR", default_value = "recording")]
        output: PathBuf,
    },

    /// Write a grayscale noise heightmap
    NoiseMap {
        /// Noise function to sample
        #[arg(long, value_enum, default_value_t = NoiseKind::Simplex2)]
        kind: NoiseKind,

        /// Noise frequency (spatial scale)
        #[arg(long, default_value_t = 0.05)]
        frequency: f64,

        /// Output image size (width = height)
        #[arg(long, default_value_t = 256)]
        size: u32,

        /// Output file path
        #[arg(long, default_value = "noise.png")]
        output: PathBuf,
    },
}

impl Args {
    /// Load the scene file (or the stock scene) and apply the seed override
    pub fn load_scene(&self) -> Result<SceneConfig, DriftError> {
        let mut scene = match &self.config {
            Some(path) => {
                println!("Scene: {}", path.display());
                SceneConfig::load(path)?
            }
            None => SceneConfig::default(),
        };
        if self.seed.is_some() {
            scene.seed = self.seed;
        }
        Ok(scene)
    }

    /// Seed for a standalone noise engine: `--seed`, then the scene's seed,
    /// then a random one
    pub fn noise_seed(&self) -> Result<f64, DriftError> {
        let scene = self.load_scene()?;
        Ok(scene
            .seed
            .unwrap_or_else(|| random_seed(&mut rand::thread_rng())))
    }

    /// Create recording configuration if recording mode is selected
    pub fn create_recording_config(&self) -> Option<RecordingConfig> {
        match &self.command {
            Command::Record {
                seconds,
                fps,
                output,
            } => {
                let mut config = RecordingConfig::new(*seconds);
                config.fps = *fps;
                config.output_dir = output.clone();
                Some(config)
            }
            _ => None,
        }
    }
}
