//! Scene description: bubble layout, drift parameters, and noise seed.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::drift::DriftParams;
use crate::error::DriftError;

fn unit_scale() -> f64 {
    1.0
}

/// Initial placement of one bubble
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntitySpec {
    /// Base x position (pixels)
    pub x: f64,

    /// Base y position (pixels, never drifts)
    pub y: f64,

    /// Scale factor, serialized as `s`
    #[serde(rename = "s", default = "unit_scale")]
    pub scale: f64,
}

impl EntitySpec {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, scale: 1.0 }
    }

    pub fn scaled(x: f64, y: f64, scale: f64) -> Self {
        Self { x, y, scale }
    }
}

/// The stock landing-page layout: 11 small, 11 medium, 11 full-size bubbles.
pub fn landing_bubbles() -> Vec<EntitySpec> {
    const SMALL: [(f64, f64); 11] = [
        (1134.0, 45.0),
        (1620.0, 271.0),
        (1761.0, 372.0),
        (2499.0, 79.0),
        (2704.0, 334.0),
        (2271.0, 356.0),
        (795.0, 226.0),
        (276.0, 256.0),
        (1210.0, 365.0),
        (444.0, 193.0),
        (2545.0, 387.0),
    ];
    const MEDIUM: [(f64, f64); 11] = [
        (1303.0, 193.0),
        (907.0, 88.0),
        (633.0, 320.0),
        (323.0, 60.0),
        (129.0, 357.0),
        (1440.0, 342.0),
        (1929.0, 293.0),
        (2135.0, 198.0),
        (2276.0, 82.0),
        (2654.0, 182.0),
        (2783.0, 60.0),
    ];
    const FULL: [(f64, f64); 11] = [
        (1519.0, 118.0),
        (1071.0, 233.0),
        (1773.0, 148.0),
        (2098.0, 385.0),
        (2423.0, 244.0),
        (901.0, 385.0),
        (624.0, 111.0),
        (75.0, 103.0),
        (413.0, 367.0),
        (2895.0, 271.0),
        (1990.0, 75.0),
    ];

    let small = SMALL.iter().map(|&(x, y)| EntitySpec::scaled(x, y, 0.6));
    let medium = MEDIUM.iter().map(|&(x, y)| EntitySpec::scaled(x, y, 0.8));
    let full = FULL.iter().map(|&(x, y)| EntitySpec::new(x, y));
    small.chain(medium).chain(full).collect()
}

/// Complete scene configuration, loadable from JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Motion tunables
    #[serde(default)]
    pub params: DriftParams,

    /// Noise seed; a random one is drawn when absent
    #[serde(default)]
    pub seed: Option<f64>,

    /// Bubble layout in z-order
    #[serde(default = "landing_bubbles")]
    pub bubbles: Vec<EntitySpec>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            params: DriftParams::default(),
            seed: None,
            bubbles: landing_bubbles(),
        }
    }
}

impl SceneConfig {
    /// Save the scene to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DriftError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load and validate a scene from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DriftError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Parse and validate a scene from JSON text.
    pub fn from_json(json: &str) -> Result<Self, DriftError> {
        let scene: Self = serde_json::from_str(json)?;
        scene.validate()?;
        Ok(scene)
    }

    /// Validate parameters and bubble specs
    pub fn validate(&self) -> Result<(), DriftError> {
        self.params.validate().map_err(DriftError::Config)?;

        for (index, spec) in self.bubbles.iter().enumerate() {
            if !spec.x.is_finite() || !spec.y.is_finite() {
                return Err(DriftError::Config(format!(
                    "bubble {} has a non-finite position",
                    index
                )));
            }
            if !spec.scale.is_finite() || spec.scale < 0.0 {
                return Err(DriftError::Config(format!(
                    "bubble {} scale must be finite and >= 0, got {}",
                    index, spec.scale
                )));
            }
        }
        Ok(())
    }
}
